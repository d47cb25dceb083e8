use crate::color::convert;
use crate::color::point::XyPoint;

/// Power characteristic payload.
pub fn power(on: bool) -> [u8; 1] {
    [if on { 0x01 } else { 0x00 }]
}

/// Brightness characteristic payload. `percent` in [0,100] maps onto the
/// firmware's 1..=254 range; 0xfe is full brightness, 0x00 is not a
/// valid level so the floor is 1.
pub fn brightness(percent: f32) -> [u8; 1] {
    let level = (percent / 100.0 * 254.0).round() as u8;
    [level.clamp(1, 254)]
}

/// Color temperature payload: kelvin / 10 as a little-endian u16, the
/// unit the firmware was observed to accept.
pub fn color_temp(kelvin: u32) -> [u8; 2] {
    ((kelvin / 10) as u16).to_le_bytes()
}

/// Color characteristic payload, the scaled xy pair. The caller is
/// responsible for clamping `p` into the device gamut first.
pub fn color_xy(p: XyPoint) -> [u8; 4] {
    convert::xy_to_wire(p)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_power() {
        assert_eq!(power(true), [0x01]);
        assert_eq!(power(false), [0x00]);
    }

    #[test]
    fn test_brightness_scale() {
        assert_eq!(brightness(100.0), [0xfe]);
        assert_eq!(brightness(20.0), [0x33]);
        assert_eq!(brightness(0.0), [0x01]);
    }

    #[test]
    fn test_color_temp_unit() {
        assert_eq!(color_temp(6500), [0x8a, 0x02]);
        assert_eq!(color_temp(2700), [0x0e, 0x01]);
    }

    #[test]
    fn test_color_payload_layout() {
        let payload = color_xy(XyPoint::new(1.0, 0.0));
        assert_eq!(payload, [0xff, 0xff, 0x00, 0x00]);
    }
}
