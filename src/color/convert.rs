use super::gamut::Gamut;
use super::point::{XyColor, XyPoint};

/// Scale factor for the fixed point xy encoding on the wire.
pub const WIRE_SCALE: f32 = 65535.0;

/// Reverse the sRGB gamma encoding of one channel, input and output in
/// [0,1]. Values at or below 0.04045 take the linear branch. The two
/// branches agree at the threshold to within float rounding.
fn srgb_decode(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert an 8 bit sRGB triplet to a chromaticity the bulb can
/// reproduce, plus the luminance of the requested color.
///
/// Pipeline: normalize, gamma decode, linear RGB to CIE XYZ, project to
/// xy, clamp into `gamut`. Black is special: X+Y+Z is zero so there is
/// no chromaticity to normalize, and the conventional (0, 0) is returned
/// unclamped. The lamp emits nothing at brightness zero so the point is
/// never rendered.
pub fn rgb_to_xy(r: u8, g: u8, b: u8, gamut: &Gamut) -> XyColor {
    let r = srgb_decode(r as f32 / 255.0);
    let g = srgb_decode(g as f32 / 255.0);
    let b = srgb_decode(b as f32 / 255.0);

    let x = 0.4124 * r + 0.3576 * g + 0.1805 * b;
    let y = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    let z = 0.0193 * r + 0.1192 * g + 0.9505 * b;

    let sum = x + y + z;
    if sum == 0.0 {
        return XyColor::new(XyPoint::new(0.0, 0.0), 0.0);
    }
    let xy = XyPoint::new(x / sum, y / sum);
    XyColor::new(gamut.clamp(xy), y)
}

/// Fixed point wire encoding of a chromaticity: each axis scaled by
/// 0xFFFF, truncated, as a little-endian u16. Payload layout is x low,
/// x high, y low, y high.
pub fn xy_to_wire(p: XyPoint) -> [u8; 4] {
    let x = wire_scale(p.x).to_le_bytes();
    let y = wire_scale(p.y).to_le_bytes();
    [x[0], x[1], y[0], y[1]]
}

fn wire_scale(v: f32) -> u16 {
    // Truncating cast, 0.5 maps to 32767
    (v.clamp(0.0, 1.0) * WIRE_SCALE) as u16
}
