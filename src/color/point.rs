/// A position in the CIE 1931 chromaticity plane.
///
/// Both coordinates are nominally in [0,1]. Values are never mutated in
/// place, transforms return a new point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XyPoint {
    pub x: f32,
    pub y: f32,
}

impl XyPoint {
    pub const fn new(x: f32, y: f32) -> XyPoint {
        XyPoint { x, y }
    }

    pub fn distance(&self, other: &XyPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Chromaticity together with the CIE Y channel it was derived from.
///
/// The brightness is kept separate from the wire encoding of the xy pair,
/// the bulb has a dedicated brightness characteristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XyColor {
    pub xy: XyPoint,
    pub brightness: f32,
}

impl XyColor {
    pub const fn new(xy: XyPoint, brightness: f32) -> XyColor {
        XyColor { xy, brightness }
    }
}

#[cfg(test)]
mod test {
    use super::XyPoint;

    #[test]
    fn test_distance() {
        let a = XyPoint::new(0.0, 0.0);
        let b = XyPoint::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
        assert_eq!(a.distance(&a), 0.0);
    }
}
