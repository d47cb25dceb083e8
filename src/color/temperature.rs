use super::point::XyPoint;

// Algorithm from:
// Bongsoon Kang; Ohak Moon; Changhee Hong; Honam Lee; Bonghwan Cho; Youngsun Kim (December 2002).
// "Design of Advanced Color Temperature Control System for HDTV Applications"
// Equations 8 and 9

/// Chromaticity of a black body radiator at the given correlated color
/// temperature. The approximation is valid for 1667 K to 25000 K.
pub fn cct_to_xy(kelvin: u32) -> XyPoint {
    let t = kelvin as f32;
    let t2 = t * t;
    let t3 = t2 * t;
    let x = if kelvin < 4000 {
        -0.2661239e9 / t3 - 0.2343589e6 / t2 + 0.8776956e3 / t + 0.179910
    } else {
        -3.0258469e9 / t3 + 2.1070379e6 / t2 + 0.2226347e3 / t + 0.24039
    };
    let x2 = x * x;
    let x3 = x2 * x;
    let y = if kelvin < 2222 {
        -1.1063814 * x3 - 1.34811020 * x2 + 2.18555832 * x - 0.20219683
    } else if kelvin < 4000 {
        -0.9549476 * x3 - 1.37418593 * x2 + 2.09137015 * x - 0.16748867
    } else {
        3.0817580 * x3 - 5.8733867 * x2 + 3.75112997 * x - 0.37001483
    };
    XyPoint::new(x, y)
}

#[cfg(test)]
mod test {
    use super::super::point::XyPoint;
    use super::cct_to_xy;

    #[test]
    fn test_d65_neighborhood() {
        // 6500 K is close to the D65 white point
        let p = cct_to_xy(6500);
        assert!(p.distance(&XyPoint::new(0.3127, 0.3290)) < 0.01);
    }

    #[test]
    fn test_warm_white() {
        let p = cct_to_xy(2700);
        assert!(p.distance(&XyPoint::new(0.4599, 0.4106)) < 0.01);
    }

    #[test]
    fn test_monotonic_in_x() {
        // Warmer light sits further toward red
        let warm = cct_to_xy(2200);
        let neutral = cct_to_xy(4000);
        let cold = cct_to_xy(6500);
        assert!(warm.x > neutral.x);
        assert!(neutral.x > cold.x);
    }
}
