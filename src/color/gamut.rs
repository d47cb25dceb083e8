use super::point::XyPoint;

/// The triangle of chromaticities a bulb can actually reproduce, given by
/// its three primary vertices.
///
/// Which gamut a particular firmware uses is configuration, see
/// [`GAMUT_B`] and [`GAMUT_C`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gamut {
    pub red: XyPoint,
    pub green: XyPoint,
    pub blue: XyPoint,
}

/// Gamut of the older color bulbs (Hue gen 1 class).
pub const GAMUT_B: Gamut = Gamut {
    red: XyPoint::new(0.675, 0.322),
    green: XyPoint::new(0.4091, 0.518),
    blue: XyPoint::new(0.167, 0.04),
};

/// Gamut of the current color bulbs. Vertices as measured for the test
/// lamp, close to the published Gamut C primaries.
pub const GAMUT_C: Gamut = Gamut {
    red: XyPoint::new(0.6915, 0.3038),
    green: XyPoint::new(0.17, 0.7),
    blue: XyPoint::new(0.1532, 0.0475),
};

impl Gamut {
    /// Barycentric membership test, boundary inclusive.
    ///
    /// A degenerate triangle (zero area) contains nothing; callers fall
    /// through to [`Gamut::closest_on_boundary`] instead of dividing by
    /// zero here.
    pub fn contains(&self, p: XyPoint) -> bool {
        let denom = (self.green.y - self.blue.y) * (self.red.x - self.blue.x)
            + (self.blue.x - self.green.x) * (self.red.y - self.blue.y);
        if denom.abs() < f32::EPSILON {
            return false;
        }
        let lambda1 = ((self.green.y - self.blue.y) * (p.x - self.blue.x)
            + (self.blue.x - self.green.x) * (p.y - self.blue.y))
            / denom;
        let lambda2 = ((self.blue.y - self.red.y) * (p.x - self.blue.x)
            + (self.red.x - self.blue.x) * (p.y - self.blue.y))
            / denom;
        let lambda3 = 1.0 - lambda1 - lambda2;
        (0.0..=1.0).contains(&lambda1)
            && (0.0..=1.0).contains(&lambda2)
            && (0.0..=1.0).contains(&lambda3)
    }

    /// Nearest point on the triangle outline to `p`.
    ///
    /// Projects onto all three edges and keeps the closest projection.
    /// Ties go to the first edge checked (red-green, green-blue,
    /// blue-red order) so the result is reproducible.
    pub fn closest_on_boundary(&self, p: XyPoint) -> XyPoint {
        let on_rg = closest_on_segment(p, self.red, self.green);
        let on_gb = closest_on_segment(p, self.green, self.blue);
        let on_br = closest_on_segment(p, self.blue, self.red);

        let d_rg = p.distance(&on_rg);
        let d_gb = p.distance(&on_gb);
        let d_br = p.distance(&on_br);

        if d_rg <= d_gb && d_rg <= d_br {
            on_rg
        } else if d_gb <= d_br {
            on_gb
        } else {
            on_br
        }
    }

    /// `p` unchanged if reproducible, otherwise the nearest reproducible
    /// chromaticity.
    pub fn clamp(&self, p: XyPoint) -> XyPoint {
        if self.contains(p) {
            p
        } else {
            self.closest_on_boundary(p)
        }
    }
}

/// Orthogonal projection of `p` onto the segment `a`-`b`, with the
/// projection parameter clamped to the segment. A zero-length segment
/// projects everything onto its single point.
fn closest_on_segment(p: XyPoint, a: XyPoint, b: XyPoint) -> XyPoint {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 <= f32::EPSILON {
        return a;
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    XyPoint::new(a.x + t * dx, a.y + t * dy)
}
