use serde::{Deserialize, Serialize};

/// A point in normalized frame coordinates, x and y in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormPoint {
    pub x: f32,
    pub y: f32,
}

impl NormPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn in_unit_square(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// User-positioned sampling region: a rectangle of `width` centered on the
/// segment from `low` to `high`, rotated to the segment's angle.
///
/// Owned by the UI collaborator and recomputed whenever an endpoint or the
/// width slider moves; the sampler only reads it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReaderBox {
    pub low: NormPoint,
    pub high: NormPoint,
    /// Rectangle width in normalized units (fraction of frame extent).
    pub width: f32,
}

impl ReaderBox {
    pub fn new(low: NormPoint, high: NormPoint, width: f32) -> Self {
        Self { low, high, width }
    }

    /// Length of the sampling segment, in normalized units.
    pub fn length(&self) -> f32 {
        let dx = self.high.x - self.low.x;
        let dy = self.high.y - self.low.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of the sampling segment from horizontal, in degrees.
    pub fn angle_degrees(&self) -> f32 {
        let dx = self.high.x - self.low.x;
        let dy = self.high.y - self.low.y;
        dy.atan2(dx).to_degrees()
    }

    /// The four rectangle corners: an axis-aligned base rectangle spanning
    /// the segment length, rotated to the segment angle and translated to
    /// `low`. Order: (low-side bottom, low-side top, high-side bottom,
    /// high-side top).
    pub fn corners(&self) -> [NormPoint; 4] {
        let len = self.length();
        let half = self.width / 2.0;
        let base = [
            (0.0, -half),
            (0.0, half),
            (len, -half),
            (len, half),
        ];

        let theta = self.angle_degrees().to_radians();
        let (sin, cos) = theta.sin_cos();
        base.map(|(x, y)| NormPoint {
            x: x * cos - y * sin + self.low.x,
            y: x * sin + y * cos + self.low.y,
        })
    }

    /// Whether the box can be sampled: a non-degenerate segment whose four
    /// corners all lie inside the unit square. Invalidity is reported, not
    /// thrown; downstream sampling simply skips the frame.
    pub fn is_valid(&self) -> bool {
        self.length() > 0.0 && self.corners().iter().all(NormPoint::in_unit_square)
    }
}
