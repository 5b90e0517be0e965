#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Segment {
    pub src: Point,
    pub dst: Point,
}

impl Segment {
    pub fn midpoint(&self) -> Point {
        Point {
            x: (self.src.x + self.dst.x) / 2.,
            y: (self.src.y + self.dst.y) / 2.,
        }
    }
}

/// Axis-aligned extents of a set of points.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn from_points<I>(points: I) -> Option<Bounds> where I: IntoIterator<Item = Point> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Bounds { min: first, max: first, };
        for Point { x, y, } in points {
            bounds.min.x = bounds.min.x.min(x);
            bounds.min.y = bounds.min.y.min(y);
            bounds.max.x = bounds.max.x.max(x);
            bounds.max.y = bounds.max.y.max(y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Segment { src: self.min, dst: self.max, }.midpoint()
    }

    /// Grows each side by `ratio` of the span on that axis. A degenerate
    /// axis is widened to a unit span around its center, or more when the
    /// coordinate is too large for a unit step to register.
    pub fn padded(&self, ratio: f64) -> Bounds {
        let pad = |lo: f64, hi: f64| {
            let span = hi - lo;
            if span > 0. {
                (lo - span * ratio, hi + span * ratio)
            } else {
                let half = 0.5f64.max(lo.abs() * 1e-9);
                (lo - half, hi + half)
            }
        };
        let (min_x, max_x) = pad(self.min.x, self.max.x);
        let (min_y, max_y) = pad(self.min.y, self.max.y);
        Bounds {
            min: Point { x: min_x, y: min_y, },
            max: Point { x: max_x, y: max_y, },
        }
    }
}
