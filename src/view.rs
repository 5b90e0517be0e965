use common::{Point, Bounds};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 100.;

/// Screen rectangle in pixels, `y` growing downwards.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Frame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains(&self, [x, y]: [f64; 2]) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// Maps plot coordinates onto a frame with the same scale on both axes.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Viewport {
    pub frame: Frame,
    pub center: Point,
    pub scale: f64,
}

impl Viewport {
    pub fn fit(bounds: &Bounds, frame: Frame, zoom: f64) -> Viewport {
        let scale = (frame.width / bounds.width()).min(frame.height / bounds.height());
        let scale = if scale.is_finite() && scale > 0. { scale } else { 1. };
        Viewport {
            frame,
            center: bounds.center(),
            scale: scale * clamp_zoom(zoom),
        }
    }

    pub fn to_screen(&self, Point { x, y, }: Point) -> [f64; 2] {
        [
            self.frame.left + self.frame.width / 2. + (x - self.center.x) * self.scale,
            self.frame.top + self.frame.height / 2. - (y - self.center.y) * self.scale,
        ]
    }

    /// Plot coordinates covered by the whole frame.
    pub fn visible(&self) -> Bounds {
        let half_w = self.frame.width / 2. / self.scale;
        let half_h = self.frame.height / 2. / self.scale;
        Bounds {
            min: Point { x: self.center.x - half_w, y: self.center.y - half_h, },
            max: Point { x: self.center.x + half_w, y: self.center.y + half_h, },
        }
    }
}

pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.max(MIN_ZOOM).min(MAX_ZOOM)
}

/// Grid tick positions within `[lo, hi]`, spaced by 1, 2 or 5 times a power of ten,
/// giving roughly `target` intervals.
pub fn ticks(lo: f64, hi: f64, target: usize) -> (f64, Vec<f64>) {
    let span = hi - lo;
    if !span.is_finite() || span <= 0. || target == 0 {
        return (0., Vec::new());
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let step = match raw / magnitude {
        n if n < 1.5 => 1.,
        n if n < 3. => 2.,
        n if n < 7. => 5.,
        _ => 10.,
    } * magnitude;
    if !(step > 0.) || !(lo / step).is_finite() || !(hi / step).is_finite() {
        return (0., Vec::new());
    }

    let first = (lo / step - 1e-9).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    let values = (first ..= last)
        .map(|k| k as f64 * step)
        .collect();
    (step, values)
}

/// Formats a tick value with as many decimals as its step needs.
pub fn tick_label(value: f64, step: f64) -> String {
    let decimals = if step >= 1. {
        0
    } else {
        (-step.log10()).ceil() as usize
    };
    let text = format!("{:.*}", decimals, value);
    if text.starts_with('-') && text[1 ..].chars().all(|c| c == '0' || c == '.') {
        text[1 ..].to_string()
    } else {
        text
    }
}
