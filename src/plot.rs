use common::{Point, Segment, Bounds};

pub type Color = [f32; 4];

pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const BLUE: Color = [0.0, 0.0, 1.0, 1.0];
pub const GREEN: Color = [0.0, 0.5, 0.0, 1.0];
pub const DARK_GREEN: Color = [0.0, 0.39, 0.0, 1.0];
pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
pub const DARK_RED: Color = [0.55, 0.0, 0.0, 1.0];

pub const TITLE: &'static str = "Line Segments with IDs, Endpoints, and Intersections";
pub const ENDPOINTS_NAME: &'static str = "Segment Endpoints";
pub const INTERSECTIONS_NAME: &'static str = "Intersections";

const LABEL_SIZE: u32 = 11;
const BOUNDS_PADDING: f64 = 0.05;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Align {
    Left,
    Center,
}

/// Text anchored at a plot point and shifted by a pixel offset, `dy` pointing up.
#[derive(Clone, PartialEq, Debug)]
pub struct Label {
    pub text: String,
    pub anchor: Point,
    pub offset: [f64; 2],
    pub align: Align,
    pub color: Color,
    pub size: u32,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Markers {
    pub name: &'static str,
    pub points: Vec<Point>,
    pub color: Color,
    pub radius: f64,
    pub labels: Vec<Label>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Lines {
    pub segments: Vec<Segment>,
    pub color: Color,
    pub width: f64,
    pub labels: Vec<Label>,
}

/// Everything drawn in the plot area, in plot coordinates.
#[derive(Clone, PartialEq, Debug)]
pub struct Plot {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub lines: Lines,
    /// Marker series in drawing order; empty series are left out.
    pub layers: Vec<Markers>,
    pub bounds: Bounds,
}

impl Plot {
    pub fn new(segments: &[Segment], points: &[Point]) -> Plot {
        let lines = Lines {
            segments: segments.to_vec(),
            color: BLUE,
            width: 1.5,
            labels: segments.iter()
                .enumerate()
                .map(|(index, segment)| Label {
                    text: segment_label(index),
                    anchor: segment.midpoint(),
                    offset: [0., 5.],
                    align: Align::Center,
                    color: BLACK,
                    size: LABEL_SIZE,
                })
                .collect(),
        };

        let endpoints: Vec<_> = segments.iter()
            .flat_map(|segment| vec![segment.src, segment.dst])
            .collect();

        let mut layers = Vec::with_capacity(2);
        if !endpoints.is_empty() {
            layers.push(markers(ENDPOINTS_NAME, endpoints, GREEN, 3.5, DARK_GREEN));
        }
        if !points.is_empty() {
            layers.push(markers(INTERSECTIONS_NAME, points.to_vec(), RED, 5., DARK_RED));
        }

        let bounds = Bounds::from_points(layers.iter().flat_map(|layer| layer.points.iter().cloned()))
            .map(|bounds| bounds.padded(BOUNDS_PADDING))
            .unwrap_or(Bounds {
                min: Point { x: 0., y: 0., },
                max: Point { x: 1., y: 1., },
            });

        Plot {
            title: TITLE,
            x_label: "x",
            y_label: "y",
            lines,
            layers,
            bounds,
        }
    }

    pub fn legend<'a>(&'a self) -> impl Iterator<Item = (&'static str, Color)> + 'a {
        self.layers.iter().map(|layer| (layer.name, layer.color))
    }
}

fn markers(name: &'static str, points: Vec<Point>, color: Color, radius: f64, label_color: Color) -> Markers {
    let labels = points.iter()
        .map(|&point| Label {
            text: coords_label(point),
            anchor: point,
            offset: [5., 5.],
            align: Align::Left,
            color: label_color,
            size: LABEL_SIZE,
        })
        .collect();
    Markers { name, points, color, radius, labels, }
}

pub fn segment_label(index: usize) -> String {
    format!("ID {}", index)
}

pub fn coords_label(Point { x, y, }: Point) -> String {
    format!("({:.2}, {:.2})", x, y)
}
