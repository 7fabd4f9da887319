//! Shapes and coordinates used by area-based operators

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::QtiPoint;
use crate::error::ValueError;

/// QTI shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    /// The whole area
    Default,
    Rect,
    Circle,
    Poly,
    Ellipse,
}

impl Shape {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Poly => "poly",
            Self::Ellipse => "ellipse",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "rect" => Ok(Self::Rect),
            "circle" => Ok(Self::Circle),
            "poly" => Ok(Self::Poly),
            "ellipse" => Ok(Self::Ellipse),
            other => Err(ValueError::invalid_coords(other, "unknown shape")),
        }
    }
}

/// Coordinates of a shape, validated against the shape's expected layout
///
/// - rect: left-x, top-y, right-x, bottom-y
/// - circle: center-x, center-y, radius
/// - poly: x1, y1, ..., xn, yn (at least three points)
/// - ellipse: center-x, center-y, h-radius, v-radius
/// - default: no coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCoords")]
pub struct Coords {
    shape: Shape,
    values: Vec<i32>,
}

#[derive(Deserialize)]
struct RawCoords {
    shape: Shape,
    #[serde(default)]
    values: Vec<i32>,
}

impl TryFrom<RawCoords> for Coords {
    type Error = ValueError;

    fn try_from(raw: RawCoords) -> Result<Self, Self::Error> {
        Self::new(raw.shape, raw.values)
    }
}

impl Coords {
    pub fn new(shape: Shape, values: Vec<i32>) -> Result<Self, ValueError> {
        let valid = match shape {
            Shape::Default => values.is_empty(),
            Shape::Rect | Shape::Ellipse => values.len() == 4,
            Shape::Circle => values.len() == 3,
            Shape::Poly => values.len() >= 6 && values.len() % 2 == 0,
        };
        if !valid {
            return Err(ValueError::invalid_coords(
                shape.name(),
                format!("unexpected number of coordinates ({})", values.len()),
            ));
        }
        Ok(Self { shape, values })
    }

    /// Parse comma-separated coordinates, e.g. `"0,0,10,10"`
    pub fn parse(shape: Shape, coords: &str) -> Result<Self, ValueError> {
        let values = if coords.trim().is_empty() {
            Vec::new()
        } else {
            coords
                .split(',')
                .map(|c| c.trim().parse::<i32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ValueError::invalid_coords(shape.name(), e.to_string()))?
        };
        Self::new(shape, values)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Whether `point` lies inside (or on the edge of) the shape
    pub fn inside(&self, point: &QtiPoint) -> bool {
        let x = point.x as f64;
        let y = point.y as f64;
        let c: Vec<f64> = self.values.iter().map(|v| *v as f64).collect();

        match self.shape {
            Shape::Default => true,
            Shape::Rect => x >= c[0] && x <= c[2] && y >= c[1] && y <= c[3],
            Shape::Circle => (x - c[0]).powi(2) + (y - c[1]).powi(2) <= c[2].powi(2),
            Shape::Ellipse => {
                if c[2] == 0.0 || c[3] == 0.0 {
                    return false;
                }
                (x - c[0]).powi(2) / c[2].powi(2) + (y - c[1]).powi(2) / c[3].powi(2) <= 1.0
            }
            Shape::Poly => point_in_polygon(x, y, &c),
        }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.values.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(","))
    }
}

// Ray casting; points lying on an edge count as inside.
fn point_in_polygon(x: f64, y: f64, coords: &[f64]) -> bool {
    let vertices: Vec<(f64, f64)> = coords.chunks_exact(2).map(|p| (p[0], p[1])).collect();
    let n = vertices.len();
    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];

        let cross = (x - xi) * (yj - yi) - (y - yi) * (xj - xi);
        let on_segment = cross == 0.0
            && x >= xi.min(xj)
            && x <= xi.max(xj)
            && y >= yi.min(yj)
            && y <= yi.max(yj);
        if on_segment {
            return true;
        }

        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}
