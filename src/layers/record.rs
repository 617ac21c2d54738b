use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::foundation::color::Color;
use crate::foundation::core::{BezPath, Point};
use crate::foundation::math::finite_or_zero;

/// What a record draws. The rendering adapter switches on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Flash,
    Shape,
    Bar,
    BarMirror,
    Dot,
    Ring,
    Waveform,
}

/// One named visual property.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Number(f64),
    Text(String),
    Points(Vec<Point>),
}

/// Render parameters for one entity in one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderRecord {
    pub element: Element,
    pub index: usize,
    pub props: BTreeMap<&'static str, PropValue>,
}

impl RenderRecord {
    pub fn new(element: Element, index: usize) -> Self {
        Self {
            element,
            index,
            props: BTreeMap::new(),
        }
    }

    /// Set a numeric property. Non-finite values are stored as `0.0`.
    pub fn num(mut self, key: &'static str, v: f64) -> Self {
        self.props.insert(key, PropValue::Number(finite_or_zero(v)));
        self
    }

    pub fn text(mut self, key: &'static str, v: impl Into<String>) -> Self {
        self.props.insert(key, PropValue::Text(v.into()));
        self
    }

    pub fn color(self, key: &'static str, c: Color) -> Self {
        self.text(key, c.to_string())
    }

    pub fn points(mut self, key: &'static str, pts: Vec<Point>) -> Self {
        self.props.insert(key, PropValue::Points(pts));
        self
    }

    pub fn get_num(&self, key: &str) -> Option<f64> {
        match self.props.get(key)? {
            PropValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.props.get(key)? {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_points(&self, key: &str) -> Option<&[Point]> {
        match self.props.get(key)? {
            PropValue::Points(p) => Some(p),
            _ => None,
        }
    }
}

/// Closed polyline regenerated every frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct PathGeometry {
    pub points: Vec<Point>,
}

impl PathGeometry {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// SVG path data `M x y L x y ... Z` with two decimals per coordinate.
    pub fn to_svg_d(&self) -> String {
        let mut d = String::with_capacity(self.points.len() * 20);
        for (i, p) in self.points.iter().enumerate() {
            let cmd = if i == 0 { "M" } else { " L" };
            let _ = write!(d, "{cmd} {:.2} {:.2}", finite_or_zero(p.x), finite_or_zero(p.y));
        }
        if !self.points.is_empty() {
            d.push_str(" Z");
        }
        d
    }

    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut it = self.points.iter();
        if let Some(&first) = it.next() {
            path.move_to(first);
            for &p in it {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/record.rs"]
mod tests;
