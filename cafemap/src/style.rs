//! Styling of the dataset overlay.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::color::Color;

/// Style applied uniformly to every feature of the dataset: a filled polygon with an outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonStyle {
    /// Color of the inner area of the polygon.
    pub fill_color: Color,
    /// Color of the outline.
    pub stroke_color: Color,
    /// Width of the outline in pixels.
    pub stroke_width: f64,
    /// Opacity of the fill, from `0` to `1`.
    pub fill_opacity: f64,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::LIGHT_BLUE,
            stroke_color: Color::BLUE,
            stroke_width: 1.0,
            fill_opacity: 1.0,
        }
    }
}

impl PolygonStyle {
    /// Path options object understood by Leaflet vector layers. The fill opacity is clamped into `0..=1`.
    pub fn to_leaflet_options(&self) -> Value {
        let has_stroke = !self.stroke_color.is_transparent() && self.stroke_width > 0.0;
        let has_fill = !self.fill_color.is_transparent();

        json!({
            "stroke": has_stroke,
            "color": self.stroke_color.to_css(),
            "weight": self.stroke_width,
            "fill": has_fill,
            "fillColor": self.fill_color.to_css(),
            "fillOpacity": self.fill_opacity.clamp(0.0, 1.0),
        })
    }
}
