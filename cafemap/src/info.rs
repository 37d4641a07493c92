//! Metadata panel of the dataset.

use cafemap_types::geo::Crs;
use log::error;

use crate::dataset::GeometryTable;
use crate::error::CafemapError;

/// Text shown in the info panel when no data is available.
pub const NO_DATA_TEXT: &str = "# Error: No data available";

const SQUARE_METERS_IN_SQUARE_KM: f64 = 1_000_000.0;

/// Summary of a geometry table.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetInfo {
    /// Number of features.
    pub feature_count: usize,
    /// CRS of the table.
    pub crs: Crs,
    /// Total area of the features, square kilometers.
    pub area_km2: f64,
    /// Name of the source file.
    pub file_name: String,
}

impl DatasetInfo {
    /// Computes the summary. The area is measured after reprojecting a copy of the table into `area_crs`.
    pub fn compute(
        table: &GeometryTable,
        area_crs: &Crs,
        file_name: impl Into<String>,
    ) -> Result<Self, CafemapError> {
        let projected = table.to_crs(area_crs)?;

        Ok(Self {
            feature_count: table.len(),
            crs: table.crs().clone(),
            area_km2: projected.area() / SQUARE_METERS_IN_SQUARE_KM,
            file_name: file_name.into(),
        })
    }

    /// Markdown block of the summary.
    pub fn to_markdown(&self) -> String {
        format!(
            "# Dataset information\n\
             \n\
             - **Number of geometries:** {}\n\
             - **Coordinate system:** {}\n\
             - **Total area:** {:.2} km²\n\
             - **File:** {}\n",
            self.feature_count,
            self.crs,
            self.area_km2,
            escape_markdown(&self.file_name)
        )
    }
}

/// Escapes the characters that would make a plain string parse as markdown markup or inline HTML.
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '[' | ']' | '<' | '>' | '&' | '!' | '#') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Creates the text of the info panel. Falls back to [`NO_DATA_TEXT`] if there is no table or its area cannot be
/// computed.
pub fn create_info_text(table: Option<&GeometryTable>, area_crs: &Crs, file_name: &str) -> String {
    let Some(table) = table else {
        return NO_DATA_TEXT.to_string();
    };

    match DatasetInfo::compute(table, area_crs, file_name) {
        Ok(info) => info.to_markdown(),
        Err(err) => {
            error!("Failed to compute dataset info: {err:?}");
            NO_DATA_TEXT.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use cafemap_types::cartesian::Point2d;
    use cafemap_types::{ClosedContour, Geom, Polygon};

    use super::*;
    use crate::dataset::Feature;

    fn square_km(x: f64, y: f64, side_km: f64) -> Feature {
        let side = side_km * 1000.0;
        Feature {
            geometry: Geom::Polygon(Polygon::from(ClosedContour::new(vec![
                Point2d::new(x, y),
                Point2d::new(x + side, y),
                Point2d::new(x + side, y + side),
                Point2d::new(x, y + side),
            ]))),
            properties: Default::default(),
        }
    }

    #[test]
    fn one_square_kilometer() {
        let table = GeometryTable::new(vec![square_km(500_000.0, 1_100_000.0, 1.0)], Crs::EPSG5367);
        let info = DatasetInfo::compute(&table, &Crs::EPSG5367, "square.geojson").expect("valid");

        assert_eq!(info.area_km2, 1.0);
        assert!(info.to_markdown().contains("**Total area:** 1.00 km²"));
    }

    #[test]
    fn markdown_block() {
        let table = GeometryTable::new(
            vec![
                square_km(500_000.0, 1_100_000.0, 1.0),
                square_km(510_000.0, 1_100_000.0, 0.5),
            ],
            Crs::EPSG5367,
        );

        let text = create_info_text(Some(&table), &Crs::EPSG5367, "blocks.geojson");

        assert_eq!(
            text,
            "# Dataset information\n\
             \n\
             - **Number of geometries:** 2\n\
             - **Coordinate system:** EPSG:5367\n\
             - **Total area:** 1.25 km²\n\
             - **File:** blocks.geojson\n"
        );
    }

    #[test]
    fn geographic_table_is_reprojected() {
        let table = GeometryTable::new(
            vec![Feature {
                geometry: Geom::Polygon(Polygon::from(vec![
                    Point2d::new(-84.0, 10.0),
                    Point2d::new(-83.99, 10.0),
                    Point2d::new(-83.99, 10.01),
                    Point2d::new(-84.0, 10.01),
                ])),
                properties: Default::default(),
            }],
            Crs::WGS84,
        );

        let info = DatasetInfo::compute(&table, &Crs::EPSG5367, "cell.geojson").expect("valid");

        assert_eq!(info.crs, Crs::WGS84);
        assert_abs_diff_eq!(info.area_km2, 1.2125, epsilon = 0.01);
        assert!(info.to_markdown().contains("EPSG:4326"));
    }

    #[test]
    fn file_name_is_not_markup() {
        let table = GeometryTable::new(vec![square_km(500_000.0, 1_100_000.0, 1.0)], Crs::EPSG5367);
        let text = create_info_text(
            Some(&table),
            &Crs::EPSG5367,
            "<img src=x onerror=alert(1)>.geojson",
        );

        assert!(text.contains("- **File:** \\<img src=x onerror=alert(1)\\>.geojson\n"));

        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, pulldown_cmark::Parser::new(&text));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;.geojson"));
    }

    #[test]
    fn no_table() {
        assert_eq!(
            create_info_text(None, &Crs::EPSG5367, "missing.geojson"),
            NO_DATA_TEXT
        );
    }
}
