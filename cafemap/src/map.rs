//! Interactive web map of the dataset.
//!
//! The map is rendered in the browser by Leaflet. This module computes the initial view and produces the HTML
//! fragment that creates the map: a container element and a script adding the base tile layer and the dataset
//! overlay.

use std::collections::HashMap;

use cafemap_types::cartesian::Point2d;
use cafemap_types::geo::{Crs, GeoPoint, GeoPoint2d, Projection};
use geojson::FeatureCollection;
use log::error;
use serde::Serialize;
use strfmt::strfmt;

use crate::dataset::GeometryTable;
use crate::error::CafemapError;
use crate::style::PolygonStyle;
use crate::tile_provider::TileProvider;

const MAP_TEMPLATE: &str = r#"<div id="{id}" class="cafemap-map" style="width: 100%; height: 100%;"></div>
<script>
(function () {{
    var map = L.map({id_json}, {{ center: [{lat}, {lon}], zoom: {zoom} }});
    L.tileLayer({tiles_url}, {{
        attribution: {attribution},
        subdomains: {subdomains},
        maxZoom: {max_zoom}
    }}).addTo(map);
    var style = {style};
    L.geoJSON({data}, {{ style: function () {{ return style; }} }}).addTo(map);
}})();
</script>"#;

/// Parameters of the map that do not depend on the data.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Base map tiles.
    pub tiles: TileProvider,
    /// Initial zoom level.
    pub zoom: u8,
    /// Style of the dataset features.
    pub style: PolygonStyle,
    /// Id of the map container element.
    pub element_id: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            tiles: TileProvider::CartoDbPositron,
            zoom: 8,
            style: PolygonStyle::default(),
            element_id: "cafemap".to_string(),
        }
    }
}

/// Map of a geometry table, ready to be rendered into HTML.
#[derive(Debug, Clone)]
pub struct InteractiveMap {
    center: GeoPoint2d,
    options: MapOptions,
    overlay: FeatureCollection,
}

impl InteractiveMap {
    /// Creates a map centered on the middle of the table's bounding envelope.
    ///
    /// Features of tables in a projected CRS are converted to WGS84 for the overlay.
    pub fn new(table: &GeometryTable, options: MapOptions) -> Result<Self, CafemapError> {
        let bounds = table.total_bounds().ok_or(CafemapError::Empty)?;
        let center: Point2d = bounds.center();
        let center = table
            .crs()
            .get_projection::<GeoPoint2d, Point2d>()?
            .unproject(&center)
            .ok_or_else(|| CafemapError::Projection {
                index: 0,
                crs: Crs::WGS84.to_string(),
            })?;

        let overlay = table.to_crs(&Crs::WGS84)?.to_feature_collection();

        Ok(Self {
            center,
            options,
            overlay,
        })
    }

    /// Initial center of the map.
    pub fn center(&self) -> GeoPoint2d {
        self.center
    }

    /// Initial zoom level of the map.
    pub fn zoom(&self) -> u8 {
        self.options.zoom
    }

    /// Features shown on top of the base map, in WGS84.
    pub fn overlay(&self) -> &FeatureCollection {
        &self.overlay
    }

    /// Renders the HTML fragment of the map. Leaflet must be loaded by the page embedding the fragment.
    pub fn to_html(&self) -> Result<String, CafemapError> {
        let tiles = &self.options.tiles;
        let mut vars = HashMap::new();
        vars.insert("id".to_string(), self.options.element_id.clone());
        vars.insert("id_json".to_string(), script_json(&self.options.element_id)?);
        vars.insert("lat".to_string(), self.center.lat().to_string());
        vars.insert("lon".to_string(), self.center.lon().to_string());
        vars.insert("zoom".to_string(), self.options.zoom.to_string());
        vars.insert("tiles_url".to_string(), script_json(tiles.url_template())?);
        vars.insert("attribution".to_string(), script_json(tiles.attribution())?);
        vars.insert("subdomains".to_string(), script_json(tiles.subdomains())?);
        vars.insert("max_zoom".to_string(), tiles.max_zoom().to_string());
        vars.insert(
            "style".to_string(),
            script_json(&self.options.style.to_leaflet_options())?,
        );
        vars.insert("data".to_string(), script_json(&self.overlay)?);

        Ok(strfmt(MAP_TEMPLATE, &vars)?)
    }
}

/// JSON literal safe to put inside a `<script>` element.
fn script_json(value: &(impl Serialize + ?Sized)) -> Result<String, CafemapError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Creates the map of the table, or `None` if that fails. Errors are reported, never propagated.
pub fn create_map(table: &GeometryTable, options: MapOptions) -> Option<String> {
    match InteractiveMap::new(table, options).and_then(|map| map.to_html()) {
        Ok(html) => Some(html),
        Err(err) => {
            println!("Error creating map: {err}");
            error!("Failed to create map: {err:?}");
            None
        }
    }
}
