use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use cafemap_types::geo::{Crs, GeoPoint};

use crate::config::{DashboardConfig, IoSettings};
use crate::dataset::load_geojson_data;
use crate::info::{create_info_text, NO_DATA_TEXT};
use crate::layout::{Dashboard, Pane, MAP_LOAD_ERROR};
use crate::map::{InteractiveMap, MapOptions};

fn test_data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(name)
}

fn config_for(name: &str) -> DashboardConfig {
    DashboardConfig {
        data_path: test_data(name),
        ..Default::default()
    }
}

#[test]
fn projected_dataset_summary() {
    let table = load_geojson_data(test_data("three_squares.geojson"), &IoSettings::default())
        .expect("fixture loads");
    assert_eq!(table.len(), 3);
    assert_eq!(table.crs(), &Crs::EPSG5367);

    let text = create_info_text(Some(&table), &Crs::EPSG5367, "three_squares.geojson");
    assert!(text.contains("- **Number of geometries:** 3"));
    assert!(text.contains("- **Coordinate system:** EPSG:5367"));
    assert!(text.contains("- **Total area:** 14.00 km²"));
    assert!(text.contains("- **File:** three_squares.geojson"));
}

#[test]
fn geographic_dataset_map() {
    let table = load_geojson_data(test_data("costa_rica_blocks.geojson"), &IoSettings::default())
        .expect("fixture loads");
    assert!(!table.is_empty());

    let map = InteractiveMap::new(&table, MapOptions::default()).expect("map is created");
    assert_abs_diff_eq!(map.center().lat(), 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(map.center().lon(), -84.0, epsilon = 1e-9);
    assert_eq!(map.zoom(), 8);
}

#[test]
fn projected_dataset_map_is_geographic() {
    let table = load_geojson_data(test_data("three_squares.geojson"), &IoSettings::default())
        .expect("fixture loads");
    let map = InteractiveMap::new(&table, MapOptions::default()).expect("map is created");

    // Squares lie a few dozen kilometers west of the CRTM05 central meridian.
    assert!(map.center().lon() < -84.0 && map.center().lon() > -84.5);
    assert!(map.center().lat() > 9.9 && map.center().lat() < 10.0);
}

#[test]
fn dashboard_from_file() {
    let dashboard = Dashboard::create(&config_for("three_squares.geojson"), &IoSettings::default());
    let panes = dashboard.layout().panes();
    assert_eq!(panes.len(), 3);

    let page = dashboard.render_page();
    assert!(page.contains("<strong>Number of geometries:</strong> 3"));
    assert!(page.contains("14.00 km²"));
    assert!(page.contains("L.geoJSON("));
    assert!(!page.contains("Error:"));
}

#[test]
fn dashboard_with_missing_file() {
    let dashboard = Dashboard::create(&config_for("does_not_exist.geojson"), &IoSettings::default());
    let panes = dashboard.layout().panes();

    assert!(matches!(panes[1], Pane::Markdown { text } if text == NO_DATA_TEXT));
    assert!(matches!(panes[2], Pane::Html { html, .. } if html == MAP_LOAD_ERROR));

    let page = dashboard.render_page();
    assert!(page.contains("Error: Could not load the data"));
    assert!(page.contains("Error: No data available"));
}

#[test]
fn object_size_limit_is_in_megabytes() {
    let settings = IoSettings::from_lookup(|name| {
        (name == crate::config::MAX_OBJ_SIZE_VAR).then(|| "200".to_string())
    });
    assert_eq!(settings.max_object_size, Some(200 * 1024 * 1024));

    let table = load_geojson_data(test_data("three_squares.geojson"), &settings);
    assert_eq!(table.map(|t| t.len()), Some(3));
}

#[test]
fn object_size_limit_fails_load() {
    let settings = IoSettings {
        max_object_size: Some(16),
        ..Default::default()
    };
    assert!(load_geojson_data(test_data("three_squares.geojson"), &settings).is_none());
}
