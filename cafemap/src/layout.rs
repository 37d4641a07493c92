//! Page layout of the dashboard.
//!
//! The page is a tree of [`Layout`] nodes: rows and columns of [`Pane`]s. The dashboard arranges a header above a
//! row with the info panel and the map:
//!
//! ```text
//! +--------------------------------------+
//! |                header                |
//! +-----------+--------------------------+
//! |   info    |           map            |
//! +-----------+--------------------------+
//! ```

use log::error;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use pulldown_cmark::{html::push_html, Parser};

use crate::color::Color;
use crate::config::{DashboardConfig, IoSettings};
use crate::dataset::{load_geojson_data, GeometryTable};
use crate::info::{create_info_text, NO_DATA_TEXT};
use crate::map::{create_map, MapOptions};

/// Map slot content when the data could not be loaded.
pub const MAP_LOAD_ERROR: &str = "<h3>Error: Could not load the data</h3>";
/// Map slot content when the data was loaded, but the map could not be created.
pub const MAP_RENDER_ERROR: &str = "<h3>Error: Could not create the map</h3>";

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const PAGE_CSS: &str = "body { margin: 0; font-family: sans-serif; } \
    .cafemap-pane { box-sizing: border-box; padding: 0 10px; }";

const HEADER_BACKGROUND: Color = Color::DARK_SLATE_GRAY;

/// Leaf element of the layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Pane {
    /// Raw HTML, embedded verbatim.
    Html {
        /// Content.
        html: String,
        /// Fixed width in pixels. Stretches to the available width if `None`.
        width: Option<u32>,
        /// Fixed height in pixels.
        height: Option<u32>,
    },
    /// Markdown text, rendered into HTML.
    Markdown {
        /// Content.
        text: String,
    },
}

impl Pane {
    /// HTML pane stretched to the available width.
    pub fn html(html: impl Into<String>) -> Self {
        Self::Html {
            html: html.into(),
            width: None,
            height: None,
        }
    }

    /// HTML pane of a fixed size.
    pub fn sized_html(html: impl Into<String>, width: u32, height: u32) -> Self {
        Self::Html {
            html: html.into(),
            width: Some(width),
            height: Some(height),
        }
    }

    /// Markdown pane.
    pub fn markdown(text: impl Into<String>) -> Self {
        Self::Markdown { text: text.into() }
    }

    fn render(&self) -> Markup {
        match self {
            Pane::Html {
                html,
                width,
                height,
            } => html! {
                div class="cafemap-pane" style=(size_style(*width, *height)) {
                    (PreEscaped(html))
                }
            },
            Pane::Markdown { text } => {
                let mut rendered = String::new();
                push_html(&mut rendered, Parser::new(text));
                html! {
                    div class="cafemap-pane cafemap-markdown" {
                        (PreEscaped(rendered))
                    }
                }
            }
        }
    }
}

/// Node of the page layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// Children placed top to bottom.
    Column {
        /// Child nodes.
        children: Vec<Layout>,
        /// Fixed width in pixels. Stretches to the available width if `None`.
        width: Option<u32>,
    },
    /// Children placed left to right, stretched to the available width.
    Row(Vec<Layout>),
    /// Single pane.
    Pane(Pane),
}

impl Layout {
    /// Renders the node and its children.
    pub fn render(&self) -> Markup {
        match self {
            Layout::Column { children, width } => html! {
                div class="cafemap-column"
                    style={ "display: flex; flex-direction: column; " (size_style(*width, None)) } {
                    @for child in children {
                        (child.render())
                    }
                }
            },
            Layout::Row(children) => html! {
                div class="cafemap-row" style="display: flex; flex-direction: row; width: 100%;" {
                    @for child in children {
                        (child.render())
                    }
                }
            },
            Layout::Pane(pane) => pane.render(),
        }
    }

    /// All panes of the layout in document order.
    pub fn panes(&self) -> Vec<&Pane> {
        match self {
            Layout::Column { children, .. } | Layout::Row(children) => {
                children.iter().flat_map(Layout::panes).collect()
            }
            Layout::Pane(pane) => vec![pane],
        }
    }
}

fn size_style(width: Option<u32>, height: Option<u32>) -> String {
    let width = match width {
        Some(width) => format!("width: {width}px; flex: none;"),
        None => "width: 100%;".to_string(),
    };

    match height {
        Some(height) => format!("{width} height: {height}px;"),
        None => width,
    }
}

/// The dashboard page: a header with the title, the info panel and the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    title: String,
    layout: Layout,
}

impl Dashboard {
    /// Loads the configured dataset and builds the dashboard.
    ///
    /// Failures never abort the build: the affected parts of the page are replaced with error messages.
    pub fn create(config: &DashboardConfig, settings: &IoSettings) -> Self {
        println!("Initializing dashboard...");
        let table = load_geojson_data(&config.data_path, settings);
        Self::from_table(config, table.as_ref())
    }

    /// Builds the dashboard for an already loaded table.
    pub fn from_table(config: &DashboardConfig, table: Option<&GeometryTable>) -> Self {
        let map_pane = match table {
            Some(table) => match map_options(config).and_then(|options| create_map(table, options)) {
                Some(map_html) => Pane::sized_html(map_html, config.map_width, config.map_height),
                None => Pane::html(MAP_RENDER_ERROR),
            },
            None => Pane::html(MAP_LOAD_ERROR),
        };

        let info_text = match config.area_crs() {
            Ok(area_crs) => create_info_text(table, &area_crs, &config.data_file_name()),
            Err(err) => {
                error!("Cannot compute dataset area: {err}");
                NO_DATA_TEXT.to_string()
            }
        };

        let layout = Layout::Column {
            children: vec![
                Layout::Pane(Pane::html(header_html(&config.title, &config.subtitle))),
                Layout::Row(vec![
                    Layout::Column {
                        children: vec![Layout::Pane(Pane::markdown(info_text))],
                        width: Some(config.info_width),
                    },
                    Layout::Pane(map_pane),
                ]),
            ],
            width: None,
        };

        Self {
            title: config.title.clone(),
            layout,
        }
    }

    /// Layout of the page.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Renders the complete HTML document.
    pub fn render_page(&self) -> String {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (self.title) }
                    link rel="stylesheet" href=(LEAFLET_CSS);
                    script src=(LEAFLET_JS) {}
                    style { (PreEscaped(PAGE_CSS)) }
                }
                body {
                    (self.layout.render())
                }
            }
        }
        .into_string()
    }
}

fn map_options(config: &DashboardConfig) -> Option<MapOptions> {
    match config.tile_provider() {
        Ok(tiles) => Some(MapOptions {
            tiles,
            zoom: config.zoom,
            style: config.style,
            ..Default::default()
        }),
        Err(err) => {
            println!("Error creating map: {err}");
            None
        }
    }
}

fn header_html(title: &str, subtitle: &str) -> String {
    html! {
        div style={ "background-color: " (HEADER_BACKGROUND.to_css()) "; padding: 20px; color: white; text-align: center;" } {
            h1 { (title) }
            h3 { (subtitle) }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use cafemap_types::cartesian::Point2d;
    use cafemap_types::geo::Crs;
    use cafemap_types::{Geom, Polygon};

    use super::*;
    use crate::dataset::Feature;

    fn table() -> GeometryTable {
        GeometryTable::new(
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
        )
    }

    #[test]
    fn layout_structure() {
        let dashboard = Dashboard::from_table(&DashboardConfig::default(), Some(&table()));
        let panes = dashboard.layout().panes();

        assert_eq!(panes.len(), 3);
        assert!(matches!(panes[0], Pane::Html { width: None, .. }));
        assert!(
            matches!(panes[1], Pane::Markdown { text } if text.contains("**Number of geometries:** 1"))
        );
        assert!(matches!(
            panes[2],
            Pane::Html {
                width: Some(800),
                height: Some(600),
                ..
            }
        ));
    }

    #[test]
    fn page_contents() {
        let page = Dashboard::from_table(&DashboardConfig::default(), Some(&table())).render_page();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Cafe Map Visualizer</title>"));
        assert!(page.contains("background-color: #2F4F4F; padding: 20px"));
        assert!(page.contains("<h3>Dashboard with Rust and Leaflet</h3>"));
        assert!(page.contains("<h1>Dataset information</h1>"));
        assert!(page.contains("<strong>Number of geometries:</strong> 1"));
        assert!(page.contains("width: 300px; flex: none;"));
        assert!(page.contains("width: 800px; flex: none; height: 600px;"));
        assert!(page.contains("L.map("));
        assert!(page.contains(LEAFLET_JS));
        assert!(!page.contains("Error:"));
    }

    #[test]
    fn missing_table_degrades() {
        let page = Dashboard::from_table(&DashboardConfig::default(), None).render_page();

        assert!(page.contains(MAP_LOAD_ERROR));
        assert!(page.contains("<h1>Error: No data available</h1>"));
        assert!(!page.contains("L.map("));
    }

    #[test]
    fn empty_table_degrades_map_only() {
        let empty = GeometryTable::new(vec![], Crs::WGS84);
        let page = Dashboard::from_table(&DashboardConfig::default(), Some(&empty)).render_page();

        assert!(page.contains(MAP_RENDER_ERROR));
        assert!(page.contains("<strong>Number of geometries:</strong> 0"));
    }

    #[test]
    fn unknown_tiles_degrade_map_only() {
        let config = DashboardConfig {
            tiles: "Nowhere".to_string(),
            ..Default::default()
        };
        let page = Dashboard::from_table(&config, Some(&table())).render_page();

        assert!(page.contains(MAP_RENDER_ERROR));
        assert!(page.contains("<strong>Number of geometries:</strong> 1"));
    }

    #[test]
    fn title_is_escaped() {
        let config = DashboardConfig {
            title: "<script>alert(1)</script>".to_string(),
            ..Default::default()
        };
        let page = Dashboard::from_table(&config, None).render_page();

        assert!(page.contains("<h1>&lt;script&gt;alert(1)&lt;/script&gt;</h1>"));
        assert!(!page.contains("<script>alert(1)"));
    }
}
