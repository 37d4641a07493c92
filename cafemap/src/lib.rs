//! Cafemap renders a polygon dataset stored as GeoJSON into a one-page dashboard: a header, a panel with the
//! dataset summary (number of geometries, coordinate system, total area) and an interactive Leaflet map.
//!
//! ```no_run
//! use cafemap::config::{apply_environment_defaults, DashboardConfig, IoSettings};
//! use cafemap::layout::Dashboard;
//!
//! apply_environment_defaults();
//! let dashboard = Dashboard::create(&DashboardConfig::default(), &IoSettings::from_env());
//! std::fs::write("dashboard.html", dashboard.render_page()).unwrap();
//! ```
//!
//! Every step of the build degrades gracefully. A file that cannot be read, a map that cannot be created or an
//! area that cannot be computed each replace their part of the page with an error message instead of aborting.

pub mod color;
pub mod config;
pub mod dataset;
pub mod error;
pub mod info;
pub mod layout;
pub mod map;
pub mod server;
pub mod style;
pub mod tile_provider;

pub use cafemap_types;

#[cfg(test)]
mod tests;
