//! Dashboard configuration and the I/O environment of the data loader.

use std::path::{Path, PathBuf};

use cafemap_types::geo::Crs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::CafemapError;
use crate::style::PolygonStyle;
use crate::tile_provider::TileProvider;

/// Path of the dataset loaded when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "Data/cober_arborea_2021_dissolve_4326.geojson";

/// Limit of the size of a single GeoJSON object, megabytes. `0` removes the limit.
pub const MAX_OBJ_SIZE_VAR: &str = "OGR_GEOJSON_MAX_OBJ_SIZE";
/// Suppresses listing of the sibling files when a dataset is opened.
pub const DISABLE_READDIR_VAR: &str = "GDAL_DISABLE_READDIR_ON_OPEN";
/// Enables debug output of the loader.
pub const DEBUG_VAR: &str = "CPL_DEBUG";
/// Hint for the number of datasets kept open at once.
pub const DATASET_POOL_SIZE_VAR: &str = "GDAL_MAX_DATASET_POOL_SIZE";

const ENVIRONMENT_DEFAULTS: [(&str, &str); 4] = [
    (MAX_OBJ_SIZE_VAR, "0"),
    (DISABLE_READDIR_VAR, "EMPTY_DIR"),
    (DEBUG_VAR, "OFF"),
    (DATASET_POOL_SIZE_VAR, "1000"),
];

const BYTES_IN_MEGABYTE: u64 = 1024 * 1024;

/// Sets the default values of the loader environment variables that are not set yet.
///
/// Must be called before the first dataset is loaded, while the process is still single-threaded.
pub fn apply_environment_defaults() {
    for (name, value) in ENVIRONMENT_DEFAULTS {
        if std::env::var_os(name).is_none() {
            debug!("Setting {name}={value}");
            std::env::set_var(name, value);
        }
    }
}

/// Settings of the data loader, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoSettings {
    /// Maximum size of a loaded file in bytes, `None` if unlimited.
    ///
    /// The environment gives the limit in megabytes. The whole file is read as one object, so the limit applies to
    /// the file size.
    pub max_object_size: Option<u64>,
    /// Whether sibling files are scanned when a dataset is opened. Informational, the loader never scans them.
    pub read_dir_on_open: bool,
    /// Whether the loader reports its progress at `info` level instead of `debug`.
    pub debug: bool,
    /// Number of datasets that may be kept open. Informational, the loader keeps no open datasets.
    pub dataset_pool_size: usize,
}

impl Default for IoSettings {
    fn default() -> Self {
        Self {
            max_object_size: None,
            read_dir_on_open: false,
            debug: false,
            dataset_pool_size: 1000,
        }
    }
}

impl IoSettings {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the settings using the given variable lookup. Missing or invalid values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let max_object_size = match parse_var::<u64>(&lookup, MAX_OBJ_SIZE_VAR) {
            Some(0) => None,
            Some(megabytes) => Some(megabytes.saturating_mul(BYTES_IN_MEGABYTE)),
            None => defaults.max_object_size,
        };

        let read_dir_on_open = lookup(DISABLE_READDIR_VAR)
            .map(|value| {
                let value = value.trim().to_ascii_uppercase();
                !(value == "EMPTY_DIR" || value == "TRUE" || value == "YES")
            })
            .unwrap_or(defaults.read_dir_on_open);

        let debug = lookup(DEBUG_VAR)
            .map(|value| {
                let value = value.trim().to_ascii_uppercase();
                value == "ON" || value == "YES" || value == "TRUE"
            })
            .unwrap_or(defaults.debug);

        let dataset_pool_size = parse_var::<usize>(&lookup, DATASET_POOL_SIZE_VAR)
            .unwrap_or(defaults.dataset_pool_size);

        Self {
            max_object_size,
            read_dir_on_open,
            debug,
            dataset_pool_size,
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    let value = lookup(name)?;
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring invalid value of {name}: '{value}'");
            None
        }
    }
}

/// Configuration of the dashboard.
///
/// Every field has a default, so a configuration file only needs to list the values it changes:
///
/// ```
/// use cafemap::config::DashboardConfig;
///
/// let config: DashboardConfig = serde_json::from_str(r#"{ "zoom": 10 }"#)?;
/// assert_eq!(config.zoom, 10);
/// assert_eq!(config.title, "Cafe Map Visualizer");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Path of the GeoJSON file.
    pub data_path: PathBuf,
    /// Title shown in the header.
    pub title: String,
    /// Subtitle shown in the header.
    pub subtitle: String,
    /// Name of the base map tile provider, or a tile URL template with `{z}`, `{x}` and `{y}` placeholders.
    pub tiles: String,
    /// Attribution HTML of the tiles given by a URL template.
    pub tiles_attribution: String,
    /// Initial zoom level of the map.
    pub zoom: u8,
    /// Identifier of the CRS used for area computation.
    pub area_crs: String,
    /// Style of the dataset features on the map.
    pub style: PolygonStyle,
    /// Width of the map, pixels.
    pub map_width: u32,
    /// Height of the map, pixels.
    pub map_height: u32,
    /// Width of the info panel, pixels.
    pub info_width: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            title: "Cafe Map Visualizer".to_string(),
            subtitle: "Dashboard with Rust and Leaflet".to_string(),
            tiles: "CartoDB positron".to_string(),
            tiles_attribution: String::new(),
            zoom: 8,
            area_crs: Crs::EPSG5367.to_string(),
            style: PolygonStyle::default(),
            map_width: 800,
            map_height: 600,
            info_width: 300,
        }
    }
}

impl DashboardConfig {
    /// Reads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CafemapError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// CRS used for area computation. Must be a projected CRS, since areas are planar.
    pub fn area_crs(&self) -> Result<Crs, CafemapError> {
        let crs = Crs::from_code(&self.area_crs)?;
        if crs.is_geographic() {
            return Err(CafemapError::Config(format!(
                "area CRS {crs} is not projected"
            )));
        }

        Ok(crs)
    }

    /// Base map tile provider.
    pub fn tile_provider(&self) -> Result<TileProvider, CafemapError> {
        if let Some(provider) = TileProvider::from_name(&self.tiles) {
            return Ok(provider);
        }

        if TileProvider::is_url_template(&self.tiles) {
            return Ok(TileProvider::Custom {
                url: self.tiles.clone(),
                attribution: self.tiles_attribution.clone(),
            });
        }

        Err(CafemapError::Config(format!(
            "unknown tile provider '{}'",
            self.tiles
        )))
    }

    /// Name of the data file, shown in the info panel.
    pub fn data_file_name(&self) -> String {
        self.data_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.data_path.to_string_lossy().into_owned())
    }
}
