//! Raster tile sources for the base map.

/// Source of the base map tiles.
///
/// Tile urls use the Leaflet template syntax: `{z}`, `{x}`, `{y}` for the tile index, `{s}` for the subdomain and
/// `{r}` for the retina suffix.
#[derive(Debug, Clone, PartialEq)]
pub enum TileProvider {
    /// Light grey CARTO basemap without labels clutter.
    CartoDbPositron,
    /// Dark CARTO basemap.
    CartoDbDarkMatter,
    /// Standard OpenStreetMap tiles.
    OpenStreetMap,
    /// Any other XYZ tile source.
    Custom {
        /// Url template of the tiles.
        url: String,
        /// Attribution HTML shown in the corner of the map.
        attribution: String,
    },
}

const CARTO_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";
const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

impl TileProvider {
    /// Finds a built-in provider by its name.
    ///
    /// The comparison ignores case, spaces, dashes and underscores, so `CartoDB positron`, `cartodbpositron` and
    /// `CartoDB_Positron` all name the same provider.
    ///
    /// ```
    /// use cafemap::tile_provider::TileProvider;
    ///
    /// assert_eq!(TileProvider::from_name("CartoDB positron"), Some(TileProvider::CartoDbPositron));
    /// assert_eq!(TileProvider::from_name("unknown"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "cartodbpositron" | "positron" => Some(Self::CartoDbPositron),
            "cartodbdarkmatter" | "darkmatter" => Some(Self::CartoDbDarkMatter),
            "openstreetmap" | "osm" => Some(Self::OpenStreetMap),
            _ => None,
        }
    }

    /// Returns true if the value is an http(s) url with the tile index placeholders.
    pub fn is_url_template(value: &str) -> bool {
        (value.starts_with("https://") || value.starts_with("http://"))
            && ["{z}", "{x}", "{y}"].iter().all(|p| value.contains(p))
    }

    /// Url template of the tiles.
    pub fn url_template(&self) -> &str {
        match self {
            Self::CartoDbPositron => {
                "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png"
            }
            Self::CartoDbDarkMatter => {
                "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png"
            }
            Self::OpenStreetMap => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            Self::Custom { url, .. } => url,
        }
    }

    /// Attribution HTML of the provider.
    pub fn attribution(&self) -> &str {
        match self {
            Self::CartoDbPositron | Self::CartoDbDarkMatter => CARTO_ATTRIBUTION,
            Self::OpenStreetMap => OSM_ATTRIBUTION,
            Self::Custom { attribution, .. } => attribution,
        }
    }

    /// Subdomains substituted for `{s}`.
    pub fn subdomains(&self) -> &'static str {
        match self {
            Self::CartoDbPositron | Self::CartoDbDarkMatter => "abcd",
            Self::OpenStreetMap | Self::Custom { .. } => "abc",
        }
    }

    /// Maximum zoom level the provider serves.
    pub fn max_zoom(&self) -> u8 {
        match self {
            Self::CartoDbPositron | Self::CartoDbDarkMatter => 20,
            Self::OpenStreetMap | Self::Custom { .. } => 19,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_lookup() {
        assert_eq!(
            TileProvider::from_name("CartoDB_Positron"),
            Some(TileProvider::CartoDbPositron)
        );
        assert_eq!(
            TileProvider::from_name("cartodb dark_matter"),
            Some(TileProvider::CartoDbDarkMatter)
        );
        assert_eq!(
            TileProvider::from_name("OpenStreetMap"),
            Some(TileProvider::OpenStreetMap)
        );
        assert_eq!(TileProvider::from_name(""), None);
    }

    #[test]
    fn url_templates() {
        assert!(TileProvider::is_url_template(
            "https://tiles.example.com/{z}/{x}/{y}.png"
        ));
        assert!(!TileProvider::is_url_template("tiles.example.com/{z}/{x}/{y}.png"));
        assert!(!TileProvider::is_url_template("https://tiles.example.com/{z}.png"));
    }
}
