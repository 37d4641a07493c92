//! In-memory geometry table and the GeoJSON loader.

use std::path::Path;

use cafemap_types::cartesian::{Point2d, Rect};
use cafemap_types::geo::Crs;
use cafemap_types::{Geom, Geometry};
use geojson::{FeatureCollection, GeoJson, JsonObject};
use log::{error, log, Level};

use crate::config::IoSettings;
use crate::error::CafemapError;

/// Single feature of a [`GeometryTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Geometry in the coordinates of the table CRS.
    pub geometry: Geom<Point2d>,
    /// Attributes of the feature.
    pub properties: JsonObject,
}

/// Collection of features sharing one coordinate reference system.
///
/// The table is loaded once and is not modified afterwards. Operations that change coordinates, like
/// [`GeometryTable::to_crs`], return a new table.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryTable {
    features: Vec<Feature>,
    crs: Crs,
}

impl GeometryTable {
    /// Creates a new table.
    pub fn new(features: Vec<Feature>, crs: Crs) -> Self {
        Self { features, crs }
    }

    /// Reads a GeoJSON file.
    ///
    /// The file is read as a whole. If any of the features cannot be converted the whole load fails.
    pub fn read(path: impl AsRef<Path>, settings: &IoSettings) -> Result<Self, CafemapError> {
        let path = path.as_ref();
        let level = if settings.debug {
            Level::Info
        } else {
            Level::Debug
        };

        if !path.exists() {
            return Err(CafemapError::NotFound(path.into()));
        }

        let size = std::fs::metadata(path)?.len();
        if let Some(limit) = settings.max_object_size {
            if size > limit {
                return Err(CafemapError::TooLarge { size, limit });
            }
        }

        log!(level, "Reading {size} bytes from {path:?}");
        let content = std::fs::read_to_string(path)?;
        let geojson = content.parse::<GeoJson>()?;
        let table = Self::from_geojson(geojson)?;
        log!(
            level,
            "Parsed {} features in {} from {path:?}",
            table.len(),
            table.crs
        );

        Ok(table)
    }

    /// Converts parsed GeoJSON into a table.
    ///
    /// The CRS is WGS84 unless the document has a legacy `crs` member naming a different one.
    pub fn from_geojson(geojson: GeoJson) -> Result<Self, CafemapError> {
        let (features, foreign_members) = match geojson {
            GeoJson::FeatureCollection(collection) => {
                (collection.features, collection.foreign_members)
            }
            GeoJson::Feature(feature) => {
                let foreign_members = feature.foreign_members.clone();
                (vec![feature], foreign_members)
            }
            GeoJson::Geometry(geometry) => {
                let foreign_members = geometry.foreign_members.clone();
                (
                    vec![geojson::Feature {
                        bbox: None,
                        geometry: Some(geometry),
                        id: None,
                        properties: None,
                        foreign_members: None,
                    }],
                    foreign_members,
                )
            }
        };

        let crs = crs_from_foreign_members(foreign_members.as_ref())?;
        let features = features
            .into_iter()
            .enumerate()
            .map(|(index, feature)| -> Result<Feature, CafemapError> {
                let geometry = feature
                    .geometry
                    .as_ref()
                    .ok_or(CafemapError::MissingGeometry(index))?;
                Ok(Feature {
                    geometry: Geom::<Point2d>::try_from(geometry)?,
                    properties: feature.properties.unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(features, crs))
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the table has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Coordinate reference system of the table.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Features of the table.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Bounding envelope of all features. `None` if the table has no non-empty geometries.
    pub fn total_bounds(&self) -> Option<Rect> {
        Rect::merge_all(self.features.iter().filter_map(|f| f.geometry.bounding_rect()))
    }

    /// Returns a copy of the table with all geometries transformed into the `target` CRS.
    pub fn to_crs(&self, target: &Crs) -> Result<Self, CafemapError> {
        if self.crs == *target {
            return Ok(self.clone());
        }

        let transformation = self.crs.transformation_to(target)?;
        let features = self
            .features
            .iter()
            .enumerate()
            .map(|(index, feature)| -> Result<Feature, CafemapError> {
                let geometry = feature.geometry.project(&*transformation).ok_or_else(|| {
                    CafemapError::Projection {
                        index,
                        crs: target.to_string(),
                    }
                })?;
                Ok(Feature {
                    geometry,
                    properties: feature.properties.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(features, target.clone()))
    }

    /// Sum of the planar areas of all geometries, in the units of the table CRS squared.
    ///
    /// Only meaningful for projected systems: reproject with [`GeometryTable::to_crs`] first.
    pub fn area(&self) -> f64 {
        self.features.iter().map(|f| f.geometry.area()).sum()
    }

    /// Converts the table into a GeoJSON feature collection with coordinates in the table CRS.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self
                .features
                .iter()
                .map(|feature| geojson::Feature {
                    bbox: None,
                    geometry: Some(geojson::Geometry::new((&feature.geometry).into())),
                    id: None,
                    properties: Some(feature.properties.clone()),
                    foreign_members: None,
                })
                .collect(),
            foreign_members: None,
        }
    }
}

fn crs_from_foreign_members(members: Option<&JsonObject>) -> Result<Crs, CafemapError> {
    let Some(crs) = members.and_then(|m| m.get("crs")) else {
        return Ok(Crs::WGS84);
    };

    let name = crs
        .get("properties")
        .and_then(|p| p.get("name"))
        .and_then(|n| n.as_str())
        .ok_or_else(|| CafemapError::Config(format!("unsupported crs member: {crs}")))?;

    Ok(Crs::from_code(name)?)
}

/// Loads the dataset, reporting the progress on the standard output.
///
/// Returns `None` if the file does not exist or cannot be read. Errors are reported, never propagated.
pub fn load_geojson_data(path: impl AsRef<Path>, settings: &IoSettings) -> Option<GeometryTable> {
    let path = path.as_ref();
    println!("Loading file: {}", path.display());

    match GeometryTable::read(path, settings) {
        Ok(table) => {
            println!("Data loaded successfully: {} geometries", table.len());
            Some(table)
        }
        Err(CafemapError::NotFound(_)) => {
            println!("File not found: {}", path.display());
            None
        }
        Err(err) => {
            println!("Error loading data: {err}");
            error!("Failed to load {path:?}: {err:?}");
            None
        }
    }
}
