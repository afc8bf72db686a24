//! Core data types and enums for country data.

use std::path::PathBuf;

use geo::Point;

use crate::identifiers::CountryIdentifier;

// ============================================================================
// Coordinates
// ============================================================================

/// A latitude/longitude pair outside the valid ranges, or not finite.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
pub struct InvalidCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Check that a latitude is within [-90, 90] and a longitude within [-180, 180].
pub fn validate_coordinate(latitude: f64, longitude: f64) -> std::result::Result<(), InvalidCoordinate> {
    let valid = latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude);

    if valid {
        Ok(())
    } else {
        Err(InvalidCoordinate { latitude, longitude })
    }
}

/// Center point of a country's boundary, in degrees.
///
/// Always holds a valid coordinate; construction validates the ranges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Centroid {
    latitude: f64,
    longitude: f64,
}

impl Centroid {
    pub fn new(latitude: f64, longitude: f64) -> std::result::Result<Self, InvalidCoordinate> {
        validate_coordinate(latitude, longitude)?;
        Ok(Self { latitude, longitude })
    }

    /// Build from a `geo::Point`, where x is longitude and y is latitude.
    pub fn from_point(point: Point) -> std::result::Result<Self, InvalidCoordinate> {
        Self::new(point.y(), point.x())
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

impl From<Centroid> for Point {
    fn from(centroid: Centroid) -> Self {
        centroid.to_point()
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Political status of a territory, as recorded by the boundary dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerritoryKind {
    SovereignCountry,
    Country,
    Dependency,
    Lease,
    Disputed,
    Other,
}

impl TerritoryKind {
    pub fn from_dataset(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "sovereign country" | "sovereignty" => Self::SovereignCountry,
            "country" => Self::Country,
            "dependency" => Self::Dependency,
            "lease" => Self::Lease,
            "disputed" => Self::Disputed,
            _ => Self::Other,
        }
    }

    /// Dependencies and leases never appear as a mystery or in the guess list.
    pub fn is_playable(&self) -> bool {
        !matches!(self, Self::Dependency | Self::Lease)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GeoDataError {
    #[error("Invalid centroid for {feature}: {source}")]
    InvalidCoordinate {
        feature: String,
        #[source]
        source: InvalidCoordinate,
    },

    #[error("Feature {feature} is missing property `{property}`")]
    MissingProperty {
        feature: String,
        property: &'static str,
    },

    #[error("Feature {feature} has unsupported geometry: {kind}")]
    UnsupportedGeometry { feature: String, kind: String },

    #[error("Duplicate country: {0}")]
    DuplicateCountry(CountryIdentifier),

    #[error("Expected a FeatureCollection")]
    NotAFeatureCollection,

    #[error("GeoJSON parse error: {0}")]
    Parse(#[from] geojson::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GeoDataError>;
