//! Country data models, types, and traits.

pub mod country;
pub mod locale;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use country::Country;
pub use locale::Locale;
pub use traits::CountryStore;
pub use types::{
    validate_coordinate, Centroid, GeoDataError, InvalidCoordinate, Result, TerritoryKind,
};
