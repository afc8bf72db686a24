//! Country data providers.

pub mod dataset;
pub mod static_provider;

pub use dataset::{
    anonymous_outline_feature, from_geojson_str, load_geojson, outline_feature, LoadOptions,
};
pub use static_provider::StaticCountryStore;
