//! # worldle-geodata
//!
//! Read-only country reference data for the guessing game.
//!
//! ## Features
//!
//! - **Load once, share everywhere**: records live in `Arc`s behind a `Send + Sync` store
//! - **Name lookups**: case-insensitive, in any of the dataset's 21 locales
//! - **GeoJSON datasets**: one feature per country, with precomputed or derived centroids
//! - **Seedable draws**: pick a playable mystery country from any `RngCore`
//!
//! ## Example
//!
//! ```
//! use worldle_geodata::prelude::*;
//! use geo::MultiPolygon;
//!
//! let france = Country::new(
//!     "FRA",
//!     "France",
//!     TerritoryKind::SovereignCountry,
//!     MultiPolygon::new(vec![]),
//!     Centroid::new(46.6, 2.4).unwrap(),
//! );
//!
//! let store = StaticCountryStore::from_countries(vec![france]).unwrap();
//!
//! let found = store.find_by_name("france", Locale::En).unwrap();
//! assert_eq!(found.id, CountryIdentifier::new("FRA"));
//! ```

pub mod identifiers;
pub mod models;
pub mod provider;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::{
        country::Country, locale::Locale, traits::CountryStore, types::*,
    };
    pub use crate::provider::{
        dataset::{
            anonymous_outline_feature, from_geojson_str, load_geojson, outline_feature,
            LoadOptions,
        },
        static_provider::StaticCountryStore,
    };
}

pub use prelude::*;
