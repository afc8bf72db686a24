//! GeoJSON country datasets.
//!
//! Reads a FeatureCollection with one feature per country into a
//! [`StaticCountryStore`], and writes country outlines back out as features.
//!
//! Recognized feature properties:
//! - `fid` (or the feature id): record identifier
//! - `name_en` (or `name`): English name; `name_<locale>` for the others
//! - `type`: territory kind, e.g. `Sovereign country` or `Dependency`
//! - `lat` / `lon`: precomputed centroid. Without them the centroid of the
//!   boundary is used.

use std::path::Path;

use geo::{Centroid as CentroidAlgorithm, Coord, LineString, MultiPolygon, Polygon};
use geojson::{feature::Id, Feature, GeoJson, Geometry, Value};
use serde_json::Value as JsonValue;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::identifiers::CountryIdentifier;
use crate::models::{types::*, Country, Locale};
use crate::provider::static_provider::StaticCountryStore;

#[derive(Clone, Copy, Debug, Default)]
pub struct LoadOptions {
    /// Keep dependencies and leases (they are never drawn as a mystery)
    pub include_dependencies: bool,
}

/// Read and parse a GeoJSON dataset from disk
pub fn load_geojson(path: impl AsRef<Path>, options: LoadOptions) -> Result<StaticCountryStore> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| GeoDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), "loading country dataset");
    from_geojson_str(&content, options)
}

/// Parse a GeoJSON FeatureCollection held in memory
pub fn from_geojson_str(content: &str, options: LoadOptions) -> Result<StaticCountryStore> {
    let geojson: GeoJson = content.parse()?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(GeoDataError::NotAFeatureCollection);
    };

    let mut countries = Vec::with_capacity(collection.features.len());
    let mut skipped = 0usize;

    for (index, feature) in collection.features.iter().enumerate() {
        let country = feature_to_country(feature, index)?;

        if !options.include_dependencies && !country.is_playable() {
            debug!(id = %country.id, name = %country.name, kind = ?country.kind, "skipping territory");
            skipped += 1;
            continue;
        }

        countries.push(country);
    }

    info!(loaded = countries.len(), skipped, "parsed country features");
    StaticCountryStore::from_countries(countries)
}

/// Convert one feature into a country record
fn feature_to_country(feature: &Feature, index: usize) -> Result<Country> {
    let id = feature_id(feature).ok_or_else(|| GeoDataError::MissingProperty {
        feature: format!("#{index}"),
        property: "fid",
    })?;
    let label = id.to_string();

    let name = string_property(feature, "name_en")
        .or_else(|| string_property(feature, "name"))
        .ok_or_else(|| GeoDataError::MissingProperty {
            feature: label.clone(),
            property: "name_en",
        })?;

    let kind = string_property(feature, "type")
        .map(TerritoryKind::from_dataset)
        .unwrap_or(TerritoryKind::Other);

    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| GeoDataError::MissingProperty {
            feature: label.clone(),
            property: "geometry",
        })?;
    let boundary = geometry_to_multipolygon(&geometry.value, &label)?;

    let centroid = match (number_property(feature, "lat"), number_property(feature, "lon")) {
        (Some(lat), Some(lon)) => Centroid::new(lat, lon),
        _ => {
            let point = boundary
                .centroid()
                .ok_or_else(|| GeoDataError::MissingProperty {
                    feature: label.clone(),
                    property: "lat",
                })?;
            Centroid::from_point(point)
        }
    }
    .map_err(|source| GeoDataError::InvalidCoordinate {
        feature: label.clone(),
        source,
    })?;

    let mut country = Country::new(id, name, kind, boundary, centroid);
    for locale in Locale::iter().filter(|l| *l != Locale::En) {
        if let Some(localized) = string_property(feature, &locale.property_name()) {
            country = country.with_name(locale, localized);
        }
    }

    debug!(id = %country.id, name = %country.name, "loaded country");
    Ok(country)
}

fn feature_id(feature: &Feature) -> Option<CountryIdentifier> {
    match feature.property("fid") {
        Some(JsonValue::String(s)) if !s.is_empty() => return Some(CountryIdentifier::new(s)),
        Some(JsonValue::Number(n)) => return Some(CountryIdentifier::new(n.to_string())),
        _ => {}
    }

    match &feature.id {
        Some(Id::String(s)) if !s.is_empty() => Some(CountryIdentifier::new(s)),
        Some(Id::Number(n)) => Some(CountryIdentifier::new(n.to_string())),
        _ => None,
    }
}

fn string_property<'a>(feature: &'a Feature, key: &str) -> Option<&'a str> {
    feature
        .property(key)
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn number_property(feature: &Feature, key: &str) -> Option<f64> {
    feature.property(key).and_then(JsonValue::as_f64)
}

// ============================================================================
// Geometry conversion
// ============================================================================

fn geometry_to_multipolygon(value: &Value, feature: &str) -> Result<MultiPolygon> {
    match value {
        Value::Polygon(rings) => Ok(MultiPolygon::new(vec![rings_to_polygon(rings, feature)?])),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .map(|rings| rings_to_polygon(rings, feature))
            .collect::<Result<Vec<_>>>()
            .map(MultiPolygon::new),
        other => Err(GeoDataError::UnsupportedGeometry {
            feature: feature.to_owned(),
            kind: geometry_kind(other).to_owned(),
        }),
    }
}

fn rings_to_polygon(rings: &[Vec<Vec<f64>>], feature: &str) -> Result<Polygon> {
    let Some((exterior, interiors)) = rings.split_first() else {
        return Err(GeoDataError::UnsupportedGeometry {
            feature: feature.to_owned(),
            kind: "Polygon with no rings".to_owned(),
        });
    };

    let exterior = ring_to_linestring(exterior, feature)?;
    let interiors = interiors
        .iter()
        .map(|ring| ring_to_linestring(ring, feature))
        .collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

fn ring_to_linestring(ring: &[Vec<f64>], feature: &str) -> Result<LineString> {
    ring.iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(GeoDataError::UnsupportedGeometry {
                feature: feature.to_owned(),
                kind: "position with fewer than two coordinates".to_owned(),
            }),
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

// ============================================================================
// Output
// ============================================================================

fn multipolygon_to_geojson(mp: &MultiPolygon) -> Value {
    let polygons: Vec<Vec<Vec<Vec<f64>>>> = mp
        .0
        .iter()
        .map(|poly| {
            std::iter::once(poly.exterior())
                .chain(poly.interiors())
                .map(|ring| ring.0.iter().map(|c| vec![c.x, c.y]).collect::<Vec<_>>())
                .collect::<Vec<_>>()
        })
        .collect();

    Value::MultiPolygon(polygons)
}

/// A country's outline as a GeoJSON feature, named in `locale`
pub fn outline_feature(country: &Country, locale: Locale) -> Feature {
    let mut properties = serde_json::Map::new();
    properties.insert("fid".to_string(), serde_json::json!(country.id.as_str()));
    properties.insert(
        "name".to_string(),
        serde_json::json!(country.display_name(locale)),
    );
    properties.insert("lat".to_string(), serde_json::json!(country.centroid.latitude()));
    properties.insert("lon".to_string(), serde_json::json!(country.centroid.longitude()));

    Feature {
        properties: Some(properties),
        ..anonymous_outline_feature(&country.boundary)
    }
}

/// An outline as a bare GeoJSON feature: geometry only, nothing naming the country
pub fn anonymous_outline_feature(outline: &MultiPolygon) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(multipolygon_to_geojson(outline))),
        id: None,
        properties: None,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountryStore;
    use approx::assert_relative_eq;

    const DATASET: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "fid": 1, "name_en": "France", "name_fr": "France", "name_de": "Frankreich",
                                "type": "Sovereign country", "lat": 46.6, "lon": 2.4 },
                "geometry": { "type": "Polygon", "coordinates": [[[0,43],[6,43],[6,50],[0,50],[0,43]]] }
            },
            {
                "type": "Feature",
                "id": "squareland",
                "properties": { "name": "Squareland", "type": "Country" },
                "geometry": { "type": "MultiPolygon", "coordinates": [[[[10,10],[12,10],[12,12],[10,12],[10,10]]]] }
            },
            {
                "type": "Feature",
                "properties": { "fid": 3, "name_en": "French Guiana", "type": "Dependency", "lat": 4.0, "lon": -53.0 },
                "geometry": { "type": "Polygon", "coordinates": [[[-54,2],[-52,2],[-52,5],[-54,5],[-54,2]]] }
            }
        ]
    }"#;

    #[test]
    fn test_load_dataset() {
        let store = from_geojson_str(DATASET, LoadOptions::default()).unwrap();
        assert_eq!(store.len(), 2);

        let france = store.lookup(&CountryIdentifier::new("1")).unwrap();
        assert_eq!(&*france.name, "France");
        assert_eq!(france.display_name(Locale::De), "Frankreich");
        assert_eq!(france.kind, TerritoryKind::SovereignCountry);
        assert_relative_eq!(france.centroid.latitude(), 46.6);
        assert_eq!(france.boundary.0.len(), 1);
    }

    #[test]
    fn test_centroid_computed_from_boundary() {
        let store = from_geojson_str(DATASET, LoadOptions::default()).unwrap();
        let square = store.lookup(&CountryIdentifier::new("squareland")).unwrap();

        assert_relative_eq!(square.centroid.latitude(), 11.0, epsilon = 1e-9);
        assert_relative_eq!(square.centroid.longitude(), 11.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dependencies_filtered_unless_requested() {
        let store = from_geojson_str(DATASET, LoadOptions::default()).unwrap();
        assert!(store.lookup(&CountryIdentifier::new("3")).is_none());

        let all = from_geojson_str(
            DATASET,
            LoadOptions {
                include_dependencies: true,
            },
        )
        .unwrap();
        let guiana = all.lookup(&CountryIdentifier::new("3")).unwrap();
        assert!(!guiana.is_playable());
    }

    #[test]
    fn test_invalid_centroid_is_fatal() {
        let bad = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"fid": 9, "name_en": "Nowhere", "lat": 123.0, "lon": 0.0},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}}
        ]}"#;

        let err = from_geojson_str(bad, LoadOptions::default()).unwrap_err();
        assert!(matches!(err, GeoDataError::InvalidCoordinate { ref feature, .. } if feature == "9"));
    }

    #[test]
    fn test_rejects_bad_features() {
        let no_name = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"fid": 1},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}}
        ]}"#;
        assert!(matches!(
            from_geojson_str(no_name, LoadOptions::default()),
            Err(GeoDataError::MissingProperty { property: "name_en", .. })
        ));

        let point = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"fid": 1, "name_en": "Dot"},
             "geometry": {"type": "Point", "coordinates": [0, 0]}}
        ]}"#;
        assert!(matches!(
            from_geojson_str(point, LoadOptions::default()),
            Err(GeoDataError::UnsupportedGeometry { ref kind, .. }) if kind == "Point"
        ));

        let geometry_only = r#"{"type": "Point", "coordinates": [0, 0]}"#;
        assert!(matches!(
            from_geojson_str(geometry_only, LoadOptions::default()),
            Err(GeoDataError::NotAFeatureCollection)
        ));

        assert!(matches!(
            from_geojson_str("not json", LoadOptions::default()),
            Err(GeoDataError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_geojson("/definitely/not/here.geojson", LoadOptions::default()).unwrap_err();
        assert!(matches!(err, GeoDataError::Io { .. }));
    }

    #[test]
    fn test_outline_feature() {
        let store = from_geojson_str(DATASET, LoadOptions::default()).unwrap();
        let france = store.lookup(&CountryIdentifier::new("1")).unwrap();

        let feature = outline_feature(&france, Locale::De);
        assert_eq!(
            feature.property("name").and_then(JsonValue::as_str),
            Some("Frankreich")
        );
        match feature.geometry.map(|g| g.value) {
            Some(Value::MultiPolygon(polygons)) => {
                assert_eq!(polygons.len(), 1);
                assert_eq!(polygons[0][0].len(), 5);
            }
            other => panic!("unexpected geometry: {other:?}"),
        }
    }

    #[test]
    fn test_anonymous_outline_feature() {
        let store = from_geojson_str(DATASET, LoadOptions::default()).unwrap();
        let france = store.lookup(&CountryIdentifier::new("1")).unwrap();

        let feature = anonymous_outline_feature(&france.boundary);
        assert!(feature.properties.is_none());
        assert!(feature.id.is_none());
        assert_eq!(feature.geometry, outline_feature(&france, Locale::En).geometry);
    }
}
