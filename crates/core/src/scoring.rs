use std::f64::consts::PI;

use geo::{Bearing, Distance, Haversine, HaversineMeasure, Point};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use worldle_geodata::{InvalidCoordinate, validate_coordinate};

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const EARTH_RADIUS_MI: f64 = 3956.0;

// A guess that is not exactly on target never rounds up to a perfect score.
const BEST_IMPERFECT_PROXIMITY: f64 = 100.0 - 1e-9;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

impl DistanceUnit {
    pub fn earth_radius(&self) -> f64 {
        match self {
            DistanceUnit::Kilometers => EARTH_RADIUS_KM,
            DistanceUnit::Miles => EARTH_RADIUS_MI,
        }
    }

    /// Half the circumference: the farthest two points can be apart.
    pub fn max_distance(&self) -> f64 {
        PI * self.earth_radius()
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
        }
    }
}

fn validate(point: Point) -> Result<(), InvalidCoordinate> {
    validate_coordinate(point.y(), point.x())
}

/// Great-circle distance between two (lon, lat) points, in `unit`.
pub fn haversine_distance(
    from: Point,
    to: Point,
    unit: DistanceUnit,
) -> Result<f64, InvalidCoordinate> {
    validate(from)?;
    validate(to)?;

    Ok(HaversineMeasure::new(unit.earth_radius()).distance(from, to))
}

/// Initial compass bearing in [0, 360) from `from` toward `to`.
///
/// Coincident points have no direction; their bearing is 0.
pub fn initial_bearing(from: Point, to: Point) -> Result<f64, InvalidCoordinate> {
    if haversine_distance(from, to, DistanceUnit::Kilometers)? == 0.0 {
        return Ok(0.0);
    }

    let bearing = Haversine.bearing(from, to).rem_euclid(360.0);
    if bearing >= 360.0 {
        Ok(0.0)
    } else {
        Ok(bearing)
    }
}

/// Closeness score in [0, 100]: 100 on target, 0 at the antipode.
pub fn proximity(distance: f64, unit: DistanceUnit) -> f64 {
    let max_distance = unit.max_distance();

    if distance <= 0.0 {
        return 100.0;
    }
    if distance.is_nan() || distance >= max_distance {
        return 0.0;
    }

    (100.0 * (1.0 - distance / max_distance)).clamp(0.0, BEST_IMPERFECT_PROXIMITY)
}

/// Eight-point compass heading, the coarse form of a bearing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum CompassDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassDirection {
    const ALL: [CompassDirection; 8] = [
        CompassDirection::N,
        CompassDirection::NE,
        CompassDirection::E,
        CompassDirection::SE,
        CompassDirection::S,
        CompassDirection::SW,
        CompassDirection::W,
        CompassDirection::NW,
    ];

    pub fn from_bearing(bearing: f64) -> Self {
        let sector = ((bearing.rem_euclid(360.0) + 22.5) / 45.0).floor() as usize;
        Self::ALL[sector % 8]
    }

    pub fn arrow(&self) -> char {
        match self {
            CompassDirection::N => '↑',
            CompassDirection::NE => '↗',
            CompassDirection::E => '→',
            CompassDirection::SE => '↘',
            CompassDirection::S => '↓',
            CompassDirection::SW => '↙',
            CompassDirection::W => '←',
            CompassDirection::NW => '↖',
        }
    }
}

/// Medal shown next to a guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ProximityTier {
    Gold,
    Silver,
    Bronze,
}

impl ProximityTier {
    /// Tiers compare the whole-number part of the percentage.
    pub fn from_proximity(proximity: f64) -> Self {
        let whole = proximity.trunc();
        if whole >= 100.0 {
            ProximityTier::Gold
        } else if whole > 50.0 {
            ProximityTier::Silver
        } else {
            ProximityTier::Bronze
        }
    }

    pub fn medal(&self) -> &'static str {
        match self {
            ProximityTier::Gold => "🥇",
            ProximityTier::Silver => "🥈",
            ProximityTier::Bronze => "🥉",
        }
    }
}

/// Feedback for one guess against the mystery country.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub distance: f64,
    pub bearing: f64,
    pub proximity: f64,
    pub direction: CompassDirection,
    pub tier: ProximityTier,
    pub unit: DistanceUnit,
}

impl Score {
    /// The score of the correct country.
    pub fn exact(unit: DistanceUnit) -> Self {
        Self {
            distance: 0.0,
            bearing: 0.0,
            proximity: 100.0,
            direction: CompassDirection::N,
            tier: ProximityTier::Gold,
            unit,
        }
    }
}

pub fn score(guess: Point, mystery: Point, unit: DistanceUnit) -> Result<Score, InvalidCoordinate> {
    let distance = haversine_distance(guess, mystery, unit)?;
    let bearing = initial_bearing(guess, mystery)?;
    let proximity = proximity(distance, unit);

    Ok(Score {
        distance,
        bearing,
        proximity,
        direction: CompassDirection::from_bearing(bearing),
        tier: ProximityTier::from_proximity(proximity),
        unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn paris() -> Point {
        Point::new(2.35, 48.85)
    }

    fn london() -> Point {
        Point::new(-0.13, 51.51)
    }

    #[test]
    fn test_paris_to_london() {
        let distance = haversine_distance(paris(), london(), DistanceUnit::Kilometers).unwrap();
        assert!((340.0..348.0).contains(&distance), "got {distance}");

        let prox = proximity(distance, DistanceUnit::Kilometers);
        assert!((prox - 98.3).abs() < 0.05, "got {prox}");
        assert_eq!(ProximityTier::from_proximity(prox), ProximityTier::Silver);

        // London is north-west of Paris
        let bearing = initial_bearing(paris(), london()).unwrap();
        assert!(bearing > 300.0 && bearing < 340.0, "got {bearing}");
        assert_eq!(CompassDirection::from_bearing(bearing), CompassDirection::NW);
    }

    #[test]
    fn test_max_distance() {
        assert_relative_eq!(DistanceUnit::Kilometers.max_distance(), 20015.086, epsilon = 1e-3);

        let antipode = haversine_distance(
            Point::new(0.0, 0.0),
            Point::new(180.0, 0.0),
            DistanceUnit::Kilometers,
        )
        .unwrap();
        assert_relative_eq!(antipode, DistanceUnit::Kilometers.max_distance(), epsilon = 1e-6);
    }

    #[test]
    fn test_quarter_circle_uses_unit_radius() {
        let origin = Point::new(0.0, 0.0);
        let quarter = Point::new(90.0, 0.0);

        for unit in [DistanceUnit::Kilometers, DistanceUnit::Miles] {
            let distance = haversine_distance(origin, quarter, unit).unwrap();
            assert_relative_eq!(distance, unit.earth_radius() * PI / 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_miles() {
        let km = haversine_distance(paris(), london(), DistanceUnit::Kilometers).unwrap();
        let mi = haversine_distance(paris(), london(), DistanceUnit::Miles).unwrap();
        assert_relative_eq!(mi / km, EARTH_RADIUS_MI / EARTH_RADIUS_KM, epsilon = 1e-12);

        // Proximity is relative to the unit's own maximum
        assert_relative_eq!(
            proximity(km, DistanceUnit::Kilometers),
            proximity(mi, DistanceUnit::Miles),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_invalid_coordinates() {
        let bad = Point::new(0.0, 95.0);
        assert_eq!(
            haversine_distance(bad, paris(), DistanceUnit::Kilometers),
            Err(InvalidCoordinate { latitude: 95.0, longitude: 0.0 })
        );
        assert!(initial_bearing(paris(), Point::new(-181.0, 0.0)).is_err());
        assert!(score(Point::new(f64::NAN, 0.0), paris(), DistanceUnit::Kilometers).is_err());
    }

    #[test]
    fn test_coincident_points() {
        let s = score(paris(), paris(), DistanceUnit::Kilometers).unwrap();
        assert_eq!(s.distance, 0.0);
        assert_eq!(s.bearing, 0.0);
        assert_eq!(s.proximity, 100.0);
        assert_eq!(s.tier, ProximityTier::Gold);
        assert_eq!(s, Score::exact(DistanceUnit::Kilometers));
    }

    #[test]
    fn test_cardinal_bearings() {
        let origin = Point::new(0.0, 0.0);
        let cases = [
            (Point::new(0.0, 10.0), 0.0),
            (Point::new(10.0, 0.0), 90.0),
            (Point::new(0.0, -10.0), 180.0),
            (Point::new(-10.0, 0.0), 270.0),
        ];

        for (target, expected) in cases {
            let bearing = initial_bearing(origin, target).unwrap();
            assert_relative_eq!(bearing, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_proximity_bounds() {
        let unit = DistanceUnit::Kilometers;
        assert_eq!(proximity(0.0, unit), 100.0);
        assert_eq!(proximity(unit.max_distance(), unit), 0.0);
        assert_eq!(proximity(50_000.0, unit), 0.0);
        assert_eq!(proximity(f64::NAN, unit), 0.0);
        assert!(proximity(1e-9, unit) < 100.0);
        assert_relative_eq!(proximity(unit.max_distance() / 2.0, unit), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_compass_sectors() {
        assert_eq!(CompassDirection::from_bearing(0.0), CompassDirection::N);
        assert_eq!(CompassDirection::from_bearing(22.4), CompassDirection::N);
        assert_eq!(CompassDirection::from_bearing(22.5), CompassDirection::NE);
        assert_eq!(CompassDirection::from_bearing(180.0), CompassDirection::S);
        assert_eq!(CompassDirection::from_bearing(337.6), CompassDirection::N);
        assert_eq!(CompassDirection::from_bearing(359.9), CompassDirection::N);
        assert_eq!(CompassDirection::W.arrow(), '←');
    }

    #[test]
    fn test_tiers() {
        assert_eq!(ProximityTier::from_proximity(100.0), ProximityTier::Gold);
        assert_eq!(ProximityTier::from_proximity(99.99), ProximityTier::Silver);
        assert_eq!(ProximityTier::from_proximity(50.9), ProximityTier::Bronze);
        assert_eq!(ProximityTier::from_proximity(51.0), ProximityTier::Silver);
        assert_eq!(ProximityTier::from_proximity(0.0), ProximityTier::Bronze);
    }
}
