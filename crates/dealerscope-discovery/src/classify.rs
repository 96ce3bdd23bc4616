//! Distance computation and priority/threat tiering.
//!
//! The thresholds here are fixed business rules. They are compared against
//! the distance *after* rounding to two decimals, so a raw 10.004 miles
//! rounds to 10.00 and still counts as high priority.

use dealerscope_core::domain::Tier;
use dealerscope_places::Coordinate;

const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Derived classification for one discovered competitor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Great-circle distance from the anchor, rounded to 2 decimals.
    pub distance_miles: f64,
    /// Tier by proximity: closer competitors demand attention sooner.
    pub priority: Tier,
    /// Tier by reputation: higher-rated competitors are the bigger threat.
    pub threat: Tier,
}

/// Great-circle (haversine) distance between two coordinates, in miles.
#[must_use]
pub fn haversine_miles(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_MILES * h.sqrt().asin()
}

/// Priority tier by distance from the anchor.
#[must_use]
pub fn priority_for_distance(distance_miles: f64) -> Tier {
    if distance_miles <= 10.0 {
        Tier::High
    } else if distance_miles <= 20.0 {
        Tier::Medium
    } else {
        Tier::Low
    }
}

/// Threat tier by provider rating; an absent rating is the lowest threat.
#[must_use]
pub fn threat_for_rating(rating: Option<f64>) -> Tier {
    match rating {
        Some(r) if r >= 4.0 => Tier::High,
        Some(r) if r >= 3.5 => Tier::Medium,
        _ => Tier::Low,
    }
}

/// Classify one result relative to the anchor.
#[must_use]
pub fn classify(anchor: Coordinate, target: Coordinate, rating: Option<f64>) -> Classification {
    let distance_miles = round2(haversine_miles(anchor, target));
    Classification {
        distance_miles,
        priority: priority_for_distance(distance_miles),
        threat: threat_for_rating(rating),
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
