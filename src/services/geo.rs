// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Great-circle distance between geolocation fixes.

use crate::models::GeoPoint;
use geo::{Distance, HaversineMeasure, Point};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two lat/lon pairs given in degrees.
///
/// Inputs are not range-checked.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    HaversineMeasure::new(EARTH_RADIUS_M).distance(Point::new(lon1, lat1), Point::new(lon2, lat2))
}

/// Haversine distance in meters between two points.
pub fn point_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    HaversineMeasure::new(EARTH_RADIUS_M).distance(Point::from(*a), Point::from(*b))
}
