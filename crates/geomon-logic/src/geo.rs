//! Distance helpers on geographic coordinates.
//!
//! Two flavors, chosen per call site:
//! - [`haversine_m`]: great-circle distance, used for zone membership and
//!   the caller-side movement throttle.
//! - [`planar_distance_m`]: equirectangular small-angle approximation, used
//!   by the visibility filter, where distances stay under a few hundred
//!   meters.

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle (Haversine) distance in meters between two lat/lng points.
pub fn haversine_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    EARTH_RADIUS_M * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Flat-earth planar distance in meters, valid for sub-kilometer spans.
///
/// Longitude is scaled by the cosine of the mid-latitude. Within one sector
/// neighborhood (~1 km) this stays within a fraction of a percent of
/// [`haversine_m`].
pub fn planar_distance_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let mid_lat = ((lat1 + lat2) / 2.0).to_radians();
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians() * mid_lat.cos();
    EARTH_RADIUS_M * (d_lat * d_lat + d_lng * d_lng).sqrt()
}
