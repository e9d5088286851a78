// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spherical trigonometry on a sphere of given radius
//!
//! Symbols span tens of meters, so first-order great-circle math is used
//! rather than an ellipsoidal model. The radius is always passed in; callers
//! normally use [`MEAN_EARTH_RADIUS`].

use geosym_core::LatLng;

/// Mean Earth radius in meters (IUGG)
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

/// Wrap a longitude into `[-180, 180)`
#[inline]
pub fn wrap_longitude(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// Destination reached from `from` after `distance` meters along `heading`
///
/// `heading` is in degrees clockwise from north and may lie outside
/// `[0, 360)`. Negative distances travel the opposite way.
pub fn compute_offset(from: LatLng, distance: f64, heading: f64, radius: f64) -> LatLng {
    let angular = distance / radius;
    let heading = heading.to_radians();
    let from_lat = from.lat.to_radians();
    let from_lng = from.lng.to_radians();

    let (sin_dist, cos_dist) = angular.sin_cos();
    let (sin_from_lat, cos_from_lat) = from_lat.sin_cos();

    let sin_lat = cos_dist * sin_from_lat + sin_dist * cos_from_lat * heading.cos();
    let d_lng = (sin_dist * cos_from_lat * heading.sin()).atan2(cos_dist - sin_from_lat * sin_lat);

    LatLng::new(
        sin_lat.clamp(-1.0, 1.0).asin().to_degrees(),
        wrap_longitude((from_lng + d_lng).to_degrees()),
    )
}

/// Great-circle distance in meters (haversine)
pub fn compute_distance(from: LatLng, to: LatLng, radius: f64) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * radius * a.sqrt().min(1.0).asin()
}

/// Initial bearing from `from` to `to`, degrees in `[0, 360)`
pub fn compute_heading(from: LatLng, to: LatLng) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}
