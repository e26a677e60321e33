use crate::core::error::DiscoveryError;
use crate::models::Location;

/// Mean Earth radius in kilometers (IUGG)
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance between two points in kilometers on the mean Earth sphere
///
/// Fails with `InvalidCoordinate` if either point is outside the valid
/// latitude/longitude ranges.
#[inline]
pub fn haversine_distance(a: &Location, b: &Location) -> Result<f64, DiscoveryError> {
    haversine_distance_with_radius(a, b, EARTH_RADIUS_KM)
}

/// Great-circle distance on a sphere of the given radius
///
/// # Arguments
/// * `a` - First point in degrees
/// * `b` - Second point in degrees
/// * `radius_km` - Sphere radius in kilometers
///
/// # Returns
/// Distance in kilometers, never negative and never NaN for valid inputs
pub fn haversine_distance_with_radius(
    a: &Location,
    b: &Location,
    radius_km: f64,
) -> Result<f64, DiscoveryError> {
    ensure_valid(a)?;
    ensure_valid(b)?;

    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    // sqrt(h) can overshoot 1.0 by an ulp near antipodes
    let c = 2.0 * h.sqrt().min(1.0).asin();

    Ok(radius_km * c)
}

#[inline]
fn ensure_valid(location: &Location) -> Result<(), DiscoveryError> {
    if location.is_valid() {
        Ok(())
    } else {
        Err(DiscoveryError::InvalidCoordinate {
            latitude: location.latitude,
            longitude: location.longitude,
        })
    }
}
