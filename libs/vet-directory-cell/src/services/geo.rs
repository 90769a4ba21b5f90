/// Great-circle distance helpers for the nearby search path.
///
/// Coordinates arrive from the caller's geolocation lookup and are always
/// optional: a denied or timed-out lookup downgrades the search to
/// non-location mode instead of failing it.

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl UserLocation {
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Self {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

/// Haversine distance in kilometers.
pub fn haversine_km(from: UserLocation, to: (f64, f64)) -> f64 {
    let (to_lat, to_lon) = to;
    let d_lat = (to_lat - from.latitude).to_radians();
    let d_lon = (to_lon - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos() * to_lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let here = UserLocation {
            latitude: 12.9716,
            longitude: 77.5946,
        };
        assert!(haversine_km(here, (12.9716, 77.5946)).abs() < 1e-9);
    }

    #[test]
    fn bangalore_to_mysore_is_about_140km() {
        let bangalore = UserLocation {
            latitude: 12.9716,
            longitude: 77.5946,
        };
        let distance = haversine_km(bangalore, (12.2958, 76.6394));
        assert!((130.0..150.0).contains(&distance), "got {distance}");
    }

    #[test]
    fn location_requires_both_coordinates() {
        assert!(UserLocation::from_parts(Some(1.0), None).is_none());
        assert!(UserLocation::from_parts(None, Some(1.0)).is_none());
        assert!(UserLocation::from_parts(Some(1.0), Some(2.0)).is_some());
    }
}
