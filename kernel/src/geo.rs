/// Great-circle distance via the spherical law of cosines.

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance in kilometers between two (latitude, longitude) points given in
/// degrees. The acos argument is clamped to [-1, 1]: rounding can push it
/// slightly above 1 for coincident points, which would otherwise yield NaN.
pub fn distance_km(lat0: f64, lng0: f64, lat1: f64, lng1: f64) -> f64 {
    // Coincident points short-circuit: a 1-ulp rounding of sin^2 + cos^2
    // below 1 would otherwise report a spurious hundred meters.
    if lat0 == lat1 && lng0 == lng1 {
        return 0.0;
    }

    let phi0 = lat0.to_radians();
    let phi1 = lat1.to_radians();
    let delta_lambda = (lng1 - lng0).to_radians();

    let central = phi0.cos() * phi1.cos() * delta_lambda.cos() + phi0.sin() * phi1.sin();
    EARTH_RADIUS_KM * central.clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_points_are_zero_not_nan() {
        let d = distance_km(-34.6037, -58.3816, -34.6037, -58.3816);
        assert!(d.is_finite());
        assert_eq!(d, 0.0);
    }

    #[test]
    fn known_city_pair_is_in_range() {
        // Buenos Aires (Obelisco) to Montevideo, roughly 205 km.
        let d = distance_km(-34.6037, -58.3816, -34.9011, -56.1645);
        assert!((200.0..210.0).contains(&d), "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = distance_km(40.4168, -3.7038, 48.8566, 2.3522);
        let b = distance_km(48.8566, 2.3522, 40.4168, -3.7038);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn short_distances_stay_positive() {
        // Two points ~150 m apart.
        let d = distance_km(-34.6037, -58.3816, -34.6050, -58.3820);
        assert!(d > 0.0 && d < 1.0);
    }
}
