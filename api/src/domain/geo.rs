//! Great-circle distance

use super::entities::Coordinates;

/// Mean Earth radius used for distance calculations
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
///
/// Inputs are expected to be inside their domain bounds; this function does
/// not validate them.
pub fn haversine_km(from: &Coordinates, to: &Coordinates) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    // Rounding can push `a` just past 1 for antipodal points
    let a = ((d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    const TOLERANCE_KM: f64 = 1e-6;

    fn point(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates::new(latitude, longitude)
    }

    fn sample_points() -> Vec<Coordinates> {
        vec![
            point(0.0, 0.0),
            point(10.0, 10.0),
            point(-33.8688, 151.2093),
            point(51.5074, -0.1278),
            point(90.0, 0.0),
            point(-90.0, 180.0),
            point(40.7128, -74.006),
            point(0.0, 180.0),
            point(0.0, -180.0),
        ]
    }

    #[test]
    fn distance_to_self_is_zero() {
        for p in sample_points() {
            assert!(haversine_km(&p, &p).abs() < TOLERANCE_KM, "{:?}", p);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let points = sample_points();
        for a in &points {
            for b in &points {
                let ab = haversine_km(a, b);
                let ba = haversine_km(b, a);
                assert!((ab - ba).abs() < TOLERANCE_KM, "{:?} <-> {:?}", a, b);
            }
        }
    }

    #[test]
    fn distance_is_bounded_by_half_circumference() {
        let max = PI * EARTH_RADIUS_KM;
        let points = sample_points();
        for a in &points {
            for b in &points {
                let d = haversine_km(a, b);
                assert!(d >= 0.0);
                assert!(d <= max + TOLERANCE_KM, "{} > {}", d, max);
            }
        }
    }

    #[test]
    fn antipodal_points_are_half_circumference_apart() {
        let d = haversine_km(&point(0.0, 0.0), &point(0.0, 180.0));
        assert!((d - PI * EARTH_RADIUS_KM).abs() < 1e-3);
        assert!((d - 20015.1).abs() < 0.1);
    }

    #[test]
    fn opposite_meridian_signs_are_the_same_place() {
        let d = haversine_km(&point(0.0, 180.0), &point(0.0, -180.0));
        assert!(d.abs() < TOLERANCE_KM);
    }

    #[test]
    fn known_distance_origin_to_ten_ten() {
        let d = haversine_km(&point(0.0, 0.0), &point(10.0, 10.0));
        assert!((d - 1568.5).abs() < 1.0, "got {}", d);
    }

    #[test]
    fn distances_along_a_great_circle_add_up() {
        // Equator
        let a = point(0.0, 0.0);
        let b = point(0.0, 10.0);
        let c = point(0.0, 25.0);
        let direct = haversine_km(&a, &c);
        let via_b = haversine_km(&a, &b) + haversine_km(&b, &c);
        assert!((direct - via_b).abs() < 1e-6);

        // Meridian through Greenwich
        let a = point(-20.0, 0.0);
        let b = point(5.0, 0.0);
        let c = point(60.0, 0.0);
        let direct = haversine_km(&a, &c);
        let via_b = haversine_km(&a, &b) + haversine_km(&b, &c);
        assert!((direct - via_b).abs() < 1e-6);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_km(&point(0.0, 0.0), &point(1.0, 0.0));
        assert!((d - EARTH_RADIUS_KM * PI / 180.0).abs() < 1e-6);
    }
}
