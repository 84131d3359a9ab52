//! Great-circle distance primitives.
//!
//! All inputs are in degrees; trigonometry runs in radians. Nothing is
//! cached: catalogs are small enough that recomputing per call is cheaper
//! than maintaining an index.

use laras_project_models::{GeoPoint, ProjectGeometry};

use crate::GeometryError;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
#[must_use]
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    haversine_km(a.latitude(), a.longitude(), b.latitude(), b.longitude())
}

/// Distance from `p` to the segment `v`–`w`, in kilometers.
///
/// The projection parameter is computed in a local equirectangular plane
/// centered on `p`'s latitude and clamped to the segment; the returned
/// distance is the haversine distance to the projected point. The planar
/// step is accurate at the tens-of-kilometers scale of project
/// alignments.
#[must_use]
pub fn distance_to_segment(p: &GeoPoint, v: &GeoPoint, w: &GeoPoint) -> f64 {
    let lng_scale = p.latitude().to_radians().cos();

    let seg_lng = wrap_longitude(w.longitude() - v.longitude());
    let seg_x = seg_lng * lng_scale;
    let seg_y = w.latitude() - v.latitude();
    let len_sq = seg_x.mul_add(seg_x, seg_y * seg_y);

    if len_sq == 0.0 {
        return distance(p, v);
    }

    let rel_x = wrap_longitude(p.longitude() - v.longitude()) * lng_scale;
    let rel_y = p.latitude() - v.latitude();
    let t = (rel_x.mul_add(seg_x, rel_y * seg_y) / len_sq).clamp(0.0, 1.0);

    // Interpolating between two valid points stays in range.
    let lat = t.mul_add(w.latitude() - v.latitude(), v.latitude());
    let lng = t.mul_add(seg_lng, v.longitude());

    haversine_km(p.latitude(), p.longitude(), lat, lng)
}

/// Maps a longitude difference into `[-180, 180)`, so segments crossing
/// the antimeridian are measured the short way round.
fn wrap_longitude(delta: f64) -> f64 {
    (delta + 540.0).rem_euclid(360.0) - 180.0
}

/// Minimum distance from `p` to any segment of the polyline, in
/// kilometers.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidGeometry`] if fewer than two vertices
/// are supplied.
pub fn distance_to_polyline(p: &GeoPoint, vertices: &[GeoPoint]) -> Result<f64, GeometryError> {
    if vertices.len() < 2 {
        return Err(GeometryError::InvalidGeometry {
            vertex_count: vertices.len(),
        });
    }

    Ok(vertices
        .windows(2)
        .map(|pair| distance_to_segment(p, &pair[0], &pair[1]))
        .fold(f64::INFINITY, f64::min))
}

/// Distance from `p` to a project geometry, in kilometers.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidGeometry`] for a path with fewer than
/// two vertices.
pub fn distance_to_geometry(
    p: &GeoPoint,
    geometry: &ProjectGeometry,
) -> Result<f64, GeometryError> {
    match geometry {
        ProjectGeometry::Point { location } => Ok(distance(p, location)),
        ProjectGeometry::Path { vertices } => distance_to_polyline(p, vertices),
    }
}

fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let h = (phi1.cos() * phi2.cos()).mul_add(
        (d_lambda / 2.0).sin().powi(2),
        (d_phi / 2.0).sin().powi(2),
    );

    // Rounding can push `h` a hair past 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (pt(12.9716, 77.5946), pt(13.0827, 80.2707)),
            (pt(28.6139, 77.2090), pt(19.0760, 72.8777)),
            (pt(-33.8688, 151.2093), pt(51.5074, -0.1278)),
            (pt(0.0, 179.9), pt(0.0, -179.9)),
        ];
        for (a, b) in &pairs {
            assert!((distance(a, b) - distance(b, a)).abs() < 1e-6);
        }
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = pt(17.3850, 78.4867);
        assert!(distance(&a, &a).abs() < f64::EPSILON);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance(&pt(10.0, 77.0), &pt(11.0, 77.0));
        assert!((d - 111.19).abs() < 0.01, "got {d}");
    }

    #[test]
    fn known_city_pair_distance() {
        // Bangalore to Chennai is roughly 290 km as the crow flies.
        let d = distance(&pt(12.9716, 77.5946), &pt(13.0827, 80.2707));
        assert!((d - 290.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn segment_projection_beyond_end_clamps_to_end_vertex() {
        let v = pt(12.90, 77.60);
        let w = pt(12.95, 77.60);
        let p = pt(13.00, 77.60);
        assert!((distance_to_segment(&p, &v, &w) - distance(&p, &w)).abs() < 1e-9);
    }

    #[test]
    fn segment_projection_before_start_clamps_to_start_vertex() {
        let v = pt(12.90, 77.60);
        let w = pt(12.95, 77.65);
        let p = pt(12.85, 77.55);
        assert!((distance_to_segment(&p, &v, &w) - distance(&p, &v)).abs() < 1e-9);
    }

    #[test]
    fn degenerate_segment_reduces_to_point_distance() {
        let v = pt(19.0760, 72.8777);
        let p = pt(19.10, 72.90);
        assert!((distance_to_segment(&p, &v, &v) - distance(&p, &v)).abs() < 1e-12);
    }

    #[test]
    fn perpendicular_distance_to_segment_interior() {
        // East-west segment along the equator; point 0.01 degrees north of
        // its midpoint.
        let v = pt(0.0, 10.0);
        let w = pt(0.0, 10.2);
        let p = pt(0.01, 10.1);
        let expected = distance(&p, &pt(0.0, 10.1));
        assert!((distance_to_segment(&p, &v, &w) - expected).abs() < 1e-6);
        assert!(distance_to_segment(&p, &v, &w) < distance(&p, &v));
    }

    #[test]
    fn polyline_requires_two_vertices() {
        let p = pt(12.0, 77.0);
        assert_eq!(
            distance_to_polyline(&p, &[]),
            Err(GeometryError::InvalidGeometry { vertex_count: 0 })
        );
        assert_eq!(
            distance_to_polyline(&p, &[pt(12.1, 77.1)]),
            Err(GeometryError::InvalidGeometry { vertex_count: 1 })
        );
    }

    #[test]
    fn polyline_closest_approach_in_interior_of_second_segment() {
        // An L-shaped then eastward path; the query point sits just south
        // of the middle of the second segment.
        let vertices = [pt(12.90, 77.50), pt(13.00, 77.50), pt(13.00, 77.70)];
        let p = pt(12.99, 77.60);

        let polyline = distance_to_polyline(&p, &vertices).unwrap();
        let segment = distance_to_segment(&p, &vertices[1], &vertices[2]);

        assert!((polyline - segment).abs() < 1e-12);
        assert!(polyline < distance(&p, &vertices[1]));
        assert!(polyline < distance(&p, &vertices[2]));
        assert!((polyline - 1.112).abs() < 0.01, "got {polyline}");
    }

    #[test]
    fn segment_across_antimeridian_takes_short_way() {
        let v = pt(0.0, 179.99);
        let w = pt(0.0, -179.99);
        let p = pt(0.005, 180.0);

        let d = distance_to_segment(&p, &v, &w);
        assert!((d - 0.556).abs() < 0.01, "got {d}");
        assert!(d < distance(&p, &v));
    }

    #[test]
    fn geometry_dispatches_by_variant() {
        let p = pt(13.0, 80.0);
        let location = pt(13.01, 80.0);
        let point = ProjectGeometry::Point { location };
        let expected = distance(&p, &location);
        assert!((distance_to_geometry(&p, &point).unwrap() - expected).abs() < 1e-12);

        let broken = ProjectGeometry::Path {
            vertices: vec![location],
        };
        assert!(matches!(
            distance_to_geometry(&p, &broken),
            Err(GeometryError::InvalidGeometry { vertex_count: 1 })
        ));
    }
}
