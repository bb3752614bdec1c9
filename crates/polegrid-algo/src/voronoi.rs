//! Voronoi vertex computation.
//!
//! Coordinates are treated as planar `(latitude, longitude)` pairs. The
//! Voronoi vertices of a point set are the circumcenters of its Delaunay
//! triangles, so a backend only has to triangulate.

use polegrid_core::{PlanError, PlanOutcome};
use spade::{DelaunayTriangulation, Point2, Triangulation};

/// A point in the `(latitude, longitude)` plane. May lie outside the valid
/// coordinate ranges; callers revalidate before turning it into a pole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPoint {
    pub lat: f64,
    pub lng: f64,
}

impl PlanarPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Produces the finite Voronoi vertices of a planar point set.
///
/// Fewer than three points, or a collinear set, yields an empty list rather
/// than an error.
pub trait VoronoiBackend: Send + Sync {
    /// Unique identifier (e.g. "spade")
    fn id(&self) -> &str;

    fn vertices(&self, points: &[PlanarPoint]) -> PlanOutcome<Vec<PlanarPoint>>;
}

/// Delaunay triangulation from the `spade` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpadeVoronoi;

impl VoronoiBackend for SpadeVoronoi {
    fn id(&self) -> &str {
        "spade"
    }

    fn vertices(&self, points: &[PlanarPoint]) -> PlanOutcome<Vec<PlanarPoint>> {
        if points.len() < 3 {
            return Ok(Vec::new());
        }

        let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
        for point in points {
            triangulation
                .insert(Point2::new(point.lat, point.lng))
                .map_err(|e| {
                    PlanError::Geometry(format!(
                        "cannot triangulate ({}, {}): {e:?}",
                        point.lat, point.lng
                    ))
                })?;
        }

        let mut vertices = Vec::with_capacity(triangulation.num_inner_faces());
        for face in triangulation.inner_faces() {
            let [a, b, c] = face.vertices();
            if let Some(center) = circumcenter(a.position(), b.position(), c.position()) {
                vertices.push(PlanarPoint::new(center.x, center.y));
            }
        }
        Ok(vertices)
    }
}

// Solved relative to `p1` so large absolute coordinates keep their precision.
fn circumcenter(p1: Point2<f64>, p2: Point2<f64>, p3: Point2<f64>) -> Option<Point2<f64>> {
    let (bx, by) = (p2.x - p1.x, p2.y - p1.y);
    let (cx, cy) = (p3.x - p1.x, p3.y - p1.y);

    let d = 2.0 * (bx * cy - by * cx);
    // Degenerate (collinear) triangle
    if d.abs() < 1e-18 {
        return None;
    }

    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;
    Some(Point2::new(p1.x + ux, p1.y + uy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lng: f64) -> PlanarPoint {
        PlanarPoint::new(lat, lng)
    }

    fn close(a: PlanarPoint, b: PlanarPoint) -> bool {
        (a.lat - b.lat).abs() < 1e-9 && (a.lng - b.lng).abs() < 1e-9
    }

    #[test]
    fn test_right_triangle_circumcenter_is_hypotenuse_midpoint() {
        let vertices = SpadeVoronoi
            .vertices(&[p(0.0, 0.0), p(2.0, 0.0), p(0.0, 2.0)])
            .unwrap();
        assert_eq!(vertices.len(), 1);
        assert!(close(vertices[0], p(1.0, 1.0)));
    }

    #[test]
    fn test_square_vertices_meet_at_center() {
        let vertices = SpadeVoronoi
            .vertices(&[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)])
            .unwrap();
        assert_eq!(vertices.len(), 2);
        for v in vertices {
            assert!(close(v, p(0.5, 0.5)));
        }
    }

    #[test]
    fn test_fewer_than_three_points_is_empty() {
        assert!(SpadeVoronoi.vertices(&[]).unwrap().is_empty());
        assert!(SpadeVoronoi
            .vertices(&[p(0.0, 0.0), p(0.0, 0.001)])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_collinear_points_have_no_vertices() {
        let vertices = SpadeVoronoi
            .vertices(&[p(0.0, 0.0), p(0.0, 0.001), p(0.0, 0.002), p(0.0, 0.003)])
            .unwrap();
        assert!(vertices.is_empty());
    }

    #[test]
    fn test_circumcenter_rejects_degenerate_triangle() {
        assert!(circumcenter(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0)
        )
        .is_none());
    }
}
