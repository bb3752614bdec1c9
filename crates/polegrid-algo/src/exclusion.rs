//! Building footprints that candidate poles must avoid.
//!
//! Footprints arrive as rings of `[lat, lng]` vertices and are stored as
//! `geo` polygons with `x = lng`, `y = lat`.

use geo::{Contains, LineString, Point, Polygon};
use polegrid_core::request::FootprintRing;
use polegrid_core::{GeoPoint, PlanError, PlanOutcome};

#[derive(Debug, Clone, Default)]
pub struct BuildingFootprints {
    polygons: Vec<Polygon<f64>>,
}

impl BuildingFootprints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `[lat, lng]` rings. Each ring needs at least three
    /// vertices with valid coordinates; it is closed automatically.
    pub fn from_rings(rings: &[FootprintRing]) -> PlanOutcome<Self> {
        let mut footprints = Self::new();
        for (i, ring) in rings.iter().enumerate() {
            footprints.add_ring(ring).map_err(|e| match e {
                PlanError::InvalidInput(msg) => {
                    PlanError::InvalidInput(format!("building #{i}: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(footprints)
    }

    pub fn add_ring(&mut self, ring: &[[f64; 2]]) -> PlanOutcome<()> {
        if ring.len() < 3 {
            return Err(PlanError::InvalidInput(format!(
                "footprint needs at least 3 vertices, got {}",
                ring.len()
            )));
        }
        let mut coords = Vec::with_capacity(ring.len());
        for &[lat, lng] in ring {
            let vertex = GeoPoint::new(lat, lng)?;
            coords.push((vertex.longitude(), vertex.latitude()));
        }
        self.polygons
            .push(Polygon::new(LineString::from(coords), vec![]));
        Ok(())
    }

    /// Merge another set into this one.
    pub fn extend(&mut self, other: BuildingFootprints) {
        self.polygons.extend(other.polygons);
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// True when `point` lies strictly inside any footprint.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        let p = Point::new(point.longitude(), point.latitude());
        self.polygons.iter().any(|polygon| polygon.contains(&p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lat: f64, lng: f64, half: f64) -> FootprintRing {
        vec![
            [lat - half, lng - half],
            [lat - half, lng + half],
            [lat + half, lng + half],
            [lat + half, lng - half],
        ]
    }

    #[test]
    fn test_point_inside_footprint() {
        let footprints = BuildingFootprints::from_rings(&[square(10.0, 20.0, 0.0001)]).unwrap();
        assert_eq!(footprints.len(), 1);
        assert!(footprints.contains(&GeoPoint::new(10.0, 20.0).unwrap()));
        assert!(!footprints.contains(&GeoPoint::new(10.001, 20.0).unwrap()));
    }

    #[test]
    fn test_empty_set_contains_nothing() {
        let footprints = BuildingFootprints::new();
        assert!(footprints.is_empty());
        assert!(!footprints.contains(&GeoPoint::new(0.0, 0.0).unwrap()));
    }

    #[test]
    fn test_rejects_short_or_invalid_rings() {
        let err = BuildingFootprints::from_rings(&[vec![[0.0, 0.0], [0.0, 1.0]]]).unwrap_err();
        assert!(err.to_string().contains("building #0"));

        let err = BuildingFootprints::from_rings(&[vec![[95.0, 0.0], [0.0, 1.0], [1.0, 1.0]]]);
        assert!(err.is_err());
    }
}
