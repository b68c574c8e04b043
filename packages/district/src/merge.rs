//! Polygon union for district groups.
//!
//! A district's member polygons are folded into a single geometry with a
//! plane-sweep boolean union. The result is usually one connected
//! polygon; where the members do not all touch, the union legitimately
//! falls apart into several disjoint parts.

use geo::{BooleanOps, LineString, MultiPolygon, Polygon};
use jochome_map_gml_models::LonLatRing;

use crate::DistrictError;

/// Union primitive folded over a group's polygons.
///
/// The merge fold is written against this seam so the engine can be
/// swapped without touching group logic.
pub trait PolygonUnion {
    /// Returns the set-union of `acc` and `next`.
    fn union(&self, acc: &MultiPolygon<f64>, next: &MultiPolygon<f64>) -> MultiPolygon<f64>;
}

/// Plane-sweep union backed by `geo`'s `BooleanOps`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolOpsUnion;

impl PolygonUnion for BoolOpsUnion {
    fn union(&self, acc: &MultiPolygon<f64>, next: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        acc.union(next)
    }
}

/// Builds a closed polygon from a ring of (longitude, latitude) pairs.
fn ring_to_polygon(ring: &LonLatRing) -> Polygon<f64> {
    Polygon::new(LineString::from(ring.clone()), vec![])
}

/// Extracts the exterior boundary of a polygon as coordinate pairs.
fn exterior_ring(polygon: &Polygon<f64>) -> LonLatRing {
    polygon
        .exterior()
        .points()
        .map(|point| (point.x(), point.y()))
        .collect()
}

/// Unions the rings of district `district` into its disjoint parts.
///
/// The first ring seeds the accumulator; every further ring is folded in
/// through the engine. Interior holes of the merged result are discarded:
/// only exterior boundaries are returned, in the engine's component
/// order.
///
/// # Errors
///
/// Returns [`DistrictError::UnsupportedGeometry`] if the union collapses
/// to an empty geometry (or no rings were supplied at all).
pub fn merge_rings(
    engine: &impl PolygonUnion,
    district: &str,
    rings: &[&LonLatRing],
) -> Result<Vec<LonLatRing>, DistrictError> {
    let mut remaining = rings.iter();
    let Some(first) = remaining.next() else {
        return Err(DistrictError::UnsupportedGeometry {
            district: district.to_string(),
        });
    };

    let mut merged = MultiPolygon(vec![ring_to_polygon(first)]);
    for ring in remaining {
        let next = MultiPolygon(vec![ring_to_polygon(ring)]);
        merged = engine.union(&merged, &next);
    }

    if merged.0.is_empty() {
        return Err(DistrictError::UnsupportedGeometry {
            district: district.to_string(),
        });
    }

    Ok(merged.iter().map(exterior_ring).collect())
}

#[cfg(test)]
mod tests {
    use geo::Area;

    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> LonLatRing {
        vec![
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
            (x0, y0),
        ]
    }

    fn total_area(parts: &[LonLatRing]) -> f64 {
        parts
            .iter()
            .map(|ring| ring_to_polygon(ring).unsigned_area())
            .sum()
    }

    #[test]
    fn single_ring_passes_through_closed() {
        let ring = square(0.0, 0.0, 1.0);
        let parts = merge_rings(&BoolOpsUnion, "1条", &[&ring]).unwrap();

        assert_eq!(parts.len(), 1);
        assert!((total_area(&parts) - 1.0).abs() < 1e-9);
        assert_eq!(parts[0].first(), parts[0].last());
    }

    #[test]
    fn overlapping_squares_are_not_double_counted() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(0.5, 0.0, 1.0);
        let parts = merge_rings(&BoolOpsUnion, "1条", &[&a, &b]).unwrap();

        assert_eq!(parts.len(), 1);
        assert!(
            (total_area(&parts) - 1.5).abs() < 1e-9,
            "expected union area 1.5, got {}",
            total_area(&parts)
        );
    }

    #[test]
    fn adjacent_squares_merge_into_one_part() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(1.0, 0.0, 1.0);
        let parts = merge_rings(&BoolOpsUnion, "1条", &[&a, &b]).unwrap();

        assert_eq!(parts.len(), 1);
        assert!((total_area(&parts) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_squares_stay_separate_parts() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(3.0, 0.0, 1.0);
        let parts = merge_rings(&BoolOpsUnion, "1条", &[&a, &b]).unwrap();

        assert_eq!(parts.len(), 2);
        assert!((total_area(&parts) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn merging_merged_parts_is_idempotent() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(0.5, 0.0, 1.0);
        let c = square(4.0, 0.0, 1.0);

        let once = merge_rings(&BoolOpsUnion, "1条", &[&a, &b, &c]).unwrap();
        let again_inputs: Vec<&LonLatRing> = once.iter().collect();
        let twice = merge_rings(&BoolOpsUnion, "1条", &again_inputs).unwrap();

        assert_eq!(once.len(), twice.len());
        assert!((total_area(&once) - total_area(&twice)).abs() < 1e-9);
    }

    #[test]
    fn no_rings_is_unsupported_geometry() {
        let err = merge_rings(&BoolOpsUnion, "南1条", &[]).unwrap_err();
        let DistrictError::UnsupportedGeometry { district } = err;
        assert_eq!(district, "南1条");
    }
}
