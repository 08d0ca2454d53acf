//! Collision detection for the obstacle corridor.
//!
//! The ship rides a fixed-Y lane, so everything reduces to an
//! axis-aligned box overlap in the X/Z plane.

/// True when two squares of half-extent `half` centered at the given X/Z
/// coordinates overlap. Exact boundary contact does not count as a hit.
#[inline]
pub fn overlaps_xz(ax: f32, az: f32, bx: f32, bz: f32, half: f32) -> bool {
    (ax - bx).abs() < half && (az - bz).abs() < half
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn overlap_inside_box() {
        assert!(overlaps_xz(0.0, 10.0, 1.0, 11.0, 2.0));
        assert!(overlaps_xz(0.0, 10.0, 0.0, 10.0, 2.0));
    }

    #[test]
    fn boundary_contact_is_a_miss() {
        // Offset exactly equal to the half-extent: no hit.
        assert!(!overlaps_xz(0.0, 10.0, 2.0, 10.0, 2.0));
        assert!(!overlaps_xz(0.0, 10.0, 0.0, 12.0, 2.0));
        // Just inside the boundary: hit.
        assert!(overlaps_xz(0.0, 10.0, 2.0 - 1e-3, 10.0, 2.0));
        assert!(overlaps_xz(0.0, 10.0, 0.0, 12.0 - 1e-3, 2.0));
    }

    #[test]
    fn either_axis_separates() {
        assert!(!overlaps_xz(0.0, 0.0, 5.0, 0.0, 2.0));
        assert!(!overlaps_xz(0.0, 0.0, 0.0, 5.0, 2.0));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -100.0f32..100.0,
            az in -100.0f32..100.0,
            bx in -100.0f32..100.0,
            bz in -100.0f32..100.0,
            half in 0.1f32..10.0,
        ) {
            prop_assert_eq!(
                overlaps_xz(ax, az, bx, bz, half),
                overlaps_xz(bx, bz, ax, az, half)
            );
        }

        #[test]
        fn overlap_matches_componentwise_definition(
            dx in -10.0f32..10.0,
            dz in -10.0f32..10.0,
            half in 0.1f32..5.0,
        ) {
            let hit = overlaps_xz(0.0, 0.0, dx, dz, half);
            prop_assert_eq!(hit, dx.abs() < half && dz.abs() < half);
        }
    }
}
