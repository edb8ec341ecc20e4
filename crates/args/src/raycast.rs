//! Voxel ray traversal (DDA) for line-of-sight targeting.

use glam::{DVec3, IVec3};

/// First non-passable block along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Block coordinates of the hit block.
    pub block: IVec3,
    /// Outward normal of the face the ray entered through; zero when the ray
    /// started inside the block.
    pub face: IVec3,
    /// Distance from the origin to the entry point.
    pub distance: f64,
    /// Entry point in world coordinates.
    pub point: DVec3,
}

/// Walk the blocks pierced by the ray from `origin` along `direction`, in
/// order, and return the first one `is_solid` accepts within `max_distance`.
///
/// `direction` need not be normalized. A zero or non-finite direction hits
/// nothing, as does a negative, NaN or infinite `max_distance`. The walk also
/// ends where block coordinates would leave the `i32` range.
pub fn raycast<F>(
    origin: DVec3,
    direction: DVec3,
    max_distance: f64,
    mut is_solid: F,
) -> Option<RaycastHit>
where
    F: FnMut(IVec3) -> bool,
{
    let direction = direction.try_normalize()?;
    if !origin.is_finite() || !max_distance.is_finite() || max_distance < 0.0 {
        return None;
    }

    let mut block = origin.floor().as_ivec3();
    let mut step = IVec3::ZERO;
    let mut next_boundary = DVec3::splat(f64::INFINITY);
    let mut boundary_spacing = DVec3::splat(f64::INFINITY);
    for axis in 0..3 {
        let d = direction[axis];
        let cell = f64::from(block[axis]);
        if d > 0.0 {
            step[axis] = 1;
            next_boundary[axis] = (cell + 1.0 - origin[axis]) / d;
            boundary_spacing[axis] = 1.0 / d;
        } else if d < 0.0 {
            step[axis] = -1;
            next_boundary[axis] = (cell - origin[axis]) / d;
            boundary_spacing[axis] = -1.0 / d;
        }
    }

    // A ray of length d crosses at most ceil(d) + 1 boundaries per axis.
    let max_steps = (max_distance.ceil() as u64).saturating_add(1).saturating_mul(3);
    let mut entered_at = 0.0;
    let mut face = IVec3::ZERO;
    for _ in 0..=max_steps {
        if is_solid(block) {
            return Some(RaycastHit {
                block,
                face,
                distance: entered_at,
                point: origin + direction * entered_at,
            });
        }

        let axis = if next_boundary.x < next_boundary.y && next_boundary.x < next_boundary.z {
            0
        } else if next_boundary.y < next_boundary.z {
            1
        } else {
            2
        };

        entered_at = next_boundary[axis];
        if entered_at > max_distance {
            return None;
        }
        block[axis] = block[axis].checked_add(step[axis])?;
        next_boundary[axis] += boundary_spacing[axis];
        face = IVec3::ZERO;
        face[axis] = -step[axis];
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_block_straight_ahead() {
        let target = IVec3::new(5, 0, 0);
        let hit = raycast(DVec3::splat(0.5), DVec3::X, 10.0, |b| b == target).unwrap();
        assert_eq!(hit.block, target);
        assert_eq!(hit.face, IVec3::NEG_X);
        assert!((hit.distance - 4.5).abs() < 1e-9);
        assert!((hit.point.x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn block_beyond_range_is_missed() {
        let hit = raycast(DVec3::splat(0.5), DVec3::X, 3.0, |b| b == IVec3::new(5, 0, 0));
        assert!(hit.is_none());
    }

    #[test]
    fn empty_space_is_missed() {
        assert!(raycast(DVec3::ZERO, DVec3::ONE, 50.0, |_| false).is_none());
    }

    #[test]
    fn zero_direction_hits_nothing() {
        assert!(raycast(DVec3::ZERO, DVec3::ZERO, 50.0, |_| true).is_none());
    }

    #[test]
    fn unnormalized_diagonal_reaches_the_floor() {
        let hit = raycast(
            DVec3::new(0.5, 10.5, 0.5),
            DVec3::new(0.0, -4.0, 4.0),
            64.0,
            |b| b.y < 0,
        )
        .unwrap();
        assert_eq!(hit.block.y, -1);
        assert_eq!(hit.face, IVec3::Y);
        assert!((hit.distance - 10.5 * std::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn negative_coordinates_floor_correctly() {
        let hit = raycast(DVec3::new(-0.5, 0.5, 0.5), DVec3::NEG_X, 5.0, |b| b.x == -3).unwrap();
        assert_eq!(hit.block, IVec3::new(-3, 0, 0));
        assert!((hit.distance - 1.5).abs() < 1e-9);
    }

    #[test]
    fn unbounded_distances_hit_nothing() {
        for max_distance in [f64::INFINITY, f64::NAN, -1.0] {
            assert!(raycast(DVec3::splat(0.5), DVec3::X, max_distance, |_| false).is_none());
        }
    }

    #[test]
    fn walk_stops_at_the_coordinate_limit() {
        let origin = DVec3::new(f64::from(i32::MAX) - 1.5, 0.5, 0.5);
        assert!(raycast(origin, DVec3::X, 64.0, |_| false).is_none());
    }

    #[test]
    fn starting_inside_a_block_hits_it() {
        let hit = raycast(DVec3::splat(0.5), DVec3::Y, 5.0, |b| b == IVec3::ZERO).unwrap();
        assert_eq!(hit.face, IVec3::ZERO);
        assert_eq!(hit.distance, 0.0);
    }
}
