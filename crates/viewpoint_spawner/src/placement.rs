//! Placement math
//!
//! The spawned entity goes a fixed distance in front of the viewpoint, along
//! its horizontal heading and at the viewpoint's own height.

use crate::foundation::math::{Quat, QuatExt, Vec3};

/// Distance from the viewpoint to the placement point, in world units
pub const PLACEMENT_DISTANCE: f32 = 3.0;

/// Point [`PLACEMENT_DISTANCE`] ahead of `position` along the yaw-only
/// heading of `orientation`. Looking up, down or rolling never changes
/// the height of the result.
pub fn compute_placement_point(position: Vec3, orientation: &Quat) -> Vec3 {
    position + orientation.leveled().forward() * PLACEMENT_DISTANCE
}
