//! Math utilities and types
//!
//! Provides the vector and rotation types used for viewpoint placement, plus
//! the Euler-angle helpers the host scripting layer exposes.
//!
//! # Coordinate System
//! The host world is right-handed and Y-up:
//! - X+ = Right
//! - Y+ = Up
//! - Z- = Forward (the direction an unrotated viewpoint faces)
//!
//! Euler triples are stored as `(pitch, yaw, roll)` in a [`Vec3`], i.e.
//! rotation about X, Y and Z respectively. They compose as
//! `roll * yaw * pitch`, so pitch is applied to a vector first.

pub use nalgebra::{UnitQuaternion, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Host axis conventions
pub mod axes {
    use super::Vec3;

    /// Direction an unrotated viewpoint faces
    pub const FRONT: Vec3 = Vec3::new(0.0, 0.0, -1.0);

    /// Right-hand side of an unrotated viewpoint
    pub const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);

    /// World up
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;

    /// Tolerance used to detect gimbal lock during Euler decomposition
    pub const GIMBAL_EPSILON: f32 = 1.0e-6;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Wrap an angle in radians into `(-PI, PI]`
    pub fn wrap_angle(radians: f32) -> f32 {
        let wrapped = (radians + constants::PI).rem_euclid(constants::TAU) - constants::PI;
        if wrapped <= -constants::PI {
            wrapped + constants::TAU
        } else {
            wrapped
        }
    }
}

/// Extension trait for [`Quat`] with the host's Euler and axis helpers
pub trait QuatExt {
    /// Build a rotation from `(pitch, yaw, roll)` in radians
    fn from_euler_radians(euler: Vec3) -> Quat;

    /// Build a rotation from `(pitch, yaw, roll)` in degrees
    fn from_euler_degrees(euler: Vec3) -> Quat;

    /// Decompose into `(pitch, yaw, roll)` in radians.
    ///
    /// Roll is kept within `[-PI/2, PI/2]` so a viewpoint turned around,
    /// including one looking straight up or down, reports its heading
    /// through yaw rather than through a half turn of roll.
    fn safe_euler_angles(&self) -> Vec3;

    /// [`QuatExt::safe_euler_angles`] in degrees
    fn safe_euler_angles_degrees(&self) -> Vec3;

    /// Rotated [`axes::FRONT`]
    fn forward(&self) -> Vec3;

    /// Rotated [`axes::RIGHT`]
    fn right(&self) -> Vec3;

    /// Rotated [`axes::UP`]
    fn up(&self) -> Vec3;

    /// Yaw-only heading: pitch zeroed through the Euler round trip, roll dropped
    fn leveled(&self) -> Quat;
}

impl QuatExt for Quat {
    fn from_euler_radians(euler: Vec3) -> Quat {
        let pitch = Quat::from_axis_angle(&Vec3::x_axis(), euler.x);
        let yaw = Quat::from_axis_angle(&Vec3::y_axis(), euler.y);
        let roll = Quat::from_axis_angle(&Vec3::z_axis(), euler.z);
        roll * yaw * pitch
    }

    fn from_euler_degrees(euler: Vec3) -> Quat {
        Self::from_euler_radians(euler.map(utils::deg_to_rad))
    }

    fn safe_euler_angles(&self) -> Vec3 {
        let q = self.quaternion();
        let (w, x, y, z) = (q.w, q.i, q.j, q.k);

        let sin_yaw = 2.0 * (w * y - x * z);
        if sin_yaw.abs() >= 1.0 - constants::GIMBAL_EPSILON {
            // Only pitch - roll (or pitch + roll) is defined here; fold it into roll.
            let roll = (w * z - x * y).atan2(0.5 - x * x - z * z);
            let yaw = constants::HALF_PI.copysign(sin_yaw);
            return Vec3::new(0.0, yaw, roll);
        }

        let mut pitch = (2.0 * (y * z + w * x)).atan2(1.0 - 2.0 * (x * x + y * y));
        let mut yaw = sin_yaw.asin();
        let mut roll = (2.0 * (x * y + w * z)).atan2(1.0 - 2.0 * (y * y + z * z));

        // (p, y, r) and (p + PI, PI - y, r + PI) describe the same rotation.
        if roll.abs() > constants::HALF_PI {
            pitch = utils::wrap_angle(pitch - constants::PI.copysign(pitch));
            yaw = utils::wrap_angle(constants::PI - yaw);
            roll = utils::wrap_angle(roll - constants::PI.copysign(roll));
        }

        Vec3::new(pitch, yaw, roll)
    }

    fn safe_euler_angles_degrees(&self) -> Vec3 {
        self.safe_euler_angles().map(utils::rad_to_deg)
    }

    fn forward(&self) -> Vec3 {
        self * axes::FRONT
    }

    fn right(&self) -> Vec3 {
        self * axes::RIGHT
    }

    fn up(&self) -> Vec3 {
        self * axes::UP
    }

    fn leveled(&self) -> Quat {
        let mut euler = self.safe_euler_angles();
        euler.x = 0.0;
        euler.z = 0.0;
        Self::from_euler_radians(euler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const EPSILON: f32 = 1.0e-4;

    fn assert_same_rotation(a: &Quat, b: &Quat) {
        // q and -q are the same rotation
        let dot = a.coords.dot(&b.coords).abs();
        assert_abs_diff_eq!(dot, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_identity_faces_negative_z() {
        let forward = Quat::identity().forward();
        assert_relative_eq!(forward, Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(Quat::identity().up(), axes::UP, epsilon = EPSILON);
        assert_relative_eq!(Quat::identity().right(), axes::RIGHT, epsilon = EPSILON);
    }

    #[test]
    fn test_positive_yaw_turns_left() {
        let q = Quat::from_euler_degrees(Vec3::new(0.0, 90.0, 0.0));
        assert_relative_eq!(q.forward(), Vec3::new(-1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_positive_pitch_looks_up() {
        let q = Quat::from_euler_degrees(Vec3::new(30.0, 0.0, 0.0));
        assert!(q.forward().y > 0.0);
    }

    #[test]
    fn test_euler_round_trip() {
        let euler = Vec3::new(20.0, -35.0, 10.0);
        let q = Quat::from_euler_degrees(euler);
        assert_relative_eq!(q.safe_euler_angles_degrees(), euler, epsilon = 1.0e-2);
    }

    #[test]
    fn test_turned_around_reports_yaw_not_flipped_pitch() {
        let q = Quat::from_euler_degrees(Vec3::new(0.0, 180.0, 0.0));
        let euler = q.safe_euler_angles_degrees();
        assert_abs_diff_eq!(euler.x, 0.0, epsilon = 1.0e-2);
        assert_abs_diff_eq!(euler.y.abs(), 180.0, epsilon = 1.0e-2);
        assert_abs_diff_eq!(euler.z, 0.0, epsilon = 1.0e-2);
    }

    #[test]
    fn test_decomposition_rebuilds_same_rotation() {
        for pitch in [-80.0_f32, -30.0, 0.0, 45.0, 89.0] {
            for yaw in [-170.0_f32, -90.0, -10.0, 0.0, 60.0, 90.0, 135.0, 180.0] {
                for roll in [-120.0_f32, 0.0, 25.0] {
                    let q = Quat::from_euler_degrees(Vec3::new(pitch, yaw, roll));
                    let rebuilt = Quat::from_euler_radians(q.safe_euler_angles());
                    assert_same_rotation(&q, &rebuilt);
                }
            }
        }
    }

    #[test]
    fn test_gimbal_lock_keeps_heading() {
        let q = Quat::from_euler_degrees(Vec3::new(0.0, 90.0, 40.0));
        let euler = q.safe_euler_angles();
        assert_abs_diff_eq!(euler.x, 0.0);
        assert_abs_diff_eq!(euler.y, constants::HALF_PI, epsilon = EPSILON);
        assert_same_rotation(&q, &Quat::from_euler_radians(euler));
    }

    #[test]
    fn test_leveled_has_no_pitch_or_roll() {
        let q = Quat::from_euler_degrees(Vec3::new(50.0, 30.0, -20.0));
        let euler = q.leveled().safe_euler_angles_degrees();
        assert_abs_diff_eq!(euler.x, 0.0, epsilon = 1.0e-3);
        assert_abs_diff_eq!(euler.z, 0.0, epsilon = 1.0e-3);
        assert_abs_diff_eq!(euler.y, 30.0, epsilon = 1.0e-2);
    }

    #[test]
    fn test_vertical_camera_keeps_heading() {
        for pitch in [-90.0_f32, 90.0] {
            for yaw in [-135.0_f32, 100.0, 135.0, 170.0] {
                let camera = Quat::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(yaw))
                    * Quat::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(pitch));
                let euler = camera.safe_euler_angles();
                assert!(euler.z.abs() <= constants::HALF_PI, "roll {} at yaw {}", euler.z, yaw);

                let heading = Quat::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(yaw));
                let expected = heading.forward();
                assert_relative_eq!(camera.leveled().forward(), expected, epsilon = 1.0e-3);
            }
        }
    }

    #[test]
    fn test_wrap_angle() {
        assert_abs_diff_eq!(utils::wrap_angle(constants::TAU + 0.5), 0.5, epsilon = EPSILON);
        assert_abs_diff_eq!(utils::wrap_angle(-constants::PI), constants::PI, epsilon = EPSILON);
        assert_abs_diff_eq!(utils::wrap_angle(-0.25), -0.25, epsilon = EPSILON);
    }
}
