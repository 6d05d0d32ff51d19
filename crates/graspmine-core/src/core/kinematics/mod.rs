//! Kinematic retargeting between the source rig driven by the engine and
//! the target hand parameterization.
//!
//! [`calibration`] loads and validates per-finger calibration data;
//! [`retarget`] implements the forward-kinematics conversion from a root
//! pose and flat joint-angle vector to the target pose vector.

pub mod calibration;
pub mod retarget;

pub use calibration::{CalibrationError, ChainCalibration, KinematicModel};
pub use retarget::TARGET_POSE_LEN;

/// Finger chains in their fixed conversion and output order.
pub const FINGERS: [&str; 5] = ["index", "mid", "ring", "pinky", "thumb"];
