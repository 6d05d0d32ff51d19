//! # Core Module
//!
//! Stateless foundations of the library: rotation math, the kinematic
//! retargeting model, the grasp data model with its quality score, and the
//! record-collection file format.
//!
//! - **Rotation math** ([`math`]) - matrix/quaternion/axis-angle conversions
//! - **Kinematics** ([`kinematics`]) - calibration data and pose retargeting
//! - **Grasp records** ([`grasp`]) - contact labeling, scoring, squeeze detection
//! - **File I/O** ([`io`]) - per-object record collections

pub mod grasp;
pub mod io;
pub mod kinematics;
pub mod math;
