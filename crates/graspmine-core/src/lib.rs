//! # graspmine Core Library
//!
//! A library for mining stable hand grasps for rigid objects with an
//! external grasp-search engine, scoring them from contact geometry, and
//! re-expressing the discovered joint configurations in a different hand
//! parameterization.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Stateless rotation math, the kinematic
//!   retargeting model with its calibration loader, the grasp record data
//!   model (contact labeling, composite quality, squeeze detection), and the
//!   record-collection file format.
//!
//! - **[`engine`]: The Logic Core.** The stateful mining layer. It owns the
//!   session boundary to the external grasp-search engine (modeled as an
//!   opaque oracle behind the [`engine::session::GraspEngine`] trait) and
//!   implements scene assembly, heuristic grasp replay, ranking, and the
//!   randomized squeeze-repair pass.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer,
//!   tying `engine` and `core` together to mine one object end to end.
//!
//! ## Concurrency
//!
//! One engine session serves one mining run; sessions are strictly
//! sequential by construction (`&mut` receivers). Parallelism across
//! objects is achieved with independent sessions, one per worker, while a
//! loaded [`core::kinematics::KinematicModel`] is read-only and freely
//! shared between workers.

pub mod core;
pub mod engine;
pub mod workflows;
