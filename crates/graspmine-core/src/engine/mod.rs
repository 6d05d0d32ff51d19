//! # Engine Module
//!
//! The stateful mining layer: everything that talks to the external
//! grasp-search engine session.
//!
//! - **Session boundary** ([`session`]) - the engine oracle trait and its wire types
//! - **Scene** ([`scene`]) - world assembly and single grasp attempts
//! - **Miner** ([`miner`]) - seed search, heuristic replay, ranking, squeeze repair
//! - **Configuration** ([`config`]) - mining parameters and their builder
//! - **Progress Monitoring** ([`progress`]) - phase and attempt reporting
//! - **Error Handling** ([`error`]) - fatal mining errors
//!
//! One engine session backs one mining run at a time; attempt-level engine
//! faults are absorbed as rejected attempts, while setup and planning
//! faults surface as [`error::EngineError`].

pub mod config;
pub mod error;
pub mod miner;
pub mod progress;
pub mod scene;
pub mod session;
