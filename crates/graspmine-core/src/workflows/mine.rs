use tracing::{info, instrument};

use crate::core::grasp::GraspRecord;
use crate::core::kinematics::KinematicModel;
use crate::engine::config::MinerConfig;
use crate::engine::error::EngineError;
use crate::engine::miner::GraspMiner;
use crate::engine::progress::ProgressReporter;
use crate::engine::session::GraspEngine;

/// Result of mining one target body.
#[derive(Debug, Clone)]
pub struct MiningOutcome {
    pub body: String,
    pub grasps: Vec<GraspRecord>,
}

/// Mines grasps for one target body through the given engine session.
///
/// When the configuration names a calibration file it is loaded up front,
/// so a malformed file aborts before any engine call, and every surviving
/// grasp carries the retargeted pose fields.
#[instrument(skip_all, name = "mining_workflow")]
pub fn run<E: GraspEngine>(
    engine: &mut E,
    body: &str,
    config: &MinerConfig,
    reporter: &ProgressReporter,
) -> Result<MiningOutcome, EngineError> {
    info!(body, robot = %config.robot, "Starting grasp mining.");

    let mut miner = GraspMiner::new(config.clone());
    if let Some(path) = &config.calibration {
        let model = KinematicModel::load(path)?;
        miner = miner.with_kinematics(model);
    }

    let grasps = miner.mine(engine, body, reporter)?;
    info!(count = grasps.len(), "Mining complete.");

    Ok(MiningOutcome {
        body: body.to_string(),
        grasps,
    })
}
