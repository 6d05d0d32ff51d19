use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use tracing::{debug, info, instrument};

use super::config::MinerConfig;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::scene::{Attempt, EXECUTION_VARIANTS, GraspOptions, Scene};
use super::session::GraspEngine;
use crate::core::grasp::{GraspRecord, squeezed};
use crate::core::kinematics::KinematicModel;

/// Number of randomized repair trials per squeezed record.
const RELAX_TRIALS: usize = 20;

/// Upper bound (exclusive) of the uniform angle draw, radians.
const RELAX_ANGLE_MAX: f64 = 2.0;

/// Seed of the per-variant repair RNG; fixed so mining runs are
/// reproducible against a deterministic engine.
const RELAX_SEED: u64 = 0;

/// Drives the external engine through seed search, heuristic replay,
/// ranking, and the optional squeeze-repair pass.
pub struct GraspMiner {
    config: MinerConfig,
    kinematics: Option<KinematicModel>,
}

impl GraspMiner {
    pub fn new(config: MinerConfig) -> Self {
        Self {
            config,
            kinematics: None,
        }
    }

    /// Enables retargeting of every surviving grasp with the given model.
    pub fn with_kinematics(mut self, model: KinematicModel) -> Self {
        self.kinematics = Some(model);
        self
    }

    /// Hand-model variants mined in order. Extra variants exist only to
    /// emulate joint-speed settings the engine cannot change mid-session.
    fn robot_names(&self) -> Vec<String> {
        let mut names = vec![self.config.robot.clone()];
        if self.config.change_speed {
            names.push(format!("{}_v2", self.config.robot));
            names.push(format!("{}_v3", self.config.robot));
        }
        names
    }

    /// Mines grasps for one target body over all hand-model variants.
    ///
    /// Each variant's batch is ranked and truncated independently; the
    /// final sequence concatenates the batches in variant order.
    #[instrument(skip_all, name = "grasp_mining")]
    pub fn mine<E: GraspEngine>(
        &self,
        engine: &mut E,
        body: &str,
        reporter: &ProgressReporter,
    ) -> Result<Vec<GraspRecord>, EngineError> {
        let mut all = Vec::new();
        for robot in self.robot_names() {
            let batch = self.mine_variant(engine, &robot, body, reporter)?;
            info!(robot, count = batch.len(), "Variant batch finished.");
            all.extend(batch);
        }
        Ok(all)
    }

    fn mine_variant<E: GraspEngine>(
        &self,
        engine: &mut E,
        robot: &str,
        body: &str,
        reporter: &ProgressReporter,
    ) -> Result<Vec<GraspRecord>, EngineError> {
        let mut scene = Scene::new(engine, robot, body)?;

        reporter.report(Progress::PhaseStart { name: "SeedSearch" });
        let plans = scene.plan(self.config.max_steps)?;
        reporter.report(Progress::SeedsPlanned { count: plans.len() });
        reporter.report(Progress::PhaseFinish);

        reporter.report(Progress::PhaseStart {
            name: "VariantReplay",
        });
        let mut records = Vec::new();
        for plan in &plans {
            for opts in EXECUTION_VARIANTS {
                match scene.execute(&plan.pose, &plan.dofs, opts, self.kinematics.as_ref()) {
                    Attempt::Grasp(record) => {
                        reporter.report(Progress::AttemptFinished { kept: true });
                        records.push(record);
                    }
                    Attempt::Rejected(rejection) => {
                        reporter.report(Progress::AttemptFinished { kept: false });
                        debug!(?rejection, ?opts, "Attempt rejected.");
                    }
                }
            }
        }
        reporter.report(Progress::PhaseFinish);

        reporter.report(Progress::PhaseStart { name: "Rank" });
        rank(&mut records, self.config.max_grasps);
        reporter.report(Progress::PhaseFinish);

        if self.config.relax_fingers {
            reporter.report(Progress::PhaseStart { name: "Relax" });
            relax(&mut scene, &mut records);
            reporter.report(Progress::PhaseFinish);
        }

        Ok(records)
    }
}

/// Stable-sorts descending by quality, then truncates to `max_grasps` when
/// a positive limit is configured.
fn rank(records: &mut Vec<GraspRecord>, max_grasps: usize) {
    records.sort_by(|a, b| {
        b.quality
            .partial_cmp(&a.quality)
            .unwrap_or(Ordering::Equal)
    });
    if max_grasps > 0 {
        records.truncate(max_grasps);
    }
}

/// Randomizes the joints of squeezed fingers and replays the grasp.
///
/// The engine tends to close fingers past the threshold even when they
/// never touch the object. For each flagged record, 20 trials redraw the
/// flagged joint angles uniformly from [0, 2) and re-execute; every
/// successful trial overwrites the stored angles, so the last success wins.
/// The trial buffer persists between trials, matching the reference
/// behavior this reproduces. A record with no successful trial keeps its
/// original angles.
fn relax<E: GraspEngine>(scene: &mut Scene<'_, E>, records: &mut [GraspRecord]) {
    let mut rng = StdRng::seed_from_u64(RELAX_SEED);
    for (index, joints) in squeezed(records) {
        let pose = records[index].pose;
        let mut dofs = records[index].dofs.clone();
        for _ in 0..RELAX_TRIALS {
            for &joint in &joints {
                dofs[joint] = rng.gen_range(0.0..RELAX_ANGLE_MAX);
            }
            if let Attempt::Grasp(_) = scene.execute(&pose, &dofs, GraspOptions::default(), None) {
                records[index].dofs = dofs.clone();
            }
        }
    }
}
