use tracing::{debug, trace};

use super::error::EngineError;
use super::session::{EngineFault, GraspEngine, QualityReport, RobotState, SeedPlan};
use crate::core::grasp::record::{Contact, GraspRecord, LinkNameError, composite_quality, resolve_link};
use crate::core::kinematics::KinematicModel;

/// Root pose the hand is parked at while the scene is assembled.
pub const DEFAULT_ROBOT_POSE: [f64; 7] = [0.0, 0.2, 0.0, 0.0, 0.0, 0.0, 1.0];

/// Heuristic knobs for one grasp attempt.
///
/// `auto_open` opens the fingers before closing; `full_open` disables
/// collision checking while opening; `approach` moves the hand to contact
/// before closing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraspOptions {
    pub approach: bool,
    pub auto_open: bool,
    pub full_open: bool,
}

/// The four replay heuristics, in their fixed attempt order.
pub const EXECUTION_VARIANTS: [GraspOptions; 4] = [
    GraspOptions { approach: false, auto_open: false, full_open: false },
    GraspOptions { approach: false, auto_open: true, full_open: true },
    GraspOptions { approach: true, auto_open: true, full_open: false },
    GraspOptions { approach: true, auto_open: true, full_open: true },
];

/// Why an attempt produced no grasp.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// An engine call faulted mid-attempt.
    Fault(EngineFault),
    /// The quality computation reported a nonzero status.
    Status(i32),
    /// Epsilon at or below -1 signals no valid grasp.
    NoGrasp { epsilon: f64 },
}

/// Outcome of one grasp attempt. Rejected attempts are skipped by the
/// miner, never propagated as errors.
#[derive(Debug, Clone)]
pub enum Attempt {
    Grasp(GraspRecord),
    Rejected(Rejection),
}

/// A loaded scene: one hand model and one graspable body inside an
/// exclusively-owned engine session.
pub struct Scene<'a, E: GraspEngine> {
    engine: &'a mut E,
    robot: String,
    body: String,
}

impl<'a, E: GraspEngine> Scene<'a, E> {
    /// Clears the session's world and loads the hand and the target body.
    /// Faults here are fatal: without a scene there is nothing to mine.
    pub fn new(engine: &'a mut E, robot: &str, body: &str) -> Result<Self, EngineError> {
        let setup = |engine: &mut E| -> Result<(), EngineFault> {
            engine.clear_world()?;
            engine.import_robot(robot)?;
            engine.set_robot_pose(&DEFAULT_ROBOT_POSE)?;
            engine.import_body(body)
        };
        setup(&mut *engine).map_err(|source| EngineError::SceneSetup {
            robot: robot.to_string(),
            body: body.to_string(),
            source,
        })?;
        debug!(robot, body, "Scene assembled.");
        Ok(Self {
            engine,
            robot: robot.to_string(),
            body: body.to_string(),
        })
    }

    pub fn robot(&self) -> &str {
        &self.robot
    }

    /// Runs the engine's bounded seed search.
    pub fn plan(&mut self, max_steps: usize) -> Result<Vec<SeedPlan>, EngineError> {
        let plans = self.engine.plan_grasps(max_steps)?;
        debug!(count = plans.len(), "Seed search finished.");
        Ok(plans)
    }

    /// Replays one seed configuration under the given heuristic and scores
    /// the resulting state.
    ///
    /// Any engine fault during the sequence rejects the attempt instead of
    /// surfacing an error; a rejected attempt simply contributes nothing.
    pub fn execute(
        &mut self,
        pose: &[f64; 7],
        dofs: &[f64],
        opts: GraspOptions,
        kinematics: Option<&KinematicModel>,
    ) -> Attempt {
        match self.try_execute(pose, dofs, opts, kinematics) {
            Ok(attempt) => attempt,
            Err(fault) => {
                trace!(%fault, "Attempt faulted.");
                Attempt::Rejected(Rejection::Fault(fault))
            }
        }
    }

    fn try_execute(
        &mut self,
        pose: &[f64; 7],
        dofs: &[f64],
        opts: GraspOptions,
        kinematics: Option<&KinematicModel>,
    ) -> Result<Attempt, EngineFault> {
        let engine = &mut *self.engine;
        engine.toggle_collisions(false)?;
        engine.set_robot_pose(pose)?;
        engine.force_dofs(dofs)?;
        if opts.auto_open {
            if !opts.full_open {
                engine.toggle_collisions(true)?;
            }
            engine.auto_open()?;
        }
        engine.toggle_collisions(true)?;
        if opts.approach {
            engine.approach_to_contact()?;
        }
        engine.auto_grasp()?;

        let quality = engine.compute_quality()?;
        if quality.status != 0 {
            return Ok(Attempt::Rejected(Rejection::Status(quality.status)));
        }
        if quality.epsilon <= -1.0 {
            return Ok(Attempt::Rejected(Rejection::NoGrasp {
                epsilon: quality.epsilon,
            }));
        }

        let state = engine.robot_state()?;
        let record = record_from_state(&state, &quality, &self.body, kinematics)
            .map_err(|e| EngineFault::new(e.to_string()))?;
        Ok(Attempt::Grasp(record))
    }
}

/// Builds a grasp record from a raw robot state snapshot and quality
/// report: resolves link names for the contacts against `body`, dedups
/// them, derives the composite quality, and optionally retargets the pose.
pub fn record_from_state(
    state: &RobotState,
    quality: &QualityReport,
    body: &str,
    kinematics: Option<&KinematicModel>,
) -> Result<GraspRecord, LinkNameError> {
    let mut contacts = Vec::new();
    for raw in state.contacts.iter().filter(|c| c.body2 == body) {
        contacts.push(Contact {
            link: resolve_link(&raw.body1)?,
            pose: raw.pose,
        });
    }

    let mut links_in_contact: Vec<String> = Vec::new();
    for contact in &contacts {
        if !links_in_contact.contains(&contact.link) {
            links_in_contact.push(contact.link.clone());
        }
    }

    let mut record = GraspRecord {
        pose: state.pose,
        dofs: state.dofs.clone(),
        contacts,
        epsilon: quality.epsilon,
        volume: quality.volume,
        quality: composite_quality(quality.epsilon, quality.volume, &links_in_contact),
        links_in_contact,
        target_trans: None,
        target_pose: None,
    };
    if let Some(model) = kinematics {
        record.retarget(model);
    }
    Ok(record)
}
