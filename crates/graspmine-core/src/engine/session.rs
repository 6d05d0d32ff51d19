use thiserror::Error;

/// Fault raised by any engine call: a transport error, a crashed step, or
/// an engine-side refusal. During grasp execution faults mean "no grasp for
/// this attempt"; during scene setup or planning they are fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("engine fault: {0}")]
pub struct EngineFault(pub String);

impl EngineFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Quality scalars reported by the engine for the current grasp, plus the
/// status code of the computation itself (0 = valid).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityReport {
    pub status: i32,
    pub epsilon: f64,
    pub volume: f64,
}

/// One raw contact as the engine reports it: colliding body pair plus the
/// contact pose in world frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RawContact {
    pub body1: String,
    pub body2: String,
    pub pose: [f64; 7],
}

/// Full robot state snapshot: root pose, joint angles, active contacts.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotState {
    pub pose: [f64; 7],
    pub dofs: Vec<f64>,
    pub contacts: Vec<RawContact>,
}

/// One candidate grasp configuration produced by the engine's search.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedPlan {
    pub pose: [f64; 7],
    pub dofs: Vec<f64>,
}

/// The external grasp-search engine, modeled as an opaque stateful oracle.
///
/// One session owns one mutable scene; every operation is sequential and
/// non-reentrant, which the `&mut self` receivers enforce by construction.
/// Concurrency across objects comes from independent sessions, one per
/// worker. Transport and process lifecycle live behind implementations of
/// this trait and are out of scope here.
pub trait GraspEngine {
    fn clear_world(&mut self) -> Result<(), EngineFault>;
    fn import_robot(&mut self, name: &str) -> Result<(), EngineFault>;
    fn import_body(&mut self, name: &str) -> Result<(), EngineFault>;
    fn set_robot_pose(&mut self, pose: &[f64; 7]) -> Result<(), EngineFault>;
    fn force_dofs(&mut self, dofs: &[f64]) -> Result<(), EngineFault>;
    fn toggle_collisions(&mut self, enabled: bool) -> Result<(), EngineFault>;
    /// Opens the fingers; obeys the current collision-checking toggle.
    fn auto_open(&mut self) -> Result<(), EngineFault>;
    fn approach_to_contact(&mut self) -> Result<(), EngineFault>;
    fn auto_grasp(&mut self) -> Result<(), EngineFault>;
    fn compute_quality(&mut self) -> Result<QualityReport, EngineFault>;
    fn robot_state(&mut self) -> Result<RobotState, EngineFault>;
    /// Runs the engine's bounded grasp search. A budget of 0 lets the
    /// engine pick its own default.
    fn plan_grasps(&mut self, max_steps: usize) -> Result<Vec<SeedPlan>, EngineFault>;
}
