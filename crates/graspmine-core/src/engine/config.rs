use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Settings for one mining run.
///
/// `max_steps` and `max_grasps` of 0 mean "let the engine decide" and "keep
/// everything". `change_speed` mines with additional hand-model variants
/// (`<robot>_v2`, `<robot>_v3`) because the engine cannot change joint
/// speed ratios mid-session. `calibration` enables retargeting of the
/// surviving grasps.
#[derive(Debug, Clone, PartialEq)]
pub struct MinerConfig {
    pub robot: String,
    pub max_steps: usize,
    pub max_grasps: usize,
    pub relax_fingers: bool,
    pub change_speed: bool,
    pub calibration: Option<PathBuf>,
}

#[derive(Default)]
pub struct MinerConfigBuilder {
    robot: Option<String>,
    max_steps: Option<usize>,
    max_grasps: Option<usize>,
    relax_fingers: Option<bool>,
    change_speed: Option<bool>,
    calibration: Option<PathBuf>,
}

impl MinerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn robot(mut self, name: impl Into<String>) -> Self {
        self.robot = Some(name.into());
        self
    }
    pub fn max_steps(mut self, steps: usize) -> Self {
        self.max_steps = Some(steps);
        self
    }
    pub fn max_grasps(mut self, count: usize) -> Self {
        self.max_grasps = Some(count);
        self
    }
    pub fn relax_fingers(mut self, enabled: bool) -> Self {
        self.relax_fingers = Some(enabled);
        self
    }
    pub fn change_speed(mut self, enabled: bool) -> Self {
        self.change_speed = Some(enabled);
        self
    }
    pub fn calibration(mut self, path: PathBuf) -> Self {
        self.calibration = Some(path);
        self
    }

    pub fn build(self) -> Result<MinerConfig, ConfigError> {
        Ok(MinerConfig {
            robot: self.robot.ok_or(ConfigError::MissingParameter("robot"))?,
            max_steps: self.max_steps.unwrap_or(0),
            max_grasps: self.max_grasps.unwrap_or(0),
            relax_fingers: self.relax_fingers.unwrap_or(false),
            change_speed: self.change_speed.unwrap_or(false),
            calibration: self.calibration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_a_robot_name() {
        let err = MinerConfigBuilder::new().max_grasps(5).build().unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("robot"));
    }

    #[test]
    fn builder_defaults_leave_limits_unbounded() {
        let config = MinerConfigBuilder::new().robot("ManoHand").build().unwrap();
        assert_eq!(config.max_steps, 0);
        assert_eq!(config.max_grasps, 0);
        assert!(!config.relax_fingers);
        assert!(!config.change_speed);
        assert!(config.calibration.is_none());
    }
}
