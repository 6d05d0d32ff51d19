use thiserror::Error;

use super::session::EngineFault;
use crate::core::kinematics::CalibrationError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Scene setup failed for robot '{robot}' and body '{body}': {source}")]
    SceneSetup {
        robot: String,
        body: String,
        source: EngineFault,
    },

    #[error("Grasp planning failed: {source}")]
    Planning {
        #[from]
        source: EngineFault,
    },

    #[error("Calibration error: {source}")]
    Calibration {
        #[from]
        source: CalibrationError,
    },
}
