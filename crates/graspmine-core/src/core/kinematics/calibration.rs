use super::FINGERS;
use crate::core::math::rotation::{MAT_ORTHOGONALITY_THRESHOLD, is_rotation};
use nalgebra::{Matrix3, Vector3};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Per-finger calibration describing how one source-rig chain maps onto the
/// target parameterization.
///
/// Each chain has 4 joint slots. `joint_index` maps a slot into the flat
/// source dof vector, `joint_coeff` scales (and possibly flips) the raw
/// angle, and `joint_offset` holds the 4 static local-frame transforms
/// applied in series regardless of the joint angle.
#[derive(Debug, Clone)]
pub struct ChainCalibration {
    pub name: &'static str,
    pub source_root: Matrix3<f64>,
    pub target_root: Matrix3<f64>,
    pub joint_index: [usize; 4],
    pub joint_coeff: [f64; 4],
    pub joint_offset: [Matrix3<f64>; 4],
}

/// Calibration for a whole hand model: 5 finger chains in fixed order plus
/// the origin offset reconciling the two rigs' root frames.
///
/// Loaded once per hand model and read-only afterwards, so it is safe to
/// share across parallel mining workers.
#[derive(Debug, Clone)]
pub struct KinematicModel {
    pub(crate) chains: Vec<ChainCalibration>,
    pub(crate) origin: Vector3<f64>,
}

#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Missing calibration for chain '{0}'")]
    MissingChain(&'static str),
    #[error("Matrix '{field}' of chain '{chain}' is not a rotation")]
    NotARotation {
        chain: &'static str,
        field: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCalibration {
    origin: [f64; 3],
    chains: HashMap<String, RawChain>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawChain {
    source_root: [[f64; 3]; 3],
    target_root: [[f64; 3]; 3],
    joint_index: [usize; 4],
    joint_coeff: [f64; 4],
    joint_offset: [[[f64; 3]; 3]; 4],
}

impl KinematicModel {
    /// Loads and validates a calibration file.
    ///
    /// All 5 finger chains must be present and every root/offset matrix must
    /// be a proper rotation; anything else is a fatal load error.
    pub fn load(path: &Path) -> Result<Self, CalibrationError> {
        let content = std::fs::read_to_string(path).map_err(|e| CalibrationError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let raw: RawCalibration = toml::from_str(&content).map_err(|e| CalibrationError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut chains = Vec::with_capacity(FINGERS.len());
        for &name in FINGERS.iter() {
            let chain = raw
                .chains
                .get(name)
                .ok_or(CalibrationError::MissingChain(name))?;
            chains.push(ChainCalibration::from_raw(name, chain)?);
        }

        Ok(Self {
            chains,
            origin: Vector3::from(raw.origin),
        })
    }

    /// Builds a model from already-validated parts. Chains must be supplied
    /// in finger order.
    pub fn from_parts(chains: Vec<ChainCalibration>, origin: Vector3<f64>) -> Self {
        Self { chains, origin }
    }

    pub fn origin(&self) -> &Vector3<f64> {
        &self.origin
    }

    pub fn chains(&self) -> &[ChainCalibration] {
        &self.chains
    }
}

impl ChainCalibration {
    fn from_raw(name: &'static str, raw: &RawChain) -> Result<Self, CalibrationError> {
        let source_root = checked_rotation(name, "source_root", &raw.source_root)?;
        let target_root = checked_rotation(name, "target_root", &raw.target_root)?;
        let mut joint_offset = [Matrix3::identity(); 4];
        for (i, rows) in raw.joint_offset.iter().enumerate() {
            joint_offset[i] = checked_rotation(name, &format!("joint_offset[{i}]"), rows)?;
        }
        Ok(Self {
            name,
            source_root,
            target_root,
            joint_index: raw.joint_index,
            joint_coeff: raw.joint_coeff,
            joint_offset,
        })
    }

    /// An identity chain: both root frames aligned, unit coefficients,
    /// sequential dof indices starting at `first_dof`.
    pub fn identity(name: &'static str, first_dof: usize) -> Self {
        Self {
            name,
            source_root: Matrix3::identity(),
            target_root: Matrix3::identity(),
            joint_index: [first_dof, first_dof + 1, first_dof + 2, first_dof + 3],
            joint_coeff: [1.0; 4],
            joint_offset: [Matrix3::identity(); 4],
        }
    }
}

fn checked_rotation(
    chain: &'static str,
    field: &str,
    rows: &[[f64; 3]; 3],
) -> Result<Matrix3<f64>, CalibrationError> {
    let mat = Matrix3::new(
        rows[0][0], rows[0][1], rows[0][2], rows[1][0], rows[1][1], rows[1][2], rows[2][0],
        rows[2][1], rows[2][2],
    );
    if !is_rotation(&mat, MAT_ORTHOGONALITY_THRESHOLD) {
        return Err(CalibrationError::NotARotation {
            chain,
            field: field.to_string(),
        });
    }
    Ok(mat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const IDENTITY_ROWS: &str = "[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]";

    fn chain_block(name: &str, first_dof: usize) -> String {
        format!(
            "[chains.{name}]\n\
             source_root = {m}\n\
             target_root = {m}\n\
             joint_index = [{a}, {b}, {c}, {d}]\n\
             joint_coeff = [1.0, 1.0, 1.0, 1.0]\n\
             joint_offset = [{m}, {m}, {m}, {m}]\n",
            m = IDENTITY_ROWS,
            a = first_dof,
            b = first_dof + 1,
            c = first_dof + 2,
            d = first_dof + 3,
        )
    }

    fn write_calibration(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("calibration.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", body).unwrap();
        path
    }

    fn full_calibration_toml() -> String {
        let mut body = String::from("origin = [0.0, 0.1, 0.0]\n");
        for (i, name) in FINGERS.iter().enumerate() {
            body.push_str(&chain_block(name, i * 4));
        }
        body
    }

    #[test]
    fn load_accepts_a_complete_calibration_file() {
        let dir = TempDir::new().unwrap();
        let path = write_calibration(&dir, &full_calibration_toml());

        let model = KinematicModel::load(&path).unwrap();
        assert_eq!(model.chains().len(), 5);
        assert_eq!(model.chains()[4].name, "thumb");
        assert_eq!(model.chains()[1].joint_index, [4, 5, 6, 7]);
        assert_eq!(*model.origin(), Vector3::new(0.0, 0.1, 0.0));
    }

    #[test]
    fn load_fails_when_a_chain_is_missing() {
        let dir = TempDir::new().unwrap();
        let mut body = String::from("origin = [0.0, 0.0, 0.0]\n");
        for (i, name) in FINGERS.iter().enumerate().take(4) {
            body.push_str(&chain_block(name, i * 4));
        }
        let path = write_calibration(&dir, &body);

        let err = KinematicModel::load(&path).unwrap_err();
        assert!(matches!(err, CalibrationError::MissingChain("thumb")));
    }

    #[test]
    fn load_fails_when_a_matrix_is_not_a_rotation() {
        let dir = TempDir::new().unwrap();
        let body = full_calibration_toml().replacen(
            IDENTITY_ROWS,
            "[[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]]",
            1,
        );
        let path = write_calibration(&dir, &body);

        let err = KinematicModel::load(&path).unwrap_err();
        assert!(matches!(
            err,
            CalibrationError::NotARotation { chain: "index", .. }
        ));
    }

    #[test]
    fn load_fails_on_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = write_calibration(&dir, "origin = [0.0, 0.0");

        let err = KinematicModel::load(&path).unwrap_err();
        assert!(matches!(err, CalibrationError::Toml { .. }));
    }

    #[test]
    fn load_fails_on_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = KinematicModel::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, CalibrationError::Io { .. }));
    }
}
