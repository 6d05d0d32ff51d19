use super::calibration::{ChainCalibration, KinematicModel};
use crate::core::math::rotation::{
    mat_from_quat, mat_from_rvec, mat_rotate_z, rvec_from_mat, rvec_from_quat,
};
use nalgebra::{Matrix3, Vector3};

/// Number of scalars in a full target pose vector: one root rotation vector
/// plus 3 per finger chain.
pub const TARGET_POSE_LEN: usize = 3 * 16;

impl KinematicModel {
    /// Converts a source-rig root pose and flat joint-angle vector into the
    /// target rig's translation and per-joint axis-angle pose vector.
    ///
    /// Per chain, two frames are advanced through the 4 joint slots: the
    /// actuated frame `m` (rotation about local z by the scaled angle, then
    /// the static offset) and the un-actuated reference frame `m0` (static
    /// offsets only). Slot 0 only feeds the frames. Slot 1 emits the
    /// orientation of the actuated frame relative to the reference frame,
    /// re-expressed in the target root. Later slots emit the instantaneous
    /// world-space rotation axis scaled by the angle, accumulated into the
    /// running target orientation `p`.
    ///
    /// `quat` is `[x, y, z, w]`. `dofs` must be long enough for every
    /// chain's `joint_index`; its length is defined by the engine's hand
    /// model, not validated here. Given well-formed calibration and finite
    /// angles the conversion cannot fail.
    pub fn convert(
        &self,
        xyz: &[f64; 3],
        quat: &[f64; 4],
        dofs: &[f64],
    ) -> (Vector3<f64>, Vec<f64>) {
        let mut pose = Vec::with_capacity(3 + 9 * self.chains.len());
        extend_from_rvec(&mut pose, &rvec_from_quat(quat));

        for chain in &self.chains {
            convert_chain(chain, dofs, &mut pose);
        }

        let root = mat_from_quat(quat);
        let trans = Vector3::from(*xyz) - self.origin + root * self.origin;
        (trans, pose)
    }
}

fn convert_chain(chain: &ChainCalibration, dofs: &[f64], pose: &mut Vec<f64>) {
    let p0 = chain.target_root;
    let mut m0 = chain.source_root;
    let mut m = m0;
    let mut p = Matrix3::identity();

    for i in 0..4 {
        let theta = dofs[chain.joint_index[i]] * chain.joint_coeff[i];
        let tau0 = chain.joint_offset[i];
        m0 *= tau0;
        let mi = mat_rotate_z(theta) * tau0;
        // Local z-axis of the actuated frame before this joint is applied.
        let zi = m * Vector3::z();
        m *= mi;

        if i == 1 {
            p = m * m0.transpose() * p0;
            extend_from_rvec(pose, &rvec_from_mat(&p));
        } else if i > 1 {
            let axis = p.transpose() * zi;
            let rvec = axis * theta;
            p *= mat_from_rvec(&rvec);
            extend_from_rvec(pose, &rvec);
        }
    }
}

fn extend_from_rvec(pose: &mut Vec<f64>, rvec: &Vector3<f64>) {
    pose.extend_from_slice(&[rvec.x, rvec.y, rvec.z]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kinematics::FINGERS;
    use std::f64::consts::FRAC_PI_2;

    const TOLERANCE: f64 = 1e-9;

    fn identity_model() -> KinematicModel {
        let chains = FINGERS
            .iter()
            .enumerate()
            .map(|(i, name)| ChainCalibration::identity(name, i * 4))
            .collect();
        KinematicModel::from_parts(chains, Vector3::zeros())
    }

    #[test]
    fn identity_calibration_with_zero_angles_yields_zero_pose() {
        let model = identity_model();
        let (trans, pose) = model.convert(
            &[0.1, 0.2, 0.3],
            &[0.0, 0.0, 0.0, 1.0],
            &[0.0; 20],
        );

        assert_eq!(pose.len(), TARGET_POSE_LEN);
        assert!(pose.iter().all(|v| v.abs() < TOLERANCE));
        // Zero origin: translation passes straight through.
        assert!((trans - Vector3::new(0.1, 0.2, 0.3)).amax() < TOLERANCE);
    }

    #[test]
    fn translation_compensates_origin_offset_under_root_rotation() {
        let origin = Vector3::new(0.0, 0.05, 0.0);
        let model = KinematicModel::from_parts(
            FINGERS
                .iter()
                .enumerate()
                .map(|(i, name)| ChainCalibration::identity(name, i * 4))
                .collect(),
            origin,
        );

        // 90 degrees about z rotates the origin offset onto -x.
        let s = (FRAC_PI_2 / 2.0).sin();
        let c = (FRAC_PI_2 / 2.0).cos();
        let (trans, _) = model.convert(&[1.0, 2.0, 3.0], &[0.0, 0.0, s, c], &[0.0; 20]);

        let expected = Vector3::new(1.0, 2.0, 3.0) - origin + Vector3::new(-0.05, 0.0, 0.0);
        assert!((trans - expected).amax() < 1e-9);
    }

    #[test]
    fn single_slot_one_angle_emits_rvec_of_that_magnitude() {
        let model = identity_model();
        let theta = 0.7;
        let mut dofs = [0.0; 20];
        // Slot 1 of the mid chain (second chain, dofs 4..8).
        dofs[5] = theta;

        let (_, pose) = model.convert(&[0.0; 3], &[0.0, 0.0, 0.0, 1.0], &dofs);

        // Chain outputs start after the root triplet, 9 scalars per chain.
        let mid_first = &pose[3 + 9..3 + 9 + 3];
        let magnitude = (mid_first[0].powi(2) + mid_first[1].powi(2) + mid_first[2].powi(2)).sqrt();
        assert!((magnitude - theta).abs() < TOLERANCE);

        // Every other chain stays at zero rotation.
        for (i, v) in pose.iter().enumerate() {
            if !(12..15).contains(&i) {
                assert!(v.abs() < TOLERANCE, "unexpected rotation at index {i}");
            }
        }
    }

    #[test]
    fn distal_slots_scale_with_their_coefficients() {
        let mut chains: Vec<ChainCalibration> = FINGERS
            .iter()
            .enumerate()
            .map(|(i, name)| ChainCalibration::identity(name, i * 4))
            .collect();
        chains[0].joint_coeff = [1.0, 1.0, -0.5, 1.0];
        let model = KinematicModel::from_parts(chains, Vector3::zeros());

        let mut dofs = [0.0; 20];
        dofs[2] = 0.8;
        let (_, pose) = model.convert(&[0.0; 3], &[0.0, 0.0, 0.0, 1.0], &dofs);

        // Index chain, second emitted rvec (slot 2).
        let rvec = &pose[6..9];
        let magnitude = (rvec[0].powi(2) + rvec[1].powi(2) + rvec[2].powi(2)).sqrt();
        assert!((magnitude - 0.4).abs() < TOLERANCE);
    }
}
