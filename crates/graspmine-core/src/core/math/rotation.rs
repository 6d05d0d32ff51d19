use nalgebra::{Matrix3, Quaternion, Rotation3, Unit, UnitQuaternion, Vector3};

/// Quaternions closer to identity than this are treated as zero rotation.
pub const QUAT_IDENTITY_THRESHOLD: f64 = 1e-6;

/// Tolerance used when checking that a 3x3 matrix is a proper rotation.
pub const MAT_ORTHOGONALITY_THRESHOLD: f64 = 1e-3;

pub fn mat_rotate_x(alpha: f64) -> Matrix3<f64> {
    let (sa, ca) = alpha.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, ca, -sa, 0.0, sa, ca)
}

pub fn mat_rotate_y(beta: f64) -> Matrix3<f64> {
    let (sb, cb) = beta.sin_cos();
    Matrix3::new(cb, 0.0, sb, 0.0, 1.0, 0.0, -sb, 0.0, cb)
}

pub fn mat_rotate_z(theta: f64) -> Matrix3<f64> {
    let (st, ct) = theta.sin_cos();
    Matrix3::new(ct, -st, 0.0, st, ct, 0.0, 0.0, 0.0, 1.0)
}

/// Converts an axis-angle rotation vector to a rotation matrix.
///
/// A zero-magnitude vector has no defined axis; it falls back to +z with
/// zero angle, yielding the identity.
pub fn mat_from_rvec(rvec: &Vector3<f64>) -> Matrix3<f64> {
    let angle = rvec.norm();
    if angle == 0.0 {
        return Matrix3::identity();
    }
    let axis = Unit::new_unchecked(rvec / angle);
    *Rotation3::from_axis_angle(&axis, angle).matrix()
}

/// Converts an `[x, y, z, w]` quaternion to a rotation matrix.
pub fn mat_from_quat(quat: &[f64; 4]) -> Matrix3<f64> {
    let [x, y, z, w] = *quat;
    let q = UnitQuaternion::from_quaternion(Quaternion::new(w, x, y, z));
    *q.to_rotation_matrix().matrix()
}

pub fn quat_from_mat(mat: &Matrix3<f64>) -> [f64; 4] {
    let rot = Rotation3::from_matrix_unchecked(*mat);
    let q = UnitQuaternion::from_rotation_matrix(&rot);
    let c = q.coords;
    [c.x, c.y, c.z, c.w]
}

/// Converts an `[x, y, z, w]` quaternion to an axis-angle rotation vector.
pub fn rvec_from_quat(quat: &[f64; 4]) -> Vector3<f64> {
    rvec_from_quat_eps(quat, QUAT_IDENTITY_THRESHOLD)
}

/// Like [`rvec_from_quat`], with an explicit identity threshold below which
/// the result is exactly zero.
pub fn rvec_from_quat_eps(quat: &[f64; 4], identity_threshold: f64) -> Vector3<f64> {
    let [x, y, z, w] = *quat;
    let q = UnitQuaternion::from_quaternion(Quaternion::new(w, x, y, z));
    if q.vector().norm() < identity_threshold {
        return Vector3::zeros();
    }
    q.scaled_axis()
}

/// Converts a rotation matrix to an axis-angle rotation vector.
///
/// The input must be a proper rotation within [`MAT_ORTHOGONALITY_THRESHOLD`];
/// calibration loading enforces this before any conversion runs.
pub fn rvec_from_mat(mat: &Matrix3<f64>) -> Vector3<f64> {
    debug_assert!(is_rotation(mat, MAT_ORTHOGONALITY_THRESHOLD));
    let rot = Rotation3::from_matrix_unchecked(*mat);
    UnitQuaternion::from_rotation_matrix(&rot).scaled_axis()
}

/// Checks that `mat` is orthonormal with determinant +1 within `tol`.
pub fn is_rotation(mat: &Matrix3<f64>, tol: f64) -> bool {
    let gram = mat * mat.transpose() - Matrix3::identity();
    gram.amax() <= tol && (mat.determinant() - 1.0).abs() <= tol
}
