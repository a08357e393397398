use serde::{Deserialize, Serialize};

use super::vector::Vec3;

/// Local orthonormal basis at an interface.
///
/// `w` is the contact normal, pointing from the "from" block toward the
/// "to" block of the interface edge. Forces at the interface are expressed
/// along `+w` (compression) and `-w` (tension).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl Frame {
    pub fn new(u: Vec3, v: Vec3, w: Vec3) -> Self {
        Self { u, v, w }
    }

    /// Frame aligned with the world axes (w = +Z).
    pub const WORLD_XY: Self = Self {
        u: Vec3::X,
        v: Vec3::Y,
        w: Vec3::Z,
    };

    /// Check that the three axes are unit-length and mutually perpendicular.
    pub fn is_orthonormal(&self, tol: f64) -> bool {
        (self.u.length() - 1.0).abs() < tol
            && (self.v.length() - 1.0).abs() < tol
            && (self.w.length() - 1.0).abs() < tol
            && self.u.dot(&self.v).abs() < tol
            && self.v.dot(&self.w).abs() < tol
            && self.w.dot(&self.u).abs() < tol
    }
}
