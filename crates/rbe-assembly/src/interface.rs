use serde::{Deserialize, Serialize};

use rbe_types::{Frame, Point3d};

use crate::errors::AssemblyError;

/// Contact force magnitudes at one interface point, expressed along the
/// interface normal: `c_np` compresses (+w), `c_nn` pulls (-w). Both are
/// non-negative by convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactForce {
    pub c_np: f64,
    pub c_nn: f64,
}

impl ContactForce {
    pub fn new(c_np: f64, c_nn: f64) -> Self {
        Self { c_np, c_nn }
    }
}

/// The contact region between two adjacent blocks.
///
/// The polygon is closed without repeating its first point. `forces` is
/// `None` until the equilibrium solver has run; once present it holds one
/// entry per polygon point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    #[serde(rename = "interface_points")]
    pub points: Vec<Point3d>,

    #[serde(rename = "interface_uvw")]
    pub frame: Frame,

    #[serde(rename = "interface_forces", default)]
    pub forces: Option<Vec<ContactForce>>,
}

impl Interface {
    pub fn new(points: Vec<Point3d>, frame: Frame) -> Self {
        Self {
            points,
            frame,
            forces: None,
        }
    }

    pub fn has_forces(&self) -> bool {
        self.forces.is_some()
    }

    /// Attach per-point force results, one entry per polygon point.
    pub fn set_forces(&mut self, forces: Vec<ContactForce>) -> Result<(), AssemblyError> {
        if forces.len() != self.points.len() {
            return Err(AssemblyError::ForceCountMismatch {
                count: forces.len(),
                points: self.points.len(),
            });
        }
        for (i, f) in forces.iter().enumerate() {
            if f.c_np < 0.0 || f.c_nn < 0.0 {
                return Err(AssemblyError::NegativeForce {
                    index: i,
                    c_np: f.c_np,
                    c_nn: f.c_nn,
                });
            }
        }
        self.forces = Some(forces);
        Ok(())
    }
}
