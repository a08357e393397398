//! Per-point color normalization for interface force results.
//!
//! Each interface normalizes independently against its own maxima, so the
//! strongest point of every interface saturates regardless of the force
//! levels elsewhere in the assembly.

use rbe_assembly::{ContactForce, Interface};
use rbe_types::Color;

/// Compression magnitudes below this classify the point as
/// tension-dominant, whatever its tension magnitude.
pub const COMPRESSION_NEGLIGIBLE: f64 = 1e-3;

/// Additive guard on the normalization denominator; an all-zero interface
/// maps every point to intensity 0 instead of dividing by zero.
const RANGE_GUARD: f64 = 1e-4;

/// Dominant classification of one interface point, with its normalized
/// intensity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointShading {
    Compression { t: f64 },
    Tension { t: f64 },
}

impl PointShading {
    pub fn intensity(&self) -> f64 {
        match self {
            PointShading::Compression { t } | PointShading::Tension { t } => *t,
        }
    }
}

/// Classify every point of a force set against the set's own maxima.
///
/// Minima are 0 by convention (magnitudes are non-negative).
pub fn classify(forces: &[ContactForce]) -> Vec<PointShading> {
    let cmax_np = forces.iter().map(|f| f.c_np).fold(0.0, f64::max);
    let cmax_nn = forces.iter().map(|f| f.c_nn).fold(0.0, f64::max);

    forces
        .iter()
        .map(|f| {
            if f.c_np < COMPRESSION_NEGLIGIBLE {
                PointShading::Tension {
                    t: f.c_nn / (cmax_nn + RANGE_GUARD),
                }
            } else {
                PointShading::Compression {
                    t: f.c_np / (cmax_np + RANGE_GUARD),
                }
            }
        })
        .collect()
}

/// Per-vertex colors for an interface's visual polygon, or `None` when no
/// forces have been computed.
///
/// Ordered as `interface_points`. Polygons with more than 4 points get one
/// trailing synthetic color for the tessellation's center vertex: the blue
/// ramp of the mean compression intensity (tension-dominant points are
/// excluded from the mean; with none left the mean is 0).
pub fn interface_colors(iface: &Interface) -> Option<Vec<Color>> {
    let forces = iface.forces.as_ref()?;
    let shadings = classify(forces);

    let mut colors: Vec<Color> = shadings
        .iter()
        .map(|s| match s {
            PointShading::Compression { t } => Color::blue_intensity(*t),
            PointShading::Tension { t } => Color::red_intensity(*t),
        })
        .collect();

    if iface.points.len() > 4 {
        let compression: Vec<f64> = shadings
            .iter()
            .filter_map(|s| match s {
                PointShading::Compression { t } => Some(*t),
                PointShading::Tension { .. } => None,
            })
            .collect();
        let mean = if compression.is_empty() {
            0.0
        } else {
            compression.iter().sum::<f64>() / compression.len() as f64
        };
        colors.push(Color::blue_intensity(mean));
    }

    Some(colors)
}
