//! Force and selfweight vector construction.
//!
//! Pure builders: given an interface (or assembly) and a style, produce
//! the line primitives and their registry keys. Emission thresholds follow
//! the observed conventions: interface forces emit on strictly
//! `scale * magnitude > eps`, selfweight on `volume * scale >= eps`.

use rbe_assembly::{Assembly, InterfaceEdge};
use rbe_types::{Color, Vec3};

use crate::registry::{ForceKind, PrimKey};
use crate::renderer::LinePrimitive;
use crate::settings::Settings;

/// Style inputs of the interface force builder.
#[derive(Debug, Clone, Copy)]
pub struct ForceVectorStyle {
    pub scale: f64,
    pub eps: f64,
    pub compression: Color,
    pub tension: Color,
}

impl ForceVectorStyle {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            scale: settings.scale.interface_forces,
            eps: settings.eps.interface_forces,
            compression: settings.color.compression,
            tension: settings.color.tension,
        }
    }
}

/// Contact force vectors for one interface edge.
///
/// At every point a compression arrow (along `+w`, into the "to" block)
/// and a tension arrow (along `-w`) are emitted independently; both can
/// appear for the same point. Interfaces without force results yield
/// nothing.
pub fn interface_force_lines(
    assembly_name: &str,
    edge: &InterfaceEdge,
    style: &ForceVectorStyle,
) -> Vec<(PrimKey, LinePrimitive)> {
    let Some(forces) = &edge.interface.forces else {
        return Vec::new();
    };

    let w = edge.interface.frame.w;
    let mut lines = Vec::new();

    for (i, (point, force)) in edge.interface.points.iter().zip(forces).enumerate() {
        let name = format!("{}.force.{}-{}.{}", assembly_name, edge.u, edge.v, i);

        let compression = style.scale * force.c_np;
        if compression > style.eps {
            lines.push((
                PrimKey::Force {
                    u: edge.u,
                    v: edge.v,
                    point: i,
                    kind: ForceKind::Compression,
                },
                LinePrimitive {
                    start: *point,
                    end: *point + w * compression,
                    color: style.compression,
                    name: name.clone(),
                    arrow_end: true,
                },
            ));
        }

        let tension = style.scale * force.c_nn;
        if tension > style.eps {
            lines.push((
                PrimKey::Force {
                    u: edge.u,
                    v: edge.v,
                    point: i,
                    kind: ForceKind::Tension,
                },
                LinePrimitive {
                    start: *point,
                    end: *point - w * tension,
                    color: style.tension,
                    name,
                    arrow_end: true,
                },
            ));
        }
    }

    lines
}

/// Selfweight vectors, one per block heavy enough to show.
///
/// Each vector hangs from the block centroid straight down with length
/// `volume * scale`, arrow at the far end.
pub fn selfweight_lines(
    assembly: &Assembly,
    scale: f64,
    eps: f64,
    color: Color,
) -> Vec<(PrimKey, LinePrimitive)> {
    let mut lines = Vec::new();

    for (id, node) in assembly.nodes() {
        let length = node.block.volume() * scale;
        if length < eps {
            continue;
        }
        let start = node.block.centroid();
        lines.push((
            PrimKey::Selfweight { block: id },
            LinePrimitive {
                start,
                end: start + Vec3::new(0.0, 0.0, -length),
                color,
                name: format!("{}.selfweight.{}", assembly.name(), id),
                arrow_end: true,
            },
        ));
    }

    lines
}
