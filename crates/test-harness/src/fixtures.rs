//! Canned assemblies and solver responses.

use rbe_assembly::{Assembly, Block, ContactForce, Interface, InterfaceEdge};
use rbe_types::{BlockId, Frame, Point3d};
use solver_client::SolverEnvelope;

pub const SLAB_HEIGHT: f64 = 0.5;

/// A 1 x 1 x 0.5 slab with its base at height `z0`.
pub fn slab(z0: f64) -> Block {
    let z1 = z0 + SLAB_HEIGHT;
    Block::new(
        vec![
            Point3d::new(0.0, 0.0, z0),
            Point3d::new(1.0, 0.0, z0),
            Point3d::new(1.0, 1.0, z0),
            Point3d::new(0.0, 1.0, z0),
            Point3d::new(0.0, 0.0, z1),
            Point3d::new(1.0, 0.0, z1),
            Point3d::new(1.0, 1.0, z1),
            Point3d::new(0.0, 1.0, z1),
        ],
        vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![2, 3, 7, 6],
            vec![1, 2, 6, 5],
            vec![0, 4, 7, 3],
        ],
    )
}

/// A tower of `levels` stacked slabs; the bottom slab is a support.
/// Interfaces are not created — that is the solver's job.
pub fn tower(name: &str, levels: usize) -> Assembly {
    let mut asm = Assembly::new(name);
    for level in 0..levels {
        let block = slab(level as f64 * SLAB_HEIGHT);
        if level == 0 {
            asm.add_support(block).unwrap();
        } else {
            asm.add_block(block).unwrap();
        }
    }
    asm
}

/// The square contact polygon between tower levels `level` and `level + 1`.
fn contact_polygon(level: usize) -> Vec<Point3d> {
    let z = (level + 1) as f64 * SLAB_HEIGHT;
    vec![
        Point3d::new(0.0, 0.0, z),
        Point3d::new(1.0, 0.0, z),
        Point3d::new(1.0, 1.0, z),
        Point3d::new(0.0, 1.0, z),
    ]
}

/// An identification response for a tower: the request envelope with one
/// upward-directed interface per pair of consecutive slabs.
pub fn identified(assembly: &Assembly) -> SolverEnvelope {
    let mut envelope = SolverEnvelope::from_assembly(assembly);
    let ids: Vec<BlockId> = assembly.block_ids().collect();
    envelope.assembly.edges = ids
        .windows(2)
        .enumerate()
        .map(|(level, pair)| InterfaceEdge {
            u: pair[0],
            v: pair[1],
            interface: Interface::new(contact_polygon(level), Frame::WORLD_XY),
        })
        .collect();
    envelope
}

/// A force-equilibrium response: `envelope` with the same uniform force at
/// every point of every interface.
pub fn with_uniform_forces(mut envelope: SolverEnvelope, c_np: f64, c_nn: f64) -> SolverEnvelope {
    for edge in &mut envelope.assembly.edges {
        let n = edge.interface.points.len();
        edge.interface.forces = Some(vec![ContactForce::new(c_np, c_nn); n]);
    }
    envelope
}
