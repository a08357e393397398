//! Orchestration of the two solver round trips.
//!
//! Both calls follow the same discipline: snapshot the assembly to the wire
//! shape, invoke the transport, validate the full staged response, and only
//! then commit. Any failure before commit leaves the assembly byte-for-byte
//! unchanged; there are no retries.

use tracing::{info, instrument};

use rbe_assembly::{Assembly, ContactForce};
use rbe_types::BlockId;

use crate::errors::ClientError;
use crate::protocol::{ComputeOptions, SolverEnvelope};
use crate::transport::SolverTransport;

pub struct SolverClient<T: SolverTransport> {
    transport: T,
}

impl<T: SolverTransport> SolverClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Run interface identification and replace the assembly's edge set
    /// with the solver's result.
    ///
    /// The solver owns interface geometry, so its edges supersede all
    /// prior ones, including any previously computed forces. Re-running is
    /// idempotent only if the solver is; the client does not deduplicate.
    #[instrument(skip_all, fields(assembly = %assembly.name(), blocks = assembly.block_count()))]
    pub fn identify_interfaces(&mut self, assembly: &mut Assembly) -> Result<(), ClientError> {
        let request = SolverEnvelope::from_assembly(assembly);
        let response = self.transport.identify_interfaces(&request)?;

        check_block_coverage(assembly, &response)?;
        // replace_interfaces validates the whole edge set before the swap.
        assembly.replace_interfaces(response.assembly.edges)?;

        info!(
            interfaces = assembly.interface_count(),
            "interface identification merged"
        );
        Ok(())
    }

    /// Run the force equilibrium and write per-point forces onto the
    /// matching interfaces.
    ///
    /// Only the `interface_forces` field is merged; interface geometry and
    /// block data stay untouched. The response must cover every interface
    /// of the assembly.
    #[instrument(
        skip_all,
        fields(
            assembly = %assembly.name(),
            interfaces = assembly.interface_count(),
            max_iters = options.max_iters,
            verbose = options.verbose,
        )
    )]
    pub fn compute_interface_forces(
        &mut self,
        assembly: &mut Assembly,
        options: &ComputeOptions,
    ) -> Result<(), ClientError> {
        let request = SolverEnvelope::from_assembly(assembly);
        let response = self.transport.compute_interface_forces(&request, options)?;

        check_block_coverage(assembly, &response)?;
        let staged = stage_forces(assembly, &response)?;

        for (u, v, forces) in staged {
            assembly.set_interface_forces(u, v, forces)?;
        }

        info!("interface forces merged");
        Ok(())
    }
}

/// Every block the client knows must appear in the response's blocks map.
fn check_block_coverage(
    assembly: &Assembly,
    response: &SolverEnvelope,
) -> Result<(), ClientError> {
    for id in assembly.block_ids() {
        if !response.blocks.contains_key(&id) {
            return Err(ClientError::MissingBlock { id });
        }
    }
    Ok(())
}

/// Validate the staged force results against the current edge set.
///
/// Checks, per response edge: the `(u, v)` pair matches a known interface,
/// the force count matches that interface's point count, and every
/// magnitude is non-negative. Checks, per known interface: the response
/// provided forces for it (the round trip replaces forces assembly-wide).
fn stage_forces(
    assembly: &Assembly,
    response: &SolverEnvelope,
) -> Result<Vec<(BlockId, BlockId, Vec<ContactForce>)>, ClientError> {
    let mut staged = Vec::with_capacity(assembly.interface_count());

    for edge in &response.assembly.edges {
        let iface = assembly
            .interface(edge.u, edge.v)
            .ok_or(ClientError::UnknownInterface {
                u: edge.u,
                v: edge.v,
            })?;

        let forces = edge
            .interface
            .forces
            .as_ref()
            .ok_or(ClientError::MissingForces {
                u: edge.u,
                v: edge.v,
            })?;

        if forces.len() != iface.points.len() {
            return Err(ClientError::ForceCountMismatch {
                u: edge.u,
                v: edge.v,
                count: forces.len(),
                points: iface.points.len(),
            });
        }
        for (i, f) in forces.iter().enumerate() {
            if f.c_np < 0.0 || f.c_nn < 0.0 {
                return Err(ClientError::NegativeForce {
                    u: edge.u,
                    v: edge.v,
                    index: i,
                });
            }
        }
        staged.push((edge.u, edge.v, forces.clone()));
    }

    for edge in assembly.interfaces() {
        if !staged.iter().any(|(u, v, _)| *u == edge.u && *v == edge.v) {
            return Err(ClientError::MissingForces {
                u: edge.u,
                v: edge.v,
            });
        }
    }

    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransportError;
    use crate::scripted::ScriptedSolver;
    use rbe_assembly::{Block, Interface, InterfaceEdge};
    use rbe_types::{Frame, Point3d};

    fn slab(z0: f64) -> Block {
        let z1 = z0 + 0.5;
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

    fn contact(z: f64) -> Interface {
        Interface::new(
            vec![
                Point3d::new(0.0, 0.0, z),
                Point3d::new(1.0, 0.0, z),
                Point3d::new(1.0, 1.0, z),
                Point3d::new(0.0, 1.0, z),
            ],
            Frame::WORLD_XY,
        )
    }

    fn stack() -> (Assembly, BlockId, BlockId) {
        let mut asm = Assembly::new("stack");
        let a = asm.add_support(slab(0.0)).unwrap();
        let b = asm.add_block(slab(0.5)).unwrap();
        (asm, a, b)
    }

    /// Response for identification: the request plus one identified edge.
    fn identify_response(asm: &Assembly, u: BlockId, v: BlockId) -> SolverEnvelope {
        let mut envelope = SolverEnvelope::from_assembly(asm);
        envelope.assembly.edges = vec![InterfaceEdge {
            u,
            v,
            interface: contact(0.5),
        }];
        envelope
    }

    /// Response for equilibrium: the request with forces on every edge.
    fn compute_response(asm: &Assembly, forces: Vec<ContactForce>) -> SolverEnvelope {
        let mut envelope = SolverEnvelope::from_assembly(asm);
        for edge in &mut envelope.assembly.edges {
            edge.interface.forces = Some(forces.clone());
        }
        envelope
    }

    #[test]
    fn test_identify_replaces_edge_set() {
        let (mut asm, a, b) = stack();
        let mut scripted = ScriptedSolver::new();
        scripted.push_identify(Ok(identify_response(&asm, a, b)));

        let mut client = SolverClient::new(scripted);
        client.identify_interfaces(&mut asm).unwrap();

        assert_eq!(asm.interface_count(), 1);
        let iface = asm.interface(a, b).unwrap();
        assert_eq!(iface.points.len(), 4);
        assert!(!iface.has_forces());
    }

    #[test]
    fn test_identify_transport_failure_leaves_assembly_unchanged() {
        let (mut asm, a, b) = stack();
        asm.add_interface(a, b, contact(0.5)).unwrap();

        let mut scripted = ScriptedSolver::new();
        scripted.push_identify(Err(TransportError::SolverFailed {
            code: Some(1),
            stderr: "did not converge".into(),
        }));

        let mut client = SolverClient::new(scripted);
        let err = client.identify_interfaces(&mut asm).unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(asm.interface_count(), 1);
    }

    #[test]
    fn test_identify_missing_block_in_response_is_fatal() {
        let (mut asm, a, b) = stack();
        let mut response = identify_response(&asm, a, b);
        response.blocks.remove(&b);

        let mut scripted = ScriptedSolver::new();
        scripted.push_identify(Ok(response));

        let mut client = SolverClient::new(scripted);
        let err = client.identify_interfaces(&mut asm).unwrap_err();
        assert!(matches!(err, ClientError::MissingBlock { id } if id == b));
        assert_eq!(asm.interface_count(), 0);
    }

    #[test]
    fn test_identify_edge_to_unknown_block_is_fatal() {
        let (mut asm, a, _) = stack();
        let mut response = SolverEnvelope::from_assembly(&asm);
        response.assembly.edges = vec![InterfaceEdge {
            u: a,
            v: BlockId(99),
            interface: contact(0.5),
        }];

        let mut scripted = ScriptedSolver::new();
        scripted.push_identify(Ok(response));

        let mut client = SolverClient::new(scripted);
        assert!(client.identify_interfaces(&mut asm).is_err());
        assert_eq!(asm.interface_count(), 0);
    }

    #[test]
    fn test_compute_merges_forces_only() {
        let (mut asm, a, b) = stack();
        asm.add_interface(a, b, contact(0.5)).unwrap();
        let before_points = asm.interface(a, b).unwrap().points.clone();

        let forces = vec![
            ContactForce::new(2.0, 0.0),
            ContactForce::new(1.0, 0.0),
            ContactForce::new(0.5, 0.0),
            ContactForce::new(0.0, 0.3),
        ];
        let mut response = compute_response(&asm, forces.clone());
        // Geometry changes in the response must not leak into the merge.
        response.assembly.edges[0].interface.points[0] = Point3d::new(9.0, 9.0, 9.0);

        let mut scripted = ScriptedSolver::new();
        scripted.push_compute(Ok(response));

        let mut client = SolverClient::new(scripted);
        client
            .compute_interface_forces(&mut asm, &ComputeOptions::default())
            .unwrap();

        let iface = asm.interface(a, b).unwrap();
        assert_eq!(iface.forces.as_deref(), Some(&forces[..]));
        assert_eq!(iface.points, before_points);
    }

    #[test]
    fn test_compute_options_forwarded_verbatim() {
        let (mut asm, a, b) = stack();
        asm.add_interface(a, b, contact(0.5)).unwrap();

        let response = compute_response(&asm, vec![ContactForce::new(1.0, 0.0); 4]);
        let mut scripted = ScriptedSolver::new();
        scripted.push_compute(Ok(response));

        let options = ComputeOptions {
            verbose: true,
            max_iters: 7,
        };
        let mut client = SolverClient::new(scripted);
        client.compute_interface_forces(&mut asm, &options).unwrap();

        assert_eq!(client.transport().compute_options_seen, vec![options]);
    }

    #[test]
    fn test_compute_force_count_mismatch_is_fatal_and_clean() {
        let (mut asm, a, b) = stack();
        asm.add_interface(a, b, contact(0.5)).unwrap();

        let response = compute_response(&asm, vec![ContactForce::new(1.0, 0.0); 3]);
        let mut scripted = ScriptedSolver::new();
        scripted.push_compute(Ok(response));

        let mut client = SolverClient::new(scripted);
        let err = client
            .compute_interface_forces(&mut asm, &ComputeOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::ForceCountMismatch {
                count: 3,
                points: 4,
                ..
            }
        ));
        assert!(!asm.interface(a, b).unwrap().has_forces());
    }

    #[test]
    fn test_compute_negative_force_is_fatal_and_clean() {
        let (mut asm, a, b) = stack();
        asm.add_interface(a, b, contact(0.5)).unwrap();

        let mut forces = vec![ContactForce::new(1.0, 0.0); 4];
        forces[2] = ContactForce::new(-0.1, 0.0);
        let response = compute_response(&asm, forces);

        let mut scripted = ScriptedSolver::new();
        scripted.push_compute(Ok(response));

        let mut client = SolverClient::new(scripted);
        let err = client
            .compute_interface_forces(&mut asm, &ComputeOptions::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::NegativeForce { index: 2, .. }));
        assert!(!asm.interface(a, b).unwrap().has_forces());
    }

    #[test]
    fn test_compute_requires_forces_for_every_interface() {
        let (mut asm, a, b) = stack();
        asm.add_interface(a, b, contact(0.5)).unwrap();
        asm.add_interface(b, a, contact(0.5)).unwrap();

        let mut response = SolverEnvelope::from_assembly(&asm);
        response.assembly.edges[0].interface.forces =
            Some(vec![ContactForce::new(1.0, 0.0); 4]);
        response.assembly.edges.truncate(1);

        let mut scripted = ScriptedSolver::new();
        scripted.push_compute(Ok(response));

        let mut client = SolverClient::new(scripted);
        let err = client
            .compute_interface_forces(&mut asm, &ComputeOptions::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingForces { .. }));
        assert!(!asm.interface(a, b).unwrap().has_forces());
    }
}
