//! ScriptedSolver — deterministic transport double.
//!
//! Replays queued responses and records the options it was called with.
//! Used by the client's own tests and by the scenario harness.

use std::collections::VecDeque;

use crate::errors::TransportError;
use crate::protocol::{ComputeOptions, SolverEnvelope};
use crate::transport::SolverTransport;

type Scripted = Result<SolverEnvelope, TransportError>;

#[derive(Default)]
pub struct ScriptedSolver {
    identify: VecDeque<Scripted>,
    compute: VecDeque<Scripted>,
    /// Options seen by `compute_interface_forces`, in call order.
    pub compute_options_seen: Vec<ComputeOptions>,
    /// Requests seen by either call, in call order.
    pub requests_seen: Vec<SolverEnvelope>,
}

impl ScriptedSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_identify(&mut self, response: Scripted) -> &mut Self {
        self.identify.push_back(response);
        self
    }

    pub fn push_compute(&mut self, response: Scripted) -> &mut Self {
        self.compute.push_back(response);
        self
    }

    fn next(queue: &mut VecDeque<Scripted>, method: &str) -> Scripted {
        queue.pop_front().unwrap_or_else(|| {
            Err(TransportError::SolverFailed {
                code: None,
                stderr: format!("no scripted response for {method}"),
            })
        })
    }
}

impl SolverTransport for ScriptedSolver {
    fn identify_interfaces(
        &mut self,
        request: &SolverEnvelope,
    ) -> Result<SolverEnvelope, TransportError> {
        self.requests_seen.push(request.clone());
        Self::next(&mut self.identify, "identify_interfaces")
    }

    fn compute_interface_forces(
        &mut self,
        request: &SolverEnvelope,
        options: &ComputeOptions,
    ) -> Result<SolverEnvelope, TransportError> {
        self.requests_seen.push(request.clone());
        self.compute_options_seen.push(*options);
        Self::next(&mut self.compute, "compute_interface_forces")
    }
}
