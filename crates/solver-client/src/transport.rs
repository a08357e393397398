//! The injected transport seam between the client and the out-of-process
//! solver.
//!
//! Implementations decide how the two calls reach the solver: a spawned
//! subprocess here, a scripted double in [`crate::scripted`]. The client
//! never knows which.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Serialize;
use tracing::debug;

use crate::errors::TransportError;
use crate::protocol::{ComputeOptions, SolverEnvelope};

/// A synchronous channel to the equilibrium solver.
///
/// Both calls block until the solver returns or fails; the transport
/// enforces no timeout of its own.
pub trait SolverTransport {
    /// Ask the solver to detect contact interfaces between blocks.
    fn identify_interfaces(
        &mut self,
        request: &SolverEnvelope,
    ) -> Result<SolverEnvelope, TransportError>;

    /// Ask the solver for per-point equilibrium forces at the interfaces.
    fn compute_interface_forces(
        &mut self,
        request: &SolverEnvelope,
        options: &ComputeOptions,
    ) -> Result<SolverEnvelope, TransportError>;
}

/// Wire body of a force-equilibrium request: the shared envelope plus the
/// solver options, flattened into one object.
#[derive(Serialize)]
struct ComputeRequestBody<'a> {
    #[serde(flatten)]
    envelope: &'a SolverEnvelope,
    verbose: bool,
    max_iters: u32,
}

/// Transport that runs the solver as a subprocess.
///
/// The solver command is invoked with the method name as its single
/// argument; the JSON request goes to stdin, the JSON response is read
/// from stdout. A nonzero exit (including non-convergence) fails the call
/// with the solver's stderr attached.
pub struct SubprocessSolver {
    command: PathBuf,
    args: Vec<String>,
}

impl SubprocessSolver {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    /// Extra arguments placed before the method name.
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args.extend(args);
        self
    }

    fn run<B: Serialize>(&self, method: &str, body: &B) -> Result<SolverEnvelope, TransportError> {
        let request = serde_json::to_vec(body).map_err(|e| TransportError::Io {
            reason: e.to_string(),
        })?;

        debug!(
            command = %self.command.display(),
            method,
            request_bytes = request.len(),
            "invoking solver subprocess"
        );

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .arg(method)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TransportError::Spawn {
                command: self.command.display().to_string(),
                reason: e.to_string(),
            })?;

        // stdin is piped above, so take() cannot return None
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&request).map_err(|e| TransportError::Io {
                reason: e.to_string(),
            })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| TransportError::Io {
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(TransportError::SolverFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|e| TransportError::MalformedResponse {
            reason: e.to_string(),
        })
    }
}

impl SolverTransport for SubprocessSolver {
    fn identify_interfaces(
        &mut self,
        request: &SolverEnvelope,
    ) -> Result<SolverEnvelope, TransportError> {
        self.run("identify_interfaces", request)
    }

    fn compute_interface_forces(
        &mut self,
        request: &SolverEnvelope,
        options: &ComputeOptions,
    ) -> Result<SolverEnvelope, TransportError> {
        let body = ComputeRequestBody {
            envelope: request,
            verbose: options.verbose,
            max_iters: options.max_iters,
        };
        self.run("compute_interface_forces", &body)
    }
}
