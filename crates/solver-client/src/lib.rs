pub mod client;
pub mod errors;
pub mod protocol;
pub mod scripted;
pub mod transport;

pub use client::SolverClient;
pub use errors::{ClientError, TransportError};
pub use protocol::{AssemblyPayload, ComputeOptions, SolverEnvelope, VertexRecord};
pub use scripted::ScriptedSolver;
pub use transport::{SolverTransport, SubprocessSolver};
