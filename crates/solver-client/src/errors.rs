use rbe_assembly::AssemblyError;
use rbe_types::BlockId;

/// Errors at the transport layer: process handling, wire i/o, parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("failed to spawn solver `{command}`: {reason}")]
    Spawn { command: String, reason: String },

    #[error("solver i/o failed: {reason}")]
    Io { reason: String },

    #[error("solver failed (exit code {code:?}): {stderr}")]
    SolverFailed { code: Option<i32>, stderr: String },

    #[error("malformed solver response: {reason}")]
    MalformedResponse { reason: String },
}

/// Errors surfaced by the client after a solver round trip.
///
/// Any of these means the assembly was left untouched: validation happens
/// against the staged response before the first write.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("solver response is missing block {id}")]
    MissingBlock { id: BlockId },

    #[error("solver response edge {u} -> {v} does not match any interface")]
    UnknownInterface { u: BlockId, v: BlockId },

    #[error(
        "solver response has {count} force entries for the {points} points of interface {u} -> {v}"
    )]
    ForceCountMismatch {
        u: BlockId,
        v: BlockId,
        count: usize,
        points: usize,
    },

    #[error("negative force magnitude on interface {u} -> {v} at point {index}")]
    NegativeForce { u: BlockId, v: BlockId, index: usize },

    #[error("solver response carries no forces for interface {u} -> {v}")]
    MissingForces { u: BlockId, v: BlockId },

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}
