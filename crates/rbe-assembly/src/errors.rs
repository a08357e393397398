use rbe_types::BlockId;

/// Errors from assembly and block mutations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssemblyError {
    #[error("unknown block: {id}")]
    UnknownBlock { id: BlockId },

    #[error("duplicate interface: {u} -> {v}")]
    DuplicateInterface { u: BlockId, v: BlockId },

    #[error("block {id} cannot interface with itself")]
    SelfInterface { id: BlockId },

    #[error("face {face} references vertex {vertex}, block has {count} vertices")]
    FaceVertexOutOfRange {
        face: usize,
        vertex: usize,
        count: usize,
    },

    #[error("face {face} has {count} vertices, a face loop needs at least 3")]
    DegenerateFace { face: usize, count: usize },

    #[error("{count} force entries for {points} interface points")]
    ForceCountMismatch { count: usize, points: usize },

    #[error("negative force magnitude at point {index}: c_np = {c_np}, c_nn = {c_nn}")]
    NegativeForce { index: usize, c_np: f64, c_nn: f64 },
}
