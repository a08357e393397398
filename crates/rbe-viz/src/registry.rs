//! Registry mapping semantic primitive keys to renderer handles.
//!
//! This replaces name-pattern lookups against the scene graph: every
//! primitive the pipeline owns is registered under a typed key, and a
//! whole category can be cleared without string matching. The
//! human-readable names on the primitives themselves remain for the host's
//! benefit only.

use std::collections::BTreeMap;

use rbe_types::BlockId;

use crate::renderer::{RenderHandle, Renderer};

/// Which of the two coincident vectors at an interface point a primitive
/// represents. Both may exist for the same point; their renderer-facing
/// names coincide, their keys do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ForceKind {
    Compression,
    Tension,
}

/// Semantic identity of one drawn primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrimKey {
    AssemblyVertex {
        block: BlockId,
    },
    AssemblyEdge {
        u: BlockId,
        v: BlockId,
    },
    BlockVertex {
        block: BlockId,
        vertex: usize,
    },
    BlockEdge {
        block: BlockId,
        edge: usize,
    },
    BlockFace {
        block: BlockId,
        face: usize,
    },
    Interface {
        u: BlockId,
        v: BlockId,
    },
    Force {
        u: BlockId,
        v: BlockId,
        point: usize,
        kind: ForceKind,
    },
    Selfweight {
        block: BlockId,
    },
}

/// Clearing granularity of the view pipeline. Each stage owns exactly one
/// category (block vertices, edges and faces clear together).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimCategory {
    AssemblyVertices,
    AssemblyEdges,
    Blocks,
    Interfaces,
    Forces,
    Selfweight,
}

impl PrimKey {
    pub fn category(&self) -> PrimCategory {
        match self {
            PrimKey::AssemblyVertex { .. } => PrimCategory::AssemblyVertices,
            PrimKey::AssemblyEdge { .. } => PrimCategory::AssemblyEdges,
            PrimKey::BlockVertex { .. } | PrimKey::BlockEdge { .. } | PrimKey::BlockFace { .. } => {
                PrimCategory::Blocks
            }
            PrimKey::Interface { .. } => PrimCategory::Interfaces,
            PrimKey::Force { .. } => PrimCategory::Forces,
            PrimKey::Selfweight { .. } => PrimCategory::Selfweight,
        }
    }
}

#[derive(Debug, Default)]
pub struct PrimitiveRegistry {
    entries: BTreeMap<PrimKey, RenderHandle>,
}

impl PrimitiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a primitive, returning the previously registered handle
    /// for the key, if any.
    pub fn insert(&mut self, key: PrimKey, handle: RenderHandle) -> Option<RenderHandle> {
        self.entries.insert(key, handle)
    }

    pub fn get(&self, key: PrimKey) -> Option<RenderHandle> {
        self.entries.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_in(&self, category: PrimCategory) -> usize {
        self.entries
            .keys()
            .filter(|k| k.category() == category)
            .count()
    }

    /// Remove every primitive of one category from both the registry and
    /// the renderer. Returns the number cleared.
    pub fn clear_category<R: Renderer>(
        &mut self,
        category: PrimCategory,
        renderer: &mut R,
    ) -> usize {
        let doomed: Vec<PrimKey> = self
            .entries
            .keys()
            .filter(|k| k.category() == category)
            .copied()
            .collect();
        for key in &doomed {
            if let Some(handle) = self.entries.remove(key) {
                renderer.remove(handle);
            }
        }
        doomed.len()
    }
}
