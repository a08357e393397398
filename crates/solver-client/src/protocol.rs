//! The request/response body shared by both solver calls.
//!
//! The wire shape is `{ "assembly": <graph>, "blocks": { "<id>": <block> } }`
//! with the blocks map keyed by the decimal string form of the block id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rbe_assembly::{Assembly, Block, InterfaceEdge};
use rbe_types::BlockId;

/// Serde helper for `BTreeMap<BlockId, Block>` — JSON string keys ↔ BlockId.
mod block_key_map {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use rbe_assembly::Block;
    use rbe_types::BlockId;

    pub fn serialize<S>(map: &BTreeMap<BlockId, Block>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let string_map: BTreeMap<String, &Block> =
            map.iter().map(|(k, v)| (k.to_string(), v)).collect();
        string_map.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<BlockId, Block>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string_map: BTreeMap<String, Block> = BTreeMap::deserialize(deserializer)?;
        string_map
            .into_iter()
            .map(|(k, v)| {
                k.parse::<BlockId>()
                    .map(|key| (key, v))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

/// One graph node on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    pub id: BlockId,
    #[serde(default)]
    pub is_support: bool,
}

/// The assembly graph as the solver sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyPayload {
    pub name: String,
    pub vertices: Vec<VertexRecord>,
    pub edges: Vec<InterfaceEdge>,
}

/// Request/response envelope for both solver calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverEnvelope {
    pub assembly: AssemblyPayload,
    #[serde(with = "block_key_map")]
    pub blocks: BTreeMap<BlockId, Block>,
}

impl SolverEnvelope {
    /// Snapshot an assembly into the wire shape.
    pub fn from_assembly(assembly: &Assembly) -> Self {
        let vertices = assembly
            .nodes()
            .map(|(id, node)| VertexRecord {
                id,
                is_support: node.is_support,
            })
            .collect();
        let blocks = assembly
            .nodes()
            .map(|(id, node)| (id, node.block.clone()))
            .collect();
        Self {
            assembly: AssemblyPayload {
                name: assembly.name().to_string(),
                vertices,
                edges: assembly.interfaces().to_vec(),
            },
            blocks,
        }
    }
}

/// Options forwarded verbatim to the force-equilibrium call.
///
/// `max_iters` bounds the solver's internal iteration count; `verbose`
/// controls solver-side logging only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputeOptions {
    pub verbose: bool,
    pub max_iters: u32,
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            max_iters: 100,
        }
    }
}
