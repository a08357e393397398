//! The assembly graph: blocks as nodes, interfaces as directed edges.
//!
//! Both node ids and edge order are deterministic: ids are allocated
//! sequentially and edges keep insertion order. Edge direction is
//! semantic — the interface normal `w` points from `u` toward `v`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use rbe_types::BlockId;

use crate::block::Block;
use crate::errors::AssemblyError;
use crate::interface::{ContactForce, Interface};

/// A block together with its node attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    pub block: Block,
    /// Support blocks are fixed to the ground; they render in the support
    /// color and receive no selfweight treatment different from others.
    #[serde(default)]
    pub is_support: bool,
}

/// A directed interface edge between two blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceEdge {
    pub u: BlockId,
    pub v: BlockId,
    #[serde(flatten)]
    pub interface: Interface,
}

/// A discrete block assembly: a graph of blocks connected by interfaces.
#[derive(Debug, Clone)]
pub struct Assembly {
    name: String,
    next_id: u64,
    nodes: BTreeMap<BlockId, BlockNode>,
    edges: Vec<InterfaceEdge>,
}

impl Assembly {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            next_id: 0,
            nodes: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    /// Assembly name, used only for external naming and lookup.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a block and allocate its id.
    pub fn add_block(&mut self, block: Block) -> Result<BlockId, AssemblyError> {
        self.insert_node(block, false)
    }

    /// Add a block flagged as a support.
    pub fn add_support(&mut self, block: Block) -> Result<BlockId, AssemblyError> {
        self.insert_node(block, true)
    }

    fn insert_node(&mut self, block: Block, is_support: bool) -> Result<BlockId, AssemblyError> {
        block.validate()?;
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, BlockNode { block, is_support });
        Ok(id)
    }

    pub fn set_support(&mut self, id: BlockId, is_support: bool) -> Result<(), AssemblyError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(AssemblyError::UnknownBlock { id })?;
        node.is_support = is_support;
        Ok(())
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.nodes.get(&id).map(|n| &n.block)
    }

    pub fn node(&self, id: BlockId) -> Option<&BlockNode> {
        self.nodes.get(&id)
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = (BlockId, &BlockNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn block_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add a directed interface edge `u -> v`.
    pub fn add_interface(
        &mut self,
        u: BlockId,
        v: BlockId,
        interface: Interface,
    ) -> Result<(), AssemblyError> {
        self.check_edge(u, v)?;
        self.edges.push(InterfaceEdge { u, v, interface });
        Ok(())
    }

    fn check_edge(&self, u: BlockId, v: BlockId) -> Result<(), AssemblyError> {
        if u == v {
            return Err(AssemblyError::SelfInterface { id: u });
        }
        for (id, present) in [(u, self.contains(u)), (v, self.contains(v))] {
            if !present {
                return Err(AssemblyError::UnknownBlock { id });
            }
        }
        if self.edges.iter().any(|e| e.u == u && e.v == v) {
            return Err(AssemblyError::DuplicateInterface { u, v });
        }
        Ok(())
    }

    /// Interface edges in insertion order.
    pub fn interfaces(&self) -> &[InterfaceEdge] {
        &self.edges
    }

    pub fn interface_count(&self) -> usize {
        self.edges.len()
    }

    pub fn interface(&self, u: BlockId, v: BlockId) -> Option<&Interface> {
        self.edges
            .iter()
            .find(|e| e.u == u && e.v == v)
            .map(|e| &e.interface)
    }

    pub fn interface_mut(&mut self, u: BlockId, v: BlockId) -> Option<&mut Interface> {
        self.edges
            .iter_mut()
            .find(|e| e.u == u && e.v == v)
            .map(|e| &mut e.interface)
    }

    /// Replace the interface edge set assembly-wide, validating every edge
    /// first so the previous set survives any failure.
    ///
    /// This is the commit half of an interface-identification round trip:
    /// the solver owns interface geometry, so its result supersedes all
    /// prior edges.
    pub fn replace_interfaces(
        &mut self,
        edges: Vec<InterfaceEdge>,
    ) -> Result<(), AssemblyError> {
        let mut seen = std::collections::BTreeSet::new();
        for e in &edges {
            if e.u == e.v {
                return Err(AssemblyError::SelfInterface { id: e.u });
            }
            for id in [e.u, e.v] {
                if !self.contains(id) {
                    return Err(AssemblyError::UnknownBlock { id });
                }
            }
            if !seen.insert((e.u, e.v)) {
                return Err(AssemblyError::DuplicateInterface { u: e.u, v: e.v });
            }
            if let Some(forces) = &e.interface.forces {
                if forces.len() != e.interface.points.len() {
                    return Err(AssemblyError::ForceCountMismatch {
                        count: forces.len(),
                        points: e.interface.points.len(),
                    });
                }
            }
        }
        debug!(
            assembly = %self.name,
            previous = self.edges.len(),
            replacement = edges.len(),
            "replacing interface edge set"
        );
        self.edges = edges;
        Ok(())
    }

    /// Write force results onto the matching `u -> v` edge.
    pub fn set_interface_forces(
        &mut self,
        u: BlockId,
        v: BlockId,
        forces: Vec<ContactForce>,
    ) -> Result<(), AssemblyError> {
        let iface = self
            .interface_mut(u, v)
            .ok_or(AssemblyError::UnknownBlock { id: u })?;
        iface.set_forces(forces)
    }
}
