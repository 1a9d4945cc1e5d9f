//! Inherited property resolution: walk the Extends chain honoring each
//! block's exclusion list, with a visited guard against cyclic data.

use std::collections::HashSet;

use crate::blocks::graph::{BlockGraph, BlockId, PropertyValue};
use crate::error::GraphError;

impl BlockGraph {
    /// Resolve `name` on the block, falling back along the Extends chain.
    /// A block's own property wins; otherwise the walk follows the parent
    /// edge unless the current block's exclusion list names the property.
    /// Revisiting a block on the chain is an [GraphError::InheritanceCycle].
    pub fn property_extended(
        &self,
        id: BlockId,
        name: &str,
    ) -> Result<Option<&PropertyValue>, GraphError> {
        let mut visited: HashSet<BlockId> = HashSet::new();
        let mut chain: Vec<&str> = Vec::new();
        let mut current = id;
        loop {
            let block = self.block(current);
            if !visited.insert(current) {
                return Err(GraphError::InheritanceCycle {
                    block: block.name.clone(),
                    chain: format!("{} -> {}", chain.join(" -> "), block.name),
                });
            }
            chain.push(&block.name);
            if let Some(prop) = block.properties.get(name) {
                return Ok(Some(prop));
            }
            match block.parent {
                Some(parent) if !block.excluded_props.iter().any(|p| p == name) => {
                    current = parent;
                }
                _ => return Ok(None),
            }
        }
    }
}
