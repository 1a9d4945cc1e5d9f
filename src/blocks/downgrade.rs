//! Backward enumeration over downgrade edges: every path from an undamaged
//! origin block to a queried (more-damaged) block.

use crate::blocks::graph::{BlockGraph, BlockId};
use crate::error::GraphError;

/// One path through the damage-transition graph, ordered from the
/// least-damaged origin to the queried block.
pub type DowngradePath = Vec<BlockId>;

impl BlockGraph {
    /// All damage-transition paths ending at `id`. A block with no
    /// predecessors yields the single path `[id]`.
    pub fn downgrade_paths(&self, id: BlockId) -> Result<Vec<DowngradePath>, GraphError> {
        self.expand(vec![id])
    }

    /// Expand the frontier (`chain[0]`): a frontier with no predecessors
    /// completes the chain; otherwise each predecessor is prepended and
    /// expanded in turn, concatenating the results. A predecessor already on
    /// the chain is a cycle in the downgrade data and is rejected.
    pub fn expand(&self, chain: DowngradePath) -> Result<Vec<DowngradePath>, GraphError> {
        let Some(&frontier) = chain.first() else {
            return Ok(Vec::new());
        };
        let predecessors = self.block(frontier).downgraded_from();
        if predecessors.is_empty() {
            return Ok(vec![chain]);
        }
        let mut paths = Vec::new();
        for &pred in predecessors {
            if chain.contains(&pred) {
                return Err(GraphError::DowngradeCycle {
                    block: self.block(pred).name.clone(),
                    chain: self.chain_names(&chain),
                });
            }
            let mut next = Vec::with_capacity(chain.len() + 1);
            next.push(pred);
            next.extend_from_slice(&chain);
            paths.extend(self.expand(next)?);
        }
        Ok(paths)
    }

    fn chain_names(&self, chain: &[BlockId]) -> String {
        chain
            .iter()
            .map(|&id| self.block(id).name.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
