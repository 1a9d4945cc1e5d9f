//! Structural errors raised while traversing the resolved block graph.

use thiserror::Error;

/// Cycle detection during graph traversal. The source data does not guarantee
/// acyclic Extends/DowngradeBlock edges, so both walks carry a visited guard
/// instead of recursing unboundedly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The Extends chain revisited a block while resolving a property.
    #[error("inheritance cycle at block '{block}': {chain}")]
    InheritanceCycle { block: String, chain: String },

    /// A downgrade path revisited a block during backward expansion.
    #[error("downgrade cycle at block '{block}': {chain}")]
    DowngradeCycle { block: String, chain: String },
}
