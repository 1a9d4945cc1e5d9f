//! Cross-reference orchestration: matched loot containers, their flattened
//! item names, the blocks referencing those containers, and each block's
//! damage-transition history.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::blocks::BlockGraph;
use crate::error::GraphError;
use crate::loot::{LootCatalog, LootContainer, MatchPredicate};

/// Result of one cross-reference query. Downgrade paths of length one (no
/// damage history) are dropped.
#[derive(Debug, Clone, Serialize)]
pub struct CrossReference {
    /// Every matched item name across all containers and nested groups,
    /// deduplicated.
    pub items: BTreeSet<String>,
    pub containers: Vec<LootContainer>,
    /// Names of blocks whose extended loot list references a matched
    /// container.
    pub blocks: Vec<String>,
    /// Damage-state paths ending at a matched block, origin first.
    pub downgrade_paths: Vec<Vec<String>>,
}

/// Run the full query: match containers against `predicate`, flatten the
/// matched item names, find the blocks referencing the matched containers,
/// and expand each block's downgrade paths. Predicate compilation (and any
/// fail-fast on an invalid pattern) is the caller's concern.
pub fn cross_reference(
    blocks: &BlockGraph,
    loot: &LootCatalog,
    predicate: MatchPredicate<'_>,
) -> Result<CrossReference, GraphError> {
    let containers = loot.find_containers(predicate);

    let mut items = BTreeSet::new();
    for container in &containers {
        container.table.collect_item_names(&mut items);
    }

    let container_names: HashSet<String> =
        containers.iter().map(|c| c.name.clone()).collect();
    let block_ids = blocks.find_by_loot_ids(&container_names)?;

    let mut downgrade_paths = Vec::new();
    for &id in &block_ids {
        for path in blocks.downgrade_paths(id)? {
            if path.len() > 1 {
                downgrade_paths.push(
                    path.into_iter()
                        .map(|step| blocks.block(step).name.clone())
                        .collect(),
                );
            }
        }
    }

    Ok(CrossReference {
        items,
        containers,
        blocks: block_ids
            .iter()
            .map(|&id| blocks.block(id).name.clone())
            .collect(),
        downgrade_paths,
    })
}
