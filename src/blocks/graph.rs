//! Block graph: a name-keyed arena of block definitions built in two passes.
//! The parse pass creates every block from its record; the link pass resolves
//! Extends parents (with per-block exclusion lists) and DowngradeBlock
//! back-references. The graph is read-only once linked.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GraphError;

/// Property carrying the parent-block name (value) and the comma-separated
/// exclusion list (param1).
pub const EXTENDS_PROP: &str = "Extends";
/// Property naming the block this one degrades into when damaged.
pub const DOWNGRADE_PROP: &str = "DowngradeBlock";
/// Property gating creative-menu visibility. Only the literal value "None"
/// excludes a block from queries; absence and every other value pass.
pub const CREATIVE_MODE_PROP: &str = "CreativeMode";
pub const CLASS_PROP: &str = "Class";
pub const LOOT_LIST_PROP: &str = "LootList";

/// Block classes that carry a loot list. Closed set.
pub const LOOT_CLASS_NAMES: [&str; 3] = ["Loot", "CarExplodeLoot", "SecureLoot"];

/// Flat block record as produced by the definition-file ingester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRecord {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<PropertyRecord>,
}

/// One named property on a block record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub param1: Option<String>,
}

/// Resolved property value. `param1` carries the auxiliary parameter
/// (e.g. the exclusion list on an Extends declaration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub value: String,
    #[serde(default)]
    pub param1: Option<String>,
}

/// Arena key for a block. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub(crate) usize);

/// One block definition in the resolved graph. Parent and downgrade
/// back-references are arena keys resolved through the graph, never owning
/// links.
#[derive(Debug, Clone)]
pub struct Block {
    pub name: String,
    pub properties: HashMap<String, PropertyValue>,
    /// Resolved Extends parent. None for root blocks and for blocks whose
    /// declared parent did not resolve.
    pub(crate) parent: Option<BlockId>,
    /// Property names excluded from inherited lookup (Extends param1,
    /// comma-split and trimmed). Inert without a parent.
    pub(crate) excluded_props: Vec<String>,
    /// Blocks declaring this block as their downgrade target. Populated by
    /// the link pass only.
    pub(crate) downgraded_from: Vec<BlockId>,
}

impl Block {
    pub fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    pub fn excluded_props(&self) -> &[String] {
        &self.excluded_props
    }

    pub fn downgraded_from(&self) -> &[BlockId] {
        &self.downgraded_from
    }

    /// The block's own (non-inherited) property, if present.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

/// A block whose declared Extends parent is not in the loaded set. The block
/// is kept and treated as rootless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedParent {
    pub block: String,
    pub parent: String,
}

/// Non-fatal findings from the link pass.
#[derive(Debug, Clone, Default)]
pub struct LinkReport {
    pub unresolved_parents: Vec<UnresolvedParent>,
}

impl LinkReport {
    pub fn is_clean(&self) -> bool {
        self.unresolved_parents.is_empty()
    }
}

/// Parse-pass accumulator. `insert` every record, then `link` once to obtain
/// the read-only [BlockGraph].
#[derive(Debug, Default)]
pub struct BlockGraphBuilder {
    blocks: Vec<Block>,
    by_name: HashMap<String, usize>,
}

impl BlockGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one block record. A record reusing an existing name replaces the
    /// earlier block's properties (last write wins, not an error).
    pub fn insert(&mut self, record: BlockRecord) {
        let properties = record
            .properties
            .into_iter()
            .map(|p| {
                (
                    p.name,
                    PropertyValue {
                        value: p.value,
                        param1: p.param1,
                    },
                )
            })
            .collect();
        match self.by_name.get(&record.name) {
            Some(&idx) => self.blocks[idx].properties = properties,
            None => {
                let idx = self.blocks.len();
                self.blocks.push(Block {
                    name: record.name.clone(),
                    properties,
                    parent: None,
                    excluded_props: Vec::new(),
                    downgraded_from: Vec::new(),
                });
                self.by_name.insert(record.name, idx);
            }
        }
    }

    /// Link pass: resolve Extends parents (recording exclusion lists) and
    /// DowngradeBlock back-references. Consumes the builder; the returned
    /// graph is read-only. Unresolved parents are reported and leave the
    /// block rootless; unresolved downgrade targets are ignored.
    pub fn link(mut self) -> (BlockGraph, LinkReport) {
        let mut report = LinkReport::default();
        for idx in 0..self.blocks.len() {
            if let Some(ext) = self.blocks[idx].properties.get(EXTENDS_PROP).cloned() {
                self.blocks[idx].excluded_props = ext
                    .param1
                    .as_deref()
                    .map(|p| p.split(',').map(|s| s.trim().to_string()).collect())
                    .unwrap_or_default();
                let parent_name = ext.value.trim();
                match self.by_name.get(parent_name) {
                    Some(&parent) => self.blocks[idx].parent = Some(BlockId(parent)),
                    None => {
                        warn!(
                            block = %self.blocks[idx].name,
                            parent = %parent_name,
                            "unknown parent block"
                        );
                        report.unresolved_parents.push(UnresolvedParent {
                            block: self.blocks[idx].name.clone(),
                            parent: parent_name.to_string(),
                        });
                    }
                }
            }
            let target = self.blocks[idx]
                .properties
                .get(DOWNGRADE_PROP)
                .map(|p| p.value.trim().to_string());
            if let Some(target) = target {
                if let Some(&t) = self.by_name.get(&target) {
                    self.blocks[t].downgraded_from.push(BlockId(idx));
                }
            }
        }
        (
            BlockGraph {
                blocks: self.blocks,
                by_name: self.by_name,
            },
            report,
        )
    }
}

/// Read-only block graph. Built once by [BlockGraphBuilder::link]; no
/// operation mutates it afterwards.
#[derive(Debug)]
pub struct BlockGraph {
    pub(crate) blocks: Vec<Block>,
    by_name: HashMap<String, usize>,
}

impl BlockGraph {
    /// Parse pass plus link pass over an already-ingested record set.
    pub fn from_records(records: impl IntoIterator<Item = BlockRecord>) -> (Self, LinkReport) {
        let mut builder = BlockGraphBuilder::new();
        for record in records {
            builder.insert(record);
        }
        builder.link()
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.0]
    }

    pub fn id_of(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).map(|&idx| BlockId(idx))
    }

    pub fn get(&self, name: &str) -> Option<&Block> {
        self.id_of(name).map(|id| self.block(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(idx, block)| (BlockId(idx), block))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks passing `predicate`, pre-filtered by creative-menu
    /// visibility: a block is skipped only when its extended CreativeMode
    /// value is literally "None". Errors if resolution hits an inheritance
    /// cycle.
    pub fn find<P>(&self, predicate: P) -> Result<Vec<BlockId>, GraphError>
    where
        P: Fn(&Block) -> bool,
    {
        let mut out = Vec::new();
        for (id, block) in self.iter() {
            if !self.creative_visible(id)? {
                continue;
            }
            if predicate(block) {
                out.push(id);
            }
        }
        Ok(out)
    }

    /// Blocks whose extended Class is one of [LOOT_CLASS_NAMES] and whose
    /// extended LootList names one of `container_names`, under the same
    /// creative-menu pre-filter as [BlockGraph::find].
    pub fn find_by_loot_ids(
        &self,
        container_names: &HashSet<String>,
    ) -> Result<Vec<BlockId>, GraphError> {
        let mut out = Vec::new();
        for (id, _) in self.iter() {
            if !self.creative_visible(id)? {
                continue;
            }
            let class = self
                .property_extended(id, CLASS_PROP)?
                .map(|p| p.value.as_str())
                .unwrap_or("");
            if !LOOT_CLASS_NAMES.contains(&class) {
                continue;
            }
            let Some(loot_id) = self.property_extended(id, LOOT_LIST_PROP)? else {
                continue;
            };
            if container_names.contains(&loot_id.value) {
                out.push(id);
            }
        }
        Ok(out)
    }

    fn creative_visible(&self, id: BlockId) -> Result<bool, GraphError> {
        Ok(match self.property_extended(id, CREATIVE_MODE_PROP)? {
            Some(prop) => prop.value != "None",
            None => true,
        })
    }
}
