//! Loot catalog: containers and reusable named groups, matched recursively
//! against an item-name predicate. Branches that match nothing are pruned,
//! and the prune cascades upward; an empty table is never materialized.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Predicate over item names. `None` matches every item.
pub type MatchPredicate<'a> = Option<&'a dyn Fn(&str) -> bool>;

/// One entry in a container or group: a concrete item or a reference to a
/// named group. Probability/weight attributes are carried through unchanged
/// and never interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LootEntry {
    Item {
        name: String,
        #[serde(default)]
        count: Option<String>,
        #[serde(default)]
        prob: Option<String>,
        #[serde(default)]
        loot_prob_template: Option<String>,
        #[serde(default)]
        force_prob: Option<String>,
    },
    GroupRef {
        group: String,
        #[serde(default)]
        count: Option<String>,
        #[serde(default)]
        prob: Option<String>,
        #[serde(default)]
        loot_prob_template: Option<String>,
        #[serde(default)]
        force_prob: Option<String>,
    },
}

/// Raw group record. Only groups carrying at least one item entry are
/// indexed; the rest can never be referenced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootGroupRecord {
    pub name: String,
    #[serde(default)]
    pub items: Option<Vec<LootEntry>>,
    #[serde(default)]
    pub count: Option<String>,
    #[serde(default)]
    pub loot_quality_template: Option<String>,
}

/// Raw container record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootContainerRecord {
    pub name: String,
    #[serde(default)]
    pub items: Option<Vec<LootEntry>>,
    #[serde(default)]
    pub count: Option<String>,
    #[serde(default)]
    pub loot_quality_template: Option<String>,
}

/// Full record set from one loot definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootRecords {
    #[serde(default)]
    pub groups: Vec<LootGroupRecord>,
    #[serde(default)]
    pub containers: Vec<LootContainerRecord>,
}

/// Matched items and sub-groups. Never materialized empty: a table with no
/// items and no groups is pruned by its caller instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LootTable {
    pub items: Vec<String>,
    pub groups: Vec<LootGroup>,
}

impl LootTable {
    /// Collect every matched item name, including those in nested groups.
    pub fn collect_item_names(&self, out: &mut BTreeSet<String>) {
        out.extend(self.items.iter().cloned());
        for group in &self.groups {
            group.table.collect_item_names(out);
        }
    }
}

/// A matched group, wrapped with its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LootGroup {
    pub name: String,
    #[serde(flatten)]
    pub table: LootTable,
}

/// A matched container, wrapped with its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LootContainer {
    pub name: String,
    #[serde(flatten)]
    pub table: LootTable,
}

/// Loot catalog built once from ingested records. Matches are rebuilt fresh
/// on every query; only the group index and raw containers persist.
#[derive(Debug)]
pub struct LootCatalog {
    groups: HashMap<String, Vec<LootEntry>>,
    containers: Vec<LootContainerRecord>,
}

impl LootCatalog {
    pub fn from_records(records: LootRecords) -> Self {
        let groups = records
            .groups
            .into_iter()
            .filter_map(|group| match group.items {
                Some(items) if !items.is_empty() => Some((group.name, items)),
                _ => None,
            })
            .collect();
        LootCatalog {
            groups,
            containers: records.containers,
        }
    }

    /// Containers with at least one matched item or non-empty matched group;
    /// everything else is omitted entirely.
    pub fn find_containers(&self, predicate: MatchPredicate<'_>) -> Vec<LootContainer> {
        self.containers
            .iter()
            .filter_map(|container| {
                let entries = container.items.as_deref().unwrap_or(&[]);
                match_table(entries, predicate, &self.groups).map(|table| LootContainer {
                    name: container.name.clone(),
                    table,
                })
            })
            .collect()
    }

    /// Number of referenceable (indexed) groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Recursively match entries against the predicate. Group references are
/// looked up in `groups`; unknown names are skipped silently. Returns None
/// when nothing under these entries matched, cascading the prune upward.
fn match_table(
    entries: &[LootEntry],
    predicate: MatchPredicate<'_>,
    groups: &HashMap<String, Vec<LootEntry>>,
) -> Option<LootTable> {
    let mut items = Vec::new();
    let mut matched_groups = Vec::new();
    for entry in entries {
        match entry {
            LootEntry::Item { name, .. } => {
                if predicate.map_or(true, |p| p(name)) {
                    items.push(name.clone());
                }
            }
            LootEntry::GroupRef { group, .. } => {
                if let Some(group_entries) = groups.get(group) {
                    if let Some(table) = match_table(group_entries, predicate, groups) {
                        matched_groups.push(LootGroup {
                            name: group.clone(),
                            table,
                        });
                    }
                }
            }
        }
    }
    if items.is_empty() && matched_groups.is_empty() {
        None
    } else {
        Some(LootTable {
            items,
            groups: matched_groups,
        })
    }
}
