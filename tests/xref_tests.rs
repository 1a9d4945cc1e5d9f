//! End-to-end cross-reference queries composing the loot catalog, the block
//! graph, and downgrade-path expansion.

use lootref::blocks::{BlockGraph, BlockRecord, PropertyRecord};
use lootref::loot::{LootCatalog, LootRecords};
use lootref::xref::cross_reference;

fn record(name: &str, props: &[(&str, &str, Option<&str>)]) -> BlockRecord {
    BlockRecord {
        name: name.to_string(),
        properties: props
            .iter()
            .map(|(name, value, param1)| PropertyRecord {
                name: name.to_string(),
                value: value.to_string(),
                param1: param1.map(str::to_string),
            })
            .collect(),
    }
}

fn loot(json: &str) -> LootCatalog {
    let records: LootRecords = serde_json::from_str(json).expect("fixture should parse");
    LootCatalog::from_records(records)
}

#[test]
fn excluded_class_keeps_the_extending_block_out_of_the_results() {
    // A extends B but excludes Class from inheritance, so only B is a loot
    // block; cntX holds the one matching item.
    let (graph, report) = BlockGraph::from_records([
        record("A", &[("Extends", "B", Some("Class"))]),
        record(
            "B",
            &[("Class", "Loot", None), ("LootList", "cntX", None)],
        ),
    ]);
    assert!(report.is_clean());
    let catalog = loot(
        r#"{
            "groups": [],
            "containers": [{"name": "cntX", "items": [{"name": "gunPistol"}]}]
        }"#,
    );

    let matches_gun = |name: &str| name.contains("gun");
    let result = cross_reference(&graph, &catalog, Some(&matches_gun)).unwrap();

    assert_eq!(result.items.iter().collect::<Vec<_>>(), vec!["gunPistol"]);
    assert_eq!(result.containers.len(), 1);
    assert_eq!(result.containers[0].name, "cntX");
    assert_eq!(result.containers[0].table.items, vec!["gunPistol"]);
    assert!(result.containers[0].table.groups.is_empty());
    assert_eq!(result.blocks, vec!["B"], "A must not inherit Class past the exclusion");
}

#[test]
fn missing_group_ref_keeps_the_container_when_items_match() {
    let (graph, _) = BlockGraph::from_records([record(
        "ammoCrate",
        &[("Class", "Loot", None), ("LootList", "cntY", None)],
    )]);
    let catalog = loot(
        r#"{
            "groups": [],
            "containers": [
                {"name": "cntY", "items": [{"name": "ammo9mm"}, {"group": "grpExtra"}]}
            ]
        }"#,
    );

    let result = cross_reference(&graph, &catalog, None).unwrap();
    assert_eq!(result.containers.len(), 1);
    assert_eq!(result.containers[0].name, "cntY");
    assert_eq!(result.containers[0].table.items, vec!["ammo9mm"]);
    assert!(result.containers[0].table.groups.is_empty());
    assert_eq!(result.blocks, vec!["ammoCrate"]);
}

#[test]
fn only_paths_with_a_damage_history_are_reported() {
    let (graph, _) = BlockGraph::from_records([
        record(
            "cupboardBroken",
            &[("Class", "Loot", None), ("LootList", "cntKitchen", None)],
        ),
        record("cupboard", &[("DowngradeBlock", "cupboardBroken", None)]),
        record(
            "shelf",
            &[("Class", "Loot", None), ("LootList", "cntKitchen", None)],
        ),
    ]);
    let catalog = loot(
        r#"{
            "groups": [],
            "containers": [{"name": "cntKitchen", "items": [{"name": "canChili"}]}]
        }"#,
    );

    let result = cross_reference(&graph, &catalog, None).unwrap();
    assert_eq!(result.blocks, vec!["cupboardBroken", "shelf"]);
    // shelf has no predecessors, so its singleton path is dropped
    assert_eq!(
        result.downgrade_paths,
        vec![vec!["cupboard".to_string(), "cupboardBroken".to_string()]]
    );
}

#[test]
fn flattened_item_names_are_deduplicated_across_containers_and_groups() {
    let (graph, _) = BlockGraph::from_records([]);
    let catalog = loot(
        r#"{
            "groups": [
                {"name": "grpShared", "items": [{"name": "bandage"}]}
            ],
            "containers": [
                {"name": "cntOne", "items": [{"name": "bandage"}, {"group": "grpShared"}]},
                {"name": "cntTwo", "items": [{"group": "grpShared"}]}
            ]
        }"#,
    );

    let result = cross_reference(&graph, &catalog, None).unwrap();
    assert_eq!(result.containers.len(), 2);
    assert_eq!(result.items.iter().collect::<Vec<_>>(), vec!["bandage"]);
    assert!(result.blocks.is_empty());
    assert!(result.downgrade_paths.is_empty());
}

#[test]
fn no_matching_items_yields_an_empty_result_set() {
    let (graph, _) = BlockGraph::from_records([record(
        "crate",
        &[("Class", "Loot", None), ("LootList", "cntZ", None)],
    )]);
    let catalog = loot(
        r#"{
            "groups": [],
            "containers": [{"name": "cntZ", "items": [{"name": "stone"}]}]
        }"#,
    );

    let matches_gun = |name: &str| name.contains("gun");
    let result = cross_reference(&graph, &catalog, Some(&matches_gun)).unwrap();
    assert!(result.items.is_empty());
    assert!(result.containers.is_empty());
    assert!(result.blocks.is_empty(), "no containers matched, so no blocks can reference them");
}
