//! Block definitions: two-pass graph build (parse, then link), inherited
//! property resolution with exclusion lists, and downgrade-path enumeration.

mod downgrade;
mod graph;
mod resolver;

pub use downgrade::DowngradePath;
pub use graph::{
    Block, BlockGraph, BlockGraphBuilder, BlockId, BlockRecord, LinkReport, PropertyRecord,
    PropertyValue, UnresolvedParent, CLASS_PROP, CREATIVE_MODE_PROP, DOWNGRADE_PROP, EXTENDS_PROP,
    LOOT_CLASS_NAMES, LOOT_LIST_PROP,
};
