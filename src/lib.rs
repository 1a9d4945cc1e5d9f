//! Cross-reference core for block and loot definition catalogs.
//!
//! Consumes flat attribute-bag records (produced by an external definition-file
//! ingester) and builds two read-only structures: a [blocks::BlockGraph] with
//! resolved inheritance and downgrade edges, and a [loot::LootCatalog] of
//! containers and reusable named groups. On top of those it answers
//! cross-reference queries: which containers hold items matching a predicate,
//! which block definitions reference those containers, and what sequences of
//! damage-state transitions lead to each of them (see [xref::cross_reference]).

pub mod blocks;
pub mod error;
pub mod loot;
pub mod xref;

pub use error::GraphError;
