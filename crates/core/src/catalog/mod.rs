//! Catalog records (accounts, categories, groups, notes) and their joins.
//!
//! This module implements:
//! - Typed records for everything the backend reports
//! - Boolean-as-integer normalization shared by every record type
//! - Category listing filters and the queries they produce
//! - Note and group joins for enriched categories

pub mod filter;
pub mod join;
pub mod normalize;
pub mod types;

pub use filter::{CategoryFilter, category_groups_query, notes_query};
pub use join::{join_notes, join_notes_and_groups};
pub use types::{
    Account, AccountType, Category, CategoryGroup, EnrichedCategory, Note, Subtransaction,
    Transaction,
};
