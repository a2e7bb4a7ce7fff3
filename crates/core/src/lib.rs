//! Core logic for Ledgerline.
//!
//! This crate contains pure translation and validation logic with ZERO web
//! or network dependencies. Everything that decides what crosses the wire
//! lives here.
//!
//! # Modules
//!
//! - `catalog` - Backend records, boolean normalization, category joins
//! - `query` - Builder for the backend's query language
//! - `transaction` - Transaction creation and listing rules

pub mod catalog;
pub mod query;
pub mod transaction;
