//! Ledger backend access for Ledgerline.
//!
//! # Modules
//!
//! - `client` - The [`LedgerBackend`] seam and its error type
//! - `connector` - Single shared connection with one attempt in flight
//! - `gateway` - Resource operations: reads, query joins, transaction import
//! - `memory` - In-memory backend with fixtures and fault injection
//! - `remote` - HTTP client for the ledger bridge sidecar

pub mod client;
pub mod connector;
pub mod gateway;
pub mod memory;
pub mod remote;

pub use client::{BackendError, InitOptions, LedgerBackend};
pub use connector::{BackendConnector, ConnectionState, ConnectionStatus};
pub use gateway::LedgerGateway;
pub use memory::InMemoryLedger;
pub use remote::HttpLedgerBackend;
