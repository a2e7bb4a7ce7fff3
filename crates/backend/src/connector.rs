//! Lazily-opened, shared connection to the ledger backend.
//!
//! The connection state lives in a `watch` channel. Claiming a connection
//! attempt is a single atomic transition (`Disconnected | Failed` →
//! `Connecting`), so at most one attempt is ever in flight. Every other
//! caller subscribes to the channel and is woken when that attempt settles,
//! sharing its outcome.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, error, info};

use ledgerline_shared::{ActualConfig, AppError, AppResult};

use crate::client::{BackendError, InitOptions, LedgerBackend};

/// Connection lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Never connected, or disconnected since.
    Disconnected,
    /// An attempt is in flight.
    Connecting,
    /// The budget is open.
    Connected,
    /// The most recent attempt failed with this cause.
    Failed(String),
}

/// Snapshot of the connection state for health reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    /// The budget is open.
    pub connected: bool,
    /// An attempt is in flight.
    pub connecting: bool,
    /// Cause of the most recent failed attempt, if it was the last outcome.
    pub last_error: Option<String>,
}

/// Resets the state if an attempt is dropped before it settles.
struct AttemptGuard<'a> {
    state: &'a watch::Sender<ConnectionState>,
    settled: bool,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.state.send_replace(ConnectionState::Disconnected);
        }
    }
}

/// Owns the connection to the ledger backend.
pub struct BackendConnector {
    backend: Arc<dyn LedgerBackend>,
    init: InitOptions,
    budget_id: String,
    state: watch::Sender<ConnectionState>,
}

impl BackendConnector {
    /// Creates a disconnected connector.
    #[must_use]
    pub fn new(backend: Arc<dyn LedgerBackend>, config: &ActualConfig) -> Self {
        Self {
            backend,
            init: InitOptions::from(config),
            budget_id: config.budget_id.clone(),
            state: watch::Sender::new(ConnectionState::Disconnected),
        }
    }

    /// The backend this connector opens.
    #[must_use]
    pub fn backend(&self) -> &dyn LedgerBackend {
        self.backend.as_ref()
    }

    /// Returns true if the budget is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        *self.state.borrow() == ConnectionState::Connected
    }

    /// Current connection status.
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        let state = self.state.borrow();
        ConnectionStatus {
            connected: *state == ConnectionState::Connected,
            connecting: *state == ConnectionState::Connecting,
            last_error: match &*state {
                ConnectionState::Failed(cause) => Some(cause.clone()),
                _ => None,
            },
        }
    }

    /// Opens the budget, or joins the attempt already in flight.
    ///
    /// Returns immediately when already connected. A failed attempt is not
    /// retried; the next call starts a fresh one.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BackendConnection` carrying the backend's cause.
    pub async fn connect(&self) -> AppResult<()> {
        let mut claimed = false;
        self.state.send_if_modified(|state| match state {
            ConnectionState::Disconnected | ConnectionState::Failed(_) => {
                *state = ConnectionState::Connecting;
                claimed = true;
                true
            }
            ConnectionState::Connecting | ConnectionState::Connected => false,
        });

        if !claimed {
            return self.await_attempt().await;
        }

        let mut guard = AttemptGuard {
            state: &self.state,
            settled: false,
        };
        let outcome = self.open().await;
        guard.settled = true;

        match outcome {
            Ok(()) => {
                self.state.send_replace(ConnectionState::Connected);
                info!(budget_id = %self.budget_id, "Connected to ledger backend");
                Ok(())
            }
            Err(e) => {
                let cause = e.to_string();
                error!(error = %cause, "Failed to connect to ledger backend");
                self.state.send_replace(ConnectionState::Failed(cause.clone()));
                Err(connection_failed(&cause))
            }
        }
    }

    /// Connects only if not connected yet.
    ///
    /// # Errors
    ///
    /// See [`BackendConnector::connect`].
    pub async fn ensure_connected(&self) -> AppResult<()> {
        if self.is_connected() {
            return Ok(());
        }
        self.connect().await
    }

    /// Closes the budget if it is open. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BackendConnection` if the backend fails to shut down;
    /// the connector then stays connected.
    pub async fn disconnect(&self) -> AppResult<()> {
        let mut was_connected = false;
        self.state.send_if_modified(|state| {
            if *state == ConnectionState::Connected {
                *state = ConnectionState::Disconnected;
                was_connected = true;
                true
            } else {
                false
            }
        });

        if !was_connected {
            debug!("Disconnect requested while not connected");
            return Ok(());
        }

        if let Err(e) = self.backend.shutdown().await {
            // The budget may still be open.
            self.state.send_replace(ConnectionState::Connected);
            error!(error = %e, "Ledger backend shutdown failed");
            return Err(AppError::BackendConnection(format!(
                "Failed to shut down ledger backend: {e}"
            )));
        }
        info!("Ledger backend shut down");
        Ok(())
    }

    async fn open(&self) -> Result<(), BackendError> {
        self.backend.init(&self.init).await?;
        self.backend.download_budget(&self.budget_id).await
    }

    async fn await_attempt(&self) -> AppResult<()> {
        let mut receiver = self.state.subscribe();
        let settled = receiver
            .wait_for(|state| *state != ConnectionState::Connecting)
            .await
            .map_err(|_| AppError::BackendConnection("Connection state closed".into()))?;

        match &*settled {
            ConnectionState::Connected => Ok(()),
            ConnectionState::Failed(cause) => Err(connection_failed(cause)),
            ConnectionState::Disconnected | ConnectionState::Connecting => Err(
                AppError::BackendConnection("Connection attempt was interrupted".into()),
            ),
        }
    }
}

fn connection_failed(cause: &str) -> AppError {
    AppError::BackendConnection(format!("Actual Budget connection failed: {cause}"))
}
