use crate::core::state::{ClientState, STATE_FILE};
use crate::domain::model::{HistoryItem, HistoryKind};
use crate::domain::ports::{Backend, StateStore};
use crate::utils::error::{PriceWiseError, Result};

pub const DEFAULT_GUEST_CHAT_LIMIT: u32 = 5;
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontendSettings {
    pub guest_chat_limit: u32,
    pub history_limit: u32,
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            guest_chat_limit: DEFAULT_GUEST_CHAT_LIMIT,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Owns the backend handle and the persisted client state. Every view is a method on it.
pub struct Frontend<B: Backend, S: StateStore> {
    backend: B,
    store: S,
    settings: FrontendSettings,
    state: ClientState,
}

impl<B: Backend, S: StateStore> Frontend<B, S> {
    /// Loads `state.json`; a missing or unreadable file starts from a fresh state.
    pub async fn load(backend: B, store: S, settings: FrontendSettings) -> Result<Self> {
        let state = match store.read_file(STATE_FILE).await? {
            Some(bytes) => match serde_json::from_slice::<ClientState>(&bytes) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!("⚠️ Ignoring corrupt client state: {}", e);
                    ClientState::default()
                }
            },
            None => ClientState::default(),
        };

        tracing::debug!(
            "Client state loaded (signed in: {}, guest chats used: {})",
            state.is_signed_in(),
            state.guest_chat_usage
        );

        Ok(Self {
            backend,
            store,
            settings,
            state,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &FrontendSettings {
        &self.settings
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut ClientState {
        &mut self.state
    }

    pub async fn persist(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.state)?;
        self.store
            .write_file(STATE_FILE, &bytes)
            .await
            .map_err(|e| PriceWiseError::StateError {
                message: format!("failed to save {}: {}", STATE_FILE, e),
            })
    }

    /// Views keep working when the state file cannot be written.
    pub(crate) async fn persist_quietly(&self) {
        if let Err(e) = self.persist().await {
            tracing::warn!("⚠️ {}", e);
        }
    }

    /// Best effort: activity history never fails the view that produced it.
    pub(crate) async fn record_history(
        &self,
        kind: HistoryKind,
        query: &str,
        response_summary: Option<String>,
        related_products: usize,
    ) {
        let Some(user_id) = self.state.user_id() else {
            return;
        };

        let item = HistoryItem {
            id: None,
            user_id: user_id.to_string(),
            kind,
            query: query.to_string(),
            response_summary,
            related_products: u32::try_from(related_products).unwrap_or(u32::MAX),
            timestamp: None,
        };

        if let Err(e) = self.backend.add_history(&item).await {
            tracing::warn!("Failed to record {:?} history: {}", kind, e);
        }
    }
}
