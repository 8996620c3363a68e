use crate::app::view::ViewState;
use crate::core::{Frontend, Session};
use crate::domain::model::{HealthStatus, HistoryItem};
use crate::domain::ports::{Backend, StateStore};
use crate::utils::error::{PriceWiseError, Result};

pub const NO_ACTIVITY: &str = "No activity yet.";
pub const ACTIVITY_FAILED: &str = "Failed to load your activity.";

impl<B: Backend, S: StateStore> Frontend<B, S> {
    /// Stores the identity issued by the auth provider and mirrors it to the backend.
    /// A failed sync is logged; the local sign-in still stands.
    pub async fn login(&mut self, session: Session) -> Result<()> {
        if session.user_id.trim().is_empty() {
            return Err(PriceWiseError::validation("User id cannot be empty"));
        }
        if !session.email.contains('@') {
            return Err(PriceWiseError::validation(format!(
                "'{}' is not an email address",
                session.email
            )));
        }

        let sync = session.to_sync();
        self.state_mut().session = Some(session);
        self.persist().await?;

        match self.backend().sync_user(&sync).await {
            Ok(response) => tracing::info!("👤 {}", response.message),
            Err(e) => tracing::error!("Failed to sync user: {}", e),
        }
        Ok(())
    }

    /// Returns false when nobody was signed in.
    pub async fn logout(&mut self) -> Result<bool> {
        let was_signed_in = self.state_mut().session.take().is_some();
        if was_signed_in {
            self.persist().await?;
        }
        Ok(was_signed_in)
    }

    pub async fn activity(&self, limit: Option<u32>) -> Result<ViewState<Vec<HistoryItem>>> {
        let user_id = self
            .state()
            .user_id()
            .ok_or_else(|| PriceWiseError::auth_required("view your activity"))?;
        let limit = limit.unwrap_or(self.settings().history_limit).max(1);

        Ok(match self.backend().user_history(user_id, limit).await {
            Ok(items) => ViewState::from_list(items, NO_ACTIVITY),
            Err(e) => {
                tracing::error!("❌ Failed to fetch activity: {}", e);
                ViewState::failed(ACTIVITY_FAILED)
            }
        })
    }

    pub async fn health(&self) -> ViewState<HealthStatus> {
        match self.backend().health().await {
            Ok(status) => ViewState::Ready(status),
            Err(e) => {
                tracing::error!("❌ Health check failed: {}", e);
                ViewState::failed(e.user_friendly_message())
            }
        }
    }
}
