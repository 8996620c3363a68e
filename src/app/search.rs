use crate::app::view::ViewState;
use crate::core::Frontend;
use crate::domain::model::{HistoryKind, Product};
use crate::domain::ports::{Backend, StateStore};
use crate::utils::error::Result;
use crate::utils::validation::{validate_query, validate_result_index};

pub const NO_RESULTS: &str = "No products found. Try a different search term.";
pub const SEARCH_FAILED: &str = "Search failed. Please try again.";
pub const NO_TRENDING: &str = "No trending products right now.";
pub const TRENDING_FAILED: &str = "Failed to load trending products.";
pub const TRENDING_QUERY: &str = "trending";

impl<B: Backend, S: StateStore> Frontend<B, S> {
    /// Home page search. A blank query is rejected before any request is made.
    pub async fn search(&mut self, query: &str) -> Result<ViewState<Vec<Product>>> {
        let query = validate_query(query)?.to_string();

        self.state_mut().push_recent_search(&query);
        tracing::info!("🔍 Searching for '{}'", query);

        let view = match self.backend().search(&query).await {
            Ok(results) => {
                tracing::info!("Found {} products for '{}'", results.len(), query);
                self.record_history(HistoryKind::Search, &query, None, results.len())
                    .await;
                self.remember_results(&results);
                ViewState::from_list(results, NO_RESULTS)
            }
            Err(e) => {
                tracing::error!("❌ Search failed: {}", e);
                self.remember_results(&[]);
                ViewState::failed(SEARCH_FAILED)
            }
        };

        self.persist_quietly().await;
        Ok(view)
    }

    /// Products page: the backend's trending listing.
    pub async fn trending(&mut self) -> ViewState<Vec<Product>> {
        let view = match self.backend().search(TRENDING_QUERY).await {
            Ok(results) => {
                self.remember_results(&results);
                ViewState::from_list(results, NO_TRENDING)
            }
            Err(e) => {
                tracing::error!("❌ Failed to fetch products: {}", e);
                self.remember_results(&[]);
                ViewState::failed(TRENDING_FAILED)
            }
        };
        self.persist_quietly().await;
        view
    }

    pub fn recent_searches(&self) -> &[String] {
        &self.state().recent_searches
    }

    pub async fn clear_recent_searches(&mut self) -> Result<()> {
        self.state_mut().clear_recent_searches();
        self.persist().await
    }

    /// Product at a 1-based position in the last rendered list.
    pub fn pick_result(&self, index: usize) -> Result<Product> {
        let results = &self.state().last_results;
        let position = validate_result_index(index, results.len())?;
        Ok(results[position].clone())
    }

    /// Replaces the addressable listing; an empty or failed view leaves nothing to pick.
    pub(crate) fn remember_results(&mut self, results: &[Product]) {
        self.state_mut().last_results = results.to_vec();
    }
}
