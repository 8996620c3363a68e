use crate::app::view::ViewState;
use crate::core::Frontend;
use crate::domain::model::{PricePoint, Product, TrackedProduct};
use crate::domain::ports::{Backend, StateStore};
use crate::utils::error::{PriceWiseError, Result};

pub const NO_TRACKED: &str = "No products tracked yet";
pub const TRACKED_FAILED: &str = "Failed to load your tracked products.";
pub const TRACK_FAILED: &str = "Failed to track product. Please try again.";
pub const NO_HISTORY: &str = "No price history available yet.";
pub const HISTORY_FAILED: &str = "Failed to load price history.";

/// State of a product card's "Track Price" button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackState {
    Idle,
    Tracking { tracker_id: Option<String> },
    AlreadyTracking { tracker_id: Option<String> },
}

impl TrackState {
    pub fn is_tracking(&self) -> bool {
        !matches!(self, TrackState::Idle)
    }
}

/// Tracked products as shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub products: Vec<TrackedProduct>,
}

impl Dashboard {
    pub fn active_trackers(&self) -> usize {
        self.products.len()
    }

    /// Local removal only; the backend has no endpoint to stop tracking.
    pub fn untrack(&mut self, id: &str) -> Option<TrackedProduct> {
        let position = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(position))
    }

    pub fn find(&self, id: &str) -> Option<&TrackedProduct> {
        self.products
            .iter()
            .find(|p| p.id == id || p.product.product_id.as_deref() == Some(id))
    }
}

/// The backend wraps its own 404 in a 500 with detail "404: Product not found".
fn is_not_tracked(err: &PriceWiseError) -> bool {
    match err {
        PriceWiseError::ApiStatusError { status: 404, .. } => true,
        PriceWiseError::ApiStatusError {
            status: 500,
            detail: Some(detail),
            ..
        } => detail.trim_start().starts_with("404"),
        _ => false,
    }
}

impl<B: Backend, S: StateStore> Frontend<B, S> {
    pub async fn track(&self, product: &Product) -> Result<ViewState<TrackState>> {
        if product.product_id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            return Err(PriceWiseError::validation(format!(
                "'{}' has no product id and cannot be tracked",
                product.title
            )));
        }

        match self.backend().track(product).await {
            Ok(response) if response.already_tracking() => {
                tracing::info!("Already tracking '{}'", product.title);
                Ok(ViewState::Ready(TrackState::AlreadyTracking {
                    tracker_id: response.id,
                }))
            }
            Ok(response) => {
                tracing::info!("🔔 Tracking enabled for '{}'", product.title);
                Ok(ViewState::Ready(TrackState::Tracking {
                    tracker_id: response.id,
                }))
            }
            Err(e) => {
                tracing::error!("❌ Failed to track product: {}", e);
                Ok(ViewState::failed(TRACK_FAILED))
            }
        }
    }

    pub async fn track_result(&self, index: usize) -> Result<(Product, ViewState<TrackState>)> {
        let product = self.pick_result(index)?;
        let view = self.track(&product).await?;
        Ok((product, view))
    }

    pub async fn dashboard(&self) -> ViewState<Dashboard> {
        match self.backend().tracked().await {
            Ok(products) if products.is_empty() => ViewState::empty(NO_TRACKED),
            Ok(products) => {
                tracing::debug!("Loaded {} tracked products", products.len());
                ViewState::Ready(Dashboard { products })
            }
            Err(e) => {
                tracing::error!("❌ Failed to fetch tracked products: {}", e);
                ViewState::failed(TRACKED_FAILED)
            }
        }
    }

    pub async fn price_history(&self, product_id: &str) -> Result<ViewState<Vec<PricePoint>>> {
        let product_id = product_id.trim();
        if product_id.is_empty() {
            return Err(PriceWiseError::validation("Product id cannot be empty"));
        }

        Ok(match self.backend().price_history(product_id).await {
            Ok(history) => ViewState::from_list(history, NO_HISTORY),
            Err(e) if is_not_tracked(&e) => {
                tracing::info!("No tracker for {}", product_id);
                ViewState::empty(format!("'{}' is not being tracked.", product_id))
            }
            Err(e) => {
                tracing::error!("❌ Failed to fetch price history: {}", e);
                ViewState::failed(HISTORY_FAILED)
            }
        })
    }
}
