use crate::app::view::ViewState;
use crate::core::Frontend;
use crate::domain::model::Product;
use crate::domain::ports::{Backend, StateStore};
use crate::utils::error::{PriceWiseError, Result};

pub const NO_SAVED: &str = "No saved items yet";
pub const SAVED_FAILED: &str = "Failed to load your saved items.";
pub const SAVE_FAILED: &str = "Could not save this item. Please try again.";
pub const UNSAVE_FAILED: &str = "Could not remove this item. Please try again.";

/// Undo record for an optimistic change to the saved list.
#[derive(Debug, Clone, PartialEq)]
pub enum SavedChange {
    Added { product_id: String },
    Removed { position: usize, product: Product },
}

/// The user's saved products, updated optimistically before the backend confirms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedItems {
    pub products: Vec<Product>,
}

impl SavedItems {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.products
            .iter()
            .any(|p| p.product_id.as_deref() == Some(product_id))
    }

    /// Returns `None` when the product is already saved.
    pub fn add(&mut self, product: Product) -> Option<SavedChange> {
        let product_id = product.product_id.clone()?;
        if self.contains(&product_id) {
            return None;
        }
        self.products.insert(0, product);
        Some(SavedChange::Added { product_id })
    }

    pub fn remove(&mut self, product_id: &str) -> Option<SavedChange> {
        let position = self
            .products
            .iter()
            .position(|p| p.product_id.as_deref() == Some(product_id))?;
        let product = self.products.remove(position);
        Some(SavedChange::Removed { position, product })
    }

    pub fn revert(&mut self, change: SavedChange) {
        match change {
            SavedChange::Added { product_id } => {
                self.products
                    .retain(|p| p.product_id.as_deref() != Some(product_id.as_str()));
            }
            SavedChange::Removed { position, product } => {
                let position = position.min(self.products.len());
                self.products.insert(position, product);
            }
        }
    }
}

impl<B: Backend, S: StateStore> Frontend<B, S> {
    fn require_user(&self, action: &str) -> Result<String> {
        self.state()
            .user_id()
            .map(str::to_string)
            .ok_or_else(|| PriceWiseError::auth_required(action))
    }

    /// Saved items page. Guests are sent to sign in without a request.
    pub async fn saved(&self) -> Result<ViewState<SavedItems>> {
        let user_id = self.require_user("view saved items")?;

        Ok(match self.backend().bookmarks(&user_id).await {
            Ok(entries) if entries.is_empty() => ViewState::empty(NO_SAVED),
            Ok(entries) => {
                // 後端回傳 { product: {...} }，只取商品本身
                let products = entries.into_iter().map(|entry| entry.product).collect();
                ViewState::Ready(SavedItems::new(products))
            }
            Err(e) => {
                tracing::error!("❌ Failed to fetch bookmarks: {}", e);
                ViewState::failed(SAVED_FAILED)
            }
        })
    }

    /// Adds `product` to `saved` immediately and rolls back if the backend refuses.
    pub async fn save_product(
        &self,
        saved: &mut SavedItems,
        product: Product,
    ) -> Result<ViewState<()>> {
        let user_id = self.require_user("save items")?;
        if product.product_id.is_none() {
            return Err(PriceWiseError::validation(format!(
                "'{}' has no product id and cannot be saved",
                product.title
            )));
        }

        let title = product.title.clone();
        let Some(change) = saved.add(product.clone()) else {
            tracing::info!("'{}' is already saved", title);
            return Ok(ViewState::Ready(()));
        };

        match self.backend().add_bookmark(&user_id, &product).await {
            Ok(_) => {
                tracing::info!("❤️ Saved '{}'", title);
                Ok(ViewState::Ready(()))
            }
            Err(e) => {
                tracing::error!("❌ Failed to save '{}': {}", title, e);
                saved.revert(change);
                Ok(ViewState::failed(SAVE_FAILED))
            }
        }
    }

    pub async fn save_result(&self, saved: &mut SavedItems, index: usize) -> Result<ViewState<()>> {
        let product = self.pick_result(index)?;
        self.save_product(saved, product).await
    }

    /// Removes the bookmark optimistically; the removed entry is restored in place on failure.
    pub async fn unsave_product(
        &self,
        saved: &mut SavedItems,
        product_id: &str,
    ) -> Result<ViewState<()>> {
        let user_id = self.require_user("remove saved items")?;
        let change = saved.remove(product_id);

        match self.backend().remove_bookmark(&user_id, product_id).await {
            Ok(_) => {
                tracing::info!("Removed bookmark {}", product_id);
                Ok(ViewState::Ready(()))
            }
            Err(e) => {
                tracing::error!("❌ Failed to remove bookmark {}: {}", product_id, e);
                if let Some(change) = change {
                    saved.revert(change);
                }
                Ok(ViewState::failed(UNSAVE_FAILED))
            }
        }
    }
}
