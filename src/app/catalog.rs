use crate::app::view::ViewState;
use crate::core::Frontend;
use crate::domain::model::{Category, Product};
use crate::domain::ports::{Backend, StateStore};
use crate::utils::error::{PriceWiseError, Result};

pub const TRENDING_TERMS: [&str; 7] = [
    "iPhone 15 Pro",
    "Sony WH-1000XM5",
    "MacBook Air M3",
    "Samsung S24 Ultra",
    "Nike Air Jordan",
    "PS5 Slim",
    "Dyson Airwrap",
];

pub const CATEGORIES: [Category; 8] = [
    Category {
        id: "phones",
        name: "Phones",
        item_count: "1.2k+ Items",
        ai_recommended: true,
        price_drop: true,
    },
    Category {
        id: "laptops",
        name: "Laptops",
        item_count: "850+ Items",
        ai_recommended: false,
        price_drop: false,
    },
    Category {
        id: "shoes",
        name: "Shoes",
        item_count: "3.4k+ Items",
        ai_recommended: false,
        price_drop: false,
    },
    Category {
        id: "men-clothing",
        name: "Men's Clothing",
        item_count: "5k+ Items",
        ai_recommended: false,
        price_drop: false,
    },
    Category {
        id: "women-clothing",
        name: "Women's Clothing",
        item_count: "6.2k+ Items",
        ai_recommended: false,
        price_drop: false,
    },
    Category {
        id: "electronics",
        name: "Electronics",
        item_count: "2.1k+ Items",
        ai_recommended: false,
        price_drop: false,
    },
    Category {
        id: "accessories",
        name: "Accessories",
        item_count: "4.5k+ Items",
        ai_recommended: false,
        price_drop: false,
    },
    Category {
        id: "audio",
        name: "Audio",
        item_count: "900+ Items",
        ai_recommended: false,
        price_drop: false,
    },
];

pub fn categories() -> &'static [Category] {
    &CATEGORIES
}

pub fn trending_terms() -> &'static [&'static str] {
    &TRENDING_TERMS
}

pub fn find_category(id: &str) -> Result<&'static Category> {
    CATEGORIES
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(id.trim()))
        .ok_or_else(|| {
            let known: Vec<&str> = CATEGORIES.iter().map(|c| c.id).collect();
            PriceWiseError::validation(format!(
                "Unknown category '{}'. Available: {}",
                id,
                known.join(", ")
            ))
        })
}

impl<B: Backend, S: StateStore> Frontend<B, S> {
    /// Category page: searches the category's display name.
    pub async fn browse_category(&mut self, id: &str) -> Result<ViewState<Vec<Product>>> {
        let category = find_category(id)?;
        tracing::info!("📂 Browsing category {}", category.name);
        self.search(category.name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_category_is_case_insensitive() {
        assert_eq!(find_category("Audio").unwrap().name, "Audio");
        assert_eq!(find_category(" men-clothing ").unwrap().name, "Men's Clothing");
    }

    #[test]
    fn test_unknown_category_lists_known_ids() {
        let err = find_category("garden").unwrap_err();
        assert!(err.to_string().contains("phones"));
    }

    #[test]
    fn test_only_phones_carry_badges() {
        let badged: Vec<&str> = categories()
            .iter()
            .filter(|c| c.ai_recommended)
            .map(|c| c.id)
            .collect();
        assert_eq!(badged, vec!["phones"]);
    }
}
