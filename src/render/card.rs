use crate::domain::model::Product;
use crate::render::group_digits;

/// Text version of a product card. `index` is the 1-based position used by `track`/`save`.
pub fn render_product_card(index: Option<usize>, product: &Product) -> String {
    let prefix = match index {
        Some(i) => format!("[{}] ", i),
        None => String::new(),
    };
    let indent = " ".repeat(prefix.chars().count());

    let mut details = vec![product.source.clone(), format!("Best Price {}", product.price)];
    if let Some(rating) = product.rating {
        match product.reviews {
            Some(reviews) => details.push(format!(
                "★ {} ({} reviews)",
                rating,
                group_digits(reviews)
            )),
            None => details.push(format!("★ {}", rating)),
        }
    }

    format!(
        "{}{}\n{}{}\n{}{}",
        prefix,
        product.title,
        indent,
        details.join(" · "),
        indent,
        product.link
    )
}

pub fn render_product_list(products: &[Product]) -> String {
    products
        .iter()
        .enumerate()
        .map(|(i, product)| render_product_card(Some(i + 1), product))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            product_id: Some("p1".to_string()),
            title: "Sony WH-1000XM5".to_string(),
            price: "₹26,990".to_string(),
            source: "Amazon".to_string(),
            link: "https://amazon.in/sony".to_string(),
            thumbnail: String::new(),
            rating: Some(4.5),
            reviews: Some(12034),
        }
    }

    #[test]
    fn test_card_layout() {
        let card = render_product_card(Some(3), &product());
        assert_eq!(
            card,
            "[3] Sony WH-1000XM5\n    Amazon · Best Price ₹26,990 · ★ 4.5 (12,034 reviews)\n    https://amazon.in/sony"
        );
    }

    #[test]
    fn test_rating_is_optional() {
        let mut p = product();
        p.rating = None;
        let card = render_product_card(None, &p);
        assert!(!card.contains('★'));
        assert!(card.starts_with("Sony WH-1000XM5\nAmazon"));
    }

    #[test]
    fn test_list_numbers_from_one() {
        let list = render_product_list(&[product(), product()]);
        assert!(list.starts_with("[1] "));
        assert!(list.contains("\n\n[2] "));
    }
}
