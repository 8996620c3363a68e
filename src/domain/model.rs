use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A product listing as returned by the backend. Passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Retailer display string, e.g. "₹1,499". Bare numbers are kept as their digits.
    #[serde(default, deserialize_with = "price_as_text")]
    pub price: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u64>,
}

// 後端以 item.get(...) 取值，欄位可能是 null
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn price_as_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<PriceValue>::deserialize(deserializer)? {
        Some(PriceValue::Text(text)) => text,
        Some(PriceValue::Number(amount)) => amount.to_string(),
        None => String::new(),
    })
}

/// Price recorded by the tracker; older entries carry a number, newer ones the display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    pub fn amount(&self) -> Option<f64> {
        match self {
            PriceValue::Number(n) => Some(*n),
            PriceValue::Text(s) => parse_price(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: PriceValue,
    pub timestamp: String,
}

impl PricePoint {
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedProduct {
    pub id: String,
    #[serde(flatten)]
    pub product: Product,
    #[serde(default)]
    pub history: Vec<PricePoint>,
    #[serde(default)]
    pub last_updated: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub include_search: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub results: Option<Vec<Product>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackResponse {
    pub message: String,
    #[serde(default)]
    pub id: Option<String>,
}

impl TrackResponse {
    pub fn already_tracking(&self) -> bool {
        self.message.to_lowercase().starts_with("already tracking")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackedResponse {
    #[serde(default)]
    pub products: Vec<TrackedProduct>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceHistoryResponse {
    #[serde(default)]
    pub history: Vec<PricePoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Identity handed over by the auth provider, mirrored to `/user/sync`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSync {
    pub clerk_id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Search,
    Chat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub query: String,
    #[serde(default)]
    pub response_summary: Option<String>,
    #[serde(default)]
    pub related_products: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkRequest {
    pub user_id: String,
    pub product: Product,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkEntry {
    pub product: Product,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub item_count: &'static str,
    pub ai_recommended: bool,
    pub price_drop: bool,
}

/// "₹1,499" -> 1499.0. Everything but digits and '.' is dropped.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Backend timestamps are naive UTC (`2024-03-01T10:00:00.123456`) or RFC 3339.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_strips_currency_and_separators() {
        assert_eq!(parse_price("₹1,499"), Some(1499.0));
        assert_eq!(parse_price("$24.99"), Some(24.99));
        assert_eq!(parse_price("Rs 72,000"), Some(72000.0));
        assert_eq!(parse_price("n/a"), None);
    }

    #[test]
    fn test_product_tolerates_null_fields_and_numeric_price() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "product_id": "p7",
            "title": "boAt Airdopes 141",
            "price": 1299.0,
            "source": null,
            "link": null,
            "thumbnail": null
        }))
        .unwrap();

        assert_eq!(product.price, "1299");
        assert_eq!(parse_price(&product.price), Some(1299.0));
        assert!(product.source.is_empty());
        assert!(product.thumbnail.is_empty());
    }

    #[test]
    fn test_tracked_product_tolerates_null_thumbnail() {
        let tracked: TrackedProduct = serde_json::from_value(serde_json::json!({
            "id": "65f0a1",
            "product_id": "p1",
            "title": "PS5 Slim",
            "price": 44990,
            "source": "Amazon",
            "link": "https://amazon.in/dp/p1",
            "thumbnail": null,
            "history": []
        }))
        .unwrap();

        assert_eq!(tracked.product.price, "44990");
        assert!(tracked.product.thumbnail.is_empty());
    }

    #[test]
    fn test_product_ignores_unknown_fields() {
        let json = serde_json::json!({
            "product_id": "p1",
            "title": "Sony WH-1000XM5",
            "price": "₹26,990",
            "source": "Amazon",
            "link": "https://amazon.in/x",
            "thumbnail": "https://img/x.jpg",
            "rating": 4.5,
            "reviews": 1200,
            "delivery": "Free"
        });
        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.product_id.as_deref(), Some("p1"));
        assert_eq!(product.reviews, Some(1200));
    }

    #[test]
    fn test_tracked_product_flattens_product_fields() {
        let json = serde_json::json!({
            "id": "65f0",
            "product_id": "p1",
            "title": "PS5 Slim",
            "price": "₹44,990",
            "source": "Flipkart",
            "link": "https://flipkart.com/ps5",
            "thumbnail": "",
            "history": [
                {"price": "₹49,990", "timestamp": "2024-03-01T10:00:00.123456"},
                {"price": 44990, "timestamp": "2024-03-02T10:00:00"}
            ],
            "last_updated": "2024-03-02T10:00:00"
        });
        let tracked: TrackedProduct = serde_json::from_value(json).unwrap();
        assert_eq!(tracked.product.title, "PS5 Slim");
        assert_eq!(tracked.history.len(), 2);
        assert_eq!(tracked.history[0].price.amount(), Some(49990.0));
        assert_eq!(tracked.history[1].price.amount(), Some(44990.0));
        assert!(tracked.history[0].recorded_at().is_some());
    }

    #[test]
    fn test_history_item_serializes_type_field() {
        let item = HistoryItem {
            id: None,
            user_id: "user_1".to_string(),
            kind: HistoryKind::Search,
            query: "ps5".to_string(),
            response_summary: None,
            related_products: 3,
            timestamp: None,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "search");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_chat_request_omits_missing_user() {
        let req = ChatRequest {
            message: "best mouse".to_string(),
            include_search: true,
            user_id: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("user_id").is_none());
        assert_eq!(value["include_search"], true);
    }

    #[test]
    fn test_already_tracking_detection() {
        let resp = TrackResponse {
            message: "Already tracking this product".to_string(),
            id: Some("1".to_string()),
        };
        assert!(resp.already_tracking());
    }
}
