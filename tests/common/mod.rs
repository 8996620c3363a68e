#![allow(dead_code)]

use httpmock::MockServer;
use pricewise::core::Session;
use pricewise::{ApiClient, Frontend, FrontendSettings, LocalStore};
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;

pub type TestFrontend = Frontend<ApiClient, LocalStore>;

pub async fn frontend(server: &MockServer, state_dir: &Path) -> TestFrontend {
    frontend_with(server, state_dir, FrontendSettings::default()).await
}

pub async fn frontend_with(
    server: &MockServer,
    state_dir: &Path,
    settings: FrontendSettings,
) -> TestFrontend {
    let client = ApiClient::new(&server.base_url(), Duration::from_secs(5)).unwrap();
    let store = LocalStore::new(state_dir);
    Frontend::load(client, store, settings).await.unwrap()
}

pub fn session() -> Session {
    Session {
        user_id: "user_2abc".to_string(),
        email: "asha@example.com".to_string(),
        first_name: Some("Asha".to_string()),
        last_name: Some("Rao".to_string()),
    }
}

pub fn product_json(id: &str, title: &str, price: &str) -> Value {
    json!({
        "product_id": id,
        "title": title,
        "price": price,
        "source": "Amazon",
        "link": format!("https://amazon.in/dp/{}", id),
        "thumbnail": format!("https://img.example/{}.jpg", id),
        "rating": 4.4,
        "reviews": 812
    })
}

pub fn two_products() -> Value {
    json!({
        "results": [
            product_json("p1", "Logitech G502 Hero", "₹3,995"),
            product_json("p2", "Razer DeathAdder V2", "₹2,499")
        ]
    })
}
