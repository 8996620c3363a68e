use crate::domain::model::{PriceValue, TrackedProduct};
use crate::utils::error::{PriceWiseError, Result};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct PriceRow<'a> {
    tracker_id: &'a str,
    product_id: &'a str,
    title: &'a str,
    source: &'a str,
    timestamp: &'a str,
    price_raw: String,
    price: Option<f64>,
}

/// Writes one CSV row per recorded price point. Returns the number of rows.
pub fn write_price_history<W: Write>(writer: W, products: &[TrackedProduct]) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for tracked in products {
        for point in &tracked.history {
            let price_raw = match &point.price {
                PriceValue::Text(s) => s.clone(),
                PriceValue::Number(n) => n.to_string(),
            };
            csv_writer.serialize(PriceRow {
                tracker_id: &tracked.id,
                product_id: tracked.product.product_id.as_deref().unwrap_or(""),
                title: &tracked.product.title,
                source: &tracked.product.source,
                timestamp: &point.timestamp,
                price_raw,
                price: point.price.amount(),
            })?;
            rows += 1;
        }
    }

    csv_writer.flush()?;
    Ok(rows)
}

pub fn export_price_history_file(path: &str, products: &[TrackedProduct]) -> Result<usize> {
    crate::utils::validation::validate_path("dashboard.export", path)?;
    let file = std::fs::File::create(path).map_err(|e| PriceWiseError::StateError {
        message: format!("cannot create {}: {}", path, e),
    })?;
    let rows = write_price_history(file, products)?;
    tracing::info!("📁 Exported {} price points to {}", rows, path);
    Ok(rows)
}
