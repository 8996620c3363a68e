use crate::domain::model::PricePoint;
use crate::render::group_digits;
use chrono::{DateTime, Utc};

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const MAX_POINTS: usize = 60;

pub const EMPTY_HISTORY: &str = "No price history available yet.";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub price: f64,
    pub at: Option<DateTime<Utc>>,
}

/// Normalises history; points whose price cannot be parsed are skipped.
pub fn chart_points(history: &[PricePoint]) -> Vec<ChartPoint> {
    history
        .iter()
        .filter_map(|point| {
            point.price.amount().map(|price| ChartPoint {
                price,
                at: point.recorded_at(),
            })
        })
        .collect()
}

pub fn sparkline(values: &[f64]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if (max - min).abs() < 0.01 { 1.0 } else { max - min };
    let top = (BARS.len() - 1) as f64;

    values
        .iter()
        .map(|v| {
            let level = (((v - min) / range) * top).round() as usize;
            BARS[level.min(BARS.len() - 1)]
        })
        .collect()
}

/// 104990.0 -> "₹104,990"; fractional amounts keep two decimals.
pub fn format_amount(amount: f64) -> String {
    // 先取整到分，再拆成元與分
    let total_cents = (amount.abs() * 100.0).round() as u64;
    let grouped = group_digits(total_cents / 100);
    let cents = total_cents % 100;

    let sign = if amount < 0.0 && total_cents > 0 { "-" } else { "" };
    if cents == 0 {
        format!("{}₹{}", sign, grouped)
    } else {
        format!("{}₹{}.{:02}", sign, grouped, cents)
    }
}

fn format_date(at: Option<DateTime<Utc>>) -> String {
    at.map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "?".to_string())
}

pub fn render_price_chart(history: &[PricePoint], title: &str) -> String {
    let points = chart_points(history);
    if points.is_empty() {
        return EMPTY_HISTORY.to_string();
    }

    let recent = &points[points.len().saturating_sub(MAX_POINTS)..];
    let values: Vec<f64> = recent.iter().map(|p| p.price).collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let latest = values[values.len() - 1];

    let mut out = String::new();
    out.push_str(&format!("Price History ({})\n", title));
    out.push_str(&format!("  {}\n", sparkline(&values)));
    out.push_str(&format!(
        "  low {} · high {} · latest {}\n",
        format_amount(min),
        format_amount(max),
        format_amount(latest)
    ));
    out.push_str(&format!(
        "  {} → {} ({} points)",
        format_date(recent[0].at),
        format_date(recent[recent.len() - 1].at),
        recent.len()
    ));
    out
}
