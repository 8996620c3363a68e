//! Plain-text rendering of the views for the terminal.

pub mod card;
pub mod chart;
pub mod pages;

pub use card::{render_product_card, render_product_list};
pub use chart::render_price_chart;

/// 1234567 -> "1,234,567"
pub(crate) fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
