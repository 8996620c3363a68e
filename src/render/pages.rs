use crate::app::catalog::{categories, trending_terms};
use crate::app::{ChatMessage, Dashboard, Role, SavedItems, TrackState, ViewState};
use crate::domain::model::{parse_timestamp, HistoryItem, HistoryKind, Product};
use crate::render::card::{render_product_card, render_product_list};
use crate::render::chart::render_price_chart;

/// Ready -> `ready(value)`, Empty -> its message, Failed -> "❌ message".
pub fn render_view<T>(view: &ViewState<T>, ready: impl FnOnce(&T) -> String) -> String {
    match view {
        ViewState::Ready(value) => ready(value),
        ViewState::Empty(message) => message.clone(),
        ViewState::Failed(message) => format!("❌ {}", message),
    }
}

pub fn render_results(view: &ViewState<Vec<Product>>) -> String {
    render_view(view, |products| render_product_list(products))
}

pub fn render_categories() -> String {
    let mut lines = vec!["Explore Categories".to_string()];
    for category in categories() {
        let mut badges = Vec::new();
        if category.ai_recommended {
            badges.push("Top Pick");
        }
        if category.price_drop {
            badges.push("Price Drop");
        }
        let badges = if badges.is_empty() {
            String::new()
        } else {
            format!("  [{}]", badges.join(", "))
        };
        lines.push(format!(
            "  {:<16} {:<18} {}{}",
            category.id, category.name, category.item_count, badges
        ));
    }
    lines.join("\n")
}

pub fn render_ticker() -> String {
    format!("🔥 Trending: {}", trending_terms().join(" · "))
}

pub fn render_recent(searches: &[String]) -> String {
    if searches.is_empty() {
        return "No recent searches.".to_string();
    }
    format!("Recent: {}", searches.join(" · "))
}

pub fn render_track_state(product: &Product, view: &ViewState<TrackState>) -> String {
    render_view(view, |state| match state {
        TrackState::Idle => format!("🔔 Track Price: {}", product.title),
        TrackState::Tracking { .. } => format!("✅ Tracking Enabled: {}", product.title),
        TrackState::AlreadyTracking { .. } => {
            format!("✅ Already tracking: {}", product.title)
        }
    })
}

fn format_checked(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn render_dashboard(view: &ViewState<Dashboard>) -> String {
    render_view(view, |dashboard| {
        let mut sections = vec![format!(
            "My Tracked Products · {} Active Trackers",
            dashboard.active_trackers()
        )];
        for tracked in &dashboard.products {
            let product = &tracked.product;
            let mut meta = vec![product.source.clone()];
            if let Some(rating) = product.rating {
                meta.push(format!("⭐ {}", rating));
            }
            meta.push(format!("Last checked: {}", format_checked(&tracked.last_updated)));

            sections.push(format!(
                "{} [{}]\n  {} Current Price\n  {}\n  {}\n{}",
                product.title,
                tracked.id,
                product.price,
                meta.join(" · "),
                product.link,
                render_price_chart(&tracked.history, &product.title)
            ));
        }
        sections.join("\n\n")
    })
}

pub fn render_saved(view: &ViewState<SavedItems>) -> String {
    render_view(view, |saved| {
        if saved.products.is_empty() {
            return "No saved items yet".to_string();
        }
        format!(
            "Saved Items\n\n{}",
            saved
                .products
                .iter()
                .map(|p| {
                    let id = p.product_id.as_deref().unwrap_or("-");
                    format!("{}\n    id: {}", render_product_card(None, p), id)
                })
                .collect::<Vec<_>>()
                .join("\n\n")
        )
    })
}

pub fn render_activity(view: &ViewState<Vec<HistoryItem>>) -> String {
    render_view(view, |items| {
        items
            .iter()
            .map(|item| {
                let kind = match item.kind {
                    HistoryKind::Search => "search",
                    HistoryKind::Chat => "chat",
                };
                let when = item
                    .timestamp
                    .as_deref()
                    .map(format_checked)
                    .unwrap_or_default();
                format!(
                    "{:<10} {:<6} {} ({} products)",
                    when, kind, item.query, item.related_products
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

pub fn render_chat_message(message: &ChatMessage) -> String {
    let label = match message.role {
        Role::User => "You",
        Role::Assistant => "PriceWise AI",
    };
    let mut out = format!("{}: {}", label, message.content);
    if !message.related_products.is_empty() {
        out.push_str("\n\n");
        out.push_str(&render_product_list(&message.related_products));
    }
    out
}

pub fn render_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(render_chat_message)
        .collect::<Vec<_>>()
        .join("\n\n")
}
