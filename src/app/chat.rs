use crate::core::Frontend;
use crate::domain::model::{ChatRequest, HistoryKind, Product};
use crate::domain::ports::{Backend, StateStore};

pub const GREETING: &str = "Hi! I'm PriceWise AI. I can help you find the best deals across the web. What are you looking for today?";
pub const GUEST_LIMIT_REACHED: &str =
    "🔒 You've reached the free limit. Please **Sign In** to continue using the AI Assistant!";
pub const CHAT_FAILED: &str = "I'm having trouble connecting right now. Please try again later.";

const SUMMARY_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub related_products: Vec<Product>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            related_products: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            related_products: Vec::new(),
        }
    }
}

/// What happened to a submitted chat input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatTurn {
    /// Blank input; nothing was sent or appended.
    Ignored,
    /// Guest limit reached; only the lock message was appended.
    LimitReached,
    Replied,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatSession {
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Floating assistant: starts empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Full chat page: starts with the assistant greeting.
    pub fn with_greeting() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
        }
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

fn summarize(response: &str) -> String {
    response.chars().take(SUMMARY_CHARS).collect()
}

impl<B: Backend, S: StateStore> Frontend<B, S> {
    pub async fn send_chat(&mut self, session: &mut ChatSession, input: &str) -> ChatTurn {
        let message = input.trim();
        if message.is_empty() {
            return ChatTurn::Ignored;
        }

        if !self.state().is_signed_in() {
            let limit = self.settings().guest_chat_limit;
            if !self.state_mut().try_consume_guest_message(limit) {
                tracing::info!("Guest chat limit of {} reached", limit);
                session.messages.push(ChatMessage::assistant(GUEST_LIMIT_REACHED));
                return ChatTurn::LimitReached;
            }
            // 送出前先記錄使用次數
            self.persist_quietly().await;
            tracing::debug!(
                "Guest chat {}/{}",
                self.state().guest_chat_usage,
                limit
            );
        }

        session.messages.push(ChatMessage::user(message));

        let request = ChatRequest {
            message: message.to_string(),
            include_search: true,
            user_id: self.state().user_id().map(str::to_string),
        };

        match self.backend().chat(&request).await {
            Ok(response) => {
                let related = response.results.unwrap_or_default();
                self.record_history(
                    HistoryKind::Chat,
                    message,
                    Some(summarize(&response.response)),
                    related.len(),
                )
                .await;
                // 沒有推薦商品時保留上一次的清單
                if !related.is_empty() {
                    self.remember_results(&related);
                    self.persist_quietly().await;
                }
                session.messages.push(ChatMessage {
                    role: Role::Assistant,
                    content: response.response,
                    related_products: related,
                });
                ChatTurn::Replied
            }
            Err(e) => {
                tracing::error!("❌ Chat error: {}", e);
                session.messages.push(ChatMessage::assistant(CHAT_FAILED));
                ChatTurn::Failed
            }
        }
    }
}
