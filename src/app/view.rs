/// What a view ended up showing after its single request.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Ready(T),
    /// Request succeeded but there is nothing to show.
    Empty(String),
    /// Request failed; the message is safe to show to the user.
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn empty(message: impl Into<String>) -> Self {
        ViewState::Empty(message.into())
    }

    pub fn failed(message: impl Into<String>) -> Self {
        ViewState::Failed(message.into())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ViewState::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            ViewState::Ready(value) => ViewState::Ready(f(value)),
            ViewState::Empty(msg) => ViewState::Empty(msg),
            ViewState::Failed(msg) => ViewState::Failed(msg),
        }
    }
}

impl<T> ViewState<Vec<T>> {
    /// `Ready` for a non-empty list, otherwise `Empty(message)`.
    pub fn from_list(items: Vec<T>, empty_message: &str) -> Self {
        if items.is_empty() {
            ViewState::empty(empty_message)
        } else {
            ViewState::Ready(items)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_list() {
        let empty: ViewState<Vec<u8>> = ViewState::from_list(vec![], "nothing");
        assert_eq!(empty, ViewState::Empty("nothing".to_string()));
        assert!(ViewState::from_list(vec![1], "nothing").is_ready());
    }

    #[test]
    fn test_map_keeps_messages() {
        let failed: ViewState<u8> = ViewState::failed("boom");
        assert_eq!(failed.map(|v| v + 1), ViewState::Failed("boom".to_string()));
        assert_eq!(ViewState::Ready(1).map(|v| v + 1), ViewState::Ready(2));
    }
}
