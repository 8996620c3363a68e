use crate::config::SettingsOverrides;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "pricewise")]
#[command(about = "AI-powered price comparison across major retailers, from the terminal")]
#[command(version)]
pub struct CliConfig {
    /// Backend base URL
    #[arg(long, env = "PRICEWISE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, env = "PRICEWISE_CONFIG", global = true)]
    pub config: Option<String>,

    /// Directory holding the local client state
    #[arg(long, env = "PRICEWISE_STATE_DIR", global = true)]
    pub state_dir: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search products across retailers
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show trending products
    Trending,
    /// Show popular search terms
    Ticker,
    /// List product categories
    Categories,
    /// Browse a category by id (e.g. phones, audio)
    Category { id: String },
    /// Show or clear recent searches
    Recent {
        #[arg(long)]
        clear: bool,
    },
    /// Track the price of a product from the last listing
    Track {
        /// 1-based position in the last listing
        index: usize,
    },
    /// Show tracked products with their price history
    Dashboard {
        /// Write every recorded price point to a CSV file
        #[arg(long)]
        export: Option<String>,
        /// Hide a tracker from this view (tracker id); the backend keeps tracking it
        #[arg(long)]
        hide: Vec<String>,
    },
    /// Show the price history chart of a tracked product
    History { product_id: String },
    /// Show saved items
    Saved,
    /// Save a product from the last listing
    Save { index: usize },
    /// Remove a saved item
    Unsave { product_id: String },
    /// Ask the AI assistant; without a message starts an interactive chat
    Chat { message: Vec<String> },
    /// Sign in with the identity issued by the auth provider
    Login {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show your recent searches and chats recorded by the backend
    Activity {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Check that the backend is reachable
    Health,
}

impl CliConfig {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            api_url: self.api_url.clone(),
            timeout_seconds: self.timeout,
            state_dir: self.state_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_joins_words() {
        let cli = CliConfig::try_parse_from(["pricewise", "search", "gaming", "mouse"]).unwrap();
        match cli.command {
            Command::Search { query } => assert_eq!(query.join(" "), "gaming mouse"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = CliConfig::try_parse_from([
            "pricewise",
            "dashboard",
            "--api-url",
            "http://localhost:9000",
            "--export",
            "prices.csv",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cli.overrides().api_url.as_deref(), Some("http://localhost:9000"));
        assert!(matches!(cli.command, Command::Dashboard { export: Some(_), .. }));
    }

    #[test]
    fn test_search_requires_query() {
        assert!(CliConfig::try_parse_from(["pricewise", "search"]).is_err());
    }

    #[test]
    fn test_track_index_must_be_number() {
        assert!(CliConfig::try_parse_from(["pricewise", "track", "first"]).is_err());
        assert!(CliConfig::try_parse_from(["pricewise", "track", "2"]).is_ok());
    }
}
