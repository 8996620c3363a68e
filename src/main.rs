use clap::Parser;
use pricewise::adapters::csv_export::export_price_history_file;
use pricewise::app::{ChatSession, ChatTurn, SavedItems, ViewState};
use pricewise::config::toml_config::TomlConfig;
use pricewise::core::Session;
use pricewise::render::pages::{
    render_activity, render_categories, render_chat_message, render_dashboard, render_recent,
    render_results, render_saved, render_ticker, render_track_state, render_transcript,
    render_view,
};
use pricewise::render::render_price_chart;
use pricewise::utils::error::ErrorSeverity;
use pricewise::utils::{logger, validation::Validate};
use pricewise::{ApiClient, CliConfig, Command, Frontend, LocalStore, Result, Settings};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

type App = Frontend<ApiClient, LocalStore>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        // 輸出用戶友好的錯誤信息
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: CliConfig) -> Result<()> {
    let file = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = TomlConfig::from_file(path)?;
            config.validate()?;
            Some(config)
        }
        None => None,
    };

    let settings = Settings::resolve(cli.overrides(), file);
    settings.validate()?;
    tracing::debug!("Effective settings: {:?}", settings);

    let client = ApiClient::new(&settings.api_url, settings.timeout())?;
    tracing::debug!("Backend: {}", client.base_url());
    let store = LocalStore::new(&settings.state_dir);
    let mut app = Frontend::load(client, store, settings.frontend()).await?;

    dispatch(&mut app, cli.command).await
}

async fn dispatch(app: &mut App, command: Command) -> Result<()> {
    match command {
        Command::Search { query } => {
            let view = app.search(&query.join(" ")).await?;
            println!("{}", render_results(&view));
            fail_on(&view)
        }
        Command::Trending => {
            let view = app.trending().await;
            println!("Trending Products\n\n{}", render_results(&view));
            fail_on(&view)
        }
        Command::Ticker => {
            println!("{}", render_ticker());
            Ok(())
        }
        Command::Categories => {
            println!("{}", render_categories());
            Ok(())
        }
        Command::Category { id } => {
            let view = app.browse_category(&id).await?;
            println!("{}", render_results(&view));
            fail_on(&view)
        }
        Command::Recent { clear } => {
            if clear {
                app.clear_recent_searches().await?;
                println!("Recent searches cleared.");
            } else {
                println!("{}", render_recent(app.recent_searches()));
            }
            Ok(())
        }
        Command::Track { index } => {
            let (product, view) = app.track_result(index).await?;
            println!("{}", render_track_state(&product, &view));
            fail_on(&view)
        }
        Command::Dashboard { export, hide } => {
            let mut view = app.dashboard().await;
            if let ViewState::Ready(dashboard) = &mut view {
                for id in &hide {
                    if dashboard.untrack(id).is_none() {
                        tracing::warn!("No tracker with id {}", id);
                    }
                }
                if let Some(path) = &export {
                    let rows = export_price_history_file(path, &dashboard.products)?;
                    println!("📁 Exported {} price points to {}", rows, path);
                }
            }
            println!("{}", render_dashboard(&view));
            fail_on(&view)
        }
        Command::History { product_id } => {
            let view = app.price_history(&product_id).await?;
            println!(
                "{}",
                render_view(&view, |history| render_price_chart(history, &product_id))
            );
            fail_on(&view)
        }
        Command::Saved => {
            let view = app.saved().await?;
            println!("{}", render_saved(&view));
            fail_on(&view)
        }
        Command::Save { index } => {
            let mut saved = load_saved(app).await?;
            let view = app.save_result(&mut saved, index).await?;
            print_bookmark_outcome(&view, "Saved.", &saved);
            fail_on(&view)
        }
        Command::Unsave { product_id } => {
            let mut saved = load_saved(app).await?;
            let view = app.unsave_product(&mut saved, &product_id).await?;
            print_bookmark_outcome(&view, "Removed.", &saved);
            fail_on(&view)
        }
        Command::Chat { message } => {
            if message.is_empty() {
                interactive_chat(app).await
            } else {
                let mut session = ChatSession::new();
                app.send_chat(&mut session, &message.join(" ")).await;
                if let Some(reply) = session.last() {
                    println!("{}", render_chat_message(reply));
                }
                Ok(())
            }
        }
        Command::Login {
            user_id,
            email,
            first_name,
            last_name,
        } => {
            let session = Session {
                user_id,
                email,
                first_name,
                last_name,
            };
            let name = session.display_name();
            app.login(session).await?;
            println!("👤 Signed in as {}", name);
            Ok(())
        }
        Command::Logout => {
            if app.logout().await? {
                println!("Signed out.");
            } else {
                println!("Not signed in.");
            }
            Ok(())
        }
        Command::Activity { limit } => {
            let view = app.activity(limit).await?;
            println!("{}", render_activity(&view));
            fail_on(&view)
        }
        Command::Health => {
            let view = app.health().await;
            println!(
                "{}",
                render_view(&view, |status| match &status.message {
                    Some(message) => format!("✅ {} ({})", status.status, message),
                    None => format!("✅ {}", status.status),
                })
            );
            fail_on(&view)
        }
    }
}

/// A failed view was already rendered; exit non-zero without repeating the message.
fn fail_on<T>(view: &ViewState<T>) -> Result<()> {
    if view.is_failed() {
        std::process::exit(2);
    }
    Ok(())
}

async fn load_saved(app: &App) -> Result<SavedItems> {
    Ok(app.saved().await?.into_ready().unwrap_or_default())
}

fn print_bookmark_outcome(view: &ViewState<()>, done: &str, saved: &SavedItems) {
    println!("{}", render_view(view, |_| done.to_string()));
    println!();
    println!("{}", render_saved(&ViewState::Ready(saved.clone())));
}

async fn interactive_chat(app: &mut App) -> Result<()> {
    let mut session = ChatSession::with_greeting();
    println!("{}", render_transcript(&session.messages));
    if !app.state().is_signed_in() {
        let limit = app.settings().guest_chat_limit;
        println!(
            "(guest mode: {} of {} free messages left)",
            app.state().guest_messages_left(limit),
            limit
        );
    }
    println!("(type 'exit' to leave)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if matches!(input, "exit" | "quit") {
            break;
        }

        match app.send_chat(&mut session, input).await {
            ChatTurn::Ignored => continue,
            ChatTurn::LimitReached | ChatTurn::Replied | ChatTurn::Failed => {
                if let Some(reply) = session.last() {
                    println!("\n{}", render_chat_message(reply));
                }
            }
        }
    }

    Ok(())
}

