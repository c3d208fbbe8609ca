use clap::Parser;
use startpage_api::QuoteClient;
use startpage_core::{Config, PageSession};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "startpage")]
#[command(version, about = "Personal start page for your terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a bookmark to the bar
    Add {
        /// Bookmark title
        title: String,
        /// Bookmark url
        url: String,
    },
    /// Add a todo item
    Todo {
        /// Todo text
        text: String,
    },
    /// Print stored bookmarks and todos
    List,
    /// Print today's quote
    Quote,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "startpage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Some(Commands::Add { title, url }) => {
            tracing::info!("Adding bookmark: {}", title);
            let session = PageSession::init(config)?;
            let bookmarks = session.bookmarks().add(&title, &url)?;
            println!("Added '{}' ({} bookmarks total)", title, bookmarks.len());
        }
        Some(Commands::Todo { text }) => {
            tracing::info!("Adding todo: {}", text);
            let session = PageSession::init(config)?;
            let todos = session.todos().add(&text)?;
            println!("Added todo ({} items)", todos.len());
        }
        Some(Commands::List) => {
            let session = PageSession::init(config)?;

            println!("Bookmarks:");
            for (i, bookmark) in session.bookmarks().all().iter().enumerate() {
                println!("  {}. {} - {}", i + 1, bookmark.title, bookmark.url);
            }

            println!("Todos:");
            for (i, todo) in session.todos().all().iter().enumerate() {
                let mark = if todo.done { "x" } else { " " };
                println!("  {}. [{}] {}", i + 1, mark, todo.text);
            }
        }
        Some(Commands::Quote) => {
            let client = QuoteClient::with_api_url(config.quote.api_url.clone());
            println!("{}", client.fetch_or_fallback().await);
        }
        None => {
            // No subcommand means the full-screen page
            let session = PageSession::init(config)?;
            startpage_tui::run_tui(session).await?;
        }
    }

    Ok(())
}
