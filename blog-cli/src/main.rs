use std::{process::ExitCode, sync::Arc, time::Duration};

use blog_console::{
    api::v1::dto::form::BlogForm,
    config::{BlogApiConfig, DEFAULT_BLOG_API_BASE_URL},
    services::{
        blog_api::HttpBlogClient,
        console::ConsoleService,
        payload::{PayloadBuilder, SchemaVariant},
        render::{FetchView, LOADING, NO_ENTRIES, ResultsView, StatusMessage, SUBMITTING},
    },
};
use clap::{Parser, Subcommand};

/// Register and browse blog posts on a blog management API from the terminal.
///
/// Status lines go to stderr, results to stdout. The exit code is non-zero
/// when the action failed.
#[derive(Parser, Debug)]
#[command(name = "blog-cli", version, about)]
struct Args {
    /// Base URL of the blog API (e.g. http://127.0.0.1:6969)
    #[arg(long, env = "BLOG_API_BASE_URL", default_value = DEFAULT_BLOG_API_BASE_URL)]
    base_url: String,

    /// Registration schema: flat, or nested for the legacy endpoint
    #[arg(long, env = "BLOG_API_SCHEMA", default_value = "flat")]
    schema: SchemaVariant,

    /// Request timeout in seconds
    #[arg(long, env = "BLOG_API_TIMEOUT_SECONDS", default_value_t = 10)]
    timeout_seconds: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a blog post's metadata
    Register(RegisterArgs),
    /// List all registered blogs
    List,
    /// Show one blog by id
    Show { id: String },
}

#[derive(clap::Args, Debug, Clone)]
struct RegisterArgs {
    #[arg(long)]
    title: String,

    #[arg(long)]
    category: String,

    /// Comma or newline separated
    #[arg(long, default_value = "")]
    keywords: String,

    /// Leave empty to send null
    #[arg(long, default_value = "")]
    published_at: String,

    /// Server-side path or URL of the markdown content
    #[arg(long, visible_alias = "content")]
    content_file: String,

    /// Comma or newline separated
    #[arg(long, default_value = "")]
    references: String,

    /// published or drafted
    #[arg(long, default_value = "published")]
    state: String,

    /// Nested schema only
    #[arg(long, default_value = "")]
    created_at: String,

    /// Nested schema only
    #[arg(long, default_value = "")]
    last_update: String,

    /// Print the JSON payload instead of sending it
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

impl From<RegisterArgs> for BlogForm {
    fn from(args: RegisterArgs) -> Self {
        BlogForm {
            title: args.title,
            category: args.category,
            keywords: args.keywords,
            published_at: args.published_at,
            content_file: args.content_file,
            references: args.references,
            state: args.state,
            created_at: args.created_at,
            last_update: args.last_update,
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_status(status: &StatusMessage) {
    eprintln!("{status}");
}

fn print_fetch(view: &FetchView) {
    match &view.results {
        ResultsView::Entries(cards) => {
            for card in cards {
                println!("{} (ID: {})", card.title, card.id);
                println!("  Category: {} | State: {}", card.category, card.state);
                println!("  Published: {} | Created: {}", card.published, card.created);
                println!("  Keywords: {}", card.keywords);
            }
        }
        ResultsView::Empty => println!("{NO_ENTRIES}"),
        ResultsView::NotFound(notice) => println!("{notice}"),
        ResultsView::Error(error) => println!("{error}"),
    }
    print_status(&view.status);
}

fn exit_code(status: &StatusMessage) -> ExitCode {
    if status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let args = Args::parse();

    let mut config = BlogApiConfig::new(&args.base_url)?;
    config.schema = args.schema;
    config.timeout = Duration::from_secs(args.timeout_seconds.max(1));

    if let Command::Register(register) = &args.command
        && register.dry_run
    {
        let form = BlogForm::from(register.clone());
        let payload = PayloadBuilder::new(config.schema).build(&form)?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(ExitCode::SUCCESS);
    }

    let client = HttpBlogClient::new(&config)?;
    let console = ConsoleService::new(Arc::new(client), config.schema);
    tracing::debug!(base_url = console.api_base_url(), schema = %config.schema, "blog-cli ready");

    let code = match args.command {
        Command::Register(register) => {
            eprintln!("{SUBMITTING}");
            let outcome = console.submit(&BlogForm::from(register)).await;
            print_status(&outcome.status);
            if let Some(view) = &outcome.refreshed {
                print_fetch(view);
            }
            exit_code(&outcome.status)
        }
        Command::List => {
            eprintln!("{LOADING}");
            let view = console.fetch_blogs().await;
            print_fetch(&view);
            exit_code(&view.status)
        }
        Command::Show { id } => {
            eprintln!("{LOADING}");
            let view = console.fetch_blog(&id).await;
            print_fetch(&view);
            exit_code(&view.status)
        }
    };

    Ok(code)
}
