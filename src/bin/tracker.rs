use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cashbook::{
    TransactionFields, TransactionId, TransactionType,
    client::{ApiClient, DraftTransaction, TransactionsView, render_report},
    load_env_file,
};

/// Record income and expenses and see your balance.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The URL of the cashbook API.
    #[arg(
        long,
        env = "CASHBOOK_API_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    api_url: String,

    /// Only list transactions whose category contains this text.
    #[arg(short, long, default_value = "", global = true)]
    filter: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the totals and transactions. This is the default.
    List,
    /// Record a new transaction.
    Add {
        /// "income" or "expense".
        #[arg(long = "type")]
        kind: TransactionType,
        #[arg(long)]
        category: String,
        #[arg(long)]
        value: f64,
        /// RFC 3339 date-time or YYYY-MM-DD.
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Change some fields of a transaction.
    Edit {
        id: TransactionId,
        #[arg(long = "type")]
        kind: Option<TransactionType>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        value: Option<f64>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a transaction.
    Delete { id: TransactionId },
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(error) = load_env_file() {
        eprintln!("Could not read .env file: {error}");
        return ExitCode::FAILURE;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut view = TransactionsView::new(ApiClient::new(args.api_url));
    view.category_filter = args.filter;

    match args.command.unwrap_or(Command::List) {
        Command::List => view.load().await,
        Command::Add {
            kind,
            category,
            value,
            date,
            description,
        } => {
            view.draft = DraftTransaction {
                kind: Some(kind),
                category,
                value: Some(value),
                date,
                description,
            };
            view.submit_draft().await;
        }
        Command::Edit {
            id,
            kind,
            category,
            value,
            date,
            description,
        } => {
            let fields = TransactionFields {
                kind: kind.map(|kind| kind.to_string()),
                category,
                value,
                date,
                description,
            };
            view.update(id, &fields).await;
        }
        Command::Delete { id } => view.delete(id).await,
    }

    println!("{}", render_report(&view));

    if view.error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
