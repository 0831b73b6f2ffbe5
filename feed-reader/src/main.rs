use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feed_reader::{ReaderConfig, ReaderSession};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Categorised RSS/Atom reader with keyword, sentiment and translation analysis
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Feed store file (url|description|category per line)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Locale articles are translated into
    #[arg(long = "target-lang")]
    target_lang: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories and their feeds
    List,
    /// Add a feed; without --description the feed's own title is used
    Add {
        url: String,
        category: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change the url and description of a feed
    Edit {
        old_url: String,
        new_url: String,
        description: String,
    },
    /// Remove a feed
    Remove { url: String },
    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Fetch a feed and list its entry titles
    Entries { url: String },
    /// Fetch a feed and print the analysed document for one entry
    Show {
        url: String,
        index: usize,
        /// Print the document as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    Add { name: String },
    Rename { old: String, new: String },
    Remove { name: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ReaderConfig::from_env();
    if let Some(store) = cli.store {
        config = config.with_store_path(store);
    }
    if let Some(lang) = cli.target_lang {
        config = config.with_target_locale(lang);
    }

    info!("Using feed store {}", config.store_path.display());
    let mut session = ReaderSession::open(&config).context("failed to open feed store")?;

    match cli.command {
        Command::List => {
            for group in session.registry().categories() {
                println!("{}", group.name);
                for feed in group.feeds {
                    println!("  {} <{}>", feed.description, feed.url);
                }
            }
        }
        Command::Add { url, category, description } => match description {
            Some(description) => session.registry_mut().add_feed(&url, &description, &category)?,
            None => {
                let record = session.subscribe(&url, &category).await?;
                println!("Added {} ({})", record.description, record.url);
            }
        },
        Command::Edit { old_url, new_url, description } => {
            let updated = session.registry_mut().edit_feed(&old_url, &new_url, &description)?;
            println!("Updated {} feed(s)", updated);
        }
        Command::Remove { url } => {
            let removed = session.registry_mut().remove_feed(&url)?;
            println!("Removed {} feed(s)", removed);
        }
        Command::Category(CategoryCommand::Add { name }) => {
            if !session.registry_mut().add_category(&name)? {
                println!("Category {:?} already exists", name.trim());
            }
        }
        Command::Category(CategoryCommand::Rename { old, new }) => {
            let renamed = session.registry_mut().rename_category(&old, &new)?;
            println!("Renamed {} record(s)", renamed);
        }
        Command::Category(CategoryCommand::Remove { name }) => {
            let removed = session.registry_mut().remove_category(&name)?;
            println!("Removed {} record(s)", removed);
        }
        Command::Entries { url } => {
            session.select_feed(&url).await?;
            for (index, title) in session.titles().iter().enumerate() {
                println!("{:>3}  {}", index, title);
            }
        }
        Command::Show { url, index, json } => {
            session.select_feed(&url).await?;
            let document = session.select_article(index).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(document)?);
            } else {
                println!("{}", document.render_html());
            }
        }
    }

    Ok(())
}
