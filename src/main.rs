use clap::{Parser, Subcommand};
use serde_json::json;

use appstore_scraper::common::constants::{DEFAULT_COUNTRY, DEFAULT_LANG, DEFAULT_PAGE_SIZE};
use appstore_scraper::common::storefront::{category_entries, collection_entries, TOP_FREE_IOS};
use appstore_scraper::logging;
use appstore_scraper::{AppId, AppRecord, AppStoreScraper, StoreFront};

#[derive(Parser)]
#[command(name = "appstore_scraper")]
#[command(about = "iTunes App Store metadata scraper")]
#[command(version = "0.1.0")]
struct Cli {
    /// Two-letter country code of the store to query
    #[arg(long, global = true)]
    country: Option<String>,

    /// Language code sent with search and similar-apps requests
    #[arg(long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search app ids matching a term
    Search {
        term: String,
        /// Results per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        num: usize,
        /// Number of pages to return
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List app ids in a named collection feed
    Collection {
        /// Feed name, e.g. topfreeapplications (see `entries`)
        #[arg(long, default_value = TOP_FREE_IOS)]
        collection: String,
        /// Genre id to narrow the feed, e.g. 6014 for games
        #[arg(long)]
        category: Option<u32>,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        num: usize,
    },
    /// List apps published by a developer id
    Developer {
        developer_id: u64,
        /// Print full records instead of ids
        #[arg(long)]
        full: bool,
    },
    /// List app ids the store associates with a given app
    Similar { app_id: u64 },
    /// Fetch the detail record for one app id or bundle id
    Details {
        app_id: String,
        /// Join array fields into comma-separated strings
        #[arg(long)]
        flatten: bool,
    },
    /// Fetch detail records for several app ids in one request
    Lookup {
        #[arg(required = true)]
        app_ids: Vec<u64>,
        #[arg(long)]
        flatten: bool,
    },
    /// Print the known collection feed names and category ids
    Entries,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    let country = cli
        .country
        .or_else(|| std::env::var("APPSTORE_COUNTRY").ok())
        .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
    let lang = cli
        .lang
        .or_else(|| std::env::var("APPSTORE_LANG").ok())
        .unwrap_or_else(|| DEFAULT_LANG.to_string());
    let store = StoreFront::new(&country, &lang)?;
    let scraper = AppStoreScraper::new();

    match cli.command {
        Commands::Search { term, num, page } => {
            let ids = scraper.app_ids_for_query(&term, num, page, &store).await?;
            print_json(&json!(ids))?;
        }
        Commands::Collection {
            collection,
            category,
            num,
        } => {
            let ids = scraper
                .app_ids_for_collection(&collection, category, num, &store)
                .await?;
            print_json(&json!(ids))?;
        }
        Commands::Developer { developer_id, full } => {
            if full {
                let records = scraper.apps_for_developer(developer_id, &store).await?;
                print_json(&json!(records))?;
            } else {
                let ids = scraper.app_ids_for_developer(developer_id, &store).await?;
                print_json(&json!(ids))?;
            }
        }
        Commands::Similar { app_id } => {
            let ids = scraper.similar_app_ids_for_app(app_id, &store).await?;
            print_json(&json!(ids))?;
        }
        Commands::Details { app_id, flatten } => {
            let record = scraper.app_details(&AppId::parse(&app_id), &store).await?;
            match record {
                Some(record) => print_json(&json!(maybe_flatten(record, flatten)))?,
                None => {
                    // Not-found is an empty answer, not a failure
                    print_json(&json!(null))?;
                }
            }
        }
        Commands::Lookup { app_ids, flatten } => {
            let records = scraper.multiple_app_details(&app_ids, &store).await?;
            let records: Vec<AppRecord> = records
                .into_iter()
                .map(|record| maybe_flatten(record, flatten))
                .collect();
            print_json(&json!(records))?;
        }
        Commands::Entries => {
            let collections: serde_json::Map<String, serde_json::Value> = collection_entries()
                .into_iter()
                .map(|(name, feed)| (name.to_string(), json!(feed)))
                .collect();
            let categories: serde_json::Map<String, serde_json::Value> = category_entries()
                .into_iter()
                .map(|(name, id)| (name.to_string(), json!(id)))
                .collect();
            print_json(&json!({
                "collections": collections,
                "categories": categories
            }))?;
        }
    }

    Ok(())
}

fn maybe_flatten(record: AppRecord, flatten: bool) -> AppRecord {
    if flatten {
        record.flattened()
    } else {
        record
    }
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
