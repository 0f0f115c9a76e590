//! Benchmarking tool for search performance
//!
//! Seeds a record store with synthetic records and times repeated searches
//! through the search engine.
//!
//! Usage:
//!   cargo run --bin bench_search -- --records 50000 --iterations 200 [--database-url <url>]

use anyhow::{Context, Result};
use clap::Parser;
use futures::{stream, StreamExt, TryStreamExt};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use metadata_editor::config::DatabaseConfig;
use metadata_editor::db::search::{SearchOptions, SearchRequest};
use metadata_editor::db::{
    FieldRegistry, MemoryRecordStore, PostgresRecordStore, RecordStore, SearchEngine,
};
use metadata_editor::models::MetadataRecord;
use metadata_editor::Config;

const GENRES: [&str; 4] = ["literature", "academic", "magazine", "apocrypha"];
const COUNTRIES: [&str; 5] = ["Iraq", "Iran", "Syria", "Turkey", "Lebanon"];
const SEED_CONCURRENCY: usize = 32;

#[derive(Parser, Debug)]
#[clap(name = "bench_search")]
#[clap(about = "Benchmark search performance over synthetic metadata records")]
struct Args {
    /// Number of records to seed
    #[clap(short, long, default_value = "10000")]
    records: usize,

    /// Searches to run per query shape
    #[clap(short, long, default_value = "100")]
    iterations: usize,

    /// PostgreSQL URL; the in-memory store is used when absent
    #[clap(short, long)]
    database_url: Option<String>,
}

fn synthetic_record(n: usize) -> MetadataRecord {
    let doc = json!({
        "title": format!("Collected Works, volume {n}"),
        "genre": GENRES[n % GENRES.len()],
        "country": COUNTRIES[n % COUNTRIES.len()],
        "authors": [format!("Author {}", n % 97), "Anonymous"],
        "pub_date": 1900 + (n % 120) as i64,
        "num_pages": 80 + (n % 400) as i64,
    });
    let JsonValue::Object(metadata) = doc else {
        unreachable!("json! object literal")
    };
    MetadataRecord::new(uuid::Uuid::new_v4().to_string(), metadata)
}

async fn open_store(database_url: Option<String>) -> Result<Arc<dyn RecordStore>> {
    let Some(url) = database_url else {
        return Ok(Arc::new(MemoryRecordStore::new()));
    };
    let config = DatabaseConfig {
        url: Some(url),
        ..Config::defaults().database
    };
    let store = PostgresRecordStore::connect(&config)
        .await
        .context("Failed to connect to database")?;
    Ok(Arc::new(store))
}

fn request(pairs: &[(&str, &str)]) -> SearchRequest {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    metadata_editor::logging::init_simple_logging();
    let args = Args::parse();

    info!("=== Search Benchmark ===");
    info!("Records: {}", args.records);
    info!("Iterations per query: {}", args.iterations);

    let store = open_store(args.database_url).await?;
    info!("Backend: {}", store.backend_name());

    let seed_start = Instant::now();
    stream::iter(0..args.records)
        .map(|n| {
            let store = Arc::clone(&store);
            async move {
                store
                    .insert(synthetic_record(n))
                    .await
                    .with_context(|| format!("Failed to insert record {n}"))
            }
        })
        .buffer_unordered(SEED_CONCURRENCY)
        .try_for_each(|_| async { Ok(()) })
        .await?;
    info!("Seeded {} records in {:?}", args.records, seed_start.elapsed());

    let engine = SearchEngine::new(Arc::clone(&store), Arc::new(FieldRegistry::with_defaults()));
    let options = SearchOptions::default();

    let shapes = [
        ("exact genre", request(&[("genre", "academic")])),
        ("text title", request(&[("title", "volume 12")])),
        ("array authors", request(&[("authors", "author 5")])),
        ("year range", request(&[("published", "1950-1960")])),
        (
            "genre AND country",
            request(&[("genre", "literature"), ("country", "iraq")]),
        ),
    ];

    for (label, search) in &shapes {
        let mut total = Duration::ZERO;
        let mut matched = 0;
        for _ in 0..args.iterations {
            let start = Instant::now();
            let response = engine.search(search, &options).await;
            total += start.elapsed();
            let result = response
                .result()
                .with_context(|| format!("Search '{label}' was rejected"))?;
            matched = result.total_count;
        }
        let per_search = total / args.iterations.max(1) as u32;
        info!("{label:>20}: {matched:>7} matches, {per_search:?} per search");
    }

    Ok(())
}
