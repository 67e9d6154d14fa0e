//! Rebrickable Catalog Demo
//!
//! Looks up a set, its theme, and its most common parts. Demonstrates that
//! repeated lookups are answered from the response cache.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example catalog_demo -- --api-key <your-key> --set-num 75192-1
//! ```

use anyhow::Result;
use clap::Parser;

use rebrick::{Config, PageOptions, Rebrick};

#[derive(Parser, Debug)]
#[command(author, version, about = "Rebrickable Catalog Demo")]
struct Args {
    /// Rebrickable API key
    #[arg(long, env = "REBRICKABLE_API_KEY")]
    api_key: String,

    /// Set number to look up
    #[arg(long, default_value = "75192-1")]
    set_num: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let client = Rebrick::new(Config::new(args.api_key))?;

    let Some(set) = client.lego().get_set(&args.set_num).await? else {
        println!("set {} not found", args.set_num);
        return Ok(());
    };
    println!(
        "{}: {} ({} parts)",
        set.set_num,
        set.name,
        set.num_parts.unwrap_or(0)
    );

    if let Some(theme_id) = set.theme_id {
        if let Some(theme) = client.lego().get_theme(theme_id).await? {
            println!("theme: {}", theme.name);
        }
    }

    let options = PageOptions::builder().page_size(10).ordering("-quantity").build();
    if let Some(parts) = client.lego().get_set_parts(&args.set_num, &options).await? {
        println!("top parts:");
        for row in parts.results {
            println!("  {:>4} x {} in {}", row.quantity, row.part.name, row.color.name);
        }
    }

    // Served from the cache: no second network call for the same set.
    if let Some(set) = client.lego().get_set(&args.set_num).await? {
        println!("(cached) {}", set.name);
    }

    Ok(())
}
