use std::io::{BufRead, Write};

use bookscape::{
    configuration::get_configuration,
    domain::book::{to_csv, BookRecord},
    services::{collect_books, CatalogClient, RECORD_CAP},
};
use env_logger::Env;

const OUTPUT_PATH: &str = "dataset/books_data.csv";

/// Interactive batch extraction: prompts for search queries until the
/// record cap is filled across queries, then writes one CSV.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");
    if configuration.catalog.api_key.is_empty() {
        panic!("Catalog API key is missing. Set BOOKSCAPE_CATALOG__API_KEY.");
    }
    let client = CatalogClient::new(configuration.catalog.api_key);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut all_books: Vec<BookRecord> = Vec::new();

    while all_books.len() < RECORD_CAP {
        print!(
            "Enter book search query (collected {}/{} records): ",
            all_books.len(),
            RECORD_CAP
        );
        std::io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        let books = collect_books(&client, query, RECORD_CAP - all_books.len()).await;
        match books.len() {
            0 => println!("No records collected for '{}'.", query),
            n => println!("Collected {} records for '{}'.", n, query),
        }
        all_books.extend(books);
    }

    std::fs::create_dir_all("dataset")?;
    std::fs::write(OUTPUT_PATH, to_csv(&all_books))?;
    println!("Data saved to {}", OUTPUT_PATH);

    Ok(())
}
