use std::env;

use projfind_cli::{init_tracing, open_store, parse_search_args, render_page};
use projfind_core::config::Config;
use projfind_core::types::SearchRequest;
use projfind_engine::SearchEngine;
use projfind_lexicon::open_dictionary;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <query> [--year YEAR] [--mode exact|smart] [--json]", args[0]);
        eprintln!("Example: {} 'vehicle detection' --year 2023 --mode smart", args[0]);
        std::process::exit(1);
    }
    let config = Config::load()?;
    let settings = config.settings()?;
    let base = env::current_dir()?;
    let search_args = parse_search_args(&args[1..], settings.search.default_mode)?;

    let store = open_store(&settings, &base)?;
    let dictionary = open_dictionary(&settings.lexicon, &base);
    let engine = SearchEngine::from_settings(&settings);
    let request = SearchRequest::new(search_args.query, search_args.year.as_deref(), search_args.mode);
    let page = engine.page(&store, &store, dictionary.as_ref(), &request)?;

    if search_args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", render_page(&page));
    }
    Ok(())
}
