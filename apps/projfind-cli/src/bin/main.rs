use std::env;
use std::path::PathBuf;

use projfind_cli::{init_tracing, open_store};
use projfind_core::config::{Config, BANNER_KEY};
use projfind_core::ingest::CsvIngestor;
use projfind_core::traits::{CorpusStore, SettingsStore};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() { eprintln!("Usage: {} <ingest|banner|stats> [args...]", prog); std::process::exit(1); }
    let cmd = args.remove(0);
    (cmd, args)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let base = env::current_dir()?;
    let (cmd, args) = parse_args();
    let store = open_store(&settings, &base)?;
    match cmd.as_str() {
        "ingest" => {
            let Some(path) = args.first().map(PathBuf::from) else {
                eprintln!("Usage: projfind ingest <file.csv|dir>"); std::process::exit(1)
            };
            println!("Ingesting from {}", path.display());
            let records = CsvIngestor::new().process_path(&path)?;
            let inserted = store.insert(&records)?;
            println!("✅ Ingest complete ({} records, {} in corpus)", inserted, store.count()?);
        }
        "banner" => {
            if args.is_empty() {
                println!("{}", store.get(BANNER_KEY)?.unwrap_or_default());
            } else {
                let text = args.join(" ");
                store.set(BANNER_KEY, text.trim())?;
                println!("✅ Banner updated");
            }
        }
        "stats" => {
            println!("Projects: {}", store.count()?);
            println!("Years: {}", store.years()?.join(", "));
        }
        _ => { eprintln!("Unknown command: {}", cmd); std::process::exit(1); }
    }
    Ok(())
}
