//! Summarize a color collection from a JSON file
//!
//! The input is a JSON array or object of colors in any supported shape.
//! An optional second argument points at a configuration file.
//!
//! Usage: cargo run --example collection_report -- <colors.json> [config.json]

use colorfactor::{
    sort_by, stats, Collection, ColorAnalyzer, EngineConfig, RawCollection, TokenNormalizer,
};
use indexmap::IndexMap;
use std::{env, fs, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <colors.json> [config.json]", args[0]);
        process::exit(1);
    }

    let config = match args.get(2) {
        Some(path) => match EngineConfig::from_json_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error loading config file: {}", e);
                process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    let raw: RawCollection = match fs::read_to_string(&args[1])
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()))
    {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error reading {}: {}", args[1], e);
            process::exit(1);
        }
    };

    let normalizer = TokenNormalizer::with_options(config.token.clone());
    let collection = match Collection::parse(&raw, &normalizer) {
        Ok(collection) => collection,
        Err(e) => {
            eprintln!("Error parsing colors: {}", e);
            process::exit(1);
        }
    };
    eprintln!("Loaded {} colors from {}", collection.len(), args[1]);

    let analyzer = ColorAnalyzer::new();
    for token in collection.tokens() {
        eprintln!(
            "  {}  luminance {:.4}  family {}",
            token.to_hex(true),
            analyzer.luminance(token),
            analyzer.family(token).name()
        );
    }
    eprintln!();

    let report = match stats(&collection, None, &config.stats) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error computing stats: {}", e);
            process::exit(1);
        }
    };
    let sorted = match sort_by(&collection, None, &config.sort) {
        Ok(sorted) => sorted,
        Err(e) => {
            eprintln!("Error sorting: {}", e);
            process::exit(1);
        }
    };

    let output = serde_json::json!({
        "stats": report,
        "sorted": sorted
            .into_map()
            .into_iter()
            .map(|(factor, c)| (factor.to_string(), c.to_raw(&normalizer)))
            .collect::<IndexMap<_, _>>(),
    });
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error encoding report: {}", e);
            process::exit(1);
        }
    }
}
