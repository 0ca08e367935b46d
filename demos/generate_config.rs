//! Generate a default configuration file
//!
//! Creates a JSON config with every default parameter spelled out

use colorfactor::EngineConfig;
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} config/colorfactor.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = EngineConfig::default();

    match config.to_json_file(output_path) {
        Ok(_) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!(
                "  Token output: {:?}, source mode {}",
                config.token.kind,
                config
                    .token
                    .src_mode
                    .map_or_else(|| "inferred".to_string(), |m| m.to_string())
            );
            eprintln!(
                "  Sort: {:?} in {} against {}",
                config.sort.order,
                config.sort.colorspace,
                config.sort.against.describe()
            );
            eprintln!(
                "  Distribute: {:?}, exclude self {}, exclude achromatic {}",
                config.distribute.extremum,
                config.distribute.exclude_self,
                config.distribute.exclude_achromatic
            );
            eprintln!(
                "  Luminance search: epsilon {:e}, {} iterations",
                config.distribute.search.epsilon, config.distribute.search.max_iterations
            );
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
