//! Status and lookup command implementations

use std::process::ExitCode;

use crate::config::SpritesConfig;
use crate::loader::LoaderError;

use super::{block_on, build_loader, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the status command
pub fn run_status(config: &SpritesConfig) -> ExitCode {
    let mut loader = match build_loader(config) {
        Ok(loader) => loader,
        Err(code) => return code,
    };

    let result = match block_on(loader.try_init()) {
        Ok(result) => result,
        Err(code) => return code,
    };

    println!("Server: {}", config.server.base_url);

    let mut symbols: Vec<(&String, &String)> = loader.mapping().iter().collect();
    symbols.sort();
    println!("Mapping ({} symbols):", symbols.len());
    for (symbol, sprite_type) in symbols {
        println!("  {:?} -> {}", symbol, sprite_type);
    }

    println!("Sprite types:");
    for sprite_type in loader.sprite_types() {
        let records = loader.sprites_for_type(sprite_type);
        let images = records
            .iter()
            .filter(|record| loader.image(record.id).is_some())
            .count();
        println!(
            "  {}: {} sprite(s), {} image(s) loaded",
            sprite_type,
            records.len(),
            images
        );
        for record in records {
            let name = record.name.as_deref().unwrap_or("-");
            let url = record.image_url().unwrap_or("(no image)");
            println!("    #{} {} {}", record.id, name, url);
        }
    }

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the lookup command
pub fn run_lookup(config: &SpritesConfig, symbol: &str) -> ExitCode {
    let mut loader = match build_loader(config) {
        Ok(loader) => loader,
        Err(code) => return code,
    };

    // Only the mapping matters here; a failed preload still leaves it populated
    match block_on(loader.try_init()) {
        Ok(Ok(())) => {}
        Ok(Err(e @ (LoaderError::Fetch(_) | LoaderError::Parse { .. }))) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
        Ok(Err(e)) => eprintln!("Warning: {}", e),
        Err(code) => return code,
    }

    match loader.sprite_type_for_symbol(symbol) {
        Some(sprite_type) => {
            println!("{}", sprite_type);
            ExitCode::from(EXIT_SUCCESS)
        }
        None => {
            eprintln!("Error: symbol {:?} is not mapped to a sprite type", symbol);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
