//! Render and level command implementations

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::color::parse_color;
use crate::config::SpritesConfig;
use crate::level::{render_level, Level};
use crate::output::{output_path, save_png};
use crate::surface::{Canvas, Rect};

use super::{block_on, build_loader, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the render command
pub fn run_render(
    config: &SpritesConfig,
    sprite_type: &str,
    output: Option<&Path>,
    width: u32,
    height: u32,
) -> ExitCode {
    if width == 0 || height == 0 {
        eprintln!("Error: --width and --height must be positive");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    let Some(mut canvas) = new_canvas(config, width, height) else {
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    let mut loader = match build_loader(config) {
        Ok(loader) => loader,
        Err(code) => return code,
    };
    match block_on(loader.init()) {
        Ok(true) => {}
        Ok(false) => eprintln!("Warning: sprites failed to load, drawing fallback colors"),
        Err(code) => return code,
    }

    loader.render_sprite(&mut canvas, sprite_type, Rect::new(0, 0, width, height));

    write_canvas(canvas, &output_path(sprite_type, output))
}

/// Execute the level command
pub fn run_level(config: &SpritesConfig, input: &Path, output: Option<&Path>) -> ExitCode {
    let data = match fs::read_to_string(input) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: Cannot read level file '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let level = Level::parse(&data);
    if level.is_empty() {
        eprintln!("Error: Level '{}' is empty", input.display());
        return ExitCode::from(EXIT_ERROR);
    }

    let tile = config.render.tile_size;
    let Some((width, height)) = canvas_size(&level, tile) else {
        eprintln!(
            "Error: Level '{}' ({}x{} tiles of {}px) is too large to render",
            input.display(),
            level.width(),
            level.height(),
            tile
        );
        return ExitCode::from(EXIT_INVALID_ARGS);
    };
    let Some(mut canvas) = new_canvas(config, width, height) else {
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    let mut loader = match build_loader(config) {
        Ok(loader) => loader,
        Err(code) => return code,
    };
    match block_on(loader.init()) {
        Ok(true) => {}
        Ok(false) => eprintln!("Warning: sprites failed to load, drawing fallback colors"),
        Err(code) => return code,
    }

    let drawn = render_level(&loader, &mut canvas, &level, tile);
    if drawn == 0 {
        eprintln!("Warning: no symbol in '{}' is mapped to a sprite type", input.display());
    }

    let name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("level");
    write_canvas(canvas, &output_path(name, output))
}

/// Pixel size of a canvas holding `level`, if it fits in `u32`.
fn canvas_size(level: &Level, tile: u32) -> Option<(u32, u32)> {
    let width = u32::try_from(level.width()).ok()?.checked_mul(tile)?;
    let height = u32::try_from(level.height()).ok()?.checked_mul(tile)?;
    Some((width, height))
}

fn new_canvas(config: &SpritesConfig, width: u32, height: u32) -> Option<Canvas> {
    match parse_color(&config.render.background) {
        Ok(background) => Some(Canvas::with_background(width, height, background)),
        Err(e) => {
            eprintln!("Error: Invalid background color '{}': {}", config.render.background, e);
            None
        }
    }
}

fn write_canvas(canvas: Canvas, path: &Path) -> ExitCode {
    match save_png(canvas.image(), path) {
        Ok(()) => {
            println!("Saved {}", path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: Failed to save '{}': {}", path.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
