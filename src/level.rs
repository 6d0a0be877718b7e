//! Level layouts: grids of symbols rendered through the sprite loader
//!
//! Level data comes in two shapes: a JSON array (of rows of one-symbol
//! strings, or of row strings), or plain text where each line is a row and
//! each character a cell.

use serde::Deserialize;

use crate::loader::SpriteLoader;
use crate::surface::{Rect, Surface};

/// A parsed level grid. Rows may have different lengths.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Level {
    rows: Vec<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonLevel {
    Cells(Vec<Vec<String>>),
    Rows(Vec<String>),
}

impl Level {
    /// Parse level data, trying JSON first and falling back to text rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprite_loader::level::Level;
    ///
    /// let text = Level::parse("..P\nPPP");
    /// let json = Level::parse(r#"[[".", ".", "P"], ["P", "P", "P"]]"#);
    /// assert_eq!(text, json);
    /// assert_eq!(text.width(), 3);
    /// assert_eq!(text.height(), 2);
    /// ```
    pub fn parse(data: &str) -> Self {
        match serde_json::from_str::<JsonLevel>(data) {
            Ok(JsonLevel::Cells(rows)) => Self { rows },
            Ok(JsonLevel::Rows(rows)) => Self::from_lines(rows.iter().map(String::as_str)),
            Err(_) => Self::from_lines(data.trim().lines()),
        }
    }

    fn from_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Self {
        let rows: Vec<Vec<String>> = lines
            .map(|line| line.chars().map(String::from).collect())
            .collect();
        // A single blank row is an empty level
        if rows.len() == 1 && rows[0].is_empty() {
            return Self::default();
        }
        Self { rows }
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Iterate `(column, row, symbol)` over every cell.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(column, symbol)| (column, row, symbol.as_str()))
        })
    }
}

/// Draw every mapped cell of `level` as a `tile_size` square.
///
/// Cells whose symbol has no sprite type are left untouched, as are cells
/// whose origin does not fit the surface coordinate range. Returns the number
/// of cells drawn.
pub fn render_level<F, S: Surface + ?Sized>(
    loader: &SpriteLoader<F>,
    surface: &mut S,
    level: &Level,
    tile_size: u32,
) -> usize {
    let mut drawn = 0;
    for (column, row, symbol) in level.cells() {
        let Some(sprite_type) = loader.sprite_type_for_symbol(symbol) else {
            continue;
        };
        let (Some(x), Some(y)) = (tile_origin(column, tile_size), tile_origin(row, tile_size)) else {
            continue;
        };
        loader.render_sprite(surface, sprite_type, Rect::new(x, y, tile_size, tile_size));
        drawn += 1;
    }
    drawn
}

/// Pixel offset of the `index`-th tile, if it fits in surface coordinates.
fn tile_origin(index: usize, tile_size: u32) -> Option<i32> {
    let offset = u64::try_from(index).ok()?.checked_mul(u64::from(tile_size))?;
    i32::try_from(offset).ok()
}
