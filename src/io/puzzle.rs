//! Plain-text puzzle format
//!
//! One grid row per line, one character per tile. A tile is either the hex
//! digit of its side mask (bit 0 top, bit 1 right, bit 2 bottom, bit 3 left)
//! or the matching box-drawing glyph. `.` and `·` also denote an empty tile.
//! Blank lines and lines starting with `#` are ignored.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::io::configuration::{COMMENT_PREFIX, SOLVED_HEADER, TILE_GLYPHS, UNSOLVED_HEADER};
use crate::io::error::{Result, WithContext, invalid_puzzle};
use crate::spatial::grid::Grid;
use crate::spatial::tiles::Tile;

/// Decode one tile character
pub fn parse_tile(glyph: char) -> Option<Tile> {
    if glyph == '.' {
        return Some(Tile::empty());
    }
    if let Some(mask) = glyph.to_digit(16) {
        return u8::try_from(mask).ok().map(Tile::from_mask);
    }
    TILE_GLYPHS
        .iter()
        .position(|&candidate| candidate == glyph)
        .and_then(|mask| u8::try_from(mask).ok())
        .map(Tile::from_mask)
}

/// Parse puzzle text into a grid of unsolved tiles
///
/// # Errors
///
/// Returns an error if a character isn't a tile, rows differ in length, or
/// the resulting dimensions are invalid
pub fn parse_puzzle(text: &str) -> Result<Grid> {
    let mut tiles = Vec::new();
    let mut width = None;
    let mut height = 0;

    for (number, line) in text.lines().enumerate() {
        let line_number = number + 1;
        let row = line.trim();
        if row.is_empty() || row.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let mut count = 0;
        for glyph in row.chars() {
            let tile = parse_tile(glyph).ok_or_else(|| {
                invalid_puzzle(line_number, &format!("unrecognised tile '{glyph}'"))
            })?;
            tiles.push(tile);
            count += 1;
        }

        match width {
            None => width = Some(count),
            Some(expected) if expected != count => {
                return Err(invalid_puzzle(
                    line_number,
                    &format!("expected {expected} tiles, found {count}"),
                ));
            }
            Some(_) => {}
        }
        height += 1;
    }

    let width = width.unwrap_or(0);
    debug!(width, height, "parsed puzzle");
    Grid::from_tiles(width, height, tiles)
}

/// Render a grid as puzzle text, headed by whether it was solved
pub fn format_puzzle(grid: &Grid, solved: bool) -> String {
    let header = if solved { SOLVED_HEADER } else { UNSOLVED_HEADER };
    let mut text = String::with_capacity(header.len() + grid.total() + grid.height() + 1);
    text.push_str(header);
    text.push('\n');

    for (index, tile) in grid.tiles().enumerate() {
        let _ = write!(text, "{:x}", tile.mask());
        if (index + 1) % grid.width() == 0 {
            text.push('\n');
        }
    }
    text
}

/// Read and parse a puzzle file
///
/// # Errors
///
/// Returns an error if the file can't be read or doesn't parse
pub fn load_puzzle(path: &Path) -> Result<Grid> {
    let text = fs::read_to_string(path).with_operation(path, "read puzzle")?;
    parse_puzzle(&text).with_path(path)
}

/// Write a grid to a puzzle file
///
/// # Errors
///
/// Returns an error if the file can't be written
pub fn save_puzzle(grid: &Grid, solved: bool, path: &Path) -> Result<()> {
    fs::write(path, format_puzzle(grid, solved)).with_operation(path, "write puzzle")
}
