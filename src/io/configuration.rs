//! Solver constants and runtime configuration defaults

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Default values for configurable parameters
/// Fixed seed for reproducible scrambling
pub const DEFAULT_SEED: u64 = 42;

/// Default pause after each working-tile change, in milliseconds
pub const DEFAULT_STEP_DELAY_MS: u64 = 0;

// Puzzle file settings
/// Extension of puzzle files picked up from a directory
pub const PUZZLE_EXTENSION: &str = "txt";
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_solved";
/// Lines starting with this character are ignored when parsing
pub const COMMENT_PREFIX: char = '#';
/// Header line written above a solved grid
pub const SOLVED_HEADER: &str = "# solved";
/// Header line written above a grid the solver gave up on
pub const UNSOLVED_HEADER: &str = "# unsolved";

/// Box-drawing glyph for every side mask (bit 0 top, 1 right, 2 bottom, 3 left)
pub const TILE_GLYPHS: [char; 16] = [
    '·', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '┼',
];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
