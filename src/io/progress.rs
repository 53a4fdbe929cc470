//! Multi-file progress tracking with automatic batching for large sets

use crate::algorithm::events::{SolveEvent, SolveObserver};
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use crate::spatial::grid::Grid;
use bitvec::prelude::*;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Display state of one file: name, solved tiles, total tiles
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct FileState {
    name: String,
    solved: usize,
    total: usize,
}

/// Coordinates progress display for batch operations
///
/// Automatically switches between individual progress bars (for small batches)
/// and a single batch progress bar (for large batches) based on file count
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_count: usize,
    file_states: Vec<FileState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Puzzles: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_count: 0,
            file_states: Vec::new(),
        }
    }

    /// Create a progress manager that draws nothing, for tests and piped output
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            ..Self::new()
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of files announced by [`Self::initialize`]
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Configure progress for a new puzzle with `total_tiles` tiles
    pub fn start_file(&mut self, index: usize, path: &Path, total_tiles: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, FileState::default());
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = FileState {
                name,
                solved: 0,
                total: total_tiles,
            };
        }
        self.update_bars();
    }

    /// Report how many tiles of a file are currently solved
    pub fn update_solved(&mut self, index: usize, solved: usize) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.solved = solved;
        }
        self.update_bars();
    }

    /// Solved and total tile counts last reported for a file
    pub fn file_progress(&self, index: usize) -> Option<(usize, usize)> {
        self.file_states
            .get(index)
            .map(|state| (state.solved, state.total))
    }

    /// Mark file as completed and update batch progress
    pub fn complete_file(&mut self, index: usize, solved: bool, _elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            let mark = if solved { '✓' } else { '✗' };
            state.name = format!("{mark} {}", state.name);
        }
        self.update_bars();
    }

    /// Observer that feeds solve events of file `index` into this manager
    pub fn observer(&mut self, index: usize, grid: &Grid) -> SolveProgress<'_> {
        SolveProgress::new(self, index, grid)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All puzzles processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N active files
    fn update_bars(&self) {
        let active_files: Vec<&FileState> = self
            .file_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();

        let start_idx = active_files
            .len()
            .saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible_files = active_files.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, state) in visible_files.iter().enumerate() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(state.total as u64);
                bar.set_position(state.solved as u64);
                let width = state.total.to_string().len();
                bar.set_message(format!("{:>width$}/{}", state.solved, state.total));
                bar.set_prefix(state.name.clone());
            }
        }

        for bar_idx in visible_files.len()..self.file_bars.len() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}

/// Solve observer that tracks which tiles are solved and reports the count
pub struct SolveProgress<'a> {
    manager: &'a mut ProgressManager,
    index: usize,
    solved_tiles: BitVec,
    solved: usize,
}

impl<'a> SolveProgress<'a> {
    /// Start tracking a puzzle, counting tiles already solved in `grid`
    pub fn new(manager: &'a mut ProgressManager, index: usize, grid: &Grid) -> Self {
        let solved_tiles: BitVec = grid.tiles().map(|tile| tile.is_solved()).collect();
        let solved = solved_tiles.count_ones();
        manager.update_solved(index, solved);

        Self {
            manager,
            index,
            solved_tiles,
            solved,
        }
    }

    /// Number of tiles currently known to be solved
    pub const fn solved(&self) -> usize {
        self.solved
    }
}

impl SolveObserver for SolveProgress<'_> {
    fn on_event(&mut self, grid: &Grid, event: SolveEvent) {
        let SolveEvent::TileChanged { position, tile } = event else {
            return;
        };
        let Some(index) = grid.index_of(position) else {
            return;
        };
        let Some(mut bit) = self.solved_tiles.get_mut(index) else {
            return;
        };
        if *bit == tile.is_solved() {
            return;
        }

        *bit = tile.is_solved();
        if tile.is_solved() {
            self.solved += 1;
        } else {
            self.solved = self.solved.saturating_sub(1);
        }
        self.manager.update_solved(self.index, self.solved);
    }
}
