//! Command-line interface for batch solving puzzle files

use crate::algorithm::events::{NoopObserver, SolveObserver};
use crate::algorithm::executor::{SolveStatistics, Solver, SolverConfig};
use crate::io::configuration::{DEFAULT_SEED, DEFAULT_STEP_DELAY_MS, OUTPUT_SUFFIX, PUZZLE_EXTENSION};
use crate::io::error::{Result, WithContext, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::puzzle::{load_puzzle, save_puzzle};
use crate::spatial::grid::Grid;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "looptile")]
#[command(
    author,
    version,
    about = "Solve rotation-based connector tile puzzles"
)]
/// Command-line arguments for the puzzle solver
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Puzzle file or directory of puzzle files to solve
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed used when scrambling
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Rotate every tile randomly before solving
    #[arg(short = 'r', long)]
    pub scramble: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Print each resulting grid to stdout
    #[arg(short, long)]
    pub print: bool,

    /// Pause in milliseconds whenever the solver moves to another tile
    #[arg(short, long, default_value_t = DEFAULT_STEP_DELAY_MS)]
    pub delay_ms: u64,

    /// Give up searching after this many backtracking nodes
    #[arg(short, long)]
    pub max_nodes: Option<usize>,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Solver configuration described by the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if `--max-nodes` is zero
    pub fn solver_config(&self) -> Result<SolverConfig> {
        if self.max_nodes == Some(0) {
            return Err(invalid_parameter(
                "max-nodes",
                &0,
                &"search budget must be positive",
            ));
        }
        Ok(SolverConfig {
            step_delay: Duration::from_millis(self.delay_ms),
            max_search_nodes: self.max_nodes,
        })
    }
}

/// Result of solving one puzzle file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileOutcome {
    /// Puzzle that was read
    pub input: PathBuf,
    /// File the result was written to
    pub output: PathBuf,
    /// Whether the puzzle was solved
    pub solved: bool,
    /// Solver counters for this puzzle
    pub statistics: SolveStatistics,
}

/// Orchestrates batch solving of puzzle files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
    outcomes: Vec<FileOutcome>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
            outcomes: Vec::new(),
        }
    }

    /// Outcomes of every file processed so far
    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// Process files according to CLI arguments
    ///
    /// An unsolvable puzzle is not an error; its output is written with an
    /// unsolved header.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, parsing or file writing fails
    pub fn process(&mut self) -> Result<()> {
        let config = self.cli.solver_config()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, config)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        if target.is_file() {
            if !is_puzzle_file(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"puzzle files must have a .txt extension",
                ));
            }
            return Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            });
        }

        if !target.is_dir() {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a puzzle file or directory",
            ));
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(target).with_operation(target, "list directory")? {
            let path = entry.with_operation(target, "list directory")?.path();
            if is_puzzle_file(&path) && !is_output_file(&path) && self.should_process_file(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = output_path(input_path);
        if output_path.exists() {
            warn!(input = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize, config: SolverConfig) -> Result<()> {
        let start_time = Instant::now();
        let output_path = output_path(input_path);

        let mut grid = load_puzzle(input_path)?;
        if self.cli.scramble {
            let mut rng = StdRng::seed_from_u64(self.cli.seed.wrapping_add(index as u64));
            grid.scramble(&mut rng);
        }

        let (solved, statistics) = if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, grid.total());
            let observer = pm.observer(index, &grid);
            run_solver(&mut grid, observer, config)
        } else {
            run_solver(&mut grid, NoopObserver, config)
        };

        save_puzzle(&grid, solved, &output_path)?;
        self.print_grid(&grid);

        if solved {
            info!(
                input = %input_path.display(),
                rotations = statistics.rotations,
                search_nodes = statistics.search_nodes,
                "solved"
            );
        } else {
            warn!(
                input = %input_path.display(),
                budget_exhausted = statistics.budget_exhausted,
                "puzzle could not be solved"
            );
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, solved, start_time.elapsed());
        }

        self.outcomes.push(FileOutcome {
            input: input_path.to_path_buf(),
            output: output_path,
            solved,
            statistics,
        });
        Ok(())
    }

    // Printing the grid is the point of --print
    #[allow(clippy::print_stdout)]
    fn print_grid(&self, grid: &Grid) {
        if self.cli.print {
            println!("{grid}");
        }
    }
}

fn run_solver<O: SolveObserver>(
    grid: &mut Grid,
    observer: O,
    config: SolverConfig,
) -> (bool, SolveStatistics) {
    let mut solver = Solver::with_observer(grid, observer).with_config(config);
    let solved = solver.solve();
    (solved, *solver.statistics())
}

fn is_puzzle_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(PUZZLE_EXTENSION)
}

fn is_output_file(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

/// Path a puzzle's result is written to: `<stem>_solved.txt` beside the input
pub fn output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        PUZZLE_EXTENSION
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
