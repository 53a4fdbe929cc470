//! Tests for command-line parsing and batch puzzle processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use looptile::io::cli::{Cli, FileProcessor, output_path};
    use looptile::io::configuration::{DEFAULT_SEED, SOLVED_HEADER, UNSOLVED_HEADER};
    use looptile::io::puzzle::load_puzzle;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::Duration;
    use tempfile::TempDir;

    fn quiet_cli(target: &Path, extra: &[&str]) -> Cli {
        let mut args = vec!["looptile".to_string(), target.display().to_string()];
        args.push("--quiet".to_string());
        args.extend(extra.iter().map(ToString::to_string));
        Cli::parse_from(args)
    }

    // Tests CLI parsing with only the required target argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["looptile", "level.txt"]);

        assert_eq!(cli.target, PathBuf::from("level.txt"));
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.max_nodes, None);
        assert!(!cli.scramble);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Tests CLI parsing with all available arguments
    // Verified by renaming the long flags
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "looptile",
            "levels",
            "--seed",
            "7",
            "--scramble",
            "--quiet",
            "--no-skip",
            "--print",
            "--delay-ms",
            "3",
            "--max-nodes",
            "500",
        ]);

        assert_eq!(cli.seed, 7);
        assert!(cli.scramble);
        assert!(!cli.should_show_progress());
        assert!(!cli.skip_existing());
        assert!(cli.print);

        let config = cli.solver_config().unwrap();
        assert_eq!(config.step_delay, Duration::from_millis(3));
        assert_eq!(config.max_search_nodes, Some(500));
    }

    // Tests short flag parsing
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["looptile", "level.txt", "-s", "9", "-r", "-m", "10"]);
        assert_eq!(cli.seed, 9);
        assert!(cli.scramble);
        assert_eq!(cli.max_nodes, Some(10));
    }

    // Tests a zero search budget is rejected
    // Verified by accepting a zero budget
    #[test]
    fn test_zero_budget_rejected() {
        let cli = Cli::parse_from(["looptile", "level.txt", "--max-nodes", "0"]);
        assert!(cli.solver_config().is_err());
    }

    // Tests output files sit beside the input with the solved suffix
    // Verified by keeping the input name
    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("puzzles/level.txt")),
            PathBuf::from("puzzles/level_solved.txt")
        );
    }

    // Tests error handling for missing targets and non-puzzle files
    // Verified by removing target validation
    #[test]
    fn test_invalid_targets() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");
        assert!(FileProcessor::new(quiet_cli(&missing, &[])).process().is_err());

        let image = temp_dir.path().join("level.png");
        fs::write(&image, "not a puzzle").unwrap();
        assert!(FileProcessor::new(quiet_cli(&image, &[])).process().is_err());
    }

    // Tests a single puzzle file is solved and written with a solved header
    // Verified by skipping the output write
    #[test]
    fn test_process_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("square.txt");
        fs::write(&input, "3c\n96\n").unwrap();

        let mut processor = FileProcessor::new(quiet_cli(&input, &[]));
        processor.process().unwrap();

        let output = temp_dir.path().join("square_solved.txt");
        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with(SOLVED_HEADER));
        assert_eq!(load_puzzle(&output).unwrap().to_string(), "┌┐\n└┘\n");
        assert_eq!(processor.outcomes().len(), 1);
        assert!(processor.outcomes().iter().all(|outcome| outcome.solved));
    }

    // Tests unsolvable puzzles are written with an unsolved header, not an error
    // Verified by returning an error for unsolved puzzles
    #[test]
    fn test_process_unsolvable_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("broken.txt");
        fs::write(&input, "15\n").unwrap();

        let mut processor = FileProcessor::new(quiet_cli(&input, &[]));
        processor.process().unwrap();

        let text = fs::read_to_string(temp_dir.path().join("broken_solved.txt")).unwrap();
        assert!(text.starts_with(UNSOLVED_HEADER));
        assert!(!processor.outcomes().iter().any(|outcome| outcome.solved));
    }

    // Tests directories are scanned in order, skipping outputs and other files
    // Verified by processing previous outputs as puzzles
    #[test]
    fn test_process_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "28\n").unwrap();
        fs::write(temp_dir.path().join("a.txt"), "0\n").unwrap();
        fs::write(temp_dir.path().join("notes.md"), "ignored").unwrap();

        let mut processor = FileProcessor::new(quiet_cli(temp_dir.path(), &[]));
        processor.process().unwrap();
        let names: Vec<_> = processor
            .outcomes()
            .iter()
            .filter_map(|outcome| outcome.input.file_name())
            .collect();
        assert_eq!(names, ["a.txt", "b.txt"]);

        let mut rerun = FileProcessor::new(quiet_cli(temp_dir.path(), &[]));
        rerun.process().unwrap();
        assert!(rerun.outcomes().is_empty());

        let mut forced = FileProcessor::new(quiet_cli(temp_dir.path(), &["--no-skip"]));
        forced.process().unwrap();
        assert_eq!(forced.outcomes().len(), 2);
    }

    // Tests scrambled puzzles are still solved
    // Verified by scrambling after solving
    #[test]
    fn test_process_scrambled() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("ring.txt");
        fs::write(&input, "6ac\n505\n3a9\n").unwrap();

        let mut processor = FileProcessor::new(quiet_cli(&input, &["--scramble", "--seed", "5"]));
        processor.process().unwrap();
        assert!(processor.outcomes().iter().all(|outcome| outcome.solved));
    }
}
