//! Codegrade: source file quality grader CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codegrade::analyzer::AnalysisEngine;
use codegrade::config::{build_ignore_set, is_ignored, load_config, write_starter_config};
use codegrade::reporter::{ConsoleReporter, FileReport, JsonReporter};
use codegrade::LanguageRegistry;
use colored::Colorize;
use globset::GlobSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use walkdir::WalkDir;

/// Codegrade: quality grader for Python and JavaScript source files
#[derive(Parser, Debug)]
#[command(name = "codegrade")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Source files or directories to analyze
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Minimum overall score (exit 1 if any file is below)
    #[arg(long, short, value_parser = clap::value_parser!(u8).range(0..=100))]
    threshold: Option<u8>,

    /// Quiet mode (one line per file)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose logging
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .codegraderc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Analyze files in parallel (default when more than 10 files)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .codegraderc.json with sensible defaults
    Init {
        /// Minimum score threshold (default: 70)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: Option<u8>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Some(Commands::Init { threshold, dir }) = &args.command {
        return run_init(*threshold, dir.as_deref());
    }

    let work_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&work_dir, args.config.as_deref())?.merge_with_cli(args.threshold);
    let ignore_set = build_ignore_set(&config.ignore)?;
    let engine = AnalysisEngine::from_config(&config);

    let files = collect_source_files(&args.paths, engine.registry(), &ignore_set)?;
    if files.is_empty() {
        eprintln!("{}: No supported source files found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }
    debug!(files = files.len(), "collected source files");

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let use_parallel = args.parallel || args.jobs.is_some() || files.len() > 10;
    let (results, had_errors) = if use_parallel {
        analyze_files_parallel(&engine, &files, args.quiet)
    } else {
        analyze_files_sequential(&engine, &files, args.quiet)
    };

    if results.is_empty() {
        return Ok(ExitCode::from(2));
    }

    let single_file = args.paths.len() == 1 && args.paths[0].is_file();
    if args.json {
        let reporter = if args.pretty {
            JsonReporter::new().pretty()
        } else {
            JsonReporter::new()
        };
        match results.as_slice() {
            [only] if single_file => println!("{}", reporter.report(&only.report)),
            _ => println!("{}", reporter.report_many(&results)),
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for result in &results {
            reporter.report_quiet(&result.file, &result.report);
        }
    } else {
        let reporter = ConsoleReporter::new();
        match results.as_slice() {
            [only] => reporter.report(&only.file, &only.report),
            _ => reporter.report_many(&results, config.threshold),
        }
    }

    if had_errors {
        return Ok(ExitCode::from(2));
    }

    if let Some(threshold) = config.threshold {
        let below: Vec<&FileReport> = results
            .iter()
            .filter(|r| r.report.overall_score < threshold)
            .collect();
        if !below.is_empty() {
            if !args.quiet && !args.json {
                for result in below {
                    eprintln!(
                        "{}: {} scored {}, below threshold {}",
                        "Failed".red().bold(),
                        result.file.display(),
                        result.report.overall_score,
                        threshold
                    );
                }
            }
            return Ok(ExitCode::from(1));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_init(threshold: Option<u8>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let path = write_starter_config(dir, threshold)?;
    println!("{}: Created {}", "Done".green().bold(), path.display());
    Ok(ExitCode::SUCCESS)
}

/// Expand the command-line paths into the list of files to analyze.
/// Files named explicitly are kept whatever their extension, so an
/// unsupported file is reported instead of silently skipped.
fn collect_source_files(
    paths: &[PathBuf],
    registry: &LanguageRegistry,
    ignore_set: &GlobSet,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if !is_ignored(path, ignore_set) {
                files.push(path.clone());
            }
            continue;
        }

        if !path.is_dir() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }

        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| registry.supports(p) && !is_ignored(p, ignore_set))
            .collect();
        // Sort for consistent output
        found.sort();
        files.extend(found);
    }

    Ok(files)
}

fn analyze_files_sequential(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    quiet: bool,
) -> (Vec<FileReport>, bool) {
    let mut had_errors = false;
    let results = files
        .iter()
        .filter_map(|file| {
            let result = analyze_one(engine, file, quiet);
            had_errors |= result.is_none();
            result
        })
        .collect();
    (results, had_errors)
}

/// Analyze files in parallel, keeping the input order
fn analyze_files_parallel(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    quiet: bool,
) -> (Vec<FileReport>, bool) {
    use rayon::prelude::*;

    let outcomes: Vec<Option<FileReport>> = files
        .par_iter()
        .map(|file| analyze_one(engine, file, quiet))
        .collect();
    let had_errors = outcomes.iter().any(Option::is_none);
    (outcomes.into_iter().flatten().collect(), had_errors)
}

fn analyze_one(engine: &AnalysisEngine, file: &Path, quiet: bool) -> Option<FileReport> {
    match engine.analyze_file(file) {
        Ok(report) => Some(FileReport {
            file: file.to_path_buf(),
            report,
        }),
        Err(e) => {
            if !quiet {
                eprintln!(
                    "{}: Failed to analyze {}: {:#}",
                    "Error".red(),
                    file.display(),
                    e
                );
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_walks_supported_files_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("a.js"), "let x = 1;\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "hi\n").unwrap();
        fs::create_dir_all(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules").join("dep.js"), "var x;\n").unwrap();

        let ignore = build_ignore_set(&["**/node_modules/**".to_string()]).unwrap();
        let files =
            collect_source_files(&[dir.path().to_path_buf()], &LanguageRegistry::new(), &ignore)
                .unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.js", "b.py"]);
    }

    #[test]
    fn test_collect_keeps_explicit_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("script.rb");
        fs::write(&file, "puts 1\n").unwrap();
        let ignore = build_ignore_set(&[]).unwrap();
        let files =
            collect_source_files(&[file.clone()], &LanguageRegistry::new(), &ignore).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_collect_missing_path() {
        let ignore = build_ignore_set(&[]).unwrap();
        let err = collect_source_files(
            &[PathBuf::from("/definitely/not/here")],
            &LanguageRegistry::new(),
            &ignore,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Path does not exist"));
    }
}
