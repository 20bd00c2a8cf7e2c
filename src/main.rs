// minic: lexical and syntactic front end for a toy C dialect

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser as _;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use minic::analyze;
use minic::parser::lexer::Scan;

/// Scan and parse toy-C source files
#[derive(Debug, clap::Parser)]
#[command(name = "minic", version, about)]
struct Cli {
    /// Source files, or directories whose `.c` files are processed in name order
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// List every token with its category and position
    #[arg(long)]
    tokens: bool,

    /// Print the identifier occurrence table
    #[arg(long)]
    symbols: bool,

    /// Print the syntax tree of files that parsed without errors
    #[arg(long)]
    ast: bool,

    /// Raise log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum DriverError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no .c files found in {}", .0.display())]
    NoSources(PathBuf),
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let files = collect_sources(&cli.paths)?;
    let mut clean = true;

    for file in &files {
        let source = fs::read_to_string(file).map_err(|source| DriverError::Io {
            path: file.clone(),
            source,
        })?;
        clean &= process_file(file, &source, &cli);
    }

    Ok(if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Expand directories into their `.c` files, sorted by path
fn collect_sources(paths: &[PathBuf]) -> Result<Vec<PathBuf>, DriverError> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let entries = fs::read_dir(path).map_err(|source| DriverError::Io {
            path: path.clone(),
            source,
        })?;
        let mut found: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_c_source(p))
            .collect();
        if found.is_empty() {
            return Err(DriverError::NoSources(path.clone()));
        }
        found.sort();
        files.extend(found);
    }

    Ok(files)
}

fn is_c_source(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("c"))
}

/// Run the pipeline on one file; returns true when it had no errors at all.
fn process_file(file: &Path, source: &str, cli: &Cli) -> bool {
    info!(file = %file.display(), bytes = source.len(), "analyzing");
    let analysis = analyze(source);

    for diagnostic in &analysis.scan.diagnostics {
        warn!(file = %file.display(), "{}", diagnostic);
    }

    println!("== {}", file.display());

    if cli.tokens {
        print_tokens(&analysis.scan);
    }
    if cli.symbols {
        print_symbols(&analysis.scan);
    }

    if !analysis.scan.diagnostics.is_empty() {
        println!("{} lexical error(s)", analysis.scan.diagnostics.len());
    }

    if analysis.parsed.is_ok() {
        println!("parse OK");
        if cli.ast {
            print!("{}", analysis.parsed.program.root().outline());
        }
    } else {
        println!("syntax errors:");
        for error in &analysis.parsed.errors {
            println!("  - {}", error);
        }
    }

    analysis.is_clean()
}

fn print_tokens(scan: &Scan) {
    println!(
        "{:<12} {:<24} {:<24} {:<10} {:>5} {:>6}",
        "token", "category", "lexeme", "value", "line", "column"
    );
    for token in &scan.tokens {
        let value = token.literal.map(|v| v.to_string()).unwrap_or_default();
        println!(
            "{:<12} {:<24} {:<24} {:<10} {:>5} {:>6}",
            format!("{:?}", token.kind),
            token.category(),
            format!("{:?}", token.lexeme),
            value,
            token.location.line,
            token.location.column
        );
    }
}

fn print_symbols(scan: &Scan) {
    if scan.identifiers.is_empty() {
        println!("no identifiers");
        return;
    }
    let mut entries: Vec<(&String, &usize)> = scan.identifiers.iter().collect();
    entries.sort();
    println!("{:<24} {:>11}", "identifier", "occurrences");
    for (name, count) in entries {
        println!("{:<24} {:>11}", name, count);
    }
}
