use std::{
    fs,
    io::{self, IsTerminal, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use owo_colors::OwoColorize;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use unbrace_core::{CloserPolicy, Config, ConfigError, Scan, offset_to_location, render_snippet};

/// Config file picked up from the working directory when `--config` is absent.
const CONFIG_FILE: &str = "unbrace.toml";

/// Counts closing characters that have no matching open brace
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "unbrace", version, about)]
struct Args {
    /// Files to scan (reads from stdin if none provided)
    #[arg(conflicts_with = "literal")]
    files: Vec<PathBuf>,

    /// Read from stdin
    #[arg(long, conflicts_with_all = ["literal", "files"])]
    stdin: bool,

    /// Scan the given text instead of a file
    #[arg(long, value_name = "TEXT")]
    literal: Option<String>,

    /// Path to a TOML config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Which characters count as closers
    #[arg(long, value_enum)]
    closers: Option<CloserPolicy>,

    /// Only the close symbol counts as a closer (same as `--closers brace`)
    #[arg(long, conflicts_with = "closers")]
    strict: bool,

    /// Exit with status 1 if any input has an unmatched closer
    #[arg(long)]
    check: bool,

    /// Print each matching step instead of the count
    #[arg(long)]
    trace: bool,

    /// Increase log verbosity (overridden by `UNBRACE_LOG`)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Where a piece of text came from.
enum Input {
    Stdin,
    Literal(String),
    File(PathBuf),
}

impl Input {
    fn label(&self) -> String {
        match self {
            Self::Stdin => "stdin".to_string(),
            Self::Literal(_) => "literal".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<String, Error> {
        match self {
            Self::Stdin => {
                let mut source = String::new();
                io::stdin().read_to_string(&mut source)?;
                Ok(source)
            }
            Self::Literal(text) => Ok(text.clone()),
            Self::File(path) => fs::read_to_string(path).map_err(|source| Error::Read {
                path: path.clone(),
                source,
            }),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let inputs = collect_inputs(&args);
    let show_labels = inputs.len() > 1;
    let mut any_unmatched = false;
    let mut any_error = false;

    for input in &inputs {
        match process(input, &config, &args, show_labels) {
            Ok(scan) => {
                if !scan.is_clean() {
                    any_unmatched = true;
                }
            }
            Err(e) => {
                eprintln!("error: {e}");
                any_error = true;
            }
        }
    }

    if any_error {
        return ExitCode::from(2);
    }
    if args.check && any_unmatched {
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("UNBRACE_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(args: &Args) -> Result<Config, Error> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None if Path::new(CONFIG_FILE).is_file() => read_config(Path::new(CONFIG_FILE))?,
        None => Config::default(),
    };

    if args.strict {
        config.closers = CloserPolicy::Brace;
    } else if let Some(closers) = args.closers {
        config.closers = closers;
    }

    debug!(?config, "configuration loaded");
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config, Error> {
    info!(path = %path.display(), "reading config");
    let source = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_toml_str(&source).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn collect_inputs(args: &Args) -> Vec<Input> {
    if let Some(text) = &args.literal {
        return vec![Input::Literal(text.clone())];
    }
    if args.stdin || args.files.is_empty() {
        return vec![Input::Stdin];
    }
    args.files.iter().cloned().map(Input::File).collect()
}

fn process(input: &Input, config: &Config, args: &Args, show_label: bool) -> Result<Scan, Error> {
    let label = input.label();
    let source = input.read()?;
    let scan = unbrace_core::scan(&source, config);
    info!(input = %label, unmatched = scan.unmatched_closers, "scanned");

    if args.trace {
        if show_label {
            println!("{label}:");
        }
        println!("{}", unbrace_core::trace(&source, config));
    } else if show_label {
        println!("{label}: {}", scan.unmatched_closers);
    } else {
        println!("{}", scan.unmatched_closers);
    }

    if args.check {
        report_unmatched(&label, &source, &scan);
    }

    Ok(scan)
}

fn report_unmatched(label: &str, source: &str, scan: &Scan) {
    let Some(offset) = scan.first_unmatched else {
        return;
    };

    let location = offset_to_location(source, offset);
    let message = format!("{} unmatched closer(s), first here", scan.unmatched_closers);
    let snippet = render_snippet(source, location, &message);

    if io::stderr().is_terminal() {
        eprintln!("{}:{snippet}", label.red().bold());
    } else {
        eprintln!("{label}:{snippet}");
    }
}

#[derive(Debug, Error)]
enum Error {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{}: {source}", .path.display())]
    Config { path: PathBuf, source: ConfigError },
}
