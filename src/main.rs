use acmatch::output::{self, PatternLabel};
use acmatch::scan::{ScanOptions, ScanSummary, Scanner, WalkOptions, collect_files};
use acmatch::utils::{AppConfig, get_config_path, load_patterns, progress};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use termcolor::{ColorChoice, StandardStream};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "ACMATCH_LOG";

#[derive(Parser)]
#[command(name = "acmatch")]
#[command(about = "Find every occurrence of many patterns in one pass")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Search files or stdin for the given patterns
    Scan(ScanArgs),
    /// Build the automaton and show its size
    Stats {
        #[command(flatten)]
        patterns: PatternArgs,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or initialize the configuration file
    Config {
        /// Write a default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
struct PatternArgs {
    /// A pattern to search for (repeatable)
    #[arg(short = 'e', long = "pattern", value_name = "PATTERN")]
    patterns: Vec<String>,

    /// Read patterns from a file, one per line
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct ScanArgs {
    #[command(flatten)]
    patterns: PatternArgs,

    /// Files or directories to scan (stdin when omitted)
    paths: Vec<PathBuf>,

    /// Report pattern identifiers instead of pattern text
    #[arg(long)]
    ids: bool,

    /// Print one JSON object per match
    #[arg(long, conflicts_with = "count")]
    json: bool,

    /// Print the number of matches per pattern
    #[arg(short, long)]
    count: bool,

    /// When to use colors
    #[arg(long, value_enum, value_name = "WHEN")]
    color: Option<ColorWhen>,

    /// Only scan files matching this glob (repeatable)
    #[arg(short = 'g', long = "glob", value_name = "GLOB")]
    globs: Vec<String>,

    /// Scan hidden files and directories
    #[arg(long)]
    hidden: bool,

    /// Number of worker threads
    #[arg(short = 'j', long = "threads", value_name = "N")]
    threads: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl ScanArgs {
    /// Overlay command-line flags on the loaded config
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if self.ids {
            config.report_pattern_ids = true;
        }
        if self.hidden {
            config.hidden = true;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        config
    }

    fn color_choice(&self, config: &AppConfig) -> ColorChoice {
        match self.color {
            Some(ColorWhen::Always) => ColorChoice::Always,
            Some(ColorWhen::Never) => ColorChoice::Never,
            Some(ColorWhen::Auto) => auto_color(),
            None if config.color => auto_color(),
            None => ColorChoice::Never,
        }
    }
}

/// termcolor's `Auto` does not look at whether stdout is a terminal
fn auto_color() -> ColorChoice {
    if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("acmatch: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Run a command. `Ok(false)` means it succeeded but found nothing
fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Scan(args) => scan(args),
        Commands::Stats { patterns, json } => {
            show_stats(&patterns, json)?;
            Ok(true)
        }
        Commands::Config { init } => {
            show_config(init)?;
            Ok(true)
        }
    }
}

fn scan(args: ScanArgs) -> Result<bool> {
    let config = args.apply(AppConfig::load()?);
    let patterns = load_patterns(&args.patterns.patterns, args.patterns.file.as_deref())?;
    let automaton = acmatch::build(&patterns).context("Failed to build automaton")?;
    let scanner = Scanner::new(&automaton, ScanOptions::from(&config));

    let reports = if args.paths.is_empty() {
        vec![scanner.scan_reader(Path::new("<stdin>"), io::stdin().lock())?]
    } else {
        let spinner = progress::scan_spinner(io::stderr().is_terminal());
        let walk = WalkOptions {
            hidden: config.hidden,
            globs: args.globs.clone(),
        };
        let files = collect_files(&args.paths, &walk)?;
        let reports = scanner.scan_files(&files)?;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        reports
    };

    let summary = ScanSummary::from_reports(&reports);
    debug!(?summary, "scan complete");
    if summary.files_unreadable > 0 {
        eprintln!("({} files could not be read)", summary.files_unreadable);
    }

    let label = if config.report_pattern_ids {
        PatternLabel::Id
    } else {
        PatternLabel::Text
    };

    if args.json {
        let mut stdout = io::stdout().lock();
        output::print_json(&mut stdout, &automaton, &reports)?;
        stdout.flush()?;
    } else {
        let mut stdout = StandardStream::stdout(args.color_choice(&config));
        if args.count {
            output::print_counts(&mut stdout, &automaton, &reports, label)?;
        } else {
            output::print_matches(&mut stdout, &automaton, &reports, label)?;
        }
    }

    Ok(summary.matches > 0)
}

fn show_stats(args: &PatternArgs, json: bool) -> Result<()> {
    let patterns = load_patterns(&args.patterns, args.file.as_deref())?;
    let automaton = acmatch::build(&patterns).context("Failed to build automaton")?;
    let stats = automaton.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Automaton Statistics");
    println!("====================");
    println!();
    println!("Patterns:         {}", stats.patterns);
    println!("States:           {}", stats.states);
    println!("Alphabet size:    {}", stats.alphabet_len);
    println!(
        "Table cells:      {} ({} filled)",
        stats.table_cells, stats.filled_cells
    );
    println!("Output entries:   {}", stats.output_entries);
    println!("Largest output:   {}", stats.max_outputs);
    println!("Longest pattern:  {} bytes", stats.max_pattern_len);
    println!("Memory (approx):  {}", format_size(stats.memory_bytes as u64));

    Ok(())
}

fn show_config(init: bool) -> Result<()> {
    let path = get_config_path()?;

    if init {
        if path.exists() {
            println!("Config already exists: {}", path.display());
        } else {
            AppConfig::default().save_to(&path)?;
            println!("Wrote default config: {}", path.display());
        }
        return Ok(());
    }

    let config = AppConfig::load_from(&path)?;
    let status = if path.exists() { "" } else { " [not created, using defaults]" };
    println!("Config file: {}{}", path.display(), status);
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
