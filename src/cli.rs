use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use genex::chain::constants::DEFAULT_MAX_STEPS;
use genex::{Chainer, GeneratorConfig, compile};
use log::{info, warn};
use rayon::prelude::*;

const DEFAULT_LIMIT: usize = 100;

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Genex - Generate every string a letter pattern matches
#[derive(Parser, Debug)]
#[command(name = "genex")]
#[command(about = "Generate the strings over A-Z that match a constrained pattern")]
#[command(version)]
pub struct CliArgs {
    /// Patterns to expand
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Only produce matches of exactly this length
    #[arg(short = 'L', long)]
    pub length: Option<usize>,

    /// Maximum number of matches to print or count per pattern
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Print the number of matches instead of the matches themselves
    #[arg(long)]
    pub count: bool,

    /// Print the compiled fragments before generating
    #[arg(long)]
    pub explain: bool,

    /// Search steps allowed while looking for a single match
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: usize,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub patterns: Vec<String>,
    pub length: Option<usize>,
    pub limit: usize,
    pub count: bool,
    pub explain: bool,
    pub generator: GeneratorConfig,
    pub log_level: LogLevel,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            patterns: args.patterns,
            length: args.length,
            limit: args.limit,
            count: args.count,
            explain: args.explain,
            generator: GeneratorConfig {
                max_steps: args.max_steps,
            },
            log_level: args.log_level,
        }
    }
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliConfig> {
    let args = CliArgs::parse();

    // Reject malformed patterns before any generation starts
    for pattern in &args.patterns {
        compile(pattern).with_context(|| format!("Invalid pattern '{}'", pattern))?;
    }

    Ok(CliConfig::from(args))
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

fn build_chainer(pattern: &str, config: &CliConfig) -> Result<Chainer> {
    Chainer::with_config(pattern, config.length, config.generator.clone())
        .with_context(|| format!("Invalid pattern '{}'", pattern))
}

/// One line per compiled fragment
fn explain(chainer: &Chainer) -> Vec<String> {
    chainer
        .fragments()
        .map(|spec| {
            let capture = spec
                .capture()
                .map_or_else(|| "-".to_string(), |slot| format!("\\{}", slot + 1));
            let candidates = spec
                .candidate_count()
                .map_or_else(|| "backreference".to_string(), |n| n.to_string());
            format!(
                "{:>3}  {:<16} capture={:<3} candidates={}",
                spec.id(),
                spec.to_string(),
                capture,
                candidates
            )
        })
        .collect()
}

fn count_pattern(pattern: &str, config: &CliConfig) -> Result<usize> {
    let mut chainer = build_chainer(pattern, config)?;
    chainer
        .count(config.limit)
        .with_context(|| format!("Counting matches of '{}'", pattern))
}

fn print_matches(pattern: &str, config: &CliConfig) -> Result<()> {
    let mut chainer = build_chainer(pattern, config)?;

    if config.explain {
        for line in explain(&chainer) {
            println!("{}", line);
        }
    }

    for found in chainer.matches().take(config.limit) {
        let found = found.with_context(|| format!("Generating matches of '{}'", pattern))?;
        println!("{}", found);
    }

    if chainer.produced() == 0 {
        warn!("No matches found for '{}'", pattern);
    }
    Ok(())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args()?;

    // Initialize logging
    init_logging(&config.log_level)?;

    info!(
        "Expanding {} patterns with target length {:?}",
        config.patterns.len(),
        config.length
    );

    if config.count {
        // Each pattern gets its own chain, so patterns can be counted side by side
        let counts: Vec<Result<usize>> = config
            .patterns
            .par_iter()
            .map(|pattern| count_pattern(pattern, &config))
            .collect();

        for (pattern, count) in config.patterns.iter().zip(counts) {
            println!("{}\t{}", pattern, count?);
        }
        return Ok(());
    }

    for pattern in &config.patterns {
        print_matches(pattern, &config)?;
    }
    Ok(())
}
