//! fx-profit CLI - find the most profitable currency trade in a date range
//!
//! ## Example Usage
//!
//! ```bash
//! # Everything on the command line
//! fx-profit --start-date 2024-01-09 --end-date 2024-03-29 --capital 100000
//!
//! # Ask for whatever is missing
//! fx-profit --capital 5000
//!
//! # Offline data and a JSON copy of the report
//! fx-profit --source csv --config fx.toml -s 2024-01-09 -e 2024-01-31 -c 1000 -o report.json
//! ```

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use fx_profit::calendar::{self, parse_date};
use fx_profit::config::AppConfig;
use fx_profit::data::SourceRegistry;
use fx_profit::report::{format_money, AnalysisResult};
use fx_profit::session::AnalysisSession;
use fx_profit::types::{Money, TradeDate};
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

/// fx-profit: best buy/sell window across daily exchange rates
#[derive(Parser, Debug)]
#[command(name = "fx-profit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Finds the most profitable currency buy/sell window", long_about = None)]
struct Cli {
    /// First day of the analysis (YYYY-MM-DD, DD/MM/YYYY or DD.MM.YYYY)
    #[arg(short = 's', long)]
    start_date: Option<String>,

    /// Last day of the analysis
    #[arg(short = 'e', long)]
    end_date: Option<String>,

    /// Initial capital in the base currency
    #[arg(short = 'c', long)]
    capital: Option<String>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rate source key (overrides the configuration)
    #[arg(long)]
    source: Option<String>,

    /// Also write the report as JSON to this file
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Collects analysis parameters, re-asking until each one is acceptable
struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> anyhow::Result<String> {
        writeln!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed before all parameters were provided");
        }
        Ok(line.trim().to_string())
    }

    fn complain(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn start_date(&mut self, given: Option<String>, today: TradeDate) -> anyhow::Result<TradeDate> {
        let mut candidate = given;
        loop {
            let text = match candidate.take() {
                Some(text) => text,
                None => self.ask("Please enter a valid start date (YYYY-MM-DD):")?,
            };
            match parse_date(&text) {
                Ok(date) if date > today => {
                    self.complain("Start date cannot be later than today.")?
                }
                Ok(date) => return Ok(date),
                Err(_) => self.complain(&format!("'{}' is not a valid date.", text))?,
            }
        }
    }

    fn end_date(
        &mut self,
        given: Option<String>,
        start: TradeDate,
        today: TradeDate,
    ) -> anyhow::Result<TradeDate> {
        let mut candidate = given;
        loop {
            let text = match candidate.take() {
                Some(text) => text,
                None => self.ask("Please enter a valid end date (YYYY-MM-DD):")?,
            };
            match parse_date(&text) {
                Ok(date) if date > today => self.complain("End date cannot be later than today.")?,
                Ok(date) if date < start => {
                    self.complain("Start date cannot be later than end date.")?
                }
                Ok(date) => return Ok(date),
                Err(_) => self.complain(&format!("'{}' is not a valid date.", text))?,
            }
        }
    }

    fn capital(&mut self, given: Option<String>) -> anyhow::Result<Money> {
        let mut candidate = given;
        loop {
            let text = match candidate.take() {
                Some(text) => text,
                None => self.ask("Please enter a valid initial capital (greater than zero):")?,
            };
            match text.trim().parse::<Money>() {
                Ok(capital) if capital > Money::ZERO => return Ok(capital),
                Ok(_) => self.complain("Initial capital must be greater than zero.")?,
                Err(_) => self.complain(&format!("'{}' is not a valid amount.", text))?,
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".fx-profit").join("config.toml"))
}

fn init_logging(config: &AppConfig, verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Cannot open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Failed to initialise logging")?;
    Ok(())
}

fn print_result(result: &AnalysisResult, base_currency: &str) {
    match result {
        AnalysisResult::Success(report) => {
            println!("{}", "Analysis completed.".green().bold());
            println!();
            if report.is_profitable() {
                println!("See the most profitable deal below:");
            } else {
                println!(
                    "{}",
                    "Warning: no profitable deal was possible in this period.".yellow()
                );
            }
            println!();
            print!("{}", report.render(base_currency));
        }
        AnalysisResult::Failure(err) => println!("{}", err.to_string().red()),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let fallback = default_config_path();
    let (mut config, ignored) = AppConfig::load(cli.config.as_deref(), fallback.as_deref())?;
    init_logging(&config, cli.verbose)?;
    if let Some(e) = ignored {
        log::warn!("Ignoring configuration: {}", e);
    }

    if let Some(source) = cli.source {
        config.source = source;
    }

    let registry = SourceRegistry::from_config(&config)?;
    let source = registry.resolve(&config.source)?;

    if cli.verbose {
        println!("{} v{}", "fx-profit".cyan().bold(), env!("CARGO_PKG_VERSION"));
        println!("Rate source: {}", source.name().dimmed());
    }

    let today = calendar::today();
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let start = prompter.start_date(cli.start_date, today)?;
    let end = prompter.end_date(cli.end_date, start, today)?;
    let capital = prompter.capital(cli.capital)?;

    println!();
    println!(
        "Analysing {} to {} with initial capital {} {}",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d"),
        format_money(capital),
        config.base_currency
    );
    println!();

    let session = AnalysisSession::new(source.as_ref()).with_today(today);
    let result = session.run(start, end, capital);
    print_result(&result, &config.base_currency);

    if let (Some(path), Some(report)) = (cli.output, result.report()) {
        fs::write(&path, report.to_json()?)
            .with_context(|| format!("Cannot write report to {}", path.display()))?;
        println!();
        println!("Report saved to {}", path.display().to_string().dimmed());
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
