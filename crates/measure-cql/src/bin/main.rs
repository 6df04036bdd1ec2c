//! Measure CQL checker command-line interface

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use measure_cql::ServiceConfig;
use measure_cql::cli::output::{self, OutputFormat};
use measure_cql::cli::{check, types};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Measure CQL checker
#[derive(Parser, Debug)]
#[command(name = "cql-check")]
#[command(author, version, about = "Check measure CQL and report editor diagnostics", long_about = None)]
struct Cli {
    /// Verbose output (same as --log-level info)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json, pretty)
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: String,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a CQL file and report translator and valueset diagnostics
    Check {
        /// CQL file to check
        file: PathBuf,

        /// Use a pre-translated ELM JSON file instead of the translation service
        #[arg(long)]
        elm: Option<PathBuf>,

        /// Base URL of the CQL-to-ELM translation service
        #[arg(long, env = "CQL_TRANSLATOR_URL")]
        translator_url: Option<String>,

        /// Base URL of the terminology service
        #[arg(long, env = "CQL_TERMINOLOGY_URL")]
        terminology_url: Option<String>,

        /// Terminology credential (UMLS ticket-granting ticket)
        #[arg(long, env = "UMLS_TGT", hide_env_values = true)]
        credential: Option<String>,

        /// Bearer token for the translation service
        #[arg(long, env = "CQL_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },

    /// Print definition and function argument types of an ELM JSON file
    Types {
        /// ELM JSON file
        file: PathBuf,
    },

    /// Parse a locator such as 12:3-12:40
    Locator {
        /// Locator text
        locator: String,
    },
}

fn init_logging(cli: &Cli) {
    let level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!(
            "{}",
            output::format_warning(&format!(
                "Invalid log level: {}. Using 'warn' instead.",
                cli.log_level
            ))
        );
        LevelFilter::Warn
    });
    let level = if cli.verbose { level.max(LevelFilter::Info) } else { level };

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
}

async fn run(cli: Cli) -> Result<bool> {
    let format = OutputFormat::parse(&cli.format);

    match cli.command {
        Commands::Check {
            file,
            elm,
            translator_url,
            terminology_url,
            credential,
            access_token,
            timeout,
        } => {
            let mut service = ServiceConfig::new().with_timeout(Duration::from_secs(timeout));
            if let Some(url) = translator_url {
                service = service.with_translator_url(url);
            }
            if let Some(url) = terminology_url {
                service = service.with_terminology_url(url);
            }
            if let Some(token) = access_token {
                service = service.with_access_token(token);
            }

            let config = check::CheckConfig {
                file,
                elm,
                service,
                credential,
                format,
                output_file: cli.output,
            };
            check::check(config).await
        }

        Commands::Types { file } => {
            let config = types::TypesConfig {
                file,
                format,
                output_file: cli.output,
            };
            types::types(config).map(|()| true)
        }

        Commands::Locator { locator } => {
            types::locator(&locator, format, cli.output.as_deref()).map(|()| true)
        }
    }
}

#[tokio::main]
async fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(&cli.color);
    init_logging(&cli);

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", output::format_error(&e));
            std::process::exit(1);
        }
    }
}
