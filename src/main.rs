use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use smartprocure::advisor::{ConfiguredAdvisor, NegotiationRequest, RemoteAdvisor, RuleBasedAdvisor};
use smartprocure::config::Config;
use smartprocure::dataset::DataSource;
use smartprocure::pipeline::SupplierRow;

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_DATA: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank suppliers and show the allocation table (default if no subcommand)
    List,
    /// Ask the negotiation advisor about an offer from a supplier
    Negotiate {
        /// Supplier's offered unit price
        offer: f64,
        /// Your target unit price
        target: f64,
        /// Supplier name (defaults to the top-ranked supplier)
        #[arg(short, long)]
        supplier: Option<String>,
    },
    /// Draft a purchase order for a supplier's allocated quantity
    Po {
        /// Supplier name (defaults to the top-ranked supplier)
        #[arg(short, long)]
        supplier: Option<String>,
        /// Unit price on the PO (defaults to the supplier's listed cost)
        #[arg(short, long)]
        price: Option<f64>,
    },
    /// Open the interactive sourcing dashboard
    Dashboard,
    /// Write a starter config file with commented defaults
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "smartprocure")]
#[command(about = "Supplier scoring, demand allocation and negotiation support", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/smartprocure/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Emit tab-separated values instead of the formatted table
    #[arg(long, global = true)]
    tsv: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::List);
    let config_path = cli.config.map(PathBuf::from);
    let start_time = Instant::now();

    // Init never needs an existing config or dataset
    if let Commands::Init { force } = command {
        match smartprocure::config::init_config(config_path, force) {
            Ok(path) => {
                println!("Wrote starter config to {}", path.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    // Load config
    let config = match smartprocure::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup, reporting every problem at once
    if let Err(errors) = smartprocure::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Resolve and load the supplier dataset
    let source = match DataSource::parse(config.source_spec()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!("Loading supplier table from {}", source.describe());
    }

    let table = match smartprocure::dataset::load(&source).await {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to load supplier table: {:#}", e);
            let code = match source {
                DataSource::Url(_) => EXIT_NETWORK,
                _ => EXIT_DATA,
            };
            std::process::exit(code);
        }
    };

    if cli.verbose {
        eprintln!("Loaded {} candidate suppliers", table.len());
    }

    // Run the scoring pipeline once up front; every subcommand works off
    // the ranked rows
    let weights = config.weights();
    let total_demand = config.total_demand();
    let disruption_level = config.disruption_level();

    let mut rng = StdRng::from_entropy();
    let rows = match smartprocure::pipeline::compute(
        &table,
        &weights,
        total_demand,
        disruption_level,
        &mut rng,
    ) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Scoring failed: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    match command {
        Commands::List => {
            let use_colors = smartprocure::output::should_use_colors();

            if cli.tsv {
                let tsv = smartprocure::output::format_tsv(&rows);
                if !tsv.is_empty() {
                    println!("{}", tsv);
                }
            } else if cli.verbose {
                for row in &rows {
                    println!(
                        "{}",
                        smartprocure::output::format_supplier_detail(row, use_colors)
                    );
                    println!();
                }
            } else {
                println!(
                    "{}",
                    smartprocure::output::format_supplier_table(&rows, use_colors)
                );
            }

            if cli.verbose {
                eprintln!(
                    "Ranked {} suppliers in {:?}",
                    rows.len(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Negotiate {
            offer,
            target,
            supplier,
        } => {
            let row = match pick_supplier(&rows, supplier.as_deref()) {
                Ok(row) => row,
                Err(msg) => {
                    eprintln!("{}", msg);
                    std::process::exit(EXIT_DATA);
                }
            };
            if offer <= 0.0 || target <= 0.0 {
                eprintln!("Offer and target prices must be positive.");
                std::process::exit(EXIT_DATA);
            }

            let advisor = match build_advisor(&config) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Advisor setup failed: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            if cli.verbose {
                eprintln!(
                    "Asking {} about {}: offer {:.2}, target {:.2}",
                    advisor.describe(),
                    row.name(),
                    offer,
                    target
                );
            }

            let request = NegotiationRequest {
                supplier: row.name().to_string(),
                offer_price: offer,
                target_price: target,
            };
            match advisor.advise(&request).await {
                Ok(rec) => {
                    let use_colors = smartprocure::output::should_use_colors();
                    println!(
                        "{}",
                        smartprocure::output::format_recommendation(&rec, use_colors)
                    );
                }
                Err(e) => {
                    eprintln!("Advisor failed: {:#}", e);
                    std::process::exit(EXIT_NETWORK);
                }
            }
        }
        Commands::Po { supplier, price } => {
            let row = match pick_supplier(&rows, supplier.as_deref()) {
                Ok(row) => row,
                Err(msg) => {
                    eprintln!("{}", msg);
                    std::process::exit(EXIT_DATA);
                }
            };

            let unit_price = price.unwrap_or(row.record.cost);
            let po = smartprocure::po::draft_po(
                row.name(),
                row.allocated_qty,
                unit_price,
                Utc::now().date_naive(),
            );
            println!("{}", po);
        }
        Commands::Dashboard => {
            let advisor = match build_advisor(&config) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Advisor setup failed: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            let app = match smartprocure::tui::App::new(
                table,
                weights,
                total_demand,
                disruption_level,
                source.describe(),
                StdRng::from_entropy(),
            ) {
                Ok(app) => app,
                Err(e) => {
                    eprintln!("Failed to start dashboard: {:#}", e);
                    std::process::exit(EXIT_DATA);
                }
            };

            if let Err(e) = smartprocure::tui::run_tui(app, Arc::new(advisor)).await {
                eprintln!("Dashboard error: {:#}", e);
                std::process::exit(EXIT_DATA);
            }
        }
        Commands::Init { .. } => unreachable!("handled before config load"),
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Find the named supplier in the ranked rows, or the top-ranked supplier
/// when no name is given. Matching is case-insensitive.
fn pick_supplier<'a>(rows: &'a [SupplierRow], name: Option<&str>) -> Result<&'a SupplierRow, String> {
    match name {
        None => rows
            .first()
            .ok_or_else(|| "No suppliers in the table.".to_string()),
        Some(name) => rows
            .iter()
            .find(|row| row.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                let known: Vec<&str> = rows.iter().map(|r| r.name()).collect();
                format!(
                    "Unknown supplier '{}'. Known suppliers: {}",
                    name,
                    known.join(", ")
                )
            }),
    }
}

/// Build the advisor the config selects. The remote advisor resolves its
/// API key here (env var first, interactive prompt otherwise); the
/// rule-based advisor needs nothing.
fn build_advisor(config: &Config) -> anyhow::Result<ConfiguredAdvisor> {
    match config.advisor_kind() {
        "remote" => {
            let api_key = smartprocure::credentials::setup_key_if_missing()?;
            Ok(ConfiguredAdvisor::Remote(RemoteAdvisor::new(
                config.advisor_endpoint().to_string(),
                config.advisor_model().to_string(),
                api_key,
            )))
        }
        _ => Ok(ConfiguredAdvisor::Rules(RuleBasedAdvisor)),
    }
}
