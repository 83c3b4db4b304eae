// Conversation Analytics Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/conversation-analytics-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/conversation-analytics-simulator --config config.yaml --sessions 20000 --outdir data --verbose
// ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use conversation_analytics_simulator::schema::verify_integrity;
use conversation_analytics_simulator::simulation::{LoggingConfig, SimulationOrchestrator};
use conversation_analytics_simulator::types::config::CliArgs;
use conversation_analytics_simulator::types::GeneratorConfig;
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match GeneratorConfig::default().print_yaml() {
            Ok(yaml) => {
                print!("{}", yaml);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        // Default: warnings and errors only
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    let _logging_guard = match logging_result {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Conversation Analytics Simulator");

    if let Err(e) = run(args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Conversation Analytics Simulator completed successfully");
}

fn run(args: CliArgs) -> Result<()> {
    let outdir = args.outdir.clone();
    let dry_run = args.dry_run;
    let verify = args.verify;

    // Load configuration from CLI arguments and optional config file
    let config = GeneratorConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - no data will be generated.");
        print_configuration_summary(&config, &outdir);
        return Ok(());
    }

    print_startup_banner(&config, &outdir);

    let mut orchestrator =
        SimulationOrchestrator::new(config).context("Failed to initialize generator")?;
    let dataset = orchestrator
        .run(&outdir)
        .with_context(|| format!("Failed to generate dataset into {}", outdir))?;

    if verify {
        let violations = verify_integrity(&dataset);
        if !violations.is_empty() {
            for violation in &violations {
                error!("{}", violation);
            }
            bail!("Dataset failed verification with {} violations", violations.len());
        }
        eprintln!("Integrity verification passed.");
    }

    eprintln!("{}", orchestrator.get_statistics());
    println!("Wrote dataset to {}", outdir);
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &GeneratorConfig, outdir: &str) {
    eprintln!("Conversation Analytics Simulator");
    eprintln!("================================");
    eprintln!("Synthetic chatbot sessions as event logs and relational schemas");
    eprintln!();

    print_configuration_summary(config, outdir);
}

/// Print configuration summary
fn print_configuration_summary(config: &GeneratorConfig, outdir: &str) {
    eprintln!("Configuration:");
    eprintln!("  Sessions: {}", config.volume.sessions);
    eprintln!("  Users: {}", config.volume.users);
    eprintln!("  Random Seed: {}", config.seed);
    eprintln!("  Intents: {}", config.intents.keys().cloned().collect::<Vec<_>>().join(", "));
    eprintln!("  Channels: {}", config.channels.keys().cloned().collect::<Vec<_>>().join(", "));
    eprintln!("  Session Turns: geometric p={} (+2)", config.session_turns.geom_p);
    eprintln!(
        "  Latency: log-normal mu={}, sigma={}",
        config.latency_lognorm.mu, config.latency_lognorm.sigma
    );
    eprintln!("  Time Window: {} .. {}", config.time_window.start, config.time_window.end);
    eprintln!("  Output Directory: {}", outdir);
    eprintln!();
}
