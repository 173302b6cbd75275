use clap::Parser;
use option_pool::cli::{Cli, Commands};
use option_pool::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    option_pool::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Simulate(args) => {
            tracing::info!("Starting simulation");
            args.execute(&config)?;
        }
        Commands::Quote(args) => {
            args.execute(&config)?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Pool: asset={} lock={}s penalty={}bps treasury={}",
                config.pool.asset,
                config.pool.lock_time_secs,
                config.pool.withdraw_penalty_bps,
                config.pool.treasury
            );
            println!(
                "  Option: rounds={}..={} settler={}bps protocol={}bps gas_refund={}",
                config.option.min_rounds,
                config.option.max_rounds,
                config.option.settler_fee_bps,
                config.option.protocol_fee_bps,
                config.option.gas_refund_enabled
            );
            println!(
                "  Rate: {:?} size={}bps utilization={}bps",
                config.rate.strategy, config.rate.max_option_size_bps, config.rate.max_utilization_bps
            );
            println!("  Oracle: tolerance={} rounds", config.oracle.round_tolerance);
        }
    }

    Ok(())
}
