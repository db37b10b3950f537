//! Leoni Switch CLI
//!
//! Command-line interface for a Leoni eol/mol 1xN fibre switch.

use anyhow::Result;
use clap::Parser;
use leoni_core::SwitchError;
use leoni_hardware::SwitchController;
use leonictl::cli::{
    generate_completion, handle_channels, handle_config, handle_firmware, handle_get,
    handle_ping, handle_ports, handle_set, handle_status, Cli, Commands, OutputFormat,
};
use leonictl::config::CliConfig;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(CliConfig::config_path);

    // Build configuration using priority chain: defaults → file → env → CLI args
    let config = match build_config(&cli, &config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            if cli.verbose {
                eprintln!("Error details: {:?}", e);
            }
            std::process::exit(1);
        }
    };

    init_tracing(config.verbose || config.switch.debug_uart);

    let output_format = OutputFormat::from_config(&config.output_format);
    let verbose = config.verbose;
    debug!("Configuration file: {}", config_path.display());
    debug!("Output format: {:?}", output_format);

    if !cli.command.needs_switch() {
        let result = match cli.command {
            Commands::Ports => handle_ports(&output_format),
            Commands::Config { command } => {
                handle_config(command, &config, &config_path, &output_format)
            }
            Commands::Completion { shell } => {
                generate_completion(shell);
                Ok(())
            }
            _ => Ok(()),
        };
        exit_on_error(result, verbose);
        return Ok(());
    }

    let mut switch = match SwitchController::open(&config.switch).await {
        Ok(switch) => switch,
        Err(e) => {
            eprintln!(
                "Error: Cannot connect to Leoni switch at {}",
                config.switch.port
            );
            eprintln!("Check the port name and that the switch is powered.");
            eprintln!("Connection error: {}", e);
            std::process::exit(1);
        }
    };

    let mut alive = true;
    let result = match cli.command {
        Commands::Channels => handle_channels(&mut switch, &output_format).await,
        Commands::Get => handle_get(&mut switch, &output_format).await,
        Commands::Set { ref channel } => handle_set(&mut switch, channel, &output_format).await,
        Commands::Firmware => handle_firmware(&mut switch, &output_format).await,
        Commands::Ping => handle_ping(&mut switch, &output_format)
            .await
            .map(|ok| alive = ok),
        Commands::Status => handle_status(&mut switch, &output_format).await,
        _ => Ok(()),
    };

    if let Err(e) = switch.close() {
        debug!("Error closing switch: {}", e);
    }

    exit_on_error(result, verbose);
    if !alive {
        std::process::exit(1);
    }

    Ok(())
}

fn build_config(cli: &Cli, config_path: &std::path::Path) -> Result<CliConfig> {
    let mut builder = CliConfig::builder();

    if !cli.no_config {
        builder = builder.with_config_file(config_path)?;
    }

    builder = builder.with_env_overrides();

    if let Some(ref port) = cli.port {
        builder = builder.with_port(port)?;
    }
    if let Some(timeout) = cli.timeout {
        builder = builder.with_timeout(timeout)?;
    }
    if cli.simulate {
        builder = builder.with_simulation(true);
    }
    if cli.debug_uart {
        builder = builder.with_debug_uart(true);
    }
    if let Some(ref format) = cli.format {
        builder = builder.with_output_format(format.as_str())?;
    }
    if cli.verbose {
        builder = builder.with_verbose(true);
    }

    builder.build()
}

fn exit_on_error(result: Result<()>, verbose: bool) {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if e
            .downcast_ref::<SwitchError>()
            .is_some_and(SwitchError::is_argument_error)
        {
            eprintln!("Run `leonictl channels` to see how many channels the switch has.");
        }
        if verbose {
            eprintln!("Error details: {:?}", e);
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays parseable in JSON mode.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
