use clap::Parser;
use sakura_functests::cli::commands::{cmd_export, cmd_list, cmd_run};
use sakura_functests::cli::config::{Cli, Commands, resolve_config};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // CLI > env > config file > defaults
    let config = resolve_config(&cli);

    match cli.command {
        Commands::Run {
            scenarios,
            only,
            format,
            output,
        } => {
            let all_passed = cmd_run(
                &config,
                scenarios.as_deref(),
                &only,
                format.as_deref(),
                output.as_deref(),
            )?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        Commands::List { scenarios } => cmd_list(scenarios.as_deref())?,
        Commands::Export { output_dir } => {
            cmd_export(&output_dir)?;
        }
    }

    Ok(())
}
