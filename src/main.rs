//! Main entry point for zfspace CLI

use clap::Parser;
use zfspace::cli::Cli;
use zfspace::commands::execute_command;
use zfspace::config;
use zfspace::ZfsBridge;

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging, verbose raises the default level
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env().filter_level(level).init();

    let config = config::init_zfs();
    let bridge = ZfsBridge::new(config.clone());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Execute the command
    if let Err(e) = execute_command(cli.command, &bridge, &config, &mut out) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
