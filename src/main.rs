use colored::Colorize;
use tracing_subscriber::EnvFilter;

use schema_builder::cli;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match command_line_interface.verbose {
            0 => "warn",
            1 => "info",
            2 => "schema_builder=debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
