//! Flowsmith CLI - Render state machines as Mermaid flowcharts

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is configured inside run() from flags and environment
    let app = cli::FlowsmithApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
