use clap::Parser;
use diagram_export::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    // CLI --log-level takes precedence over RUST_LOG.
    diagram_export::debug::init_log_bridge(cli.log_level);
    log::info!("Starting diagram-export {}", diagram_export::VERSION);

    let code = cli::run(cli);
    log::logger().flush();

    if code != 0 {
        std::process::exit(code);
    }
}
