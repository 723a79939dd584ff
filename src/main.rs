//! # Data Jobs Server - Entry Point
//! src/main.rs

use datajobs_server::config::Config;
use datajobs_server::logging::init_logging;
use datajobs_server::server::Server;

fn main() {
    let config = Config::new();

    if let Err(e) = init_logging(config.log_json) {
        eprintln!("failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid configuration");
        std::process::exit(1);
    }
    config.log_summary();

    let server = Server::new(config);
    if let Err(e) = server.run() {
        tracing::error!(error = %e, "fatal server error");
        std::process::exit(1);
    }
}
