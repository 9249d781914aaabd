use std::process::ExitCode;

use checkers_relay::logging;
use checkers_relay::server::{ConfigError, Server, ServerConfig, USAGE};

fn main() -> ExitCode {
    let config = match ServerConfig::from_env_and_args() {
        Ok(config) => config,
        Err(ConfigError::HelpRequested) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    if let Err(e) = logging::init(config.log_level) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let server = match Server::bind(config.socket_addr()) {
        Ok(server) => server,
        Err(e) => {
            log::error!("cannot listen on {}: {e}", config.socket_addr());
            return ExitCode::FAILURE;
        }
    };
    server.run();
    ExitCode::SUCCESS
}
