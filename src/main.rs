use std::process;
use log::{error, Level};

use scenegrab::utils::logger::Logger;
use scenegrab::commands::{cli, CommandFactory, ScenegrabCommandFactory};

fn main() {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") { Level::Debug } else { Level::Info };

    match matches.get_one::<String>("log-file") {
        Some(log_file) => {
            if let Err(e) = Logger::init_global_logger(log_file, level) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
        }
        None => {
            env_logger::Builder::new()
                .filter_level(level.to_level_filter())
                .parse_default_env()
                .init();
        }
    }

    let factory = ScenegrabCommandFactory::new();

    let command_result = factory.create_command(&matches);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
