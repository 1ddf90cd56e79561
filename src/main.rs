use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::error;

// Import from your library
use rawfits::utils::logger::Logger;
use rawfits::commands::{CommandFactory, RawfitsCommandFactory};

fn main() {
    let matches = ClapCommand::new("rawfits")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert RAW camera images into single-channel FITS files")
        .arg(
            Arg::new("input")
                .help("Input RAW file (CR2, NEF, ...)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("channel")
                .help("Channel index: 0=Red, 1=Green, 2=Blue, 3=unscaled raw")
                .required_unless_present("info")
                .index(2),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .help("Print the file's capture metadata and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("decoder")
                .long("decoder")
                .help("Decoder executable to invoke (default: dcraw from PATH)")
                .value_name("PATH")
                .required(false),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");

    let log_file = "rawfits.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("rawfits-global.log", verbose) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = RawfitsCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
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
