use agromet_processor::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Agromet Processor - Farm Weather Station Analyzer");
    println!("=================================================");
    println!();
    println!("Normalize farm weather-station exports (delimited text, SpreadsheetML");
    println!("markup, or binary spreadsheets) and derive growing-degree-day");
    println!("accumulations for crop planning.");
    println!();
    println!("USAGE:");
    println!("    agromet-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    analyze      Analyze one weather-station export (main command)");
    println!("    reference    Print the crop and pest reference tables");
    println!("    help         Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Analyze an export for durian with a season reset:");
    println!("    agromet-processor analyze station.xls --crop durian --reset-date 2024-12-01");
    println!();
    println!("    # Custom base temperature and JSON output for scripting:");
    println!("    agromet-processor analyze export.csv --base-temp 12.5 --output-format json");
    println!();
    println!("    # Show the reference tables:");
    println!("    agromet-processor reference");
    println!();
    println!("For detailed help on any command, use:");
    println!("    agromet-processor <COMMAND> --help");
}
