use clap::Parser;
use record_validator::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Row-level problems never reach here; only fatal job errors do
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Record Validator - Customer Extract Validation");
    println!("==============================================");
    println!();
    println!("Validate and normalize customer record extracts into a clean file and");
    println!("an error file, with a timestamped audit log of every change.");
    println!();
    println!("USAGE:");
    println!("    record-validator <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    validate    Validate a customer extract (main command)");
    println!("    merge       Copy lookup columns from one worksheet into another");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Validate Corprate_data_dummy.csv with validation_rules.json:");
    println!("    record-validator validate");
    println!();
    println!("    # Validate a Cook Islands extract with explicit paths:");
    println!("    record-validator validate --profile cook-islands --input extract.csv \\");
    println!("                              --rules rules.json --log-file audit.txt");
    println!();
    println!("    # Add lookup columns to a worksheet:");
    println!("    record-validator merge --target IBUSRQDC1.csv --source sm.csv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    record-validator <COMMAND> --help");
}
