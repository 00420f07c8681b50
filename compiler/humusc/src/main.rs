//! Humus CLI

use humusc::commands::{explain_error, ir_file, parse_command_args, parse_file, tokens_file};
use humusc::init_tracing;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "tokens" | "parse" | "ir" => {
            let (options, path) = match parse_command_args(&args[2..]) {
                Ok(parsed) => parsed,
                Err(message) => {
                    eprintln!("error: {message}");
                    std::process::exit(1);
                }
            };
            let Some(path) = path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: humus {command} <file.hum> [--limit=<n>] [--emit=json|debug]");
                std::process::exit(1);
            };
            match command.as_str() {
                "tokens" => tokens_file(&path, &options),
                "parse" => parse_file(&path, &options),
                _ => ir_file(&path, &options),
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Humus front end {}", env!("CARGO_PKG_VERSION"));
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: humus --explain <ERROR_CODE>");
                eprintln!("Example: humus --explain E1002");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Humus front end");
    println!();
    println!("Usage: humus <command> [options]");
    println!();
    println!("Commands:");
    println!("  tokens <file.hum>    Tokenize and display tokens");
    println!("  parse <file.hum>     Parse and display the syntax tree");
    println!("  ir <file.hum>        Parse, lower and display the behavior tree");
    println!("  --explain <code>     Explain an error code (e.g., E1001)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --limit=<n>          Stop each event-loop run after n deliveries");
    println!("  --emit=<format>      Output format: json (default), debug");
    println!();
    println!("Logging:");
    println!("  RUST_LOG=humus_parse=debug humus parse main.hum");
    println!("  RUST_LOG=humus_peg=trace humus tokens main.hum");
}
