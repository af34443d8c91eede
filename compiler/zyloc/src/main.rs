//! Zylo CLI

use zyloc::commands::{lex_file, parse_file, run_file};
use zyloc::{init_tracing, CommandError};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "run" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: zylo run <file.zylo>");
                std::process::exit(1);
            };
            run_file(path)
        }
        "parse" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: zylo parse <file.zylo>");
                std::process::exit(1);
            };
            parse_file(path)
        }
        "lex" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: zylo lex <file.zylo>");
                std::process::exit(1);
            };
            lex_file(path)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-v" => {
            println!("Zylo {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            // A bare source file runs it.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("zylo"))
            {
                run_file(command)
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    };

    if let Err(err) = result {
        report(&err);
        std::process::exit(1);
    }
}

fn report(err: &CommandError) {
    if !err.is_reported() {
        eprintln!("{err}");
    }
}

fn print_usage() {
    println!("Zylo scripting language");
    println!();
    println!("Usage: zylo <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.zylo>      Run a Zylo program");
    println!("  parse <file.zylo>    Parse and print the AST");
    println!("  lex <file.zylo>      Tokenize and print the tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=zylo_eval=debug) for tracing on stderr.");
    println!();
    println!("Examples:");
    println!("  zylo run main.zylo");
    println!("  zylo main.zylo");
    println!("  zylo lex main.zylo");
}
