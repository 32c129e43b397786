//! Mython CLI: run a script file, a snippet, or a program read from stdin.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use colored::Colorize;

use mython::error::MythonError;
use mython::interpreter::RunOptions;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI command to execute.
enum Command {
    /// Run a script file
    Run { file: String },
    /// Evaluate a string
    Eval { code: String },
    /// Read the program from standard input
    Stdin,
}

/// CLI options parsed from arguments.
struct Options {
    command: Command,
    run: RunOptions,
}

fn print_usage() {
    eprintln!("Mython {} - Mython Interpreter", VERSION);
    eprintln!();
    eprintln!("Usage: mython [options] [script.my]");
    eprintln!("       mython [options] -e <code>");
    eprintln!();
    eprintln!("Without a script, the program is read from standard input.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -e <code>        Evaluate code directly");
    eprintln!("  --max-depth N    Fail when method calls nest deeper than N");
    eprintln!("  --version, -V    Show version");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RUST_LOG         Enable interpreter logging on stderr (e.g. RUST_LOG=mython=debug)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  mython script.my               Run a script file");
    eprintln!("  mython < script.my             Run a program from stdin");
    eprintln!("  mython --max-depth 500 a.my    Run with a recursion limit");
    eprintln!("  mython -e 'print 1 + 1'        Evaluate code directly");
}

fn usage_error(message: &str) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    print_usage();
    process::exit(64);
}

fn parse_args() -> Options {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut options = Options {
        command: Command::Stdin,
        run: RunOptions::default(),
    };

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--version" | "-V" => {
                println!("mython {}", VERSION);
                process::exit(0);
            }
            "--max-depth" => {
                i += 1;
                let Some(value) = args.get(i) else {
                    usage_error("--max-depth requires a number");
                };
                match value.parse::<usize>() {
                    Ok(depth) => options.run.max_call_depth = Some(depth),
                    Err(_) => usage_error(&format!("Invalid --max-depth value: {}", value)),
                }
            }
            "-e" => {
                i += 1;
                let Some(code) = args.get(i) else {
                    usage_error("-e requires a code argument");
                };
                if !matches!(options.command, Command::Stdin) {
                    usage_error("Only one program can be specified");
                }
                options.command = Command::Eval { code: code.clone() };
            }
            _ if arg.starts_with('-') => {
                usage_error(&format!("Unknown option: {}", arg));
            }
            _ => {
                if !matches!(options.command, Command::Stdin) {
                    usage_error("Only one program can be specified");
                }
                options.command = Command::Run { file: arg.clone() };
            }
        }
        i += 1;
    }

    options
}

fn main() {
    let options = parse_args();
    mython::init_tracing();

    let source = match &options.command {
        Command::Run { file } => fs::read_to_string(file).map_err(|e| {
            format!("Failed to read file '{}': {}", file, e)
        }),
        Command::Eval { code } => Ok(code.clone()),
        Command::Stdin => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map(|_| source)
                .map_err(|e| format!("Failed to read standard input: {}", e))
        }
    };

    let source = match source {
        Ok(source) => source,
        Err(message) => {
            eprintln!("{} {}", "Error:".red().bold(), message);
            process::exit(74);
        }
    };

    if let Err(e) = mython::run_with_output(&source, io::stdout().lock(), options.run) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(exit_code(&e));
    }
}

fn exit_code(error: &MythonError) -> i32 {
    match error {
        MythonError::Lexer(_) | MythonError::Parser(_) => 65,
        MythonError::Runtime(mython::error::RuntimeError::Io { .. }) | MythonError::Io(_) => 74,
        MythonError::Runtime(_) => 70,
    }
}
