//! bitlogic - Command Line Interface
//!
//! Runs a program file and prints its output. `INPUT` requests are prompted
//! on stderr and answered from stdin.

use bitlogic::engine::{Executor, ReaderInput};
use bitlogic::{EngineConfig, Program};
use clap::Parser;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "bitlogic")]
#[command(about = "Boolean logic interpreter and minimizer", long_about = None)]
#[command(version)]
struct Args {
    /// Program file to run
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Inline user function calls in SHOW output
    #[arg(long = "inline")]
    inline: bool,

    /// Separator between PRINT arguments
    #[arg(long = "separator", default_value = " ")]
    separator: String,

    /// Maximum nesting of function calls
    #[arg(long = "max-depth", default_value_t = 256)]
    max_depth: usize,

    /// Parse the program and print it without running it
    #[arg(long = "check")]
    check: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let source = match fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading program file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let program = match Program::parse(&source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}: {}", args.input.display(), e);
            process::exit(1);
        }
    };

    if args.check {
        print!("{}", program);
        return;
    }

    let config = EngineConfig {
        max_call_depth: args.max_depth,
        inline_calls: args.inline,
        print_separator: args.separator,
        ..EngineConfig::default()
    };

    let input = ReaderInput::new(io::stdin().lock(), io::stderr());
    let mut executor = Executor::with_input(config, input);
    match executor.run(&program) {
        Ok(output) => {
            for unit in output {
                println!("{}", unit);
            }
        }
        Err(e) => {
            for unit in &e.output {
                println!("{}", unit);
            }
            let (line, column) = e.statement_span.line_col(&source);
            eprintln!(
                "{}:{}:{}: error: {}",
                args.input.display(),
                line,
                column,
                e
            );
            process::exit(1);
        }
    }
}
