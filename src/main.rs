use clap::{Arg, ArgAction, Command};
use monkey::error::MonkeyError;
use std::fs;
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = Command::new("monkey")
        .about("A tree-walking interpreter for the Monkey programming language")
        .arg(
            Arg::new("file")
                .help("The script file to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    match matches.get_one::<String>("file") {
        Some(path) if !matches.get_flag("interactive") => run_file(path),
        _ => {
            monkey::repl::start();
            ExitCode::SUCCESS
        }
    }
}

fn run_file(path: &str) -> ExitCode {
    // A missing or unreadable script goes through the same diagnostic
    // channel as parse and runtime errors.
    match fs::read_to_string(path) {
        Ok(source) => {
            monkey::runner::run(&source, Some(path));
            ExitCode::SUCCESS
        }
        Err(e) => {
            MonkeyError::io_error(format!("cannot read '{}': {}", path, e)).report("", Some(path));
            ExitCode::FAILURE
        }
    }
}
