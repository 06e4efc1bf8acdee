use crate::ast::Stmt;
use crate::environment::Environment;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use std::io::{self, Write};
use std::rc::Rc;

/// Interactive prompt. One environment lives for the whole session, so
/// top-level `let` bindings persist between lines.
pub fn start() {
    let user = std::env::var("USER").unwrap_or_else(|_| "there".to_string());
    println!("Hello {}! This is the Monkey programming language!", user);
    println!("Feel free to type in commands");
    println!();

    let env = Environment::new();

    loop {
        print!(">> ");
        io::stdout().flush().unwrap();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    break;
                }

                run_repl_command(line, &env);
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}

fn run_repl_command(source: &str, env: &Rc<Environment>) {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        for error in parser.errors() {
            error.report(source, None);
        }
        return;
    }

    // Echo the result only when the line ends in an expression; `let` and
    // `return` lines stay silent.
    let echo = matches!(program.statements.last(), Some(Stmt::Expression { .. }));

    let mut stdout = io::stdout();
    let mut evaluator = Evaluator::new(&mut stdout);
    match evaluator.eval_program(&program, env) {
        Ok(value) => {
            if echo {
                println!("{}", value);
            }
        }
        Err(error) => error.report(source, None),
    }
}
