use crate::environment::Environment;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use std::io;

/// Execute a whole source file. Parse errors are all reported up front and
/// block evaluation; a runtime error is reported against the source text.
pub fn run(source: &str, filename: Option<&str>) {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        for error in parser.errors() {
            error.report(source, filename);
        }
        return;
    }

    let env = Environment::new();
    let mut stdout = io::stdout();
    let mut evaluator = Evaluator::new(&mut stdout);
    if let Err(error) = evaluator.eval_program(&program, &env) {
        error.report(source, filename);
    }
}
