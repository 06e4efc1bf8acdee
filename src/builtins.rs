use crate::error::{MonkeyError, Span};
use crate::value::Value;
use std::io::Write;

/// Host-provided functions, resolved by name when an identifier is not
/// found in the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Len,
    First,
    Last,
    Rest,
    Push,
    Puts,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Builtin> {
        match name {
            "len" => Some(Builtin::Len),
            "first" => Some(Builtin::First),
            "last" => Some(Builtin::Last),
            "rest" => Some(Builtin::Rest),
            "push" => Some(Builtin::Push),
            "puts" => Some(Builtin::Puts),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Len => "len",
            Builtin::First => "first",
            Builtin::Last => "last",
            Builtin::Rest => "rest",
            Builtin::Push => "push",
            Builtin::Puts => "puts",
        }
    }

    /// Invoke the builtin on already-evaluated arguments. `puts` writes to
    /// `output`; everything else is pure.
    pub fn apply<W: Write>(
        &self,
        args: Vec<Value>,
        output: &mut W,
        span: &Span,
    ) -> Result<Value, MonkeyError> {
        match self {
            Builtin::Len => {
                self.expect_arity(&args, 1, span)?;
                match &args[0] {
                    Value::String(s) => Ok(Value::Integer(s.len() as i64)),
                    Value::Array(elements) => Ok(Value::Integer(elements.len() as i64)),
                    other => Err(self.unsupported_argument(other, span)),
                }
            }
            Builtin::First => {
                self.expect_arity(&args, 1, span)?;
                match &args[0] {
                    Value::Array(elements) => {
                        Ok(elements.first().cloned().unwrap_or(Value::Null))
                    }
                    other => Err(self.unsupported_argument(other, span)),
                }
            }
            Builtin::Last => {
                self.expect_arity(&args, 1, span)?;
                match &args[0] {
                    Value::Array(elements) => {
                        Ok(elements.last().cloned().unwrap_or(Value::Null))
                    }
                    other => Err(self.unsupported_argument(other, span)),
                }
            }
            Builtin::Rest => {
                self.expect_arity(&args, 1, span)?;
                match &args[0] {
                    Value::Array(elements) => {
                        if elements.is_empty() {
                            Ok(Value::Null)
                        } else {
                            Ok(Value::Array(elements[1..].to_vec()))
                        }
                    }
                    other => Err(self.unsupported_argument(other, span)),
                }
            }
            Builtin::Push => {
                self.expect_arity(&args, 2, span)?;
                match &args[0] {
                    Value::Array(elements) => {
                        let mut pushed = elements.clone();
                        pushed.push(args[1].clone());
                        Ok(Value::Array(pushed))
                    }
                    other => Err(self.unsupported_argument(other, span)),
                }
            }
            Builtin::Puts => {
                for arg in &args {
                    writeln!(output, "{}", arg).map_err(|e| {
                        MonkeyError::runtime_error(span.clone(), format!("I/O error: {}", e))
                    })?;
                }
                Ok(Value::Null)
            }
        }
    }

    fn expect_arity(&self, args: &[Value], want: usize, span: &Span) -> Result<(), MonkeyError> {
        if args.len() == want {
            Ok(())
        } else {
            Err(MonkeyError::runtime_error(
                span.clone(),
                format!(
                    "wrong number of arguments. got={}, want={}",
                    args.len(),
                    want
                ),
            ))
        }
    }

    fn unsupported_argument(&self, arg: &Value, span: &Span) -> MonkeyError {
        MonkeyError::runtime_error(
            span.clone(),
            format!(
                "argument to `{}` not supported, got {}",
                self.name(),
                arg.type_name()
            ),
        )
    }
}
