use crate::ast::{Block, Expr, InfixOp, PrefixOp, Program, Stmt};
use crate::builtins::Builtin;
use crate::environment::Environment;
use crate::error::{MonkeyError, Span};
use crate::value::{Function, HashPair, Value};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

/// Walks the AST against an environment chain.
///
/// Runtime failures come back as `Err`, which makes every `?` below the
/// short-circuit the language needs: the first failing sub-expression
/// aborts the whole evaluation and its message surfaces to the host.
/// `return` payloads travel as `Value::Return` instead, so they stop at the
/// nearest function-call boundary rather than tearing down the program.
pub struct Evaluator<'a, W: Write> {
    output: &'a mut W,
}

impl<'a, W: Write> Evaluator<'a, W> {
    /// `output` is the sink `puts` writes to.
    pub fn new(output: &'a mut W) -> Self {
        Self { output }
    }

    pub fn eval_program(
        &mut self,
        program: &Program,
        env: &Rc<Environment>,
    ) -> Result<Value, MonkeyError> {
        let mut result = Value::Null;

        for stmt in &program.statements {
            result = self.eval_statement(stmt, env)?;
            if let Value::Return(value) = result {
                return Ok(*value);
            }
        }

        Ok(result)
    }

    fn eval_statement(&mut self, stmt: &Stmt, env: &Rc<Environment>) -> Result<Value, MonkeyError> {
        match stmt {
            Stmt::Let { name, value, .. } => {
                let value = self.eval_expression(value, env)?;
                // A `return` inside the initializer (via an if expression)
                // unwinds past the binding.
                if let Value::Return(_) = value {
                    return Ok(value);
                }
                env.set(name.name.clone(), value);
                Ok(Value::Null)
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval_expression(expr, env)?,
                    None => Value::Null,
                };
                Ok(Value::Return(Box::new(value)))
            }
            Stmt::Expression { expr, .. } => self.eval_expression(expr, env),
        }
    }

    fn eval_block(&mut self, block: &Block, env: &Rc<Environment>) -> Result<Value, MonkeyError> {
        let mut result = Value::Null;

        for stmt in &block.statements {
            result = self.eval_statement(stmt, env)?;
            // Keep the wrapper intact so nested blocks keep unwinding; only
            // a function call (or the program) unwraps it.
            if let Value::Return(_) = result {
                return Ok(result);
            }
        }

        Ok(result)
    }

    fn eval_expression(&mut self, expr: &Expr, env: &Rc<Environment>) -> Result<Value, MonkeyError> {
        match expr {
            Expr::Identifier(ident) => {
                if let Some(value) = env.get(&ident.name) {
                    Ok(value)
                } else if let Some(builtin) = Builtin::lookup(&ident.name) {
                    Ok(Value::Builtin(builtin))
                } else {
                    Err(MonkeyError::runtime_error(
                        ident.span.clone(),
                        format!("identifier not found: {}", ident.name),
                    ))
                }
            }
            Expr::IntegerLiteral { value, .. } => Ok(Value::Integer(*value)),
            Expr::BooleanLiteral { value, .. } => Ok(Value::Bool(*value)),
            Expr::StringLiteral { value, .. } => Ok(Value::String(value.clone())),
            Expr::Prefix {
                operator,
                right,
                span,
            } => {
                let right = self.eval_expression(right, env)?;
                self.eval_prefix_expression(*operator, right, span)
            }
            Expr::Infix {
                left,
                operator,
                right,
                span,
            } => {
                let left = self.eval_expression(left, env)?;
                let right = self.eval_expression(right, env)?;
                self.eval_infix_expression(*operator, left, right, span)
            }
            Expr::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                let condition = self.eval_expression(condition, env)?;
                if condition.is_truthy() {
                    self.eval_block(consequence, env)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, env)
                } else {
                    Ok(Value::Null)
                }
            }
            Expr::FunctionLiteral {
                parameters, body, ..
            } => Ok(Value::Function(Function {
                parameters: Rc::new(parameters.clone()),
                body: Rc::new(body.clone()),
                env: Rc::clone(env),
            })),
            Expr::Call {
                function,
                arguments,
                span,
            } => {
                let function = self.eval_expression(function, env)?;
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.eval_expression(argument, env)?);
                }
                self.apply_function(function, args, span)
            }
            Expr::ArrayLiteral { elements, .. } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval_expression(element, env)?);
                }
                Ok(Value::Array(values))
            }
            Expr::Index { left, index, span } => {
                let left = self.eval_expression(left, env)?;
                let index = self.eval_expression(index, env)?;
                self.eval_index_expression(left, index, span)
            }
            Expr::HashLiteral { pairs, .. } => {
                let mut hash = HashMap::new();
                for (key_expr, value_expr) in pairs {
                    let key = self.eval_expression(key_expr, env)?;
                    let hash_key = key.hash_key().ok_or_else(|| {
                        MonkeyError::runtime_error(
                            key_expr.span().clone(),
                            format!("unusable as hash key: {}", key.type_name()),
                        )
                    })?;
                    let value = self.eval_expression(value_expr, env)?;
                    hash.insert(hash_key, HashPair { key, value });
                }
                Ok(Value::Hash(hash))
            }
        }
    }

    fn eval_prefix_expression(
        &mut self,
        operator: PrefixOp,
        right: Value,
        span: &Span,
    ) -> Result<Value, MonkeyError> {
        match operator {
            PrefixOp::Bang => Ok(Value::Bool(!right.is_truthy())),
            PrefixOp::Minus => match right {
                Value::Integer(n) => Ok(Value::Integer(n.wrapping_neg())),
                other => Err(MonkeyError::runtime_error(
                    span.clone(),
                    format!("unknown operator: -{}", other.type_name()),
                )),
            },
        }
    }

    fn eval_infix_expression(
        &mut self,
        operator: InfixOp,
        left: Value,
        right: Value,
        span: &Span,
    ) -> Result<Value, MonkeyError> {
        match (&left, &right) {
            (Value::Integer(l), Value::Integer(r)) => {
                self.eval_integer_infix_expression(operator, *l, *r, span)
            }
            (Value::String(l), Value::String(r)) => {
                self.eval_string_infix_expression(operator, l, r, span)
            }
            _ if left.type_name() != right.type_name() => Err(MonkeyError::runtime_error(
                span.clone(),
                format!(
                    "type mismatch: {} {} {}",
                    left.type_name(),
                    operator,
                    right.type_name()
                ),
            )),
            (Value::Bool(l), Value::Bool(r)) => match operator {
                InfixOp::Equal => Ok(Value::Bool(l == r)),
                InfixOp::NotEqual => Ok(Value::Bool(l != r)),
                _ => Err(self.unknown_infix_operator(operator, &left, &right, span)),
            },
            (Value::Null, Value::Null) => match operator {
                InfixOp::Equal => Ok(Value::Bool(true)),
                InfixOp::NotEqual => Ok(Value::Bool(false)),
                _ => Err(self.unknown_infix_operator(operator, &left, &right, span)),
            },
            _ => Err(self.unknown_infix_operator(operator, &left, &right, span)),
        }
    }

    fn eval_integer_infix_expression(
        &mut self,
        operator: InfixOp,
        left: i64,
        right: i64,
        span: &Span,
    ) -> Result<Value, MonkeyError> {
        match operator {
            InfixOp::Add => Ok(Value::Integer(left.wrapping_add(right))),
            InfixOp::Subtract => Ok(Value::Integer(left.wrapping_sub(right))),
            InfixOp::Multiply => Ok(Value::Integer(left.wrapping_mul(right))),
            InfixOp::Divide => {
                if right == 0 {
                    Err(MonkeyError::runtime_error(
                        span.clone(),
                        "division by zero".to_string(),
                    ))
                } else {
                    Ok(Value::Integer(left.wrapping_div(right)))
                }
            }
            InfixOp::Less => Ok(Value::Bool(left < right)),
            InfixOp::Greater => Ok(Value::Bool(left > right)),
            InfixOp::Equal => Ok(Value::Bool(left == right)),
            InfixOp::NotEqual => Ok(Value::Bool(left != right)),
        }
    }

    fn eval_string_infix_expression(
        &mut self,
        operator: InfixOp,
        left: &str,
        right: &str,
        span: &Span,
    ) -> Result<Value, MonkeyError> {
        match operator {
            InfixOp::Add => Ok(Value::String(format!("{}{}", left, right))),
            InfixOp::Equal => Ok(Value::Bool(left == right)),
            InfixOp::NotEqual => Ok(Value::Bool(left != right)),
            _ => Err(MonkeyError::runtime_error(
                span.clone(),
                format!("unknown operator: STRING {} STRING", operator),
            )),
        }
    }

    fn unknown_infix_operator(
        &self,
        operator: InfixOp,
        left: &Value,
        right: &Value,
        span: &Span,
    ) -> MonkeyError {
        MonkeyError::runtime_error(
            span.clone(),
            format!(
                "unknown operator: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            ),
        )
    }

    fn eval_index_expression(
        &mut self,
        left: Value,
        index: Value,
        span: &Span,
    ) -> Result<Value, MonkeyError> {
        match (&left, &index) {
            (Value::Array(elements), Value::Integer(i)) => {
                if *i < 0 || *i as usize >= elements.len() {
                    Ok(Value::Null)
                } else {
                    Ok(elements[*i as usize].clone())
                }
            }
            (Value::Hash(pairs), key) => match key.hash_key() {
                Some(hash_key) => Ok(pairs
                    .get(&hash_key)
                    .map(|pair| pair.value.clone())
                    .unwrap_or(Value::Null)),
                None => Err(MonkeyError::runtime_error(
                    span.clone(),
                    format!("unusable as hash key: {}", key.type_name()),
                )),
            },
            _ => Err(MonkeyError::runtime_error(
                span.clone(),
                format!("index operator not supported: {}", left.type_name()),
            )),
        }
    }

    fn apply_function(
        &mut self,
        function: Value,
        args: Vec<Value>,
        span: &Span,
    ) -> Result<Value, MonkeyError> {
        match function {
            Value::Function(function) => {
                if args.len() != function.parameters.len() {
                    return Err(MonkeyError::runtime_error(
                        span.clone(),
                        format!(
                            "wrong number of arguments. got={}, want={}",
                            args.len(),
                            function.parameters.len()
                        ),
                    ));
                }

                // The call frame extends the environment captured at the
                // function's definition site, not the caller's.
                let call_env = Environment::enclosed(Rc::clone(&function.env));
                for (parameter, arg) in function.parameters.iter().zip(args) {
                    call_env.set(parameter.name.clone(), arg);
                }

                let result = self.eval_block(&function.body, &call_env)?;
                match result {
                    Value::Return(value) => Ok(*value),
                    other => Ok(other),
                }
            }
            Value::Builtin(builtin) => builtin.apply(args, self.output, span),
            other => Err(MonkeyError::runtime_error(
                span.clone(),
                format!("not a function: {}", other.type_name()),
            )),
        }
    }
}
