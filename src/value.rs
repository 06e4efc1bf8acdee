use crate::ast::{Block, Ident};
use crate::builtins::Builtin;
use crate::environment::Environment;
use fnv::FnvHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hasher;
use std::rc::Rc;

/// A runtime value.
///
/// `Return` never reaches user code: it carries a `return` payload up
/// through enclosing blocks and is unwrapped at the nearest function-call
/// (or program) boundary.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Bool(bool),
    Null,
    String(String),
    Array(Vec<Value>),
    Hash(HashMap<HashKey, HashPair>),
    Function(Function),
    Builtin(Builtin),
    Return(Box<Value>),
}

/// A user function closed over its definition environment.
#[derive(Clone)]
pub struct Function {
    pub parameters: Rc<Vec<Ident>>,
    pub body: Rc<Block>,
    pub env: Rc<Environment>,
}

impl fmt::Debug for Function {
    // The captured environment may be cyclic (recursive closures), so it is
    // left out of the debug output.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// A hash entry, keeping the original key value so the hash can be
/// inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum HashTag {
    Integer,
    Bool,
    String,
}

/// Projection of a hashable value to a `{tag, u64}` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    tag: HashTag,
    value: u64,
}

impl Value {
    /// Everything is truthy except `null` and `false`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Bool(_) => "BOOLEAN",
            Value::Null => "NULL",
            Value::String(_) => "STRING",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::Return(_) => "RETURN_VALUE",
        }
    }

    /// The hash-key projection, defined for integers, booleans and strings.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(n) => Some(HashKey {
                tag: HashTag::Integer,
                value: *n as u64,
            }),
            Value::Bool(b) => Some(HashKey {
                tag: HashTag::Bool,
                value: u64::from(*b),
            }),
            Value::String(s) => {
                let mut hasher = FnvHasher::default();
                hasher.write(s.as_bytes());
                Some(HashKey {
                    tag: HashTag::String,
                    value: hasher.finish(),
                })
            }
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => {
                Rc::ptr_eq(&a.body, &b.body) && Rc::ptr_eq(&a.env, &b.env)
            }
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Return(a), Value::Return(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(elements) => {
                let elements: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Value::Hash(pairs) => {
                let pairs: Vec<String> = pairs
                    .values()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Value::Function(function) => {
                let params: Vec<String> = function
                    .parameters
                    .iter()
                    .map(|p| p.to_string())
                    .collect();
                write!(f, "fn({}) {}", params.join(", "), function.body)
            }
            Value::Builtin(_) => write!(f, "builtin function"),
            Value::Return(value) => write!(f, "{}", value),
        }
    }
}
