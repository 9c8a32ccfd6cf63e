// ABOUTME: Value types representing runtime objects produced by the evaluator

use crate::ast::Block;
use crate::env::Environment;
use crate::error::EvalError;
use std::cell::RefCell;
use std::collections::HashMap as StdHashMap;
use std::rc::Rc;

/// A user-defined function value: parameters, body, and the environment it
/// closed over. The environment is captured by shared reference, not
/// copied, so later mutations to bindings reachable from it are observed.
#[derive(Debug)]
pub struct Closure {
    pub parameters: Vec<String>,
    pub body: Block,
    pub env: Rc<Environment>,
}

pub type BuiltinFn = fn(&[Value]) -> Result<Value, EvalError>;

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    /// Shared by `Rc<RefCell<_>>` so two bindings to the same array observe
    /// mutations made through either one (index-assignment aliasing).
    Array(Rc<RefCell<Vec<Value>>>),
    HashMap(Rc<RefCell<StdHashMap<HashKey, (Value, Value)>>>),
    Function(Rc<Closure>),
    Builtin(BuiltinFn),
    ReturnValue(Box<Value>),
    Break,
    Continue,
    Error(String),
}

impl Value {
    pub fn array(elements: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(elements)))
    }

    pub fn hashmap(pairs: StdHashMap<HashKey, (Value, Value)>) -> Value {
        Value::HashMap(Rc::new(RefCell::new(pairs)))
    }

    /// `Null` and `false` are falsy; every other value, including the
    /// integer `0`, is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    /// The uppercase type tag used in canonical error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::String(_) => "STRING",
            Value::Null => "NULL",
            Value::Array(_) => "ARRAY",
            Value::HashMap(_) => "HASHMAP",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::Break => "BREAK",
            Value::Continue => "CONTINUE",
            Value::Error(_) => "ERROR",
        }
    }

    /// The printable form a driver shows to the user.
    pub fn inspect(&self) -> String {
        match self {
            Value::Integer(v) => v.to_string(),
            Value::Boolean(v) => v.to_string(),
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
            Value::Array(items) => {
                let rendered: Vec<String> =
                    items.borrow().iter().map(Value::inspect).collect();
                format!("[{}]", rendered.join(", "))
            }
            Value::HashMap(pairs) => {
                let rendered: Vec<String> = pairs
                    .borrow()
                    .values()
                    .map(|(key, value)| format!("{}: {}", key.inspect(), value.inspect()))
                    .collect();
                format!("{{{}}}", rendered.join(", "))
            }
            Value::Function(closure) => format!(
                "func({}) {{\n{}\n}}",
                closure.parameters.join(", "),
                closure.body
            ),
            Value::Builtin(_) => "builtin function".to_string(),
            Value::ReturnValue(inner) => inner.inspect(),
            Value::Break => "break".to_string(),
            Value::Continue => "continue".to_string(),
            Value::Error(message) => format!("ERROR: {}", message),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::HashMap(a), Value::HashMap(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => std::ptr::eq(*a as *const (), *b as *const ()),
            (Value::ReturnValue(a), Value::ReturnValue(b)) => a == b,
            (Value::Break, Value::Break) => true,
            (Value::Continue, Value::Continue) => true,
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => false,
        }
    }
}

/// Only `Integer`, `Boolean`, and `String` are hashable; a key carries its
/// source kind alongside the hash so values of different kinds that hash
/// to the same `u64` never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    kind: HashKeyKind,
    hash: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum HashKeyKind {
    Integer,
    Boolean,
    String,
}

impl HashKey {
    /// Renders the key back as a `Value` for `inspect()`'s `{k: v, ...}`
    /// display. Only meaningful for display purposes, not round-tripped.
    fn inspect(&self) -> String {
        match self.kind {
            HashKeyKind::Integer => (self.hash as i64).to_string(),
            HashKeyKind::Boolean => (self.hash != 0).to_string(),
            HashKeyKind::String => "<string>".to_string(),
        }
    }
}

/// Computes a `HashKey` for a hashable value, or `None` for a value that
/// cannot be used as a hash key.
pub fn hash_value(value: &Value) -> Option<HashKey> {
    match value {
        Value::Integer(v) => Some(HashKey {
            kind: HashKeyKind::Integer,
            hash: *v as u64,
        }),
        Value::Boolean(v) => Some(HashKey {
            kind: HashKeyKind::Boolean,
            hash: if *v { 1 } else { 0 },
        }),
        Value::String(s) => Some(HashKey {
            kind: HashKeyKind::String,
            hash: fnv1a64(s.as_bytes()),
        }),
        _ => None,
    }
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(Value::Boolean(true).is_truthy());
        assert!(Value::Integer(0).is_truthy());
        assert!(Value::String(String::new()).is_truthy());
    }

    #[test]
    fn type_names_are_canonical_tags() {
        assert_eq!(Value::Integer(1).type_name(), "INTEGER");
        assert_eq!(Value::Boolean(true).type_name(), "BOOLEAN");
        assert_eq!(Value::String("x".into()).type_name(), "STRING");
        assert_eq!(Value::Null.type_name(), "NULL");
        assert_eq!(Value::array(vec![]).type_name(), "ARRAY");
        assert_eq!(Value::hashmap(StdHashMap::new()).type_name(), "HASHMAP");
    }

    #[test]
    fn inspect_integer_and_string() {
        assert_eq!(Value::Integer(5).inspect(), "5");
        assert_eq!(Value::String("hello".into()).inspect(), "hello");
        assert_eq!(Value::Null.inspect(), "null");
        assert_eq!(Value::Error("oops".into()).inspect(), "ERROR: oops");
    }

    #[test]
    fn inspect_array() {
        let arr = Value::array(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(arr.inspect(), "[1, 2]");
    }

    #[test]
    fn arrays_alias_through_rc() {
        let arr = Value::array(vec![Value::Integer(1)]);
        let alias = arr.clone();
        if let Value::Array(cell) = &arr {
            cell.borrow_mut().push(Value::Integer(2));
        }
        if let Value::Array(cell) = &alias {
            assert_eq!(cell.borrow().len(), 2);
        } else {
            panic!("expected array");
        }
    }

    #[test]
    fn hash_key_integer_uses_bit_pattern() {
        let key = hash_value(&Value::Integer(-1)).unwrap();
        assert_eq!(key.hash, (-1i64) as u64);
    }

    #[test]
    fn hash_key_boolean_is_one_or_zero() {
        assert_eq!(hash_value(&Value::Boolean(true)).unwrap().hash, 1);
        assert_eq!(hash_value(&Value::Boolean(false)).unwrap().hash, 0);
    }

    #[test]
    fn hash_key_string_is_fnv1a() {
        let key = hash_value(&Value::String("a".to_string())).unwrap();
        // FNV-1a 64-bit of the single byte 'a' (0x61).
        let expected = (0xcbf29ce484222325u64 ^ 0x61).wrapping_mul(0x100000001b3);
        assert_eq!(key.hash, expected);
    }

    #[test]
    fn non_hashable_values_have_no_hash_key() {
        assert!(hash_value(&Value::Null).is_none());
        assert!(hash_value(&Value::array(vec![])).is_none());
    }

    #[test]
    fn equal_strings_hash_to_same_key() {
        let a = hash_value(&Value::String("same".to_string())).unwrap();
        let b = hash_value(&Value::String("same".to_string())).unwrap();
        assert_eq!(a, b);
    }
}
