//! Array inspection and construction: len, first, last, rest, push.
//!
//! `len` also accepts strings and hashmaps; the rest only operate on
//! arrays. `push` returns a new array and never mutates its argument.

use crate::error::EvalError;
use crate::value::Value;

fn expect_arity(args: &[Value], want: usize) -> Result<(), EvalError> {
    if args.len() != want {
        Err(EvalError::WrongArgumentCount {
            want,
            got: args.len(),
        })
    } else {
        Ok(())
    }
}

/// Number of elements in an array or hashmap, or bytes in a string.
pub fn len(args: &[Value]) -> Result<Value, EvalError> {
    expect_arity(args, 1)?;
    match &args[0] {
        Value::String(s) => Ok(Value::Integer(s.len() as i64)),
        Value::Array(items) => Ok(Value::Integer(items.borrow().len() as i64)),
        Value::HashMap(pairs) => Ok(Value::Integer(pairs.borrow().len() as i64)),
        other => Err(EvalError::UnsupportedArgument {
            function: "len".to_string(),
            type_name: other.type_name(),
        }),
    }
}

/// The first element of an array, or `Null` if it is empty.
pub fn first(args: &[Value]) -> Result<Value, EvalError> {
    expect_arity(args, 1)?;
    match &args[0] {
        Value::Array(items) => Ok(items.borrow().first().cloned().unwrap_or(Value::Null)),
        other => Err(EvalError::UnsupportedArgument {
            function: "first".to_string(),
            type_name: other.type_name(),
        }),
    }
}

/// The last element of an array, or `Null` if it is empty.
pub fn last(args: &[Value]) -> Result<Value, EvalError> {
    expect_arity(args, 1)?;
    match &args[0] {
        Value::Array(items) => Ok(items.borrow().last().cloned().unwrap_or(Value::Null)),
        other => Err(EvalError::UnsupportedArgument {
            function: "last".to_string(),
            type_name: other.type_name(),
        }),
    }
}

/// A new array holding every element but the first, or `Null` if empty.
pub fn rest(args: &[Value]) -> Result<Value, EvalError> {
    expect_arity(args, 1)?;
    match &args[0] {
        Value::Array(items) => {
            let items = items.borrow();
            if items.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(Value::array(items[1..].to_vec()))
            }
        }
        other => Err(EvalError::UnsupportedArgument {
            function: "rest".to_string(),
            type_name: other.type_name(),
        }),
    }
}

/// A new array equal to the first argument with the second appended.
/// Does not mutate the argument array in place.
pub fn push(args: &[Value]) -> Result<Value, EvalError> {
    expect_arity(args, 2)?;
    match &args[0] {
        Value::Array(items) => {
            let mut extended = items.borrow().clone();
            extended.push(args[1].clone());
            Ok(Value::array(extended))
        }
        other => Err(EvalError::UnsupportedArgument {
            function: "push".to_string(),
            type_name: other.type_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_accepts_strings_arrays_and_hashmaps() {
        assert_eq!(len(&[Value::String("abcd".into())]), Ok(Value::Integer(4)));
        assert_eq!(
            len(&[Value::array(vec![Value::Integer(1), Value::Integer(2)])]),
            Ok(Value::Integer(2))
        );
    }

    #[test]
    fn len_rejects_unsupported_types() {
        assert_eq!(
            len(&[Value::Integer(5)]),
            Err(EvalError::UnsupportedArgument {
                function: "len".to_string(),
                type_name: "INTEGER",
            })
        );
    }

    #[test]
    fn len_wrong_arity() {
        assert_eq!(
            len(&[]),
            Err(EvalError::WrongArgumentCount { want: 1, got: 0 })
        );
    }

    #[test]
    fn first_and_last_of_empty_array_are_null() {
        let empty = Value::array(vec![]);
        assert_eq!(first(&[empty.clone()]), Ok(Value::Null));
        assert_eq!(last(&[empty]), Ok(Value::Null));
    }

    #[test]
    fn first_and_last_of_nonempty_array() {
        let arr = Value::array(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        assert_eq!(first(&[arr.clone()]), Ok(Value::Integer(1)));
        assert_eq!(last(&[arr]), Ok(Value::Integer(3)));
    }

    #[test]
    fn rest_of_empty_is_null_otherwise_tail() {
        assert_eq!(rest(&[Value::array(vec![])]), Ok(Value::Null));
        let arr = Value::array(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(rest(&[arr]), Ok(Value::array(vec![Value::Integer(2)])));
    }

    #[test]
    fn push_does_not_mutate_original() {
        let original = Value::array(vec![Value::Integer(1)]);
        let pushed = push(&[original.clone(), Value::Integer(2)]).unwrap();
        assert_eq!(
            pushed,
            Value::array(vec![Value::Integer(1), Value::Integer(2)])
        );
        assert_eq!(original, Value::array(vec![Value::Integer(1)]));
    }
}
