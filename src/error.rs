// ABOUTME: Runtime error types for evaluation failures

use thiserror::Error;

/// Every runtime failure the evaluator can produce. Message text matches
/// the canonical wording exactly — driver and test code match against it
/// literally via `Display`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("unknown operator: -{operand_type}")]
    UnknownPrefixOperator { operand_type: &'static str },

    #[error("type mismatch: {left_type} {operator} {right_type}")]
    TypeMismatch {
        left_type: &'static str,
        operator: String,
        right_type: &'static str,
    },

    #[error("unknown operator: {left_type} {operator} {right_type}")]
    UnknownInfixOperator {
        left_type: &'static str,
        operator: String,
        right_type: &'static str,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("identifier not found: {name}")]
    IdentifierNotFound { name: String },

    #[error("not a function: {type_name}")]
    NotAFunction { type_name: &'static str },

    #[error("unusable as hash key: {type_name}")]
    UnusableHashKey { type_name: &'static str },

    #[error("index operator not supported: {target_type}[{index_type}]")]
    UnsupportedIndex {
        target_type: &'static str,
        index_type: &'static str,
    },

    #[error("index assignment not supported for type: {type_name}")]
    UnsupportedIndexAssignment { type_name: &'static str },

    #[error("found break statement outside of loop")]
    BreakOutsideLoop,

    #[error("found continue statement outside of loop")]
    ContinueOutsideLoop,

    #[error("wrong number of arguments: want {want}, got {got}")]
    WrongArgumentCount { want: usize, got: usize },

    #[error("argument to `{function}` not supported, got {type_name}")]
    UnsupportedArgument {
        function: String,
        type_name: &'static str,
    },
}
