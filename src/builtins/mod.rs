//! # Built-in Functions Module
//!
//! Functions available to every program without being defined by it:
//! `len`, `first`, `last`, `rest`, and `push` over arrays (`len` also
//! accepts strings and hashmaps).
//!
//! The evaluator never special-cases these by name. They are ordinary
//! `Value::Builtin` bindings placed in the root environment before a
//! program runs, so a program that shadows one of these names with its
//! own `let` simply shadows it like any other binding.

use crate::env::Environment;
use crate::value::Value;
use std::rc::Rc;

pub mod collections;

/// Registers every built-in function in `env`, which should be the root
/// environment — built-ins are ordinary bindings, not a separate table.
pub fn register(env: &Rc<Environment>) {
    env.set("len", Value::Builtin(collections::len));
    env.set("first", Value::Builtin(collections::first));
    env.set("last", Value::Builtin(collections::last));
    env.set("rest", Value::Builtin(collections::rest));
    env.set("push", Value::Builtin(collections::push));
}
