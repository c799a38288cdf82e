//! Evaluator for a small continuation-passing intermediate representation.
//!
//! A [`Runtime`] evaluates a [`Term`] against a persistent [`Env`] until the
//! halt continuation is applied. Failures that a program can observe are
//! ordinary [`Value::Error`] values; malformed terms abort evaluation with a
//! [`RuntimeError`].

mod builtins;
mod config;
mod console;
mod environment;
mod errors;
mod runtime;
mod term;
mod trace;
mod values;

pub use config::{RuntimeConfig, DEFAULT_CONSOLE, DEFAULT_HALT, TRACE_ENV_VAR};
pub use console::Console;
pub use environment::Env;
pub use errors::RuntimeError;
pub use runtime::Runtime;
pub use term::{
    CapabilityKind, Case, ContRef, FieldExpr, FunctionDef, IntOp, Primitive, Term, ValueExpr,
};
pub use values::{
    compare_values, escape_str, format_value, unescape_str, values_equal, ContinuationClosure,
    Field, FunctionClosure, FunctionGroup, GroupMember, Value, VariantValue, FALSE_TAG, TRUE_TAG,
};

pub type R = Result<Value, RuntimeError>;
