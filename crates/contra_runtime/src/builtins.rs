//! Primitive operations and the predefined root environment. Primitives are
//! the evaluator's only channel for side effects.

mod capability;
mod core;
mod ints;
mod records;
mod util;

pub(crate) use self::core::root_env;

use crate::environment::Env;
use crate::errors::RuntimeError;
use crate::runtime::{lookup, Runtime};
use crate::term::{Primitive, Term};
use crate::R;

/// One primitive invocation: the primitive, the names of its operands and
/// the term and environment it is evaluated in.
pub(crate) struct Call<'a> {
    pub(crate) term: &'a Term,
    pub(crate) prim: &'a Primitive,
    pub(crate) env: &'a Env,
    pub(crate) args: &'a [String],
}

impl Call<'_> {
    pub(crate) fn arg(&self, index: usize) -> R {
        lookup(self.env, self.term, &self.args[index])
    }

    pub(crate) fn fail(&self, message: impl Into<String>) -> RuntimeError {
        RuntimeError::Primitive {
            term: self.term.describe(),
            primitive: self.prim.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn io(&self, resource: &str, err: std::io::Error) -> RuntimeError {
        RuntimeError::Io {
            term: self.term.describe(),
            resource: resource.to_string(),
            source: std::sync::Arc::new(err),
        }
    }
}

pub(crate) fn invoke(runtime: &mut Runtime, call: &Call<'_>) -> R {
    let expected = call.prim.arity();
    if call.args.len() != expected {
        return Err(RuntimeError::Arity {
            term: call.term.describe(),
            primitive: call.prim.to_string(),
            expected,
            found: call.args.len(),
        });
    }
    match call.prim {
        Primitive::RecSelect => records::select(call),
        Primitive::RecConcat => records::concat(call),
        Primitive::Capability(kind) => capability::acquire(runtime, call, *kind),
        Primitive::ReaderRead { resource } => capability::read(runtime, call, resource),
        Primitive::WriterWrite { resource } => capability::write(runtime, call, resource),
        Primitive::Argument { index } => capability::argument(runtime, *index),
        Primitive::Int(op) => ints::int_op(call, *op),
        Primitive::Equal => ints::equal(call),
    }
}
