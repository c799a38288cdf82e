use std::sync::Arc;

use num_bigint::BigInt;

use super::Call;
use crate::environment::Env;
use crate::errors::RuntimeError;
use crate::term::{Primitive, Term, ValueExpr};
use crate::values::{format_value, FunctionClosure, Value};

/// A one-argument function whose body invokes `prim` on its argument and
/// passes the result to its continuation.
pub(super) fn primitive_function(prim: Primitive) -> Value {
    let body = Term::let_v("r", ValueExpr::prim(prim, &["x"]), Term::app_c("k", "r"));
    function_value("k", "x", body)
}

/// A curried two-argument function: applied to `x` it returns a function
/// that, applied to `y`, invokes `prim` on `x` and `y`.
pub(super) fn curried_primitive(prim: Primitive) -> Value {
    let inner = ValueExpr::function(
        "j",
        "y",
        Term::let_v("r", ValueExpr::prim(prim, &["x", "y"]), Term::app_c("j", "r")),
    );
    let body = Term::let_v("f", inner, Term::app_c("k", "f"));
    function_value("k", "x", body)
}

fn function_value(cont_param: &str, param: &str, body: Arc<Term>) -> Value {
    Value::Function(Arc::new(FunctionClosure {
        env: Env::new(),
        cont_param: cont_param.to_string(),
        param: param.to_string(),
        body,
    }))
}

/// Reads operand `index` as an integer. An `Error` operand comes back as
/// `Ok(Err(error))` so the caller can return it unchanged.
pub(super) fn expect_int(
    call: &Call<'_>,
    index: usize,
) -> Result<Result<Arc<BigInt>, Value>, RuntimeError> {
    match call.arg(index)? {
        Value::Int(value) => Ok(Ok(value)),
        err @ Value::Error(_) => Ok(Err(err)),
        other => Err(call.fail(format!(
            "{} is {}, expected an integer",
            call.args[index],
            format_value(&other)
        ))),
    }
}
