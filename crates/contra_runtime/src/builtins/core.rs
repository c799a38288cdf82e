use super::ints::{build_equal_function, build_ints_record};
use crate::environment::Env;
use crate::values::{Value, FALSE_TAG, TRUE_TAG};

/// Bindings every program can refer to without defining them.
pub(crate) fn root_env() -> Env {
    Env::new()
        .extend(FALSE_TAG, Value::bool(false))
        .extend(TRUE_TAG, Value::bool(true))
        .extend("Ints", build_ints_record())
        .extend("equal", build_equal_function())
}
