use super::Call;
use crate::values::{format_value, Value};
use crate::R;

/// First field whose name matches `args[1]`. Selecting from an `Error`
/// yields that error.
pub(super) fn select(call: &Call<'_>) -> R {
    let field = &call.args[1];
    match call.arg(0)? {
        Value::Record(fields) => fields
            .iter()
            .find(|candidate| candidate.name == *field)
            .map(|found| found.value.clone())
            .ok_or_else(|| {
                call.fail(format!(
                    "can't find field {field} in {}",
                    format_value(&Value::Record(fields.clone()))
                ))
            }),
        err @ Value::Error(_) => Ok(err),
        other => Err(call.fail(format!(
            "{} is {}, looking for field {field}",
            call.args[0],
            format_value(&other)
        ))),
    }
}

/// Fields of the left record followed by those of the right, duplicates
/// kept.
pub(super) fn concat(call: &Call<'_>) -> R {
    let left = call.arg(0)?;
    let right = call.arg(1)?;
    match (left, right) {
        (Value::Record(left), Value::Record(right)) => {
            let mut fields = Vec::with_capacity(left.len() + right.len());
            fields.extend(left.iter().cloned());
            fields.extend(right.iter().cloned());
            Ok(Value::record(fields))
        }
        (err @ Value::Error(_), _) | (_, err @ Value::Error(_)) => Ok(err),
        (Value::Record(_), other) => Err(call.fail(format!(
            "right argument {} of & is non-record {}",
            call.args[1],
            format_value(&other)
        ))),
        (other, _) => Err(call.fail(format!(
            "left argument {} of & is non-record {}",
            call.args[0],
            format_value(&other)
        ))),
    }
}
