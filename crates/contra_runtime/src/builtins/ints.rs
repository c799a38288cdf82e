use num_traits::{ToPrimitive, Zero};

use super::util::{curried_primitive, expect_int};
use super::Call;
use crate::term::{IntOp, Primitive};
use crate::values::{values_equal, Field, Value};
use crate::R;

pub(super) fn build_ints_record() -> Value {
    let fields = IntOp::ALL
        .iter()
        .map(|op| Field::new(op.name(), curried_primitive(Primitive::Int(*op))))
        .collect();
    Value::record(fields)
}

pub(super) fn build_equal_function() -> Value {
    curried_primitive(Primitive::Equal)
}

pub(super) fn int_op(call: &Call<'_>, op: IntOp) -> R {
    let left = match expect_int(call, 0)? {
        Ok(value) => value,
        Err(err) => return Ok(err),
    };
    let right = match expect_int(call, 1)? {
        Ok(value) => value,
        Err(err) => return Ok(err),
    };
    let (left, right) = (left.as_ref(), right.as_ref());
    let value = match op {
        IntOp::Add => Value::int(left + right),
        IntOp::Sub => Value::int(left - right),
        IntOp::Mul => Value::int(left * right),
        IntOp::Div | IntOp::Mod if right.is_zero() => {
            Value::error(format!("{}: division by zero", op.name()))
        }
        IntOp::Div => Value::int(left / right),
        IntOp::Mod => Value::int(left % right),
        IntOp::Pow => match right.to_u32() {
            Some(exponent) => Value::int(left.pow(exponent)),
            None => Value::error(format!("pow: exponent {right} out of range")),
        },
        IntOp::Lt => Value::bool(left < right),
        IntOp::Lte => Value::bool(left <= right),
        IntOp::Gt => Value::bool(left > right),
        IntOp::Gte => Value::bool(left >= right),
    };
    Ok(value)
}

pub(super) fn equal(call: &Call<'_>) -> R {
    let left = call.arg(0)?;
    let right = call.arg(1)?;
    Ok(Value::bool(values_equal(&left, &right)))
}
