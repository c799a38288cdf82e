mod core;
mod display;
mod equality;

pub use self::core::{
    ContinuationClosure, Field, FunctionClosure, FunctionGroup, GroupMember, Value, VariantValue,
    FALSE_TAG, TRUE_TAG,
};
pub use self::display::{escape_str, format_value, unescape_str};
pub use self::equality::{compare_values, values_equal};
