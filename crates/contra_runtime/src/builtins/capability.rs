use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::util::primitive_function;
use super::Call;
use crate::runtime::Runtime;
use crate::term::{CapabilityKind, Primitive};
use crate::values::{format_value, Field, Value};
use crate::R;

/// Checks access to the named resource once, up front, and hands back a
/// record of functions bound to it, or an `Error` value if access is denied.
pub(super) fn acquire(runtime: &Runtime, call: &Call<'_>, kind: CapabilityKind) -> R {
    let resource = match call.arg(0)? {
        Value::Str(resource) => resource,
        err @ Value::Error(_) => return Ok(err),
        other => {
            return Err(call.fail(format!(
                "{} is {}, expected a resource name",
                call.args[0],
                format_value(&other)
            )))
        }
    };
    let console = resource == runtime.config().console;
    if kind.reads() && !console && !is_readable(&resource) {
        log::debug!("{} capability denied: can't read {resource}", kind.name());
        return Ok(Value::error(format!(
            "Reader capability unavailable: can't read {resource}"
        )));
    }
    if kind.writes() && !console && !is_writable(&resource) {
        log::debug!("{} capability denied: can't write {resource}", kind.name());
        return Ok(Value::error(format!(
            "Writer capability unavailable: can't write {resource}"
        )));
    }
    log::debug!("{} capability granted for {resource}", kind.name());

    let mut fields = Vec::with_capacity(2);
    if kind.reads() {
        let read = Primitive::ReaderRead {
            resource: resource.clone(),
        };
        fields.push(Field::new("read", primitive_function(read)));
    }
    if kind.writes() {
        let write = Primitive::WriterWrite { resource };
        fields.push(Field::new("write", primitive_function(write)));
    }
    Ok(Value::record(fields))
}

/// Whole contents of the resource. Files are reopened on every call.
pub(super) fn read(runtime: &mut Runtime, call: &Call<'_>, resource: &str) -> R {
    let text = if resource == runtime.config().console {
        runtime.console.read_all()
    } else {
        fs::read_to_string(resource)
    };
    text.map(Value::Str).map_err(|err| call.io(resource, err))
}

/// Writes an `Int` or `Str`. Files are opened in append mode per call, so
/// writers sharing a file see each other's output in call order.
pub(super) fn write(runtime: &mut Runtime, call: &Call<'_>, resource: &str) -> R {
    let text = match call.arg(0)? {
        Value::Int(value) => value.to_string(),
        Value::Str(value) => value,
        other => return Err(call.fail(format!("can't write {}", format_value(&other)))),
    };
    let written = if resource == runtime.config().console {
        runtime.console.write_str(&text)
    } else {
        OpenOptions::new()
            .append(true)
            .open(resource)
            .and_then(|mut file| file.write_all(text.as_bytes()))
    };
    written.map_err(|err| call.io(resource, err))?;
    Ok(Value::unit())
}

pub(super) fn argument(runtime: &Runtime, index: usize) -> R {
    let args = &runtime.config().args;
    match args.get(index) {
        Some(arg) => Ok(Value::str(arg.clone())),
        None => Ok(Value::error(format!(
            "command-line argument {index} does not exist (arg count = {})",
            args.len()
        ))),
    }
}

fn is_readable(resource: &str) -> bool {
    let path = Path::new(resource);
    path.is_file() && File::open(path).is_ok()
}

fn is_writable(resource: &str) -> bool {
    let path = Path::new(resource);
    path.is_file() && OpenOptions::new().append(true).open(path).is_ok()
}
