#![allow(dead_code)]

use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};

use contra_runtime::{
    CapabilityKind, Case, Console, ContRef, FunctionDef, IntOp, Primitive, Runtime, RuntimeConfig,
    Term, ValueExpr,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Console output that tests can inspect after the runtime has written it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("buffer lock").clone();
        String::from_utf8(bytes).expect("utf-8 output")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("buffer lock").write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn runtime(config: RuntimeConfig) -> Runtime {
    init_logging();
    Runtime::with_console(config, Console::new(io::empty(), io::sink()))
}

/// A runtime whose console reads `input` and records everything written.
pub fn console_runtime(input: &str) -> (Runtime, SharedBuffer) {
    init_logging();
    let output = SharedBuffer::default();
    let console = Console::new(Cursor::new(input.to_string()), output.clone());
    (Runtime::with_console(RuntimeConfig::default(), console), output)
}

/// Binds `cap` to a `kind` capability over the literal `resource`, then
/// continues with `body`.
pub fn with_capability(kind: CapabilityKind, resource: &str, body: Arc<Term>) -> Arc<Term> {
    Term::let_v(
        "resource",
        ValueExpr::str(resource),
        Term::let_v(
            "cap",
            ValueExpr::prim(Primitive::Capability(kind), &["resource"]),
            body,
        ),
    )
}

/// Selects `field` from the record bound to `record` and applies it to
/// `arg`, halting with the result.
pub fn call_field(record: &str, field: &str, arg: &str) -> Arc<Term> {
    Term::let_v(
        "method",
        ValueExpr::prim(Primitive::RecSelect, &[record, field]),
        Term::app_f("method", ContRef::Halt, arg),
    )
}

/// `loop n` counts down to zero through a self tail call and halts with
/// the final counter.
pub fn countdown(start: u64) -> Arc<Term> {
    let body = Term::let_v(
        "zero",
        ValueExpr::int(0),
        Term::let_v(
            "done",
            ValueExpr::prim(Primitive::Int(IntOp::Lte), &["n", "zero"]),
            Term::let_c(
                "stop",
                "_",
                Term::app_c("k", "n"),
                Term::let_c(
                    "again",
                    "_",
                    Term::let_v(
                        "one",
                        ValueExpr::int(1),
                        Term::let_v(
                            "m",
                            ValueExpr::prim(Primitive::Int(IntOp::Sub), &["n", "one"]),
                            Term::app_f("loop", ContRef::named("k"), "m"),
                        ),
                    ),
                    Term::case_v(
                        "done",
                        vec![Case::new("true", "stop"), Case::new("false", "again")],
                    ),
                ),
            ),
        ),
    );
    Term::let_f(
        vec![FunctionDef::new("loop", "k", "n", body)],
        Term::let_v(
            "start",
            ValueExpr::int(start),
            Term::app_f("loop", ContRef::Halt, "start"),
        ),
    )
}

/// `dive n` calls itself `start` times without returning, each call pushing
/// a fresh `ret` continuation that forwards to the caller's. Once `n`
/// reaches zero it runs `bottom`, which sees `k` and `n`.
pub fn dive(start: u64, bottom: Arc<Term>) -> Arc<Term> {
    let body = Term::let_v(
        "zero",
        ValueExpr::int(0),
        Term::let_v(
            "done",
            ValueExpr::prim(Primitive::Int(IntOp::Lte), &["n", "zero"]),
            Term::let_c(
                "bottom",
                "_",
                bottom,
                Term::let_c(
                    "deeper",
                    "_",
                    Term::let_v(
                        "one",
                        ValueExpr::int(1),
                        Term::let_v(
                            "m",
                            ValueExpr::prim(Primitive::Int(IntOp::Sub), &["n", "one"]),
                            Term::let_c(
                                "ret",
                                "r",
                                Term::app_c("k", "r"),
                                Term::app_f("dive", ContRef::named("ret"), "m"),
                            ),
                        ),
                    ),
                    Term::case_v(
                        "done",
                        vec![Case::new("true", "bottom"), Case::new("false", "deeper")],
                    ),
                ),
            ),
        ),
    );
    Term::let_f(
        vec![FunctionDef::new("dive", "k", "n", body)],
        Term::let_v(
            "start",
            ValueExpr::int(start),
            Term::app_f("dive", ContRef::Halt, "start"),
        ),
    )
}
