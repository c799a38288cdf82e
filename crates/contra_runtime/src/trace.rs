use serde::Serialize;

const TARGET: &str = "contra_runtime::trace";

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub(crate) enum TraceEvent {
    Step { step: u64, term: String },
    Halt { steps: u64, value: String },
}

pub(crate) fn emit(event: &TraceEvent) {
    if !log::log_enabled!(target: TARGET, log::Level::Trace) {
        return;
    }
    if let Ok(line) = serde_json::to_string(event) {
        log::trace!(target: TARGET, "{line}");
    }
}
