pub const DEFAULT_HALT: &str = "$halt";
pub const DEFAULT_CONSOLE: &str = "-";
pub const TRACE_ENV_VAR: &str = "CONTRA_TRACE_EVAL";

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Program arguments, after any driver flags have been stripped.
    pub args: Vec<String>,
    /// The identifier that denotes the top-level continuation.
    pub halt: String,
    /// Resource name that capabilities map to standard input/output.
    pub console: String,
    /// Emit one structured trace event per evaluation step.
    pub trace: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            halt: DEFAULT_HALT.to_string(),
            console: DEFAULT_CONSOLE.to_string(),
            trace: false,
        }
    }
}

impl RuntimeConfig {
    /// Default configuration with tracing switched on when
    /// `CONTRA_TRACE_EVAL=1` is set.
    pub fn from_env(args: Vec<String>) -> Self {
        let trace = std::env::var(TRACE_ENV_VAR).is_ok_and(|v| v == "1");
        Self {
            args,
            trace,
            ..Self::default()
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_halt(mut self, halt: impl Into<String>) -> Self {
        self.halt = halt.into();
        self
    }

    pub fn with_console_marker(mut self, console: impl Into<String>) -> Self {
        self.console = console.into();
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_switches_tracing_on_only_for_one() {
        std::env::remove_var(TRACE_ENV_VAR);
        let config = RuntimeConfig::from_env(vec!["input.txt".to_string()]);
        assert!(!config.trace);
        assert_eq!(config.args, ["input.txt"]);
        assert_eq!(config.halt, DEFAULT_HALT);
        assert_eq!(config.console, DEFAULT_CONSOLE);

        std::env::set_var(TRACE_ENV_VAR, "1");
        assert!(RuntimeConfig::from_env(Vec::new()).trace);

        std::env::set_var(TRACE_ENV_VAR, "yes");
        assert!(!RuntimeConfig::from_env(Vec::new()).trace);

        std::env::remove_var(TRACE_ENV_VAR);
    }

    #[test]
    fn builders_override_defaults() {
        let config = RuntimeConfig::default()
            .with_halt("done")
            .with_console_marker("<console>")
            .with_trace(true);
        assert_eq!(config.halt, "done");
        assert_eq!(config.console, "<console>");
        assert!(config.trace);
        assert!(config.args.is_empty());
    }
}
