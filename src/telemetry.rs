//! Optional JSON-lines telemetry for clear-all timings and bus failures.

use crate::config::AppConfig;
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_subscriber::fmt::time::UtcTime;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

pub(crate) fn tracing_log_path() -> PathBuf {
    env::var("OPTIONTERM_TRACE_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join("optionterm_trace.jsonl"))
}

#[inline]
fn tracing_enabled(config: &AppConfig) -> bool {
    config.log_timings && !config.no_logs
}

fn init_tracing_once(config: &AppConfig, once: &OnceLock<()>) {
    if !tracing_enabled(config) {
        return;
    }

    let _ = once.get_or_init(|| {
        let path = tracing_log_path();
        let file = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => file,
            Err(_) => return,
        };
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(file)
            .with_current_span(false)
            .with_span_list(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Install the global telemetry subscriber once, when `--log-timings` asks for it.
pub fn init_tracing(config: &AppConfig) {
    init_tracing_once(config, &TRACING_INIT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn unique_trace_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();
        env::temp_dir().join(format!("optionterm-trace-{suffix}-{nanos}.jsonl"))
    }

    #[test]
    fn tracing_log_path_prefers_env_override() {
        let _guard = env_lock().lock().expect("env lock");
        let path = unique_trace_path("env");
        env::set_var("OPTIONTERM_TRACE_LOG", &path);
        assert_eq!(tracing_log_path(), path);
        env::remove_var("OPTIONTERM_TRACE_LOG");
    }

    #[test]
    fn tracing_enabled_truth_table() {
        let mut cfg = AppConfig::default();
        assert!(!tracing_enabled(&cfg));

        cfg.logs = true;
        assert!(!tracing_enabled(&cfg));

        cfg.log_timings = true;
        assert!(tracing_enabled(&cfg));

        cfg.no_logs = true;
        assert!(!tracing_enabled(&cfg));
    }

    #[test]
    fn disabled_config_does_not_create_trace_file() {
        let _guard = env_lock().lock().expect("env lock");
        let path = unique_trace_path("disabled");
        let _ = fs::remove_file(&path);
        env::set_var("OPTIONTERM_TRACE_LOG", &path);
        let once = OnceLock::new();
        let cfg = AppConfig {
            no_logs: true,
            ..AppConfig::default()
        };
        init_tracing_once(&cfg, &once);
        assert!(!path.exists());
        assert!(once.get().is_none());
        env::remove_var("OPTIONTERM_TRACE_LOG");
    }
}
