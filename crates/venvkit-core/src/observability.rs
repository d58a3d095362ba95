//! Observability: tracing init and the JSONL audit log.
//!
//! Uses config::ObservabilityConfig for VENVKIT_QUIET, VENVKIT_LOG_LEVEL,
//! VENVKIT_LOG_JSON and VENVKIT_AUDIT_LOG. Log output goes to stderr so
//! stdout stays clean for `eval "$(venvkit use ...)"`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

/// Initialize tracing. Call once at process startup.
/// `RUST_LOG` wins over VENVKIT_LOG_LEVEL; VENVKIT_QUIET=1 keeps only errors.
pub fn init_tracing() {
    let cfg = ObservabilityConfig::from_env();
    let level = if cfg.quiet {
        "error".to_string()
    } else {
        cfg.log_level.clone()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init()
    };
}

fn audit_path() -> Option<String> {
    let path = ObservabilityConfig::from_env().audit_log.clone()?;
    if let Some(parent) = Path::new(&path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    Some(path)
}

fn append_jsonl(path: &str, record: &Value) {
    if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(path) {
        if let Ok(line) = serde_json::to_string(record) {
            let _ = writeln!(f, "{}", line);
        }
    }
}

fn audit_record(event: &str, fields: Value) -> Value {
    let mut record = json!({
        "ts": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "event": event,
    });
    if let (Some(obj), Value::Object(extra)) = (record.as_object_mut(), fields) {
        obj.extend(extra);
    }
    record
}

fn audit(event: &str, fields: Value) {
    if let Some(path) = audit_path() {
        append_jsonl(&path, &audit_record(event, fields));
    }
}

/// Audit: env_created
pub fn audit_env_created(env_id: &str, interpreter: &str) {
    audit(
        "env_created",
        json!({ "env_id": env_id, "interpreter": interpreter }),
    );
}

/// Audit: env_deleted
pub fn audit_env_deleted(env_id: &str) {
    audit("env_deleted", json!({ "env_id": env_id }));
}

/// Audit: deps_synced
pub fn audit_deps_synced(env_id: &str, runtime: usize, groups: usize) {
    audit(
        "deps_synced",
        json!({ "env_id": env_id, "runtime_count": runtime, "group_count": groups }),
    );
}

/// Audit: release_step (one record per completed step)
pub fn audit_release_step(version: &str, step: &str) {
    audit("release_step", json!({ "version": version, "step": step }));
}
