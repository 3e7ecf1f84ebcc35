//! Linkshelf RPC Server: JSON-RPC over stdin/stdout.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmark.create", "params":{"url":"...","title":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Usage: `linkshelf-rpc [config.json]`. Logs go to stderr.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use serde_json::{json, Value};
use tracing::{info, warn};

use linkshelf::app::App;
use linkshelf::config::EngineConfig;
use linkshelf::logging;
use linkshelf::rpc_handler::handle_method;

fn write_line(out: &mut impl Write, value: &Value) -> io::Result<()> {
    writeln!(out, "{}", value)?;
    out.flush()
}

fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match EngineConfig::load(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("linkshelf-rpc: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.log_filter);

    let db_path = config.db_path();
    let app = match App::new(config) {
        Ok(a) => Mutex::new(a),
        Err(e) => {
            tracing::error!(error = %e, path = %db_path.display(), "failed to open database");
            return ExitCode::FAILURE;
        }
    };
    info!(path = %db_path.display(), "linkshelf ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let ready = json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")});
    if write_line(&mut out, &ready).is_err() {
        return ExitCode::FAILURE;
    }

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(req) => {
                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(json!({}));
                match handle_method(&app, method, &params) {
                    Ok(val) => json!({"id": id, "result": val}),
                    Err(err) => json!({"id": id, "error": err}),
                }
            }
            Err(e) => {
                warn!(error = %e, "unparsable request line");
                json!({"id": null, "error": format!("parse error: {}", e)})
            }
        };

        if write_line(&mut out, &response).is_err() {
            break;
        }
    }

    ExitCode::SUCCESS
}
