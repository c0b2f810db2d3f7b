//! Terminal output helpers - dual-mode: styled text for humans, structured JSON for machines.
//!
//! Uses:
//! - `console` for colors (respects NO_COLOR, auto-disables when piped)
//! - `comfy-table` for the model catalogue
//! - `indicatif` for spinners while a model call is in flight

use std::sync::atomic::{AtomicBool, Ordering};

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value as JsonValue;

use cyber_llms::{Message, ModelName};
use cyber_policy::{CandidateSelection, Decision, Rejection};

use crate::cli::OutputFormat;

// ── Global format flag ─────────────────────────────────────────────

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        JSON_MODE.store(true, Ordering::Relaxed);
    }
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

// ── JSON envelope ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Msg<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn emit_json(level: &str, message: &str, data: Option<&JsonValue>) {
    let msg = Msg {
        level,
        message,
        data,
    };
    let json = serde_json::to_string(&msg)
        .unwrap_or_else(|_| format!("{{\"level\":\"{level}\",\"message\":\"{message}\"}}"));
    println!("{json}");
}

// ── Public helpers ─────────────────────────────────────────────────

pub fn header(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).bold().cyan());
    }
}

pub fn success(text: &str) {
    if is_json() {
        emit_json("success", text, None);
    } else {
        println!("{} {}", style("✓").green(), style(text).bright());
    }
}

pub fn error(text: &str) {
    if is_json() {
        let msg = Msg {
            level: "error",
            message: text,
            data: None,
        };
        let json = serde_json::to_string(&msg).unwrap_or_default();
        eprintln!("{json}");
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).bright());
    }
}

pub fn warning(text: &str) {
    if is_json() {
        emit_json("warning", text, None);
    } else {
        println!("{} {}", style("!").yellow(), style(text).bright());
    }
}

/// Print a key-value pair with styled key.
pub fn kv(key: &str, value: &str) {
    if is_json() {
        let data = serde_json::json!({ key: value });
        emit_json("info", key, Some(&data));
    } else {
        println!("  {} {}", style(key).cyan().bold(), value);
    }
}

// ── Policy values ──────────────────────────────────────────────────

/// Prompt messages in send order.
pub fn messages(messages: &[Message]) {
    if is_json() {
        emit_data("prompt", messages);
        return;
    }
    for message in messages {
        println!("{}", style(format!("[{}]", message.role())).bold().cyan());
        println!("{}\n", message.content());
    }
}

/// One rejected candidate and why it failed.
fn rejection(rejection: &Rejection) {
    println!(
        "  {} {} {}",
        style("✗").red(),
        style(format!("[{}]", rejection.index)).dim(),
        style(&rejection.error).dim()
    );
}

/// Outcome of scanning candidates for the first parseable one.
pub fn selection(selection: &CandidateSelection) {
    if is_json() {
        let data = serde_json::json!({
            "action": selection.action,
            "index": selection.index,
            "rejections": selection.rejections,
        });
        emit_json("parse", "", Some(&data));
        return;
    }
    selection.rejections.iter().for_each(rejection);
    if let (Some(action), Some(index)) = (&selection.action, selection.index) {
        success(&format!("[{index}] {action}"));
    }
}

/// A learner decision with its metadata.
pub fn decision(decision: &Decision) {
    if is_json() {
        emit_data("decision", decision);
        return;
    }

    let metadata = &decision.metadata;
    match &decision.action {
        Some(action) => success(&format!("{}: {}", decision.label, action)),
        None => warning(&format!("{}: no valid action, step is a no-op", decision.label)),
    }
    kv("decision", &metadata.decision_id.to_string());
    kv("model", metadata.model.as_str());
    kv("candidates", &metadata.candidates.to_string());
    if let Some(index) = metadata.chosen_index {
        kv("chosen", &index.to_string());
    }
    metadata.rejections.iter().for_each(rejection);
}

/// Model catalogue, marking the one `CYBERAGENT_MODEL` selects.
pub fn models(selected: ModelName) {
    if is_json() {
        emit_json("list", "", Some(&models_json(selected)));
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Model")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Selected")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
        ]);
    for model in ModelName::ALL {
        let mark = if model == selected { "✓" } else { "" };
        table.add_row(vec![Cell::new(model.as_str()).fg(Color::Green), Cell::new(mark)]);
    }
    println!("{table}");
}

fn models_json(selected: ModelName) -> JsonValue {
    let items: Vec<_> = ModelName::ALL
        .iter()
        .map(|m| serde_json::json!({ "model": m.as_str(), "selected": *m == selected }))
        .collect();
    serde_json::json!({ "items": items })
}

fn emit_data<T: Serialize + ?Sized>(label: &str, value: &T) {
    let json_val = serde_json::to_value(value).unwrap_or(JsonValue::Null);
    emit_json("data", label, Some(&json_val));
}

// ── Spinners ───────────────────────────────────────────────────────

/// Spinner on stderr; hidden in JSON mode.
pub fn spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Clear the spinner once the step returned.
pub fn spinner_done(spinner: &ProgressBar) {
    spinner.finish_and_clear();
}

/// Finish spinner with error message.
pub fn spinner_error(spinner: &ProgressBar, message: &str) {
    spinner.finish_and_clear();
    if is_json() {
        emit_json("error", message, None);
    } else {
        eprintln!("{} {}", style("✗").red(), message);
    }
}
