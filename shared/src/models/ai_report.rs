//! AI ingredient analysis report
//!
//! The AI workflow answers in loosely structured shapes: a bare string, JSON
//! wrapped in a string field, fenced JSON, or an object. Everything is
//! normalized into [`AiReport`] here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys checked, in order, for a string payload inside the workflow outputs
const PAYLOAD_KEYS: [&str; 5] = ["answer", "text", "output", "json", "result"];

/// Normalized AI analysis of a product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiReport {
    pub summary: String,
    pub banned_ingredients: Vec<String>,
    pub risks: Vec<String>,
    pub daily_limits: Vec<String>,
    pub alternatives: Vec<String>,
}

impl AiReport {
    /// Normalize the `outputs` value of a workflow run.
    ///
    /// Returns `None` only when there are no outputs at all.
    pub fn from_outputs(outputs: &Value) -> Option<Self> {
        if outputs.is_null() {
            return None;
        }

        let report = match payload_text(outputs) {
            Some(text) => parse_payload(&text),
            None => outputs.clone(),
        };

        let summary = report
            .get("summary")
            .and_then(truthy_text)
            .or_else(|| report.as_str().filter(|s| !s.is_empty()).map(str::to_string))
            .unwrap_or_else(|| fallback_summary(outputs));

        Some(Self {
            summary,
            banned_ingredients: to_list(report.get("banned_ingredients")),
            risks: to_list(report.get("risks")),
            daily_limits: to_list(report.get("daily_limits")),
            alternatives: to_list(report.get("alternatives")),
        })
    }
}

/// Find the text the model actually produced
fn payload_text(outputs: &Value) -> Option<String> {
    match outputs {
        Value::String(text) => Some(text.clone()),
        Value::Object(fields) => {
            let known = PAYLOAD_KEYS
                .iter()
                .find_map(|key| fields.get(*key).filter(|value| is_truthy(value)));

            match known {
                Some(Value::String(text)) => Some(text.clone()),
                Some(_) => None,
                // Already a report; its string fields are not payloads
                None if fields.get("summary").is_some_and(is_truthy) => None,
                None => first_string_field(fields),
            }
        }
        _ => None,
    }
}

fn first_string_field(fields: &Map<String, Value>) -> Option<String> {
    fields.values().find_map(|value| match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        _ => None,
    })
}

/// Strip markdown code fences and parse; unparseable text becomes the summary
fn parse_payload(text: &str) -> Value {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(&cleaned).unwrap_or_else(|_| {
        let mut fields = Map::new();
        fields.insert("summary".to_string(), Value::String(text.to_string()));
        Value::Object(fields)
    })
}

pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

fn fallback_summary(outputs: &Value) -> String {
    let keys: Option<Vec<String>> = match outputs {
        Value::Object(fields) => Some(fields.keys().cloned().collect()),
        Value::Array(items) => Some((0..items.len()).map(|i| i.to_string()).collect()),
        _ => None,
    };

    match keys {
        Some(keys) => format!("No summary. Recieved keys: {}", keys.join(", ")),
        None => "No summary provided by AI.".to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_text(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    Some(match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    })
}

fn item_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Coerce a loosely typed list field into a list of strings
pub fn to_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(item_text).collect(),
        Some(Value::String(text)) => {
            if text.contains(',') {
                text.split(',').map(|item| item.trim().to_string()).collect()
            } else if text.to_lowercase().contains("none") || text.trim().is_empty() {
                Vec::new()
            } else {
                vec![text.clone()]
            }
        }
        _ => Vec::new(),
    }
}
