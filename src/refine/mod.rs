use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::warn;

use crate::core::fields::FieldRecord;

/// Input to the downstream refinement collaborator: the raw OCR text plus
/// the staged records, with the later stage taking priority.
#[derive(Debug, Clone)]
pub struct RefineRequest<'a> {
    pub raw_text: &'a str,
    pub primary: &'a FieldRecord,
    pub secondary: &'a FieldRecord,
}

/// Best-effort correction pass run after the merge. Implementations wrap
/// whatever model backend the host provides; the core only builds the
/// prompt and recovers the response.
pub trait Refiner {
    fn refine(&self, request: &RefineRequest) -> Result<String>;
}

/// Builds the refinement prompt: correct the OCR noise, return exactly the
/// target fields as bare JSON, and keep the staged values unless clearly
/// wrong, with secondary data over primary.
pub fn build_prompt(request: &RefineRequest) -> Result<String> {
    let field_list = FieldRecord::FIELD_NAMES.join(", ");
    let primary = serde_json::to_string_pretty(request.primary)?;
    let secondary = serde_json::to_string_pretty(request.secondary)?;

    Ok(format!(
        "You are an intelligent product label parser.\n\n\
         Given the following OCR data from a product label, first correct the text yourself \
         because OCR data may be gibberish, and afterward return ONLY a valid JSON object that \
         contains exactly the following 43 fields:\n\n{field_list}.\n\n\
         Rules:\n\
         - Output ONLY valid JSON, no markdown, no commentary, no extra text.\n\
         - Use empty string (\"\") or \"N/A\" for any missing fields.\n\
         - Do not use markdown fences (like ```json).\n\n\
         Here is the OCR data:\n{raw}\n\n\
         Try to correct text errors if present.\n\
         The data has already been refined with primary and secondary processing steps, \
         so give most priority to secondary data, then primary data: if a field is present \
         in both, use the value from secondary data. Only change a secondary value if you \
         are certain it is wrong.\n\n\
         Primary data is:\n{primary}\n\n\
         Secondary data is:\n{secondary}\n",
        raw = request.raw_text,
    ))
}

/// Decodes the refiner's response. Markdown fences are stripped first; a
/// response that still fails to decode is kept as a raw-text fallback
/// object instead of aborting the pipeline.
pub fn parse_response(text: &str) -> Value {
    let stripped = strip_code_fences(text.trim());
    match serde_json::from_str(&stripped) {
        Ok(value) => value,
        Err(err) => {
            warn!(%err, "refiner output is not valid JSON, keeping raw text");
            json!({ "raw_response": text })
        }
    }
}

fn strip_code_fences(text: &str) -> String {
    if !text.starts_with("```") {
        return text.to_string();
    }
    let inner = text.trim_matches('`');
    let inner = inner
        .strip_prefix("json\r\n")
        .or_else(|| inner.strip_prefix("json\n"))
        .unwrap_or(inner);
    inner.to_string()
}

/// Refiner backed by an external command: the prompt goes to its stdin, the
/// model response is read from its stdout.
#[derive(Debug, Clone)]
pub struct CommandRefiner {
    command: String,
    args: Vec<String>,
}

impl CommandRefiner {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

impl Refiner for CommandRefiner {
    fn refine(&self, request: &RefineRequest) -> Result<String> {
        let prompt = build_prompt(request)?;

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to invoke refiner command `{}`", self.command))?;

        child
            .stdin
            .as_mut()
            .context("refiner stdin unavailable")?
            .write_all(prompt.as_bytes())?;

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("refiner command failed: {stderr}");
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
