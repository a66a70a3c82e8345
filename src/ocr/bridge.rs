use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

use crate::core::model::Token;

/// Bridge to the external OCR engine: runs a configured command with the
/// image path as final argument and parses a JSON token array
/// (`[{"bbox": [x0,y0,x1,y1], "text": "..."}]`) from its stdout.
#[derive(Debug, Clone)]
pub struct OcrBridge {
    command: String,
    args: Vec<String>,
}

impl OcrBridge {
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

    pub fn run(&self, image_path: &Path) -> Result<Vec<Token>> {
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(image_path)
            .output()
            .with_context(|| format!("failed to invoke OCR command `{}`", self.command))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("OCR command failed: {stderr}");
        }

        let tokens: Vec<Token> = serde_json::from_slice(&output.stdout)
            .with_context(|| "failed to parse OCR token JSON")?;
        Ok(tokens)
    }
}

/// Loads a previously saved OCR token array for offline runs.
pub fn read_tokens(path: &Path) -> Result<Vec<Token>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read OCR tokens from {}", path.display()))?;
    let tokens = serde_json::from_str(&data)
        .with_context(|| format!("invalid OCR token JSON in {}", path.display()))?;
    Ok(tokens)
}

/// The token texts newline-joined, the form the lexical passes consume.
pub fn joined_text(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
