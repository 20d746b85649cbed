// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! JSON output for machine consumption.
//!
//! Produces structured JSON that editors and build tools can parse. Each
//! diagnostic carries its location and, when the label points into the
//! reported file, the text of the offending line.

use mro_ast::{Ast, LineMap};
use serde::Serialize;

use crate::{codes::ErrorCodeRegistry, Diagnostic, Label, LabelStyle, Severity};

/// A complete JSON diagnostic report for one parsed file.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    /// Schema version for forward compatibility.
    pub version: u32,
    pub file: String,
    /// Whether parsing succeeded (no errors).
    pub success: bool,
    pub diagnostics: Vec<JsonDiagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
}

/// A single diagnostic in JSON form, enriched with source context.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// Severity: "error", "warning", or "note".
    pub severity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Error category (e.g., "Syntax").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    /// Primary source location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    pub labels: Vec<JsonLabel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// A source location (1-based).
#[derive(Debug, Serialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// The source line text for context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
}

/// A labeled location in JSON form.
#[derive(Debug, Serialize)]
pub struct JsonLabel {
    /// "primary" or "secondary".
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub location: SourceLocation,
}

/// Convert diagnostics to a structured JSON report.
///
/// `source` is the text of `file`; labels in other files get no source line.
pub fn report(file: &str, source: &str, diagnostics: &[Diagnostic]) -> DiagnosticReport {
    let registry = ErrorCodeRegistry::default();
    let lines = LineMap::new(source);
    let mut error_count = 0;
    let mut warning_count = 0;

    let json_diags: Vec<JsonDiagnostic> = diagnostics
        .iter()
        .map(|d| {
            match d.severity {
                Severity::Error => error_count += 1,
                Severity::Warning => warning_count += 1,
                Severity::Note => {}
            }
            let context = SourceContext {
                file,
                source,
                lines: &lines,
            };
            to_json_diagnostic(d, &context, &registry)
        })
        .collect();

    DiagnosticReport {
        version: 1,
        file: file.to_string(),
        success: error_count == 0,
        diagnostics: json_diags,
        error_count,
        warning_count,
    }
}

struct SourceContext<'a> {
    file: &'a str,
    source: &'a str,
    lines: &'a LineMap,
}

impl SourceContext<'_> {
    fn locate(&self, label: &Label) -> SourceLocation {
        let source_line = if label.file == self.file {
            self.lines
                .line_text(self.source, label.line)
                .map(str::to_string)
        } else {
            None
        };
        SourceLocation {
            file: label.file.clone(),
            line: label.line,
            column: label.column,
            source_line,
        }
    }
}

fn to_json_diagnostic(
    diag: &Diagnostic,
    context: &SourceContext<'_>,
    registry: &ErrorCodeRegistry,
) -> JsonDiagnostic {
    let severity = match diag.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Note => "note",
    };

    let code = diag.code.as_ref().map(|c| c.0.clone());
    let category = code
        .as_ref()
        .and_then(|c| registry.get(c))
        .map(|info| info.category.to_string());

    let location = diag.primary_label().map(|l| context.locate(l));
    let labels = diag
        .labels
        .iter()
        .map(|l| JsonLabel {
            role: match l.style {
                LabelStyle::Primary => "primary".to_string(),
                LabelStyle::Secondary => "secondary".to_string(),
            },
            message: l.message.clone(),
            location: context.locate(l),
        })
        .collect();

    JsonDiagnostic {
        severity: severity.to_string(),
        code,
        category,
        message: diag.message.clone(),
        location,
        labels,
        notes: diag.notes.clone(),
        help: diag.help.clone(),
    }
}

/// Serialize a diagnostic report to pretty JSON.
pub fn to_json_string(report: &DiagnosticReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Dump a parsed unit, attached comments included, as pretty JSON.
pub fn ast_to_json_string(ast: &Ast) -> serde_json::Result<String> {
    serde_json::to_string_pretty(ast)
}
