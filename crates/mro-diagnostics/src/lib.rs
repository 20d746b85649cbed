// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! MRO front-end diagnostics.
//!
//! Provides a structured diagnostic type for tools that want more than the
//! rendered parse error message. Front-end error types are converted to
//! `Diagnostic` via the `ToDiagnostic` trait, keeping the lexer and parser
//! crates free of presentation concerns.

pub mod codes;
pub mod convert;
pub mod json;

use mro_ast::SourceLoc;
use serde::Serialize;

// ============================================================================
// Core Types
// ============================================================================

/// A front-end diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Option<ErrorCode>,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

/// A labeled source position within a diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub file: String,
    /// 1-based.
    pub line: u32,
    /// 1-based, in characters. `None` when only the line is known.
    pub column: Option<usize>,
    pub style: LabelStyle,
    pub message: Option<String>,
}

/// How a label should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// Where the problem is.
    Primary,
    /// Related location, such as an include site.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

/// An error code like E0100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorCode(pub String);

// ============================================================================
// Builder API
// ============================================================================

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(ErrorCode(code.into()));
        self
    }

    pub fn with_label(
        mut self,
        loc: &SourceLoc,
        column: Option<usize>,
        style: LabelStyle,
        msg: impl Into<String>,
    ) -> Self {
        self.labels.push(Label {
            file: loc.file.file_name.clone(),
            line: loc.line,
            column,
            style,
            message: Some(msg.into()),
        });
        self
    }

    pub fn with_primary(
        self,
        loc: &SourceLoc,
        column: Option<usize>,
        msg: impl Into<String>,
    ) -> Self {
        self.with_label(loc, column, LabelStyle::Primary, msg)
    }

    pub fn with_secondary(self, loc: &SourceLoc, msg: impl Into<String>) -> Self {
        self.with_label(loc, None, LabelStyle::Secondary, msg)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Returns the primary label (first primary label, or first label).
    pub fn primary_label(&self) -> Option<&Label> {
        self.labels
            .iter()
            .find(|l| l.style == LabelStyle::Primary)
            .or(self.labels.first())
    }
}

// ============================================================================
// Conversion Trait
// ============================================================================

/// Convert a front-end error into a structured diagnostic.
pub trait ToDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}
