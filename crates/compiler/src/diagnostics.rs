// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Helpers to turn compile errors into user-facing diagnostics.

use std::io::{self, Write};
use std::ops::Range;

use ariadne::{CharSet, Config, IndexType, Label, Report, ReportKind, Source};
use itertools::Itertools;

use crate::errors::{CompileError, ErrorClass};

/// Whether a diagnostic rejected the program or was only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

fn label_for(error: &CompileError) -> &'static str {
    match error.class() {
        ErrorClass::Lexical => match error {
            CompileError::ParseError { .. } => "parser stopped here",
            _ => "in this literal",
        },
        ErrorClass::Structural => "in this object",
        ErrorClass::Semantic => "rejected here",
    }
}

/// Clamp a byte span to the source so ariadne never indexes past the end.
fn clamp(span: (usize, usize), source: &str) -> Range<usize> {
    let end = span.1.min(source.len());
    let start = span.0.min(end);
    start..end
}

fn expected_help(error: &CompileError) -> Option<String> {
    let CompileError::ParseError { expected, .. } = error else {
        return None;
    };
    match expected.as_slice() {
        [] => None,
        [one] => Some(format!("expected {one}")),
        many => Some(format!("expected one of {}", many.iter().join(", "))),
    }
}

/// Render a diagnostic against its source, with the offending span labelled.
pub fn format_compile_error(
    error: &CompileError,
    source: &str,
    severity: Severity,
    use_color: bool,
) -> String {
    let Some(span) = error.span() else {
        return format!("{error}\n");
    };
    let span = clamp(span, source);
    let kind = match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
    };
    let mut builder = Report::build(kind, span.clone())
        .with_config(
            Config::default()
                .with_color(use_color)
                .with_char_set(CharSet::Unicode)
                .with_index_type(IndexType::Byte),
        )
        .with_message(error.to_string())
        .with_label(Label::new(span).with_message(label_for(error)));
    if let Some(help) = expected_help(error) {
        builder = builder.with_help(help);
    }
    let mut buffer = vec![];
    if builder.finish().write(Source::from(source), &mut buffer).is_err() {
        return format!("{error}\n");
    }
    String::from_utf8(buffer).unwrap_or_else(|_| format!("{error}\n"))
}

/// Write a diagnostic to stderr.
pub fn emit_compile_error(error: &CompileError, source: &str, severity: Severity, use_color: bool) {
    let rendered = format_compile_error(error, source, severity, use_color);
    let mut stderr = io::stderr().lock();
    let _ = stderr.write_all(rendered.as_bytes());
    let _ = stderr.flush();
}
