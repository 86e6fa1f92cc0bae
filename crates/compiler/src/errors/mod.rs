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

use std::fmt::{Display, Formatter};
use std::io;

use pest::RuleType;
use pest::error::{ErrorVariant, InputLocation, LineColLocation};
use thiserror::Error;

/// Where in the source a compile error was detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CompileContext {
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
    /// Byte range of the offending fragment.
    pub span: (usize, usize),
}

impl CompileContext {
    pub fn new(line_col: (usize, usize), span: (usize, usize)) -> Self {
        Self {
            line: line_col.0,
            column: line_col.1,
            span,
        }
    }
}

impl Display for CompileContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The broad family an error belongs to. Only used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Lexical,
    Structural,
    Semantic,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    #[error("Failure to parse program @ {line}/{column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        span: Option<(usize, usize)>,
        expected: Vec<String>,
        message: String,
    },
    #[error("Invalid escape sequence in string @ {0}: {1}")]
    InvalidEscape(CompileContext, String),
    #[error("Invalid {kind} literal @ {context}: '{literal}'")]
    InvalidLiteral {
        context: CompileContext,
        kind: &'static str,
        literal: String,
    },
    #[error("Object has no `type` field @ {0}")]
    MissingType(CompileContext),
    #[error("`type` must be the first field of an element @ {0}")]
    MisplacedType(CompileContext),
    #[error("`type` must be a string literal naming an element tag @ {0}")]
    NonStringType(CompileContext),
    #[error("Duplicate key in object @ {0}: {1}")]
    DuplicateKey(CompileContext, String),
    #[error("Unknown element tag @ {0}: {1}")]
    UnknownTag(CompileContext, String),
    #[error("Unknown attribute for <{tag}> @ {context}: {key}")]
    UnknownAttribute {
        context: CompileContext,
        tag: String,
        key: String,
    },
    #[error("Attribute `{key}` @ {context} cannot hold a {kind}")]
    InvalidAttributeValue {
        context: CompileContext,
        key: String,
        kind: &'static str,
    },
    #[error("Content of <{tag}> @ {context} is not allowed: {reason}")]
    ContentMismatch {
        context: CompileContext,
        tag: String,
        reason: String,
    },
    #[error("Undefined variable @ {0}: {1}")]
    UndefinedVariable(CompileContext, String),
    #[error("Circular reference to variable @ {0}: {1}")]
    CircularReference(CompileContext, String),
    #[error("Duplicate variable in scope @ {0}: {1}")]
    DuplicateVariable(CompileContext, String),
    #[error("Condition @ {0} must be a boolean literal, binary or unary expression")]
    NonBooleanCondition(CompileContext),
    #[error("Counter loop @ {context} declares `{declared}` but increments `{incremented}`")]
    CounterMismatch {
        context: CompileContext,
        declared: String,
        incremented: String,
    },
    #[error("Division by zero @ {0}")]
    DivisionByZero(CompileContext),
    #[error("Arithmetic overflow @ {0}")]
    ArithmeticOverflow(CompileContext),
}

impl CompileError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ParseError { .. } | Self::InvalidEscape(..) | Self::InvalidLiteral { .. } => {
                ErrorClass::Lexical
            }
            Self::MissingType(_)
            | Self::MisplacedType(_)
            | Self::NonStringType(_)
            | Self::DuplicateKey(..) => ErrorClass::Structural,
            _ => ErrorClass::Semantic,
        }
    }

    /// Byte range in the source the error points at, if known.
    pub fn span(&self) -> Option<(usize, usize)> {
        match self {
            Self::ParseError { span, .. } => *span,
            Self::InvalidEscape(c, _)
            | Self::MissingType(c)
            | Self::MisplacedType(c)
            | Self::NonStringType(c)
            | Self::DuplicateKey(c, _)
            | Self::UnknownTag(c, _)
            | Self::UndefinedVariable(c, _)
            | Self::CircularReference(c, _)
            | Self::DuplicateVariable(c, _)
            | Self::NonBooleanCondition(c)
            | Self::DivisionByZero(c)
            | Self::ArithmeticOverflow(c) => Some(c.span),
            Self::InvalidLiteral { context, .. }
            | Self::UnknownAttribute { context, .. }
            | Self::InvalidAttributeValue { context, .. }
            | Self::ContentMismatch { context, .. }
            | Self::CounterMismatch { context, .. } => Some(context.span),
        }
    }
}

impl<R: RuleType> From<pest::error::Error<R>> for CompileError {
    fn from(e: pest::error::Error<R>) -> Self {
        let (line, column) = match e.line_col {
            LineColLocation::Pos(lc) => lc,
            LineColLocation::Span(begin, _) => begin,
        };
        let span = match e.location {
            InputLocation::Pos(p) => (p, p + 1),
            InputLocation::Span(span) => span,
        };
        let expected = match &e.variant {
            ErrorVariant::ParsingError { positives, .. } => {
                positives.iter().map(|r| format!("{r:?}")).collect()
            }
            ErrorVariant::CustomError { .. } => vec![],
        };
        CompileError::ParseError {
            line,
            column,
            span: Some(span),
            expected,
            message: e.variant.message().to_string(),
        }
    }
}

/// Failures while walking an accepted tree to produce output.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Unable to write generated output: {0}")]
    Io(#[from] io::Error),
    #[error("Condition did not fold to a boolean: {0}")]
    NonBooleanCondition(String),
    #[error("Unable to evaluate expression: {0}")]
    Evaluation(String),
    #[error("Variable `{0}` has no binding at generation time")]
    UnboundVariable(String),
    #[error("Counter loop over `{0}` exceeded {1} iterations")]
    RunawayLoop(String, usize),
    #[error("A {0} cannot be rendered as inline text")]
    InlineContent(&'static str),
}
