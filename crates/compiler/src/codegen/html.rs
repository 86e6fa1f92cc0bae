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

use std::io::Write;

use itertools::Itertools;
use tracing::debug;

use crate::ast::{Conditional, Loop, Object, Program, Value};
use crate::codegen::Output;
use crate::element::{Element, flatten};
use crate::errors::GenerateError;
use crate::eval::{Bindings, Constant, fold, fold_condition};
use crate::vocabulary::TagKind;

/// Upper bound on the iterations of a single counter loop.
pub const MAX_UNROLL: usize = 10_000;

#[derive(Debug, Clone, Copy)]
enum Binding<'a> {
    Value(&'a Value),
    Counter(i64),
}

/// Names bound by the loops currently being expanded, innermost last. A name is bound at most
/// once since loops may not redeclare a name in scope.
#[derive(Debug, Default)]
struct Env<'a> {
    frames: Vec<(&'a str, Binding<'a>)>,
}

impl<'a> Env<'a> {
    fn lookup(&self, name: &str) -> Result<Binding<'a>, GenerateError> {
        self.frames
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .map(|(_, b)| *b)
            .ok_or_else(|| GenerateError::UnboundVariable(name.to_string()))
    }
}

impl Bindings for Env<'_> {
    fn constant(&self, name: &str) -> Result<Constant, GenerateError> {
        let value = match self.lookup(name)? {
            Binding::Counter(i) => return Ok(Constant::Integer(i)),
            Binding::Value(value) => value,
        };
        match (value, value.as_object_var_ref()) {
            (Value::String(s), _) => Ok(Constant::String(s.clone())),
            (Value::Integer(i), _) => Ok(Constant::Integer(*i)),
            (Value::Float(f), _) => Ok(Constant::Float(*f)),
            (Value::Boolean(b), _) => Ok(Constant::Boolean(*b)),
            (Value::VarRef(var), _) => self.constant(&var.name),
            (_, Some(var)) => self.constant(var),
            (other, None) => Err(GenerateError::Evaluation(format!(
                "`{name}` is bound to a {}",
                other.kind()
            ))),
        }
    }
}

struct HtmlGenerator<'a, 'w, W: Write> {
    output: Output<'w, W>,
    env: Env<'a>,
}

/// Render an accepted program as HTML.
pub fn generate_html<W: Write>(program: &Program, out: &mut W) -> Result<(), GenerateError> {
    debug!("Generating HTML...");
    let mut generator = HtmlGenerator {
        output: Output::new(out),
        env: Env::default(),
    };
    generator.element(&program.object, 0)?;
    debug!("Generation is done.");
    Ok(())
}

impl<'a, W: Write> HtmlGenerator<'a, '_, W> {
    fn element(&mut self, object: &'a Object, level: usize) -> Result<(), GenerateError> {
        let element = flatten(object).ok_or_else(|| {
            GenerateError::Evaluation(format!(
                "object headed by `{}` is not an element",
                object.first_key().unwrap_or_default()
            ))
        })?;
        let tag = element.tag;
        let attributes = self.attributes(&element)?;
        match element.kind() {
            TagKind::Void => self.output.line(level, format!("<{tag}{attributes} />"))?,
            TagKind::TextOnly => {
                let text = element
                    .children
                    .iter()
                    .map(|child| self.inline_text(child))
                    .collect::<Result<String, _>>()?;
                self.output.line(
                    level,
                    format!("<{tag}{attributes}>{}</{tag}>", escape(&text)),
                )?;
            }
            TagKind::Container => {
                self.output.line(level, format!("<{tag}{attributes}>"))?;
                for child in element.children {
                    self.child(child, level + 1)?;
                }
                self.output.line(level, format!("</{tag}>"))?;
            }
        }
        Ok(())
    }

    fn attributes(&self, element: &Element<'a>) -> Result<String, GenerateError> {
        let mut rendered = String::new();
        for &(key, value) in &element.attributes {
            let text = match value {
                Value::Object(object) if object.as_var_ref().is_none() => {
                    self.declarations(object)?
                }
                _ => self.inline_text(value)?,
            };
            rendered.push_str(&format!(" {key}=\"{}\"", escape(&text)));
        }
        Ok(rendered)
    }

    /// A `style` object as CSS declarations, `color: red; width: 10;`.
    fn declarations(&self, object: &'a Object) -> Result<String, GenerateError> {
        let declarations = object
            .pairs
            .iter()
            .map(|property| {
                let value = self.inline_text(&property.value)?;
                Ok(format!("{}: {value};", property.key))
            })
            .collect::<Result<Vec<_>, GenerateError>>()?;
        Ok(declarations.iter().join(" "))
    }

    fn child(&mut self, value: &'a Value, level: usize) -> Result<(), GenerateError> {
        match value {
            Value::Element(object) => self.element(object, level),
            Value::String(s) => Ok(self.output.line(level, escape(s))?),
            Value::Integer(_) | Value::Float(_) | Value::Boolean(_) | Value::Null => {
                Ok(self.output.line(level, scalar_text(value))?)
            }
            Value::Array(array) => {
                for item in &array.values {
                    self.child(item, level)?;
                }
                Ok(())
            }
            Value::Object(object) => match object.as_var_ref() {
                Some(name) => self.bound_child(name, level),
                None => self.data_object(object, level, String::new(), ""),
            },
            Value::VarRef(var) => self.bound_child(&var.name, level),
            Value::Conditional(conditional) => match self.branch(conditional)? {
                Some(branch) => self.element(branch, level),
                None => Ok(()),
            },
            Value::Loop(l) => {
                let (name, bindings) = self.unroll(l)?;
                for binding in bindings {
                    self.env.frames.push((name, binding));
                    let result = self.element(l.body(), level);
                    self.env.frames.pop();
                    result?;
                }
                Ok(())
            }
        }
    }

    fn bound_child(&mut self, name: &str, level: usize) -> Result<(), GenerateError> {
        match self.env.lookup(name)? {
            Binding::Value(value) => self.child(value, level),
            Binding::Counter(i) => Ok(self.output.line(level, i)?),
        }
    }

    /// The branch a conditional attaches, if any.
    fn branch(&self, conditional: &'a Conditional) -> Result<Option<&'a Object>, GenerateError> {
        if fold_condition(&conditional.condition, &self.env)? {
            return Ok(Some(&conditional.then_branch));
        }
        Ok(conditional.else_branch.as_ref())
    }

    /// The loop variable and the successive values it takes.
    fn unroll(&self, l: &'a Loop) -> Result<(&'a str, Vec<Binding<'a>>), GenerateError> {
        match l {
            Loop::Iterator {
                iterator, iterable, ..
            } => Ok((
                iterator.as_str(),
                iterable
                    .pairs
                    .iter()
                    .map(|p| Binding::Value(&p.value))
                    .collect(),
            )),
            Loop::Counter {
                counter,
                initialization,
                condition,
                increment,
                ..
            } => {
                let mut env = Env {
                    frames: self.env.frames.clone(),
                };
                let mut values = vec![];
                let mut i = integer(counter, fold(initialization, &env)?)?;
                loop {
                    env.frames.push((counter, Binding::Counter(i)));
                    if !fold_condition(condition, &env)? {
                        break;
                    }
                    if values.len() == MAX_UNROLL {
                        return Err(GenerateError::RunawayLoop(counter.clone(), MAX_UNROLL));
                    }
                    values.push(Binding::Counter(i));
                    i = integer(counter, fold(increment, &env)?)?;
                    env.frames.pop();
                }
                debug!("Unrolled counter loop over `{counter}`: {} iterations", values.len());
                Ok((counter.as_str(), values))
            }
        }
    }

    fn inline_text(&self, value: &'a Value) -> Result<String, GenerateError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Integer(_) | Value::Float(_) | Value::Boolean(_) | Value::Null => {
                Ok(scalar_text(value))
            }
            Value::VarRef(var) => self.bound_text(&var.name),
            Value::Object(object) => match object.as_var_ref() {
                Some(name) => self.bound_text(name),
                None => Err(GenerateError::InlineContent(value.kind())),
            },
            other => Err(GenerateError::InlineContent(other.kind())),
        }
    }

    fn bound_text(&self, name: &str) -> Result<String, GenerateError> {
        match self.env.lookup(name)? {
            Binding::Value(value) => self.inline_text(value),
            Binding::Counter(i) => Ok(i.to_string()),
        }
    }

    /// A plain data value as a JSON-shaped block, one member per line. `prefix` goes before
    /// the first line (a member key), `suffix` after the last (a separating comma).
    fn data(
        &mut self,
        value: &'a Value,
        level: usize,
        prefix: String,
        suffix: &str,
    ) -> Result<(), GenerateError> {
        match value {
            Value::String(s) => Ok(self.output.line(level, format!("{prefix}{}{suffix}", quote(s)))?),
            Value::Integer(_) | Value::Float(_) | Value::Boolean(_) | Value::Null => Ok(self
                .output
                .line(level, format!("{prefix}{}{suffix}", scalar_text(value)))?),
            Value::VarRef(var) => self.bound_data(&var.name, level, prefix, suffix),
            Value::Object(object) => match object.as_var_ref() {
                Some(name) => self.bound_data(name, level, prefix, suffix),
                None => self.data_object(object, level, prefix, suffix),
            },
            Value::Element(object) => self.data_object(object, level, prefix, suffix),
            Value::Array(array) => {
                self.output.line(level, format!("{prefix}["))?;
                let last = array.values.len().saturating_sub(1);
                for (i, item) in array.values.iter().enumerate() {
                    self.data(item, level + 1, String::new(), separator(i, last))?;
                }
                Ok(self.output.line(level, format!("]{suffix}"))?)
            }
            Value::Conditional(conditional) => match self.branch(conditional)? {
                Some(branch) => self.data_object(branch, level, prefix, suffix),
                None => Ok(self.output.line(level, format!("{prefix}null{suffix}"))?),
            },
            Value::Loop(l) => {
                let (name, bindings) = self.unroll(l)?;
                self.output.line(level, format!("{prefix}["))?;
                let last = bindings.len().saturating_sub(1);
                for (i, binding) in bindings.into_iter().enumerate() {
                    self.env.frames.push((name, binding));
                    let result = self.data_object(l.body(), level + 1, String::new(), separator(i, last));
                    self.env.frames.pop();
                    result?;
                }
                Ok(self.output.line(level, format!("]{suffix}"))?)
            }
        }
    }

    fn data_object(
        &mut self,
        object: &'a Object,
        level: usize,
        prefix: String,
        suffix: &str,
    ) -> Result<(), GenerateError> {
        self.output.line(level, format!("{prefix}{{"))?;
        let last = object.pairs.len().saturating_sub(1);
        for (i, pair) in object.pairs.iter().enumerate() {
            self.data(
                &pair.value,
                level + 1,
                format!("{}: ", quote(&pair.key)),
                separator(i, last),
            )?;
        }
        Ok(self.output.line(level, format!("}}{suffix}"))?)
    }

    fn bound_data(
        &mut self,
        name: &str,
        level: usize,
        prefix: String,
        suffix: &str,
    ) -> Result<(), GenerateError> {
        match self.env.lookup(name)? {
            Binding::Value(value) => self.data(value, level, prefix, suffix),
            Binding::Counter(i) => Ok(self.output.line(level, format!("{prefix}{i}{suffix}"))?),
        }
    }
}

fn integer(counter: &str, value: Constant) -> Result<i64, GenerateError> {
    match value {
        Constant::Integer(i) => Ok(i),
        other => Err(GenerateError::Evaluation(format!(
            "counter `{counter}` must stay an integer, got {other}"
        ))),
    }
}

fn separator(index: usize, last: usize) -> &'static str {
    if index < last { "," } else { "" }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => format!("{f:.6}"),
        Value::Boolean(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        other => other.kind().to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// A JSON string literal.
fn quote(text: &str) -> String {
    let body = text
        .chars()
        .map(|c| match c {
            '"' => "\\\"".to_string(),
            '\\' => "\\\\".to_string(),
            '\n' => "\\n".to_string(),
            '\r' => "\\r".to_string(),
            '\t' => "\\t".to_string(),
            '\u{8}' => "\\b".to_string(),
            '\u{c}' => "\\f".to_string(),
            c if c.is_control() => format!("\\u{:04x}", c as u32),
            c => c.to_string(),
        })
        .join("");
    format!("\"{body}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&Value::Float(1.5)), "1.500000");
        assert_eq!(scalar_text(&Value::Null), "null");
        assert_eq!(scalar_text(&Value::Boolean(false)), "false");
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator(0, 1), ",");
        assert_eq!(separator(1, 1), "");
        assert_eq!(separator(0, 0), "");
    }
}
