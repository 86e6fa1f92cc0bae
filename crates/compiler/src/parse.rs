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

/// Kicks off the Pest parser and drives the semantic actions over its parse tree.
/// This is the main entry point for compiling documents.
use std::cell::RefCell;

pub use pest::Parser as PestParser;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use tracing::{debug, error};

use crate::actions::{Compilation, CounterHeader, SemanticActions};
use crate::ast::{BinaryOp, Conditional, Expr, Loop, Object, Program, UnaryOp, Value};
use crate::errors::{CompileContext, CompileError};
use crate::parse::jhtml::{JhtmlParser, Rule};
use crate::strings::StringStaging;

pub mod jhtml {
    #[derive(Parser)]
    #[grammar = "src/jhtml.pest"]
    pub struct JhtmlParser;
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CompileOptions {
    /// Whether skipped lexemes (comments) are logged at debug level as they are discarded.
    pub log_ignored_lexemes: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            log_ignored_lexemes: true,
        }
    }
}

/// Walks the pest parse tree bottom-up, calling one semantic action per production in the
/// order a shift-reduce parser would reduce them.
pub struct TreeTransformer {
    // RefCell because the PrattParser's map_* closures all need the actions at once, see:
    //   https://github.com/pest-parser/pest/discussions/1030
    actions: RefCell<SemanticActions>,
    staging: RefCell<StringStaging>,
    options: CompileOptions,
}

impl TreeTransformer {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            actions: RefCell::new(SemanticActions::new()),
            staging: RefCell::new(StringStaging::new()),
            options,
        }
    }

    fn compile_context(&self, pair: &Pair<Rule>) -> CompileContext {
        let span = pair.as_span();
        CompileContext::new(pair.line_col(), (span.start(), span.end()))
    }

    /// The children of a production, minus comments and keyword tokens.
    fn significant<'i>(&self, pairs: Pairs<'i, Rule>) -> impl Iterator<Item = Pair<'i, Rule>> {
        let log_ignored = self.options.log_ignored_lexemes;
        pairs.filter(move |pair| match pair.as_rule() {
            Rule::COMMENT => {
                if log_ignored {
                    let (line, column) = pair.line_col();
                    debug!("Ignored lexeme @ {line}:{column}: {:?}", pair.as_str());
                }
                false
            }
            Rule::kw_if | Rule::kw_else | Rule::kw_for | Rule::kw_in | Rule::EOI => false,
            _ => true,
        })
    }

    pub fn transform(self, mut pairs: Pairs<Rule>) -> Compilation {
        let program = pairs
            .next()
            .and_then(|program| self.transform_program(program));
        self.actions.into_inner().into_compilation(program)
    }

    fn transform_program(&self, pair: Pair<Rule>) -> Option<Program> {
        let object_pair = self
            .significant(pair.into_inner())
            .find(|p| p.as_rule() == Rule::object)?;
        let context = self.compile_context(&object_pair);
        let object = self.transform_object(object_pair);
        self.actions.borrow_mut().program(object, context)
    }

    fn transform_object(&self, pair: Pair<Rule>) -> Option<Object> {
        let context = self.compile_context(&pair);
        let pairs = self
            .significant(pair.into_inner())
            .map(|p| self.transform_pair(p))
            .collect();
        self.actions.borrow_mut().object(pairs, context)
    }

    fn transform_pair(&self, pair: Pair<Rule>) -> Option<crate::ast::Pair> {
        let context = self.compile_context(&pair);
        let mut parts = self.significant(pair.into_inner());
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            unreachable!("pair without key and value");
        };
        let key = key
            .into_inner()
            .next()
            .map(|k| match k.as_rule() {
                Rule::string => self.transform_string(k),
                _ => k.as_str().to_string(),
            })
            .unwrap_or_default();
        let value = self.transform_value(value);
        self.actions.borrow_mut().pair(key, value, context)
    }

    fn transform_value(&self, pair: Pair<Rule>) -> Option<Value> {
        let context = self.compile_context(&pair);
        match pair.as_rule() {
            Rule::object => {
                let object = self.transform_object(pair);
                self.actions.borrow_mut().object_value(object, context)
            }
            Rule::array => {
                let values = self
                    .significant(pair.into_inner())
                    .map(|v| self.transform_value(v))
                    .collect();
                let array = self.actions.borrow_mut().array(values);
                self.actions.borrow_mut().array_value(array)
            }
            Rule::string => {
                let s = self.transform_string(pair);
                self.actions.borrow_mut().string_value(s)
            }
            Rule::integer => self
                .actions
                .borrow_mut()
                .integer_value(pair.as_str(), context),
            Rule::float => self.actions.borrow_mut().float_value(pair.as_str(), context),
            Rule::boolean => self
                .actions
                .borrow_mut()
                .boolean_value(pair.as_str() == "true"),
            Rule::null => self.actions.borrow_mut().null_value(),
            Rule::var_ref => {
                let mut actions = self.actions.borrow_mut();
                let var = actions.var_ref(pair.as_str().trim(), context);
                actions.var_ref_value(var)
            }
            Rule::conditional => {
                let conditional = self.transform_conditional(pair);
                self.actions.borrow_mut().conditional_value(conditional)
            }
            Rule::iterator_loop => {
                let l = self.transform_iterator_loop(pair);
                self.actions.borrow_mut().loop_value(l)
            }
            Rule::counter_loop => {
                let l = self.transform_counter_loop(pair);
                self.actions.borrow_mut().loop_value(l)
            }
            _ => unreachable!("Unimplemented value: {:?}", pair.as_rule()),
        }
    }

    /// Feed the lexemes of a quoted string through the staging buffer.
    fn transform_string(&self, pair: Pair<Rule>) -> String {
        let mut staging = self.staging.borrow_mut();
        staging.begin();
        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::string_content => staging.push_content(part.as_str()),
                Rule::unicode_escape => staging.push_unicode(part.as_str()),
                Rule::escape => {
                    if !staging.push_escape(part.as_str()) {
                        let context = self.compile_context(&part);
                        self.actions.borrow_mut().warn(CompileError::InvalidEscape(
                            context,
                            part.as_str().to_string(),
                        ));
                    }
                }
                _ => unreachable!("Unimplemented string part: {:?}", part.as_rule()),
            }
        }
        staging.end()
    }

    fn transform_conditional(&self, pair: Pair<Rule>) -> Option<Conditional> {
        let context = self.compile_context(&pair);
        let mut parts = self.significant(pair.into_inner());
        let (Some(condition), Some(then_branch)) = (parts.next(), parts.next()) else {
            unreachable!("conditional without condition and branch");
        };
        let condition = self.transform_expr(condition);
        let then_branch = self.transform_object(then_branch);
        let else_branch = parts.next().map(|else_clause| {
            self.significant(else_clause.into_inner())
                .next()
                .and_then(|object| self.transform_object(object))
        });
        self.actions
            .borrow_mut()
            .conditional(condition, then_branch, else_branch, context)
    }

    fn transform_iterator_loop(&self, pair: Pair<Rule>) -> Option<Loop> {
        let context = self.compile_context(&pair);
        let mut parts = self.significant(pair.into_inner());
        let (Some(iterator), Some(iterable), Some(body)) = (parts.next(), parts.next(), parts.next())
        else {
            unreachable!("iterator loop without iterator, iterable and body");
        };
        let iterator_context = self.compile_context(&iterator);
        let iterator = iterator.as_str().to_string();
        // Mid-rule: the name exists, unresolved, while its own iterable is reduced.
        let declared = self
            .actions
            .borrow_mut()
            .declare_iterator(&iterator, iterator_context);
        let iterable = self.transform_object(iterable);
        if declared {
            self.actions.borrow_mut().complete_declaration(&iterator);
        }
        let body = self.transform_object(body);
        self.actions
            .borrow_mut()
            .iterator_loop(iterator, declared, iterable, body, context)
    }

    fn transform_counter_loop(&self, pair: Pair<Rule>) -> Option<Loop> {
        let context = self.compile_context(&pair);
        let parts: Vec<_> = self.significant(pair.into_inner()).collect();
        let [counter, initialization, condition, incremented, increment, body] =
            <[Pair<Rule>; 6]>::try_from(parts).unwrap_or_else(|_| {
                unreachable!("counter loop must have six parts");
            });
        let counter_context = self.compile_context(&counter);
        let counter = counter.as_str().to_string();
        let declared = self
            .actions
            .borrow_mut()
            .declare_counter(&counter, counter_context);
        let initialization = self.transform_expr(initialization);
        if declared {
            self.actions.borrow_mut().complete_declaration(&counter);
        }
        let condition = self.transform_expr(condition);
        let incremented = incremented.as_str().to_string();
        let increment = self.transform_expr(increment);
        let body = self.transform_object(body);
        let header = CounterHeader {
            counter,
            declared,
            initialization,
            condition,
            incremented,
            increment,
        };
        self.actions.borrow_mut().counter_loop(header, body, context)
    }

    fn transform_expr(&self, pair: Pair<Rule>) -> Option<Expr> {
        let pratt = PrattParser::new()
            // Precedence from lowest to highest.
            .op(Op::infix(Rule::lor, Assoc::Left))
            .op(Op::infix(Rule::land, Assoc::Left))
            .op(Op::infix(Rule::eq, Assoc::Left) | Op::infix(Rule::neq, Assoc::Left))
            .op(Op::infix(Rule::gt, Assoc::Left)
                | Op::infix(Rule::lt, Assoc::Left)
                | Op::infix(Rule::gte, Assoc::Left)
                | Op::infix(Rule::lte, Assoc::Left))
            .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::sub, Assoc::Left))
            .op(Op::infix(Rule::mul, Assoc::Left)
                | Op::infix(Rule::div, Assoc::Left)
                | Op::infix(Rule::modulus, Assoc::Left))
            .op(Op::prefix(Rule::neg) | Op::prefix(Rule::not));

        pratt
            .map_primary(|primary| {
                let context = self.compile_context(&primary);
                match primary.as_rule() {
                    Rule::integer => self
                        .actions
                        .borrow_mut()
                        .integer_expression(primary.as_str(), context),
                    Rule::float => self
                        .actions
                        .borrow_mut()
                        .float_expression(primary.as_str(), context),
                    Rule::string => {
                        let s = self.transform_string(primary);
                        self.actions.borrow_mut().string_expression(s)
                    }
                    Rule::boolean => self
                        .actions
                        .borrow_mut()
                        .boolean_expression(primary.as_str() == "true"),
                    Rule::var_ref => {
                        let mut actions = self.actions.borrow_mut();
                        let var = actions.var_ref(primary.as_str().trim(), context);
                        actions.var_ref_expression(var)
                    }
                    Rule::expr => self.transform_expr(primary),
                    _ => unreachable!("Unimplemented primary: {:?}", primary.as_rule()),
                }
            })
            .map_infix(|lhs, op, rhs| {
                let op = match op.as_rule() {
                    Rule::add => BinaryOp::Add,
                    Rule::sub => BinaryOp::Sub,
                    Rule::mul => BinaryOp::Mul,
                    Rule::div => BinaryOp::Div,
                    Rule::modulus => BinaryOp::Mod,
                    Rule::eq => BinaryOp::Eq,
                    Rule::neq => BinaryOp::NEq,
                    Rule::lt => BinaryOp::Lt,
                    Rule::lte => BinaryOp::LtE,
                    Rule::gt => BinaryOp::Gt,
                    Rule::gte => BinaryOp::GtE,
                    Rule::land => BinaryOp::And,
                    Rule::lor => BinaryOp::Or,
                    _ => unreachable!("Unimplemented infix: {:?}", op.as_rule()),
                };
                self.actions.borrow_mut().binary_expression(op, lhs, rhs)
            })
            .map_prefix(|op, rhs| {
                let op = match op.as_rule() {
                    Rule::neg => UnaryOp::Neg,
                    Rule::not => UnaryOp::Not,
                    _ => unreachable!("Unimplemented prefix: {:?}", op.as_rule()),
                };
                self.actions.borrow_mut().unary_expression(op, rhs)
            })
            .parse(self.significant(pair.into_inner()))
    }
}

/// Parse and validate a document, keeping everything the compilation produced: the tree if
/// it was accepted, every diagnostic and warning, and the node tallies. Only input the grammar
/// cannot match at all is reported as an `Err`.
pub fn parse_document(source: &str, options: CompileOptions) -> Result<Compilation, CompileError> {
    let pairs = match JhtmlParser::parse(Rule::program, source) {
        Ok(pairs) => pairs,
        Err(e) => {
            let e = CompileError::from(e);
            error!("{e}");
            return Err(e);
        }
    };
    let transformer = TreeTransformer::new(options);
    Ok(transformer.transform(pairs))
}

/// Compile a document into an accepted program, or the first error that rejected it.
pub fn compile(source: &str, options: CompileOptions) -> Result<Program, CompileError> {
    let compilation = parse_document(source, options)?;
    match (compilation.program, compilation.diagnostics.into_iter().next()) {
        (_, Some(error)) => Err(error),
        (Some(program), None) => Ok(program),
        (None, None) => Err(CompileError::ParseError {
            line: 1,
            column: 1,
            span: None,
            expected: vec!["object".to_string()],
            message: "no program was produced".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::ast::{BinaryOp, Expr, Loop, UnaryOp, Value, VarRef};
    use crate::errors::CompileError;
    use crate::parse::{CompileOptions, compile, parse_document};

    fn content(source: &str) -> Value {
        let program = compile(source, CompileOptions::default()).unwrap();
        program.object.get("content").unwrap().clone()
    }

    #[test]
    fn test_parse_simple_element() {
        let program = compile(r#"{type: "p", content: "Hello"}"#, CompileOptions::default())
            .unwrap();
        let keys: Vec<_> = program.object.pairs.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["type", "content"]);
        assert_eq!(program.object.tag(), Some("p"));
    }

    #[test]
    fn test_quoted_and_keyword_keys() {
        let program = compile(
            r#"{"type": "a", "href": "/", title: "t", content: "x"}"#,
            CompileOptions::default(),
        )
        .unwrap();
        assert_eq!(program.object.pairs[1].key, "href");
        assert_eq!(program.object.pairs[2].key, "title");
    }

    #[test]
    fn test_literals() {
        let value = content(r#"{type: "div", content: [1, -2, 3.5, 1e3, true, false, null]}"#);
        let Value::Array(array) = value else {
            panic!("expected array content");
        };
        assert_eq!(
            array.values,
            vec![
                Value::Integer(1),
                Value::Integer(-2),
                Value::Float(3.5),
                Value::Float(1000.0),
                Value::Boolean(true),
                Value::Boolean(false),
                Value::Null,
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        let value = content(r#"{type: "p", content: "a\"b\\c\né"}"#);
        assert_eq!(value, Value::String("a\"b\\c\né".into()));
    }

    #[test]
    fn test_invalid_escape_is_a_warning() {
        let compilation =
            parse_document(r#"{type: "p", content: "a\qb"}"#, CompileOptions::default()).unwrap();
        assert!(compilation.succeeded());
        assert!(matches!(
            compilation.warnings.as_slice(),
            [CompileError::InvalidEscape(_, lexeme)] if lexeme == "\\q"
        ));
        let program = compilation.program.unwrap();
        assert_eq!(program.object.get("content"), Some(&Value::String("ab".into())));
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = r#"
            // a line comment
            {
                type: "div", /* inline */
                content: [ /* before */ {type: "p", content: "x"} ]
            }
        "#;
        for log_ignored_lexemes in [true, false] {
            let options = CompileOptions {
                log_ignored_lexemes,
            };
            assert!(compile(source, options).is_ok());
        }
    }

    #[test]
    fn test_expression_precedence() {
        let value = content(
            r#"{type: "div", content: if (1 + 2 * 3 == 7 && !false) {type: "p"}}"#,
        );
        let Value::Conditional(conditional) = value else {
            panic!("expected a conditional");
        };
        let expected = Expr::Binary(
            BinaryOp::And,
            Box::new(Expr::Binary(
                BinaryOp::Eq,
                Box::new(Expr::Binary(
                    BinaryOp::Add,
                    Box::new(Expr::Integer(1)),
                    Box::new(Expr::Binary(
                        BinaryOp::Mul,
                        Box::new(Expr::Integer(2)),
                        Box::new(Expr::Integer(3)),
                    )),
                )),
                Box::new(Expr::Integer(7)),
            )),
            Box::new(Expr::Unary(UnaryOp::Not, Box::new(Expr::Boolean(false)))),
        );
        assert_eq!(conditional.condition, expected);
        assert!(conditional.else_branch.is_none());
    }

    #[test]
    fn test_iterator_loop() {
        let value = content(
            r#"{type: "ul", content: for item in {a: "x", b: "y"} {type: "li", content: item}}"#,
        );
        let Value::Loop(Loop::Iterator {
            iterator,
            iterable,
            body,
        }) = value
        else {
            panic!("expected an iterator loop");
        };
        assert_eq!(iterator, "item");
        assert_eq!(iterable.pairs.len(), 2);
        assert_eq!(
            body.get("content"),
            Some(&Value::VarRef(VarRef {
                name: "item".into()
            }))
        );
    }

    #[test]
    fn test_counter_loop() {
        let value = content(
            r#"{type: "ol", content: for (i = 0; i < 3; i = i + 1) {type: "li", content: i}}"#,
        );
        let Value::Loop(Loop::Counter {
            counter, condition, ..
        }) = value
        else {
            panic!("expected a counter loop");
        };
        assert_eq!(counter, "i");
        assert_eq!(condition.to_string(), "(i < 3)");
    }

    #[test]
    fn test_keyword_prefixed_names() {
        let value = content(
            r#"{type: "div", content: for format in {a: 1} {type: "p", content: format}}"#,
        );
        assert!(matches!(value, Value::Loop(Loop::Iterator { ref iterator, .. }) if iterator == "format"));
    }

    #[test]
    fn test_grammar_failure() {
        let result = compile(r#"{type: "p", content: }"#, CompileOptions::default());
        let Err(CompileError::ParseError { line, column, .. }) = result else {
            panic!("expected a parse error, got {result:?}");
        };
        assert_eq!((line, column), (1, 22));
    }
}
