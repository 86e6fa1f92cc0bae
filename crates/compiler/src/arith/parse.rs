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

use pest::Parser as PestParser;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use tracing::{debug, error};

use crate::arith::ast::{ArithExpression, ArithOp, ArithProgram, Factor};
use crate::arith::calculator::calculate;
use crate::errors::{CompileContext, CompileError};

pub mod grammar {
    #[derive(Parser)]
    #[grammar = "src/arith.pest"]
    pub struct ArithParser;
}

use grammar::{ArithParser, Rule};

/// An accepted arithmetic program together with the value it computes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArithCompilation {
    pub program: ArithProgram,
    pub value: i64,
}

fn context(pair: &Pair<Rule>) -> CompileContext {
    let span = pair.as_span();
    CompileContext::new(pair.line_col(), (span.start(), span.end()))
}

fn parse_expression(pairs: Pairs<Rule>) -> Result<ArithExpression, CompileError> {
    PrattParser::new()
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::sub, Assoc::Left))
        .op(Op::infix(Rule::mul, Assoc::Left) | Op::infix(Rule::div, Assoc::Left))
        .map_primary(|primary| parse_factor(primary).map(ArithExpression::Factor))
        .map_infix(|lhs, op, rhs| {
            let context = context(&op);
            let op = match op.as_rule() {
                Rule::add => ArithOp::Add,
                Rule::sub => ArithOp::Sub,
                Rule::mul => ArithOp::Mul,
                Rule::div => ArithOp::Div,
                _ => unreachable!("Unimplemented infix: {:?}", op.as_rule()),
            };
            Ok(ArithExpression::Binary {
                op,
                left: Box::new(lhs?),
                right: Box::new(rhs?),
                context,
            })
        })
        .parse(pairs)
}

fn parse_factor(pair: Pair<Rule>) -> Result<Factor, CompileError> {
    let factor_context = context(&pair);
    let Some(inner) = pair.into_inner().next() else {
        return Err(CompileError::InvalidLiteral {
            context: factor_context,
            kind: "factor",
            literal: String::new(),
        });
    };
    match inner.as_rule() {
        Rule::constant => match inner.as_str().parse::<i64>() {
            Ok(value) => Ok(Factor::Constant(value)),
            Err(_) => Err(CompileError::InvalidLiteral {
                context: context(&inner),
                kind: "integer",
                literal: inner.as_str().to_string(),
            }),
        },
        Rule::expression => Ok(Factor::Parenthesized(Box::new(parse_expression(
            inner.into_inner(),
        )?))),
        _ => unreachable!("Unimplemented factor: {:?}", inner.as_rule()),
    }
}

/// Parse, build and evaluate an arithmetic program.
pub fn compile_arith(source: &str) -> Result<ArithCompilation, CompileError> {
    let mut pairs = ArithParser::parse(Rule::program, source).map_err(|e| {
        let e = CompileError::from(e);
        error!("{e}");
        e
    })?;
    let expression = pairs
        .next()
        .and_then(|program| program.into_inner().find(|p| p.as_rule() == Rule::expression));
    let Some(expression) = expression else {
        return Err(CompileError::ParseError {
            line: 1,
            column: 1,
            span: None,
            expected: vec!["expression".to_string()],
            message: "empty program".to_string(),
        });
    };
    let expression = parse_expression(expression.into_inner())?;
    let value = calculate(&expression).inspect_err(|e| error!("{e}"))?;
    debug!("Arithmetic program computes {value}");
    Ok(ArithCompilation {
        program: ArithProgram { expression },
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(value: i64) -> ArithExpression {
        ArithExpression::Factor(Factor::Constant(value))
    }

    #[test]
    fn test_precedence_and_associativity() {
        let compiled = compile_arith("10 - 4 - 3 * 2").unwrap();
        assert_eq!(compiled.value, 0);
        let ArithExpression::Binary {
            op: ArithOp::Sub,
            left,
            right,
            ..
        } = compiled.program.expression
        else {
            panic!("expected subtraction at the root");
        };
        assert!(matches!(*left, ArithExpression::Binary { op: ArithOp::Sub, .. }));
        assert!(matches!(*right, ArithExpression::Binary { op: ArithOp::Mul, .. }));
    }

    #[test]
    fn test_parentheses() {
        let compiled = compile_arith("(1 + 2) * 3").unwrap();
        assert_eq!(compiled.value, 9);
        let ArithExpression::Binary { left, .. } = compiled.program.expression else {
            panic!("expected a binary root");
        };
        assert!(matches!(*left, ArithExpression::Factor(Factor::Parenthesized(_))));
    }

    #[test]
    fn test_single_constant() {
        let compiled = compile_arith("42").unwrap();
        assert_eq!(compiled.program.expression, constant(42));
        assert_eq!(compiled.value, 42);
    }

    #[test]
    fn test_rejections() {
        assert!(matches!(compile_arith("1 +"), Err(CompileError::ParseError { .. })));
        assert!(matches!(compile_arith("4 / (2 - 2)"), Err(CompileError::DivisionByZero(_))));
        assert!(matches!(
            compile_arith("99999999999999999999"),
            Err(CompileError::InvalidLiteral { .. })
        ));
    }
}
