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

//! Constant folding of expressions at generation time, against whatever the enclosing loops
//! have bound.

use std::cmp::Ordering;
use std::fmt::Display;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::errors::GenerateError;

#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
}

impl Display for Constant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constant::Integer(i) => write!(f, "{i}"),
            Constant::Float(x) => write!(f, "{x:.6}"),
            Constant::String(s) => write!(f, "{s}"),
            Constant::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl Constant {
    fn kind(&self) -> &'static str {
        match self {
            Constant::Integer(_) => "integer",
            Constant::Float(_) => "float",
            Constant::String(_) => "string",
            Constant::Boolean(_) => "boolean",
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            Constant::Integer(i) => Some(*i as f64),
            Constant::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// Source of values for variable references while folding.
pub trait Bindings {
    fn constant(&self, name: &str) -> Result<Constant, GenerateError>;
}

pub fn fold(expr: &Expr, bindings: &impl Bindings) -> Result<Constant, GenerateError> {
    match expr {
        Expr::Integer(i) => Ok(Constant::Integer(*i)),
        Expr::Float(f) => Ok(Constant::Float(*f)),
        Expr::String(s) => Ok(Constant::String(s.clone())),
        Expr::Boolean(b) => Ok(Constant::Boolean(*b)),
        Expr::VarRef(var) => bindings.constant(&var.name),
        Expr::Unary(op, operand) => unary(*op, fold(operand, bindings)?),
        Expr::Binary(BinaryOp::And, left, right) => {
            if !truth(left, fold(left, bindings)?)? {
                return Ok(Constant::Boolean(false));
            }
            Ok(Constant::Boolean(truth(right, fold(right, bindings)?)?))
        }
        Expr::Binary(BinaryOp::Or, left, right) => {
            if truth(left, fold(left, bindings)?)? {
                return Ok(Constant::Boolean(true));
            }
            Ok(Constant::Boolean(truth(right, fold(right, bindings)?)?))
        }
        Expr::Binary(op, left, right) => {
            binary(*op, fold(left, bindings)?, fold(right, bindings)?)
        }
    }
}

/// Fold a condition, which must come out as a boolean.
pub fn fold_condition(expr: &Expr, bindings: &impl Bindings) -> Result<bool, GenerateError> {
    let value = fold(expr, bindings)?;
    truth(expr, value)
}

fn truth(expr: &Expr, value: Constant) -> Result<bool, GenerateError> {
    match value {
        Constant::Boolean(b) => Ok(b),
        other => Err(GenerateError::NonBooleanCondition(format!(
            "{expr} is a {}",
            other.kind()
        ))),
    }
}

fn unary(op: UnaryOp, operand: Constant) -> Result<Constant, GenerateError> {
    match (op, operand) {
        (UnaryOp::Neg, Constant::Integer(i)) => i
            .checked_neg()
            .map(Constant::Integer)
            .ok_or_else(|| GenerateError::Evaluation(format!("-{i} overflows"))),
        (UnaryOp::Neg, Constant::Float(f)) => Ok(Constant::Float(-f)),
        (UnaryOp::Not, Constant::Boolean(b)) => Ok(Constant::Boolean(!b)),
        (op, operand) => Err(GenerateError::Evaluation(format!(
            "{op} cannot apply to a {}",
            operand.kind()
        ))),
    }
}

fn binary(op: BinaryOp, left: Constant, right: Constant) -> Result<Constant, GenerateError> {
    let mismatch = |left: &Constant, right: &Constant| {
        GenerateError::Evaluation(format!(
            "{op} cannot apply to a {} and a {}",
            left.kind(),
            right.kind()
        ))
    };
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            match (&left, &right) {
                (Constant::Integer(l), Constant::Integer(r)) => integer_arith(op, *l, *r),
                (Constant::String(l), Constant::String(r)) if op == BinaryOp::Add => {
                    Ok(Constant::String(format!("{l}{r}")))
                }
                _ => match (left.as_float(), right.as_float()) {
                    (Some(l), Some(r)) => float_arith(op, l, r),
                    _ => Err(mismatch(&left, &right)),
                },
            }
        }
        BinaryOp::Eq => Ok(Constant::Boolean(compare(&left, &right) == Some(Ordering::Equal))),
        BinaryOp::NEq => Ok(Constant::Boolean(compare(&left, &right) != Some(Ordering::Equal))),
        BinaryOp::Lt | BinaryOp::LtE | BinaryOp::Gt | BinaryOp::GtE => {
            let Some(ordering) = compare(&left, &right) else {
                return Err(mismatch(&left, &right));
            };
            Ok(Constant::Boolean(match op {
                BinaryOp::Lt => ordering.is_lt(),
                BinaryOp::LtE => ordering.is_le(),
                BinaryOp::Gt => ordering.is_gt(),
                _ => ordering.is_ge(),
            }))
        }
        BinaryOp::And | BinaryOp::Or => match (left, right) {
            (Constant::Boolean(l), Constant::Boolean(r)) => Ok(Constant::Boolean(
                if op == BinaryOp::And { l && r } else { l || r },
            )),
            (left, right) => Err(mismatch(&left, &right)),
        },
    }
}

fn integer_arith(op: BinaryOp, l: i64, r: i64) -> Result<Constant, GenerateError> {
    if matches!(op, BinaryOp::Div | BinaryOp::Mod) && r == 0 {
        return Err(GenerateError::Evaluation(format!("{l} {op} 0: division by zero")));
    }
    let result = match op {
        BinaryOp::Add => l.checked_add(r),
        BinaryOp::Sub => l.checked_sub(r),
        BinaryOp::Mul => l.checked_mul(r),
        BinaryOp::Div => l.checked_div(r),
        _ => l.checked_rem(r),
    };
    result
        .map(Constant::Integer)
        .ok_or_else(|| GenerateError::Evaluation(format!("{l} {op} {r} overflows")))
}

fn float_arith(op: BinaryOp, l: f64, r: f64) -> Result<Constant, GenerateError> {
    let result = match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => l / r,
        _ => l % r,
    };
    if !result.is_finite() {
        return Err(GenerateError::Evaluation(format!(
            "{l} {op} {r} is not a finite number"
        )));
    }
    Ok(Constant::Float(result))
}

fn compare(left: &Constant, right: &Constant) -> Option<Ordering> {
    match (left, right) {
        (Constant::Integer(l), Constant::Integer(r)) => Some(l.cmp(r)),
        (Constant::String(l), Constant::String(r)) => Some(l.cmp(r)),
        (Constant::Boolean(l), Constant::Boolean(r)) => Some(l.cmp(r)),
        _ => left.as_float()?.partial_cmp(&right.as_float()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::VarRef;

    struct One;

    impl Bindings for One {
        fn constant(&self, name: &str) -> Result<Constant, GenerateError> {
            match name {
                "one" => Ok(Constant::Integer(1)),
                _ => Err(GenerateError::UnboundVariable(name.to_string())),
            }
        }
    }

    fn bin(op: BinaryOp, l: Expr, r: Expr) -> Expr {
        Expr::Binary(op, Box::new(l), Box::new(r))
    }

    fn one() -> Expr {
        Expr::VarRef(VarRef { name: "one".into() })
    }

    #[test]
    fn test_arithmetic_and_comparison() {
        let e = bin(BinaryOp::Mul, bin(BinaryOp::Add, one(), Expr::Integer(2)), Expr::Integer(4));
        assert_eq!(fold(&e, &One).unwrap(), Constant::Integer(12));
        let c = bin(BinaryOp::LtE, one(), Expr::Float(1.0));
        assert!(fold_condition(&c, &One).unwrap());
        let s = bin(
            BinaryOp::Add,
            Expr::String("a".into()),
            Expr::String("b".into()),
        );
        assert_eq!(fold(&s, &One).unwrap(), Constant::String("ab".into()));
    }

    #[test]
    fn test_short_circuit_skips_unbound() {
        let ghost = Expr::VarRef(VarRef {
            name: "ghost".into(),
        });
        let e = bin(BinaryOp::And, Expr::Boolean(false), ghost.clone());
        assert!(!fold_condition(&e, &One).unwrap());
        let e = bin(BinaryOp::Or, Expr::Boolean(false), ghost);
        assert!(matches!(
            fold_condition(&e, &One),
            Err(GenerateError::UnboundVariable(_))
        ));
    }

    #[test]
    fn test_failures() {
        let e = bin(BinaryOp::Div, one(), Expr::Integer(0));
        assert!(matches!(fold(&e, &One), Err(GenerateError::Evaluation(_))));
        let e = Expr::Unary(UnaryOp::Not, Box::new(Expr::Integer(3)));
        assert!(matches!(fold(&e, &One), Err(GenerateError::Evaluation(_))));
        let e = bin(BinaryOp::Add, one(), one());
        assert!(matches!(
            fold_condition(&e, &One),
            Err(GenerateError::NonBooleanCondition(_))
        ));
    }
}
