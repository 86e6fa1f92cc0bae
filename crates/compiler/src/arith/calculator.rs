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

use crate::arith::ast::{ArithExpression, ArithOp, Factor};
use crate::errors::CompileError;

/// Evaluate with checked 64-bit arithmetic. Division truncates toward zero.
pub fn calculate(expression: &ArithExpression) -> Result<i64, CompileError> {
    match expression {
        ArithExpression::Factor(Factor::Constant(value)) => Ok(*value),
        ArithExpression::Factor(Factor::Parenthesized(inner)) => calculate(inner),
        ArithExpression::Binary {
            op,
            left,
            right,
            context,
        } => {
            let (l, r) = (calculate(left)?, calculate(right)?);
            let result = match op {
                ArithOp::Add => l.checked_add(r),
                ArithOp::Sub => l.checked_sub(r),
                ArithOp::Mul => l.checked_mul(r),
                ArithOp::Div if r == 0 => return Err(CompileError::DivisionByZero(*context)),
                ArithOp::Div => l.checked_div(r),
            };
            result.ok_or(CompileError::ArithmeticOverflow(*context))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CompileContext;

    fn constant(value: i64) -> Box<ArithExpression> {
        Box::new(ArithExpression::Factor(Factor::Constant(value)))
    }

    fn binary(op: ArithOp, left: Box<ArithExpression>, right: Box<ArithExpression>) -> ArithExpression {
        ArithExpression::Binary {
            op,
            left,
            right,
            context: CompileContext::default(),
        }
    }

    #[test]
    fn test_calculate() {
        let e = binary(
            ArithOp::Mul,
            Box::new(ArithExpression::Factor(Factor::Parenthesized(Box::new(binary(
                ArithOp::Sub,
                constant(7),
                constant(2),
            ))))),
            constant(3),
        );
        assert_eq!(calculate(&e).unwrap(), 15);
        assert_eq!(calculate(&binary(ArithOp::Div, constant(7), constant(2))).unwrap(), 3);
    }

    #[test]
    fn test_failures() {
        assert!(matches!(
            calculate(&binary(ArithOp::Div, constant(1), constant(0))),
            Err(CompileError::DivisionByZero(_))
        ));
        assert!(matches!(
            calculate(&binary(ArithOp::Mul, constant(i64::MAX), constant(2))),
            Err(CompileError::ArithmeticOverflow(_))
        ));
    }
}
