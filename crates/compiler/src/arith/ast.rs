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

use std::fmt::Display;

use crate::errors::CompileContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArithProgram {
    pub expression: ArithExpression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl Display for ArithOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArithExpression {
    Binary {
        op: ArithOp,
        left: Box<ArithExpression>,
        right: Box<ArithExpression>,
        /// Position of the operator.
        context: CompileContext,
    },
    Factor(Factor),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Factor {
    Constant(i64),
    Parenthesized(Box<ArithExpression>),
}
