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

//! LaTeX/Forest rendering of an arithmetic expression tree.
//! See <https://ctan.org/pkg/forest>.

use std::io::Write;

use tracing::debug;

use crate::arith::ast::{ArithExpression, ArithProgram, Factor};
use crate::codegen::Output;
use crate::errors::GenerateError;

const PROLOGUE: &str = "\\documentclass{standalone}\n\n\
\\usepackage[utf8]{inputenc}\n\
\\usepackage[T1]{fontenc}\n\
\\usepackage{amsmath}\n\
\\usepackage{forest}\n\
\\usepackage{microtype}\n\n\
\\begin{document}\n\
\x20   \\centering\n\
\x20   \\begin{forest}\n\
\x20       [ \\text{$=$}, circle, draw, purple\n";

/// The tree itself sits inside the `=` root opened by the prologue.
const PROGRAM_LEVEL: usize = 3;

fn epilogue(value: i64) -> String {
    format!(
        "            [ ${value}$, circle, draw, blue ]\n        ]\n    \\end{{forest}}\n\\end{{document}}\n\n"
    )
}

/// Render `program` and the value it computes as a standalone LaTeX document.
pub fn generate_forest<W: Write>(
    program: &ArithProgram,
    value: i64,
    out: &mut W,
) -> Result<(), GenerateError> {
    debug!("Generating Forest diagram...");
    let mut output = Output::new(out);
    output.raw(PROLOGUE)?;
    expression(&mut output, PROGRAM_LEVEL, &program.expression)?;
    output.raw(&epilogue(value))?;
    debug!("Generation is done.");
    Ok(())
}

fn expression<W: Write>(
    output: &mut Output<'_, W>,
    level: usize,
    e: &ArithExpression,
) -> std::io::Result<()> {
    output.line(level, "[ $E$, circle, draw, black!20")?;
    match e {
        ArithExpression::Binary {
            op, left, right, ..
        } => {
            expression(output, level + 1, left)?;
            output.line(level + 1, format!("[ ${op}$, circle, draw, purple ]"))?;
            expression(output, level + 1, right)?;
        }
        ArithExpression::Factor(f) => factor(output, level + 1, f)?,
    }
    output.line(level, "]")
}

fn factor<W: Write>(output: &mut Output<'_, W>, level: usize, f: &Factor) -> std::io::Result<()> {
    output.line(level, "[ $F$, circle, draw, black!20")?;
    match f {
        Factor::Constant(value) => {
            output.line(level + 1, "[ $C$, circle, draw, black!20")?;
            output.line(level + 2, format!("[ ${value}$, circle, draw ]"))?;
            output.line(level + 1, "]")?;
        }
        Factor::Parenthesized(inner) => {
            output.line(level + 1, "[ $($, circle, draw, purple ]")?;
            expression(output, level + 1, inner)?;
            output.line(level + 1, "[ $)$, circle, draw, purple ]")?;
        }
    }
    output.line(level, "]")
}
