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

#[macro_use]
extern crate pest_derive;

mod actions;
mod arith;
pub mod ast;
mod codegen;
mod diagnostics;
mod element;
mod errors;
mod eval;
mod parse;
mod strings;
mod teardown;
mod var_scope;
pub mod vocabulary;

pub use crate::actions::{Compilation, CounterHeader, SemanticActions};
pub use crate::arith::ast::{ArithExpression, ArithOp, ArithProgram, Factor};
pub use crate::arith::calculator::calculate;
pub use crate::arith::parse::{ArithCompilation, compile_arith};
pub use crate::codegen::{
    INDENTATION_CHARACTER, INDENTATION_SIZE, MAX_UNROLL, generate_forest, generate_html,
    indentation,
};
pub use crate::diagnostics::{Severity, emit_compile_error, format_compile_error};
pub use crate::element::{Element, flatten};
pub use crate::errors::{CompileContext, CompileError, ErrorClass, GenerateError};
pub use crate::eval::{Bindings, Constant, fold, fold_condition};
pub use crate::parse::{CompileOptions, TreeTransformer, compile, parse_document};
pub use crate::strings::StringStaging;
pub use crate::teardown::{NodeKind, NodeTally, Release, release_program};
pub use crate::var_scope::{Decl, DeclType, Lookup, Resolution, VarScope};
