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


use std::path::PathBuf;

use clap::builder::ValueHint;
use clap_derive::{Parser, ValueEnum};
use serde_derive::{Deserialize, Serialize};

/// What the input is and what gets written.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// A jhtml document, rendered as HTML
    #[default]
    Html,
    /// An arithmetic expression, rendered as a LaTeX/Forest parse tree
    Forest,
}

#[derive(Parser, Debug, Serialize, Deserialize)]
#[command(version, about)]
pub struct Args {
    #[arg(
        value_name = "INPUT",
        help = "Source file to compile. Reads standard input if omitted",
        value_hint = ValueHint::FilePath
    )]
    pub input: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "OUTPUT",
        help = "Write generated output to this file instead of standard output",
        value_hint = ValueHint::FilePath
    )]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Target::Html, help = "Output to generate")]
    pub target: Target,

    #[arg(
        long,
        help = "Log comments and other lexemes the parser skips (at debug level)"
    )]
    pub log_ignored_lexemes: Option<bool>,

    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,

    #[arg(
        long,
        value_name = "CONFIG",
        help = "Yaml config file to use, overrides values in CLI args",
        value_hint = ValueHint::FilePath
    )]
    pub config_file: Option<PathBuf>,
}
