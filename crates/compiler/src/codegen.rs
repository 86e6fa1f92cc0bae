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

/// Takes an accepted tree and walks it to produce output text.
use std::fmt::Display;
use std::io::Write;

use tracing::debug;

mod forest;
mod html;

pub use forest::generate_forest;
pub use html::{MAX_UNROLL, generate_html};

pub const INDENTATION_CHARACTER: char = ' ';
pub const INDENTATION_SIZE: usize = 4;

pub fn indentation(level: usize) -> String {
    std::iter::repeat_n(INDENTATION_CHARACTER, level * INDENTATION_SIZE).collect()
}

/// Line-at-a-time writer. Every line is flushed as soon as it is written so partial output
/// survives a failure further down the tree.
pub(crate) struct Output<'w, W: Write> {
    out: &'w mut W,
    lines: usize,
}

impl<'w, W: Write> Output<'w, W> {
    pub(crate) fn new(out: &'w mut W) -> Self {
        Self { out, lines: 0 }
    }

    pub(crate) fn line(&mut self, level: usize, text: impl Display) -> std::io::Result<()> {
        writeln!(self.out, "{}{text}", indentation(level))?;
        self.lines += 1;
        self.out.flush()
    }

    /// Verbatim text that already carries its own indentation and newlines.
    pub(crate) fn raw(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.lines += text.matches('\n').count();
        self.out.flush()
    }
}

impl<W: Write> Drop for Output<'_, W> {
    fn drop(&mut self) {
        debug!("Generated {} lines", self.lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        assert_eq!(indentation(0), "");
        assert_eq!(indentation(2), "        ");
    }

    #[test]
    fn test_output_lines() {
        let mut buffer = vec![];
        {
            let mut output = Output::new(&mut buffer);
            output.line(1, "<p>").unwrap();
            output.raw("x\n").unwrap();
        }
        assert_eq!(String::from_utf8(buffer).unwrap(), "    <p>\nx\n");
    }
}
