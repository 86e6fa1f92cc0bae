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

/// Accumulates the body of a quoted string across the lexemes the scanner hands over one
/// at a time: plain runs, escapes, and `\uXXXX` sequences.
#[derive(Debug, Default)]
pub struct StringStaging {
    buffer: Option<String>,
}

impl StringStaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opening quote. Anything left over from an unterminated string is dropped.
    pub fn begin(&mut self) {
        self.buffer = Some(String::new());
    }

    pub fn push_content(&mut self, lexeme: &str) {
        self.buffer.get_or_insert_with(String::new).push_str(lexeme);
    }

    /// Resolve a two-character escape such as `\n`. Returns false, leaving the buffer
    /// untouched, if the escape is not one of `\" \\ \b \f \n \r \t`.
    pub fn push_escape(&mut self, lexeme: &str) -> bool {
        let mut chars = lexeme.chars();
        let (Some('\\'), Some(c), None) = (chars.next(), chars.next(), chars.next()) else {
            return false;
        };
        let Some(resolved) = resolve_escape(c) else {
            return false;
        };
        self.buffer.get_or_insert_with(String::new).push(resolved);
        true
    }

    /// `\uXXXX`. Valid scalar values are decoded; anything else (e.g. a lone surrogate) is
    /// kept verbatim.
    pub fn push_unicode(&mut self, lexeme: &str) {
        let decoded = lexeme
            .strip_prefix("\\u")
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);
        let buffer = self.buffer.get_or_insert_with(String::new);
        match decoded {
            Some(c) => buffer.push(c),
            None => buffer.push_str(lexeme),
        }
    }

    /// Closing quote: hand over the accumulated string and reset.
    pub fn end(&mut self) -> String {
        self.buffer.take().unwrap_or_default()
    }
}

fn resolve_escape(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\\' => Some('\\'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        _ => None,
    }
}
