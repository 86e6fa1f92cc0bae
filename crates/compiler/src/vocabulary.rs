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

//! The closed sets of element tags and attribute keys the language accepts.

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// How an element may hold `content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Holds a string, a variable reference, or a `{var: ...}` object.
    TextOnly,
    /// Holds nested elements, arrays, conditionals and loops; never a bare string.
    Container,
    /// Holds nothing; attributes only.
    Void,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Tag {
    Html,
    Head,
    Title,
    Body,
    Div,
    P,
    Span,
    A,
    Img,
    Ul,
    Ol,
    Li,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Center,
    Nav,
    Header,
    Footer,
    Section,
    Strong,
    Em,
}

impl Tag {
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::Title
            | Tag::P
            | Tag::Span
            | Tag::A
            | Tag::Li
            | Tag::H1
            | Tag::H2
            | Tag::H3
            | Tag::H4
            | Tag::H5
            | Tag::H6
            | Tag::Strong
            | Tag::Em => TagKind::TextOnly,
            Tag::Img => TagKind::Void,
            Tag::Html
            | Tag::Head
            | Tag::Body
            | Tag::Div
            | Tag::Ul
            | Tag::Ol
            | Tag::Center
            | Tag::Nav
            | Tag::Header
            | Tag::Footer
            | Tag::Section => TagKind::Container,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Attribute {
    Id,
    Class,
    Style,
    Href,
    Src,
    Alt,
    Title,
    Width,
    Height,
    Lang,
    Name,
    Target,
    Rel,
    Charset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tags_round_trip_through_names() {
        for tag in Tag::iter() {
            assert_eq!(Tag::from_str(tag.as_ref()).unwrap(), tag);
        }
        assert_eq!(Tag::from_str("h1").unwrap(), Tag::H1);
        assert!(Tag::from_str("foo").is_err());
        assert!(Tag::from_str("DIV").is_err());
    }

    #[test]
    fn test_partition() {
        assert_eq!(Tag::P.kind(), TagKind::TextOnly);
        assert_eq!(Tag::Div.kind(), TagKind::Container);
        assert_eq!(Tag::Img.kind(), TagKind::Void);
    }

    #[test]
    fn test_attributes() {
        assert_eq!(Attribute::from_str("href").unwrap(), Attribute::Href);
        assert!(Attribute::from_str("onclick").is_err());
    }
}
