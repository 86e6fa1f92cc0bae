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

use std::str::FromStr;

use crate::ast::{CONTENT_KEY, Object, TYPE_KEY, Value};
use crate::vocabulary::{Tag, TagKind};

/// A borrowed tag/attributes/children view over an element object.
#[derive(Debug, Clone, PartialEq)]
pub struct Element<'a> {
    pub tag: Tag,
    /// Every pair other than `type` and `content`, in source order.
    pub attributes: Vec<(&'a str, &'a Value)>,
    /// Items of an array `content`, or the single `content` value.
    pub children: Vec<&'a Value>,
}

impl Element<'_> {
    pub fn kind(&self) -> TagKind {
        self.tag.kind()
    }
}

/// Project an element object. Returns None if the object does not name a known tag in its
/// `type` field; objects that passed validation always flatten.
pub fn flatten(object: &Object) -> Option<Element<'_>> {
    let tag = Tag::from_str(object.tag()?).ok()?;
    let mut attributes = vec![];
    let mut children = vec![];
    for pair in &object.pairs {
        match (pair.key.as_str(), &pair.value) {
            (TYPE_KEY, _) => {}
            (CONTENT_KEY, Value::Array(array)) => children.extend(array.values.iter()),
            (CONTENT_KEY, value) => children.push(value),
            (key, value) => attributes.push((key, value)),
        }
    }
    Some(Element {
        tag,
        attributes,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Array, Pair};
    use crate::errors::CompileContext;

    fn pair(key: &str, value: Value) -> Pair {
        Pair {
            key: key.into(),
            value,
            context: CompileContext::default(),
        }
    }

    #[test]
    fn test_flatten_preserves_order() {
        let object = Object {
            pairs: vec![
                pair("type", Value::String("a".into())),
                pair("href", Value::String("/x".into())),
                pair("content", Value::String("go".into())),
                pair("class", Value::String("link".into())),
            ],
        };
        let element = flatten(&object).unwrap();
        assert_eq!(element.tag, Tag::A);
        assert_eq!(
            element.attributes,
            vec![
                ("href", &Value::String("/x".into())),
                ("class", &Value::String("link".into()))
            ]
        );
        assert_eq!(element.children, vec![&Value::String("go".into())]);
    }

    #[test]
    fn test_array_content_spreads() {
        let object = Object {
            pairs: vec![
                pair("type", Value::String("ul".into())),
                pair(
                    "content",
                    Value::Array(Array {
                        values: vec![Value::Integer(1), Value::Null],
                    }),
                ),
            ],
        };
        let element = flatten(&object).unwrap();
        assert_eq!(element.kind(), TagKind::Container);
        assert_eq!(element.children.len(), 2);
        assert!(element.attributes.is_empty());
    }

    #[test]
    fn test_not_an_element() {
        let object = Object {
            pairs: vec![pair("id", Value::Integer(1))],
        };
        assert!(flatten(&object).is_none());
        let unknown = Object {
            pairs: vec![pair("type", Value::String("blink".into()))],
        };
        assert!(flatten(&unknown).is_none());
    }
}
