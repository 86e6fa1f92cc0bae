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

use indexmap::IndexMap;

/// Symbol table for the names loops introduce. Names live from the loop's declaration until
/// the loop closes; nested loops may not reuse a name that is still in scope.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct VarScope {
    variables: IndexMap<String, Decl>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeclType {
    /// `for name in {...}`
    Iterator,
    /// `for (name = ...; ...; name = ...)`
    Counter,
}

/// Where a declared name is in its lifecycle.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Resolution {
    /// The value the name is bound to (iterable or initializer) is still being built.
    /// References from inside that value are circular.
    Resolving,
    /// Declaration complete; references are valid.
    Resolved,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Decl {
    /// How was it declared?
    pub decl_type: DeclType,
    /// Loop nesting depth at the point of declaration, starting at 0.
    pub depth: usize,
    pub resolution: Resolution,
}

/// Outcome of looking a reference up.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Lookup {
    Undefined,
    Circular,
    Resolved(DeclType),
}

impl VarScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a name in the resolving state. Returns None if the name is already in scope.
    pub fn declare(&mut self, name: &str, decl_type: DeclType) -> Option<&Decl> {
        if self.variables.contains_key(name) {
            return None;
        }
        let depth = self.variables.len();
        self.variables.insert(
            name.to_string(),
            Decl {
                decl_type,
                depth,
                resolution: Resolution::Resolving,
            },
        );
        self.variables.get(name)
    }

    /// Finish resolving a declared name. Returns false if the name is not in scope.
    pub fn complete(&mut self, name: &str) -> bool {
        match self.variables.get_mut(name) {
            Some(decl) => {
                decl.resolution = Resolution::Resolved;
                true
            }
            None => false,
        }
    }

    pub fn lookup(&self, name: &str) -> Lookup {
        match self.variables.get(name) {
            None => Lookup::Undefined,
            Some(Decl {
                resolution: Resolution::Resolving,
                ..
            }) => Lookup::Circular,
            Some(Decl {
                resolution: Resolution::Resolved,
                decl_type,
                ..
            }) => Lookup::Resolved(*decl_type),
        }
    }

    /// Drop a name when its loop closes.
    pub fn release(&mut self, name: &str) -> Option<Decl> {
        self.variables.shift_remove(name)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::var_scope::{DeclType, Lookup, Resolution, VarScope};

    #[test]
    fn test_declare_resolve_release() {
        let mut scope = VarScope::new();
        assert_eq!(scope.lookup("item"), Lookup::Undefined);

        scope.declare("item", DeclType::Iterator).unwrap();
        assert_eq!(scope.lookup("item"), Lookup::Circular);

        assert!(scope.complete("item"));
        assert_eq!(scope.lookup("item"), Lookup::Resolved(DeclType::Iterator));
        // Resolution is not consumed by a lookup; a second reference is just as valid.
        assert_eq!(scope.lookup("item"), Lookup::Resolved(DeclType::Iterator));

        let decl = scope.release("item").unwrap();
        assert_eq!(decl.resolution, Resolution::Resolved);
        assert_eq!(scope.lookup("item"), Lookup::Undefined);
        assert!(scope.is_empty());
    }

    #[test]
    fn test_nested_depth_and_duplicates() {
        let mut scope = VarScope::new();
        assert_eq!(scope.declare("row", DeclType::Iterator).unwrap().depth, 0);
        scope.complete("row");
        assert_eq!(scope.declare("i", DeclType::Counter).unwrap().depth, 1);
        assert!(scope.declare("row", DeclType::Counter).is_none());

        scope.release("i");
        assert_eq!(scope.lookup("i"), Lookup::Undefined);
        assert_eq!(scope.lookup("row"), Lookup::Resolved(DeclType::Iterator));
        scope.release("row");
        assert!(scope.is_empty());
    }

    #[test]
    fn test_complete_unknown() {
        let mut scope = VarScope::new();
        assert!(!scope.complete("ghost"));
    }
}
