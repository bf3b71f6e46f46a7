// Copyright (C) 2025 Hove and/or its affiliates.
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, version 3.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.

// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>

use crate::Result;
use anyhow::anyhow;
use minidom::Element;

/// Search an [Element](minidom::Element) subtree by local name, in document
/// order. The element itself is never part of the result.
///
/// NeTEx nests the same objects at varying depths depending on the frame
/// layout of the producer, so most lookups do not rely on an exact path.
pub trait Descendants {
    /// All the descendants named `name`, in document order
    fn descendants<'a>(&'a self, name: &str) -> Vec<&'a Self>;

    /// The first descendant named `name`, if any
    fn descendant<'a>(&'a self, name: &str) -> Option<&'a Self>;

    /// The first descendant named `name` or an error
    fn try_descendant<'a>(&'a self, name: &str) -> Result<&'a Self>;

    /// Trimmed text of the first descendant named `name`
    fn try_text(&self, name: &str) -> Result<String>;
}

fn collect<'a>(element: &'a Element, name: &str, found: &mut Vec<&'a Element>) {
    for child in element.children() {
        if child.name() == name {
            found.push(child);
        }
        collect(child, name, found);
    }
}

fn first<'a>(element: &'a Element, name: &str) -> Option<&'a Element> {
    element.children().find_map(|child| {
        if child.name() == name {
            Some(child)
        } else {
            first(child, name)
        }
    })
}

impl Descendants for Element {
    fn descendants<'a>(&'a self, name: &str) -> Vec<&'a Self> {
        let mut found = Vec::new();
        collect(self, name, &mut found);
        found
    }

    fn descendant<'a>(&'a self, name: &str) -> Option<&'a Self> {
        first(self, name)
    }

    fn try_descendant<'a>(&'a self, name: &str) -> Result<&'a Self> {
        self.descendant(name).ok_or_else(|| {
            anyhow!(
                "Failed to find a descendant '{}' in element '{}'",
                name,
                self.name()
            )
        })
    }

    fn try_text(&self, name: &str) -> Result<String> {
        Ok(self.try_descendant(name)?.text().trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const XML: &str = r#"<root>
            <Name>root name</Name>
            <members>
                <Line id="1"><Name>one</Name></Line>
                <group>
                    <Line id="2"><Name>two</Name></Line>
                </group>
                <Line id="3" />
            </members>
        </root>"#;

    #[test]
    fn descendants_in_document_order() {
        let root: Element = XML.parse().unwrap();
        let ids: Vec<_> = root
            .descendants("Line")
            .into_iter()
            .map(|line| line.attr("id").unwrap())
            .collect();
        assert_eq!(vec!["1", "2", "3"], ids);
    }

    #[test]
    fn first_descendant_is_depth_first() {
        let root: Element = XML.parse().unwrap();
        let members = root.try_descendant("members").unwrap();
        let name = members.try_descendant("Name").unwrap();
        assert_eq!("one", name.text());
    }

    #[test]
    fn trimmed_text() {
        let root: Element = r#"<root><Name>
            Balsthal, Post
        </Name></root>"#
            .parse()
            .unwrap();
        assert_eq!("Balsthal, Post", root.try_text("Name").unwrap());
    }

    #[test]
    fn element_itself_is_excluded() {
        let root: Element = XML.parse().unwrap();
        assert!(root.descendant("root").is_none());
    }

    #[test]
    #[should_panic(expected = "Failed to find a descendant 'Quay' in element 'root'")]
    fn no_descendant() {
        let root: Element = XML.parse().unwrap();
        root.try_descendant("Quay").unwrap();
    }
}
