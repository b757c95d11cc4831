// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Element names and attributes as delivered by the XML front end.

/// The name of an element with its resolved namespace.
///
/// `namespace` is empty for elements without a namespace. `qualified` is the
/// name as written in the document, prefix included (e.g. `"gml:Point"`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ElementName<'a> {
    pub namespace: &'a str,
    pub local: &'a str,
    pub qualified: &'a str,
}

impl<'a> ElementName<'a> {
    pub fn new(namespace: &'a str, local: &'a str, qualified: &'a str) -> Self {
        Self {
            namespace,
            local,
            qualified,
        }
    }
}

/// One attribute of an element.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Attribute {
    pub namespace: String,
    pub local: String,
    pub qualified: String,
    pub value: String,
}

/// The ordered attributes of an element.
///
/// # Examples
///
/// ```
/// use gml::{Attribute, Attributes};
///
/// let mut attrs = Attributes::new();
/// attrs.push(Attribute {
///     local: "srsName".into(),
///     qualified: "srsName".into(),
///     value: "EPSG:4326".into(),
///     ..Default::default()
/// });
///
/// assert_eq!(attrs.get("srsName"), Some("EPSG:4326"));
/// assert_eq!(attrs.get("fid"), None);
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Attributes {
    items: Vec<Attribute>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, attribute: Attribute) {
        self.items.push(attribute);
    }

    /// Returns the value of the first attribute with the `local` name in any
    /// namespace.
    pub fn get(&self, local: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|a| a.local == local)
            .map(|a| a.value.as_str())
    }

    /// Returns the value of the attribute with the `local` name in the
    /// `namespace`.
    pub fn get_ns(&self, namespace: &str, local: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|a| a.namespace == namespace && a.local == local)
            .map(|a| a.value.as_str())
    }

    /// Like [`get`](Self::get) but compares the local name ignoring ASCII
    /// case.
    pub fn get_ignore_case(&self, local: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|a| a.local.eq_ignore_ascii_case(local))
            .map(|a| a.value.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(namespace: &str, local: &str, value: &str) -> Attribute {
        Attribute {
            namespace: namespace.to_string(),
            local: local.to_string(),
            qualified: local.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn lookup_by_namespace() {
        let attrs: Attributes = [
            attr("", "id", "plain"),
            attr("http://www.opengis.net/gml", "id", "gml"),
        ]
        .into_iter()
        .collect();

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("id"), Some("plain"));
        assert_eq!(attrs.get_ns("http://www.opengis.net/gml", "id"), Some("gml"));
        assert_eq!(attrs.get_ns("urn:other", "id"), None);
    }

    #[test]
    fn lookup_ignoring_case() {
        let attrs: Attributes = [attr("", "FID", "road.1")].into_iter().collect();
        assert_eq!(attrs.get("fid"), None);
        assert_eq!(attrs.get_ignore_case("fid"), Some("road.1"));
    }
}
