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

//! Assembly of flat feature records.
//!
//! A feature is everything between the start and end of an element with the
//! [`ElementRole::Feature`] role, `featureMember` by default:
//!
//! ```xml
//! <gml:featureMember>
//!   <roads:Road fid="road.1">
//!     <roads:name>Main Street</roads:name>
//!     <roads:lanes>2</roads:lanes>
//!     <roads:centerLine>
//!       <gml:LineString>
//!         <gml:coordinates>0,0 10,0</gml:coordinates>
//!       </gml:LineString>
//!     </roads:centerLine>
//!   </roads:Road>
//! </gml:featureMember>
//! ```
//!
//! yields a `Road` feature with id `road.1` and the attributes `name`,
//! `lanes` and `centerLine`. Nested elements contribute slash-joined names
//! like `address/street`.

use std::collections::{HashMap, HashSet};
use std::fmt;

use geo_types::Geometry;
use log::{trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, SchemaError};
use crate::event::{Attributes, ElementName};
use crate::handler::{ContentHandler, FeatureHandler, GeometrySink};

/// The value of a feature attribute.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Integer(i64),
    Double(f64),
    String(String),
    Geometry(Geometry<f64>),
}

impl Value {
    /// Converts element text to the narrowest fitting value: an integer, a
    /// finite double, or else a string. Only text starting with a digit,
    /// after an optional sign and decimal point, is numeric.
    ///
    /// # Examples
    ///
    /// ```
    /// use gml::Value;
    ///
    /// assert_eq!(Value::from_text("42"), Value::Integer(42));
    /// assert_eq!(Value::from_text("-1.5"), Value::Double(-1.5));
    /// assert_eq!(Value::from_text("NaN"), Value::String("NaN".into()));
    /// ```
    pub fn from_text(text: &str) -> Self {
        let unsigned = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
        let digits = unsigned.strip_prefix('.').unwrap_or(unsigned);
        if digits.starts_with(|c: char| c.is_ascii_digit()) {
            if let Ok(i) = text.parse() {
                return Self::Integer(i);
            }
            if let Ok(d) = text.parse::<f64>() {
                if d.is_finite() {
                    return Self::Double(d);
                }
            }
        }
        Self::String(text.to_string())
    }

    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Self::Integer(_) => AttributeType::Integer,
            Self::Double(_) => AttributeType::Double,
            Self::String(_) => AttributeType::String,
            Self::Geometry(_) => AttributeType::Geometry,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns integers and doubles as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_geometry(&self) -> Option<&Geometry<f64>> {
        match self {
            Self::Geometry(g) => Some(g),
            _ => None,
        }
    }
}

/// The type of a feature attribute, inferred from its value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AttributeType {
    Integer,
    Double,
    String,
    Geometry,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "Integer"),
            Self::Double => write!(f, "Double"),
            Self::String => write!(f, "String"),
            Self::Geometry => write!(f, "Geometry"),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct AttributeDescriptor {
    pub name: String,
    pub binding: AttributeType,
}

/// The schema of a feature: its type name and ordered attribute types.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FeatureType {
    pub name: String,
    pub attributes: Vec<AttributeDescriptor>,
}

impl FeatureType {
    /// Infers the feature type of a feature named `type_name` with the
    /// `attributes`.
    ///
    /// # Errors
    ///
    /// Fails if there is no type name, or an attribute name is empty or
    /// appears more than once.
    pub fn infer(
        type_name: Option<&str>,
        attributes: &[(String, Value)],
    ) -> Result<Self, SchemaError> {
        let name = match type_name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(SchemaError::MissingTypeName),
        };

        let mut seen = HashSet::new();
        let attributes = attributes
            .iter()
            .map(|(attr, value)| {
                if attr.is_empty() {
                    Err(SchemaError::EmptyAttributeName)
                } else if !seen.insert(attr.as_str()) {
                    Err(SchemaError::DuplicateAttribute {
                        type_name: name.to_string(),
                        name: attr.clone(),
                    })
                } else {
                    Ok(AttributeDescriptor {
                        name: attr.clone(),
                        binding: value.attribute_type(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.to_string(),
            attributes,
        })
    }
}

/// A flat feature record.
#[derive(Clone, PartialEq, Debug)]
pub struct Feature {
    /// The `fid` attribute of the feature element, if any.
    pub id: Option<String>,
    pub schema: FeatureType,
    /// The attributes in document order, matching the schema's attributes.
    pub attributes: Vec<(String, Value)>,
}

impl Feature {
    pub fn type_name(&self) -> &str {
        &self.schema.name
    }

    /// Returns the value of the attribute `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns the first geometry attribute.
    pub fn geometry(&self) -> Option<&Geometry<f64>> {
        self.attributes.iter().find_map(|(_, v)| v.as_geometry())
    }
}

/// How the feature filter treats an element.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElementRole {
    /// The element wraps exactly one feature.
    Feature,
    /// The element wraps a member of a multi geometry and is not an
    /// attribute.
    GeometryPart,
}

/// Maps element local names to their [`ElementRole`].
///
/// The default registers the GML 2 member elements. Elements without a role
/// are ordinary attributes.
///
/// # Examples
///
/// Reading a WFS response where features are wrapped in `member` elements:
///
/// ```
/// use gml::{ElementRole, ElementRoles};
///
/// let roles = ElementRoles::default().with("member", ElementRole::Feature);
///
/// assert_eq!(roles.get("member"), Some(ElementRole::Feature));
/// assert_eq!(roles.get("pointMember"), Some(ElementRole::GeometryPart));
/// assert_eq!(roles.get("name"), None);
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementRoles {
    roles: HashMap<String, ElementRole>,
}

impl Default for ElementRoles {
    fn default() -> Self {
        Self::empty()
            .with("featureMember", ElementRole::Feature)
            .with("pointMember", ElementRole::GeometryPart)
            .with("lineStringMember", ElementRole::GeometryPart)
            .with("polygonMember", ElementRole::GeometryPart)
            .with("geometryMember", ElementRole::GeometryPart)
    }
}

impl ElementRoles {
    /// Creates a map without any roles.
    pub fn empty() -> Self {
        Self {
            roles: HashMap::new(),
        }
    }

    pub fn with(mut self, local_name: impl Into<String>, role: ElementRole) -> Self {
        self.insert(local_name, role);
        self
    }

    pub fn insert(&mut self, local_name: impl Into<String>, role: ElementRole) {
        self.roles.insert(local_name.into(), role);
    }

    pub fn get(&self, local_name: &str) -> Option<ElementRole> {
        self.roles.get(local_name).copied()
    }
}

/// Where the feature filter is in the document.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FeatureState {
    Idle,
    InsideFeature,
    InsideAttribute,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Opened {
    FeatureElement,
    Attribute,
    GeometryPart,
}

#[derive(Debug, Default)]
struct Accumulator {
    id: Option<String>,
    type_name: Option<String>,
    attributes: Vec<(String, Value)>,
    path: Vec<String>,
    opened: Vec<Opened>,
    text: Option<String>,
}

impl Accumulator {
    fn path(&self) -> String {
        self.path.join("/")
    }
}

/// Collects features from geometries and the events around them.
///
/// Features whose schema can't be inferred are logged and dropped; they are
/// never reported to the [`FeatureHandler`]. Events outside of features are
/// passed through.
pub struct FeatureFilter<H> {
    handler: H,
    roles: ElementRoles,
    current: Option<Accumulator>,
}

impl<H: FeatureHandler> FeatureFilter<H> {
    pub fn new(handler: H) -> Self {
        Self::with_roles(handler, ElementRoles::default())
    }

    pub fn with_roles(handler: H, roles: ElementRoles) -> Self {
        Self {
            handler,
            roles,
            current: None,
        }
    }

    pub fn state(&self) -> FeatureState {
        match &self.current {
            None => FeatureState::Idle,
            Some(acc) if acc.path.is_empty() => FeatureState::InsideFeature,
            Some(_) => FeatureState::InsideAttribute,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_inner(self) -> H {
        self.handler
    }

    fn finish(&mut self) -> Result<(), Error> {
        let Some(acc) = self.current.take() else {
            return Ok(());
        };

        match FeatureType::infer(acc.type_name.as_deref(), &acc.attributes) {
            Ok(schema) => {
                trace!(
                    "feature {} ({:?}) with {} attribute(s)",
                    schema.name,
                    acc.id,
                    acc.attributes.len()
                );
                self.handler.feature(Feature {
                    id: acc.id,
                    schema,
                    attributes: acc.attributes,
                })
            }
            Err(e) => {
                warn!("dropping feature {:?}: {e}", acc.id);
                Ok(())
            }
        }
    }
}

impl<H: FeatureHandler> ContentHandler for FeatureFilter<H> {
    fn start_element(&mut self, name: &ElementName, attrs: &Attributes) -> Result<(), Error> {
        let role = self.roles.get(name.local);

        let acc = match (self.current.as_mut(), role) {
            (previous, Some(ElementRole::Feature)) => {
                if let Some(previous) = previous {
                    warn!(
                        "{} starts inside another feature, discarding {:?}",
                        name.local, previous.id
                    );
                }
                self.current = Some(Accumulator::default());
                return Ok(());
            }
            (None, _) => return self.handler.start_element(name, attrs),
            (Some(acc), Some(ElementRole::GeometryPart)) => {
                acc.opened.push(Opened::GeometryPart);
                return Ok(());
            }
            (Some(acc), None) => acc,
        };

        let fid = attrs.get_ignore_case("fid");
        if acc.opened.is_empty() || fid.is_some() {
            if let Some(fid) = fid {
                acc.id = Some(fid.to_string());
                acc.type_name = Some(name.local.to_string());
            } else if acc.type_name.is_none() {
                acc.type_name = Some(name.local.to_string());
            }
            acc.opened.push(Opened::FeatureElement);
        } else {
            acc.path.push(name.local.to_string());
            acc.opened.push(Opened::Attribute);
            acc.text = None;
        }

        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), Error> {
        match self.current.as_mut() {
            None => self.handler.characters(text),
            Some(acc) if acc.opened.last() == Some(&Opened::Attribute) => {
                acc.text.get_or_insert_with(String::new).push_str(text);
                Ok(())
            }
            Some(_) => Ok(()),
        }
    }

    fn end_element(&mut self, name: &ElementName) -> Result<(), Error> {
        let Some(acc) = self.current.as_mut() else {
            return self.handler.end_element(name);
        };

        match acc.opened.pop() {
            Some(Opened::Attribute) => {
                if let Some(text) = acc.text.take() {
                    let text = text.trim();
                    if !text.is_empty() {
                        let name = acc.path();
                        acc.attributes.push((name, Value::from_text(text)));
                    }
                }
                acc.path.pop();
                Ok(())
            }
            Some(Opened::FeatureElement | Opened::GeometryPart) => Ok(()),
            None => self.finish(),
        }
    }
}

impl<H: FeatureHandler> GeometrySink for FeatureFilter<H> {
    fn geometry(&mut self, geometry: Geometry<f64>) -> Result<(), Error> {
        match self.current.as_mut() {
            Some(acc) => {
                let name = if acc.path.is_empty() {
                    "geometry".to_string()
                } else {
                    acc.path()
                };
                acc.attributes.push((name, Value::Geometry(geometry)));
                acc.text = None;
                Ok(())
            }
            None => self.handler.geometry(geometry),
        }
    }
}
