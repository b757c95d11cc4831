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

use std::fmt;

use crate::state::GeometryKind;

#[derive(Clone, PartialEq, Debug)]
pub enum Error {
    /// An XML parsing error from the underlying reader, including mismatched
    /// or unclosed elements.
    Xml(String),
    /// A coordinate value is not a number.
    MalformedNumber {
        /// The raw tuple or axis text that failed to parse.
        text: String,
        /// The element the text was read from (e.g. `"coordinates"`, `"X"`).
        context: &'static str,
    },
    /// A tuple of a `coordinates` element lacks its x or y component.
    MissingOrdinate { tuple: String },
    /// A `coord` element closed without a complete x/y or x/y/z triple.
    ///
    /// Only raised with [`CoordinatePolicy::Strict`].
    ///
    /// [`CoordinatePolicy::Strict`]: crate::CoordinatePolicy::Strict
    IncompleteCoordinate { x: bool, y: bool, z: bool },
    /// Two of the configured delimiters are the same character.
    InvalidDelimiters { coordinate: String, tuple: String, decimal: char },
    /// The coordinates and nesting of a geometry element don't form a valid
    /// geometry.
    InvalidGeometry { kind: GeometryKind, reason: String },
    /// The schema of a feature could not be built from its attributes.
    Schema(SchemaError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml(e) => write!(f, "XML error: {e}"),
            Self::MalformedNumber { text, context } => {
                write!(f, "malformed number in {context}: \"{text}\"")
            }
            Self::MissingOrdinate { tuple } => {
                write!(f, "tuple \"{tuple}\" needs at least an x and y component")
            }
            Self::IncompleteCoordinate { x, y, z } => {
                write!(f, "incomplete coord element (x: {x}, y: {y}, z: {z})")
            }
            Self::InvalidDelimiters {
                coordinate,
                tuple,
                decimal,
            } => write!(
                f,
                "ambiguous delimiters: coordinate {coordinate}, tuple {tuple}, decimal '{decimal}'"
            ),
            Self::InvalidGeometry { kind, reason } => write!(f, "invalid {kind}: {reason}"),
            Self::Schema(e) => write!(f, "schema error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<SchemaError> for Error {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

/// Reasons why a feature type can't be inferred from collected attributes.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SchemaError {
    /// The feature has no type name.
    MissingTypeName,
    /// An attribute name is empty.
    EmptyAttributeName,
    /// Two attributes of the same feature share a name.
    DuplicateAttribute { type_name: String, name: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTypeName => write!(f, "feature has no type name"),
            Self::EmptyAttributeName => write!(f, "attribute name is empty"),
            Self::DuplicateAttribute { type_name, name } => {
                write!(f, "{type_name} has more than one attribute named \"{name}\"")
            }
        }
    }
}

impl std::error::Error for SchemaError {}
