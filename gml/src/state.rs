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

//! GML element vocabulary and the two-axis parsing state of the geometry
//! filter.
//!
//! The outer state tracks whether the filter is inside a `coord` or a
//! `coordinates` element, the inner state which axis of a `coord` is being
//! read. Transitions are plain functions from state and element to the next
//! state and an [`Action`] for the filter to perform, so the state machine
//! can be driven without any XML front end.

use std::fmt;

use crate::coordinates::Coordinate;

/// The GML 2 namespace URI.
pub const GML_NAMESPACE: &str = "http://www.opengis.net/gml";

/// A base geometry type of GML 2.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum GeometryKind {
    Point,
    LineString,
    LinearRing,
    Polygon,
    Box,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    /// Returns the kind for the element's local name.
    pub fn from_local_name(name: &str) -> Option<Self> {
        match name {
            "Point" => Some(Self::Point),
            "LineString" => Some(Self::LineString),
            "LinearRing" => Some(Self::LinearRing),
            "Polygon" => Some(Self::Polygon),
            "Box" => Some(Self::Box),
            "MultiPoint" => Some(Self::MultiPoint),
            "MultiLineString" => Some(Self::MultiLineString),
            "MultiPolygon" => Some(Self::MultiPolygon),
            "GeometryCollection" => Some(Self::GeometryCollection),
            _ => None,
        }
    }

    /// Returns the element's local name.
    pub fn local_name(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::LinearRing => "LinearRing",
            Self::Polygon => "Polygon",
            Self::Box => "Box",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

/// Which ring of a polygon follows.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Boundary {
    /// `outerBoundaryIs`, the exterior ring.
    Outer,
    /// `innerBoundaryIs`, a hole.
    Inner,
}

impl Boundary {
    pub fn local_name(&self) -> &'static str {
        match self {
            Self::Outer => "outerBoundaryIs",
            Self::Inner => "innerBoundaryIs",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn local_name(&self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }
}

/// A GML element the geometry filter reacts to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum GmlElement {
    Geometry(GeometryKind),
    Boundary(Boundary),
    Coord,
    Coordinates,
    Axis(Axis),
}

impl GmlElement {
    /// Classifies the local name of an element in the GML namespace.
    ///
    /// Returns `None` for every element that should be passed through.
    pub fn from_local_name(name: &str) -> Option<Self> {
        match name {
            "outerBoundaryIs" => Some(Self::Boundary(Boundary::Outer)),
            "innerBoundaryIs" => Some(Self::Boundary(Boundary::Inner)),
            "coord" => Some(Self::Coord),
            "coordinates" => Some(Self::Coordinates),
            "X" => Some(Self::Axis(Axis::X)),
            "Y" => Some(Self::Axis(Axis::Y)),
            "Z" => Some(Self::Axis(Axis::Z)),
            _ => GeometryKind::from_local_name(name).map(Self::Geometry),
        }
    }
}

/// Whether the filter is inside a coordinate-bearing element.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum OuterState {
    #[default]
    Idle,
    InsideCoord,
    InsideCoordinates,
}

/// Which axis of a `coord` element is being read.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum InnerState {
    #[default]
    Idle,
    InsideX,
    InsideY,
    InsideZ,
}

impl From<Axis> for InnerState {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::InsideX,
            Axis::Y => Self::InsideY,
            Axis::Z => Self::InsideZ,
        }
    }
}

/// The x, y and z values of a `coord` element read so far.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct PendingCoordinate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl PendingCoordinate {
    /// Returns the coordinate if either x and y or x, y and z are set.
    pub fn complete(&self) -> Option<Coordinate> {
        match (self.x, self.y, self.z) {
            (Some(x), Some(y), None) => Some(Coordinate::xy(x, y)),
            (Some(x), Some(y), Some(z)) => Some(Coordinate::xyz(x, y, z)),
            _ => None,
        }
    }
}

/// What the filter has to do in response to an element event.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Action {
    /// Pass the event on unchanged.
    Forward,
    /// Nothing to emit; only the state changed.
    Consume,
    GeometryStart(GeometryKind),
    GeometryEnd(GeometryKind),
    GeometrySub(Boundary),
    /// A `coordinates` element closed; decode its tuples.
    CloseCoordinates,
    /// An axis of a `coord` element closed; decode its value.
    CloseAxis(Axis),
    /// A `coord` element closed with these values.
    CloseCoord(PendingCoordinate),
}

/// Where character data goes in the current state.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TextTarget {
    Forward,
    /// Delimited tuples of a `coordinates` element.
    Tuples,
    /// The value of one axis of a `coord` element.
    Axis(Axis),
    /// Text inside a `coord` but outside of `X`, `Y` or `Z`.
    Ignore,
}

/// The complete parsing state of the geometry filter.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct ParseState {
    pub outer: OuterState,
    pub inner: InnerState,
    pub pending: PendingCoordinate,
}

impl ParseState {
    /// Transition on the start of `element`, `None` being any element the
    /// filter doesn't know.
    pub fn on_start(self, element: Option<GmlElement>) -> (Self, Action) {
        let Some(element) = element else {
            return (self, Action::Forward);
        };

        match element {
            GmlElement::Geometry(kind) => (self, Action::GeometryStart(kind)),
            GmlElement::Boundary(boundary) => (self, Action::GeometrySub(boundary)),
            GmlElement::Coordinates => (
                Self {
                    outer: OuterState::InsideCoordinates,
                    inner: InnerState::Idle,
                    ..self
                },
                Action::Consume,
            ),
            GmlElement::Coord => (
                Self {
                    outer: OuterState::InsideCoord,
                    inner: InnerState::Idle,
                    pending: PendingCoordinate::default(),
                },
                Action::Consume,
            ),
            GmlElement::Axis(axis) if self.outer == OuterState::InsideCoord => (
                Self {
                    inner: axis.into(),
                    ..self
                },
                Action::Consume,
            ),
            GmlElement::Axis(_) => (self, Action::Forward),
        }
    }

    /// Transition on the end of `element`.
    pub fn on_end(self, element: Option<GmlElement>) -> (Self, Action) {
        let Some(element) = element else {
            return (self, Action::Forward);
        };

        match element {
            GmlElement::Geometry(kind) => (self, Action::GeometryEnd(kind)),
            GmlElement::Boundary(boundary) => (self, Action::GeometrySub(boundary)),
            GmlElement::Coordinates => (
                Self {
                    outer: OuterState::Idle,
                    ..self
                },
                Action::CloseCoordinates,
            ),
            GmlElement::Coord => (Self::default(), Action::CloseCoord(self.pending)),
            GmlElement::Axis(axis) if self.outer == OuterState::InsideCoord => (
                Self {
                    inner: InnerState::Idle,
                    ..self
                },
                Action::CloseAxis(axis),
            ),
            GmlElement::Axis(_) => (self, Action::Forward),
        }
    }

    pub fn text_target(&self) -> TextTarget {
        match (self.outer, self.inner) {
            (OuterState::InsideCoordinates, _) => TextTarget::Tuples,
            (OuterState::InsideCoord, InnerState::InsideX) => TextTarget::Axis(Axis::X),
            (OuterState::InsideCoord, InnerState::InsideY) => TextTarget::Axis(Axis::Y),
            (OuterState::InsideCoord, InnerState::InsideZ) => TextTarget::Axis(Axis::Z),
            (OuterState::InsideCoord, InnerState::Idle) => TextTarget::Ignore,
            (OuterState::Idle, _) => TextTarget::Forward,
        }
    }

    /// Stores the `value` of an axis into the pending coordinate.
    pub fn store(self, axis: Axis, value: f64) -> Self {
        let mut pending = self.pending;
        match axis {
            Axis::X => pending.x = Some(value),
            Axis::Y => pending.y = Some(value),
            Axis::Z => pending.z = Some(value),
        }
        Self { pending, ..self }
    }
}
