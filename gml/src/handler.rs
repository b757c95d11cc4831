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

//! Callback interfaces between the stages of the filter chain.
//!
//! Events flow from the XML front end through the stages in document order:
//!
//! ```text
//! reader -> GeometryFilter -> GeometryAssembler -> FeatureFilter -> FeatureHandler
//!   ContentHandler   GeometryHandler     GeometrySink       FeatureHandler
//! ```
//!
//! Every callback returns a `Result` so that any stage, the final consumer
//! included, can abort the parse.

use geo_types::Geometry;
use log::debug;

use crate::coordinates::Coordinate;
use crate::error::Error;
use crate::event::{Attributes, ElementName};
use crate::feature::Feature;
use crate::state::{Boundary, GeometryKind};

/// Receives the low-level markup events of a document.
///
/// All methods default to ignoring the event.
pub trait ContentHandler {
    fn start_element(&mut self, name: &ElementName, attrs: &Attributes) -> Result<(), Error> {
        let _ = (name, attrs);
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), Error> {
        let _ = text;
        Ok(())
    }

    fn end_element(&mut self, name: &ElementName) -> Result<(), Error> {
        let _ = name;
        Ok(())
    }
}

/// Receives geometry callbacks from the
/// [`GeometryFilter`](crate::GeometryFilter), together with all events that
/// are not part of a geometry encoding.
pub trait GeometryHandler: ContentHandler {
    /// A base geometry element starts.
    fn geometry_start(&mut self, kind: GeometryKind, attrs: &Attributes) -> Result<(), Error>;

    /// A base geometry element ends.
    fn geometry_end(&mut self, kind: GeometryKind) -> Result<(), Error>;

    /// Called at the start and again at the end of a polygon boundary.
    fn geometry_sub(&mut self, boundary: Boundary) -> Result<(), Error>;

    fn coordinate(&mut self, coordinate: Coordinate) -> Result<(), Error>;
}

/// Receives complete geometries from the
/// [`GeometryAssembler`](crate::GeometryAssembler).
pub trait GeometrySink: ContentHandler {
    fn geometry(&mut self, geometry: Geometry<f64>) -> Result<(), Error>;
}

/// Receives features from the [`FeatureFilter`](crate::FeatureFilter).
pub trait FeatureHandler: ContentHandler {
    fn feature(&mut self, feature: Feature) -> Result<(), Error>;

    /// A geometry outside of any feature.
    fn geometry(&mut self, geometry: Geometry<f64>) -> Result<(), Error> {
        debug!("ignoring geometry outside of a feature: {geometry:?}");
        Ok(())
    }
}

impl<H: ContentHandler + ?Sized> ContentHandler for &mut H {
    fn start_element(&mut self, name: &ElementName, attrs: &Attributes) -> Result<(), Error> {
        (**self).start_element(name, attrs)
    }

    fn characters(&mut self, text: &str) -> Result<(), Error> {
        (**self).characters(text)
    }

    fn end_element(&mut self, name: &ElementName) -> Result<(), Error> {
        (**self).end_element(name)
    }
}

impl<H: GeometryHandler + ?Sized> GeometryHandler for &mut H {
    fn geometry_start(&mut self, kind: GeometryKind, attrs: &Attributes) -> Result<(), Error> {
        (**self).geometry_start(kind, attrs)
    }

    fn geometry_end(&mut self, kind: GeometryKind) -> Result<(), Error> {
        (**self).geometry_end(kind)
    }

    fn geometry_sub(&mut self, boundary: Boundary) -> Result<(), Error> {
        (**self).geometry_sub(boundary)
    }

    fn coordinate(&mut self, coordinate: Coordinate) -> Result<(), Error> {
        (**self).coordinate(coordinate)
    }
}

impl<S: GeometrySink + ?Sized> GeometrySink for &mut S {
    fn geometry(&mut self, geometry: Geometry<f64>) -> Result<(), Error> {
        (**self).geometry(geometry)
    }
}

impl<H: FeatureHandler + ?Sized> FeatureHandler for &mut H {
    fn feature(&mut self, feature: Feature) -> Result<(), Error> {
        (**self).feature(feature)
    }

    fn geometry(&mut self, geometry: Geometry<f64>) -> Result<(), Error> {
        (**self).geometry(geometry)
    }
}
