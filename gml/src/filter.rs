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

use log::debug;

use crate::config::FilterConfig;
use crate::coordinates::CoordinatePolicy;
use crate::error::Error;
use crate::event::{Attributes, ElementName};
use crate::handler::{ContentHandler, GeometryHandler};
use crate::state::{Action, GmlElement, ParseState, PendingCoordinate, TextTarget, GML_NAMESPACE};

/// Filters the markup events of a GML document into geometry callbacks.
///
/// Geometry elements, polygon boundaries and both coordinate notations are
/// turned into calls of the [`GeometryHandler`]. Every other element and its
/// text is passed through unchanged.
///
/// The text of a `coordinates` or axis element is collected until the element
/// closes, so values may be split across several character events. A filter
/// holds the state of one document. Use a new filter for each document.
///
/// # Examples
///
/// ```
/// use gml::{Attributes, ContentHandler, Coordinate, ElementName, Error};
/// use gml::{GeometryFilter, GeometryHandler, GeometryKind, Boundary, GML_NAMESPACE};
///
/// #[derive(Default)]
/// struct Coordinates(Vec<Coordinate>);
///
/// impl ContentHandler for Coordinates {}
///
/// impl GeometryHandler for Coordinates {
///     fn geometry_start(&mut self, _: GeometryKind, _: &Attributes) -> Result<(), Error> {
///         Ok(())
///     }
///     fn geometry_end(&mut self, _: GeometryKind) -> Result<(), Error> {
///         Ok(())
///     }
///     fn geometry_sub(&mut self, _: Boundary) -> Result<(), Error> {
///         Ok(())
///     }
///     fn coordinate(&mut self, c: Coordinate) -> Result<(), Error> {
///         self.0.push(c);
///         Ok(())
///     }
/// }
///
/// let mut filter = GeometryFilter::new(Coordinates::default());
/// let coordinates = ElementName::new(GML_NAMESPACE, "coordinates", "gml:coordinates");
///
/// filter.start_element(&coordinates, &Attributes::new())?;
/// filter.characters("1.0,2.0 3.0,4.0")?;
/// filter.end_element(&coordinates)?;
///
/// assert_eq!(
///     filter.into_inner().0,
///     vec![Coordinate::xy(1.0, 2.0), Coordinate::xy(3.0, 4.0)]
/// );
/// # Ok::<(), Error>(())
/// ```
pub struct GeometryFilter<H> {
    handler: H,
    config: FilterConfig,
    state: ParseState,
    text: String,
}

impl<H: GeometryHandler> GeometryFilter<H> {
    pub fn new(handler: H) -> Self {
        Self::with_config(handler, FilterConfig::default())
    }

    pub fn with_config(handler: H, config: FilterConfig) -> Self {
        Self {
            handler,
            config,
            state: ParseState::default(),
            text: String::new(),
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn state(&self) -> &ParseState {
        &self.state
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

    fn classify(&self, name: &ElementName) -> Option<GmlElement> {
        if self.config.namespace_aware && name.namespace != GML_NAMESPACE {
            None
        } else {
            GmlElement::from_local_name(name.local)
        }
    }

    /// Performs the `action` of a transition. Forwarding is left to the
    /// caller since it depends on the event.
    fn perform(&mut self, action: Action, attrs: &Attributes) -> Result<(), Error> {
        match action {
            Action::Forward | Action::Consume => Ok(()),
            Action::GeometryStart(kind) => self.handler.geometry_start(kind, attrs),
            Action::GeometryEnd(kind) => self.handler.geometry_end(kind),
            Action::GeometrySub(boundary) => self.handler.geometry_sub(boundary),
            Action::CloseCoordinates => {
                let text = std::mem::take(&mut self.text);
                for coordinate in self.config.delimiters.tuples(&text) {
                    self.handler.coordinate(coordinate?)?;
                }
                Ok(())
            }
            Action::CloseAxis(axis) => {
                let text = std::mem::take(&mut self.text);
                if !text.trim().is_empty() {
                    let value = self.config.delimiters.value(&text, axis.local_name())?;
                    self.state = self.state.store(axis, value);
                }
                Ok(())
            }
            Action::CloseCoord(pending) => self.close_coord(pending),
        }
    }

    fn close_coord(&mut self, pending: PendingCoordinate) -> Result<(), Error> {
        match (pending.complete(), self.config.coordinate_policy) {
            (Some(coordinate), _) => self.handler.coordinate(coordinate),
            (None, CoordinatePolicy::Lenient) => {
                debug!("dropping incomplete coord element: {pending:?}");
                Ok(())
            }
            (None, CoordinatePolicy::Strict) => Err(Error::IncompleteCoordinate {
                x: pending.x.is_some(),
                y: pending.y.is_some(),
                z: pending.z.is_some(),
            }),
        }
    }
}

impl<H: GeometryHandler> ContentHandler for GeometryFilter<H> {
    fn start_element(&mut self, name: &ElementName, attrs: &Attributes) -> Result<(), Error> {
        let (state, action) = self.state.on_start(self.classify(name));
        self.state = state;

        match action {
            Action::Forward => self.handler.start_element(name, attrs),
            action => self.perform(action, attrs),
        }
    }

    fn characters(&mut self, text: &str) -> Result<(), Error> {
        match self.state.text_target() {
            TextTarget::Forward => self.handler.characters(text),
            TextTarget::Tuples | TextTarget::Axis(_) => {
                self.text.push_str(text);
                Ok(())
            }
            TextTarget::Ignore => Ok(()),
        }
    }

    fn end_element(&mut self, name: &ElementName) -> Result<(), Error> {
        let (state, action) = self.state.on_end(self.classify(name));
        self.state = state;

        match action {
            Action::Forward => self.handler.end_element(name),
            action => self.perform(action, &Attributes::new()),
        }
    }
}
