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

//! Streaming GML 2 geometry and feature parser.
//!
//! This crate reads GML 2 documents as a stream of XML events and turns them
//! into geometry callbacks, [`geo_types`] geometries and flat feature
//! records. It understands both legacy coordinate notations: `coord`
//! elements with nested `X`, `Y` and `Z` children, and `coordinates`
//! elements holding delimited text.
//!
//! The parser is a chain of filters, each consuming the callbacks of the
//! previous one:
//!
//! 1. [`reader`] pushes the markup events of a document into a
//!    [`ContentHandler`].
//! 2. [`GeometryFilter`] recognizes geometry and coordinate elements and
//!    calls a [`GeometryHandler`].
//! 3. [`GeometryAssembler`] builds geometries and passes them to a
//!    [`GeometrySink`].
//! 4. [`FeatureFilter`] collects attributes and geometries into [`Feature`]s
//!    for a [`FeatureHandler`].
//!
//! Each stage can be used on its own by implementing the handler trait of its
//! consumer.
//!
//! # Examples
//!
//! Most of the time the [`Features`] iterator is all you need:
//!
//! ```
//! use gml::Features;
//!
//! let xml = br#"
//!   <gml:FeatureCollection xmlns:gml="http://www.opengis.net/gml">
//!     <gml:featureMember>
//!       <Lake fid="lake.1">
//!         <name>Blue Lake</name>
//!         <depth>12.5</depth>
//!         <gml:Polygon>
//!           <gml:outerBoundaryIs>
//!             <gml:LinearRing>
//!               <gml:coordinates>0,0 4,0 4,3 0,0</gml:coordinates>
//!             </gml:LinearRing>
//!           </gml:outerBoundaryIs>
//!         </gml:Polygon>
//!       </Lake>
//!     </gml:featureMember>
//!   </gml:FeatureCollection>"#;
//!
//! for feature in Features::new(&xml[..]) {
//!     let feature = feature?;
//!     println!("{} {:?}", feature.type_name(), feature.get("name"));
//! }
//! # Ok::<(), gml::Error>(())
//! ```

mod config;
mod coordinates;
mod error;
mod event;
mod feature;
mod filter;
mod geometry;
mod handler;
mod parser;
pub mod reader;
mod state;

pub use config::FilterConfig;
pub use coordinates::{Coordinate, CoordinatePolicy, Delimiters, Separator};
pub use error::{Error, SchemaError};
pub use event::{Attribute, Attributes, ElementName};
pub use feature::{
    AttributeDescriptor, AttributeType, ElementRole, ElementRoles, Feature, FeatureFilter,
    FeatureState, FeatureType, Value,
};
pub use filter::GeometryFilter;
pub use geometry::GeometryAssembler;
pub use handler::{ContentHandler, FeatureHandler, GeometryHandler, GeometrySink};
pub use parser::{read_features, read_geometries, Features};
pub use state::{
    Action, Axis, Boundary, GeometryKind, GmlElement, InnerState, OuterState, ParseState,
    PendingCoordinate, TextTarget, GML_NAMESPACE,
};
