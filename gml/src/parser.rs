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

use std::collections::VecDeque;

use geo_types::Geometry;

use crate::config::FilterConfig;
use crate::error::Error;
use crate::feature::{ElementRoles, Feature, FeatureFilter};
use crate::filter::GeometryFilter;
use crate::geometry::GeometryAssembler;
use crate::handler::{ContentHandler, FeatureHandler, GeometrySink};
use crate::reader::EventReader;

/// Streaming iterator over the features of a GML document.
///
/// Yields one [`Feature`] at a time as its member element closes. The first
/// error ends the iteration.
///
/// # Examples
///
/// ```
/// use gml::{Features, Value};
///
/// let xml = br#"
///   <gml:FeatureCollection
///     xmlns:gml="http://www.opengis.net/gml"
///     xmlns:roads="http://example.com/roads">
///     <gml:featureMember>
///       <roads:Road fid="road.1">
///         <roads:name>Main Street</roads:name>
///         <roads:centerLine>
///           <gml:LineString>
///             <gml:coordinates>0,0 10,0 10,5</gml:coordinates>
///           </gml:LineString>
///         </roads:centerLine>
///       </roads:Road>
///     </gml:featureMember>
///   </gml:FeatureCollection>"#;
///
/// let features: Vec<_> = Features::new(&xml[..])
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(features.len(), 1);
/// assert_eq!(features[0].type_name(), "Road");
/// assert_eq!(features[0].get("name"), Some(&Value::String("Main Street".into())));
/// assert!(features[0].geometry().is_some());
/// ```
pub struct Features<'a> {
    reader: EventReader<'a>,
    chain: GeometryFilter<GeometryAssembler<FeatureFilter<Queue>>>,
    done: bool,
}

#[derive(Default)]
struct Queue {
    features: VecDeque<Feature>,
}

impl ContentHandler for Queue {}

impl FeatureHandler for Queue {
    fn feature(&mut self, feature: Feature) -> Result<(), Error> {
        self.features.push_back(feature);
        Ok(())
    }
}

impl<'a> Features<'a> {
    /// Creates a new `Features` iterator from a byte slice with the default
    /// configuration and GML 2 element roles.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, FilterConfig::default(), ElementRoles::default())
    }

    pub fn with_config(data: &'a [u8], config: FilterConfig, roles: ElementRoles) -> Self {
        let features = FeatureFilter::with_roles(Queue::default(), roles);
        Self {
            reader: EventReader::new(data),
            chain: GeometryFilter::with_config(GeometryAssembler::new(features), config),
            done: false,
        }
    }

    fn queue(&mut self) -> &mut Queue {
        self.chain.handler_mut().sink_mut().handler_mut()
    }
}

impl Iterator for Features<'_> {
    type Item = Result<Feature, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(feature) = self.queue().features.pop_front() {
                return Some(Ok(feature));
            }
            if self.done {
                return None;
            }

            match self.reader.step(&mut self.chain) {
                Ok(true) => continue,
                Ok(false) => self.done = true,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Features<'_> {}

/// Reads all features of a GML document.
pub fn read_features(data: &[u8]) -> Result<Vec<Feature>, Error> {
    Features::new(data).collect()
}

#[derive(Default)]
struct Geometries(Vec<Geometry<f64>>);

impl ContentHandler for Geometries {}

impl GeometrySink for Geometries {
    fn geometry(&mut self, geometry: Geometry<f64>) -> Result<(), Error> {
        self.0.push(geometry);
        Ok(())
    }
}

/// Reads all outermost geometries of a GML document, regardless of whether
/// they are part of a feature.
///
/// # Examples
///
/// ```
/// use geo_types::{point, Geometry};
///
/// let xml = br#"
///   <gml:Point xmlns:gml="http://www.opengis.net/gml">
///     <gml:coord><gml:X>1.0</gml:X><gml:Y>2.0</gml:Y></gml:coord>
///   </gml:Point>"#;
///
/// let geometries = gml::read_geometries(xml, gml::FilterConfig::default())?;
/// assert_eq!(geometries, vec![Geometry::Point(point!(x: 1.0, y: 2.0))]);
/// # Ok::<(), gml::Error>(())
/// ```
pub fn read_geometries(data: &[u8], config: FilterConfig) -> Result<Vec<Geometry<f64>>, Error> {
    let assembler = GeometryAssembler::new(Geometries::default());
    let mut filter = GeometryFilter::with_config(assembler, config);
    crate::reader::parse(data, &mut filter)?;
    Ok(filter.into_inner().into_inner().0)
}
