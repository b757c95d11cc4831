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

use geo_types::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon, Rect,
};
use log::debug;

use crate::coordinates::Coordinate;
use crate::error::Error;
use crate::event::{Attributes, ElementName};
use crate::handler::{ContentHandler, GeometryHandler, GeometrySink};
use crate::state::{Boundary, GeometryKind};

/// Builds [`geo_types`] geometries from geometry callbacks.
///
/// Nested geometries (the rings of a polygon, the members of a multi
/// geometry) are collected into their parent. Once the outermost geometry
/// ends, it is passed to the [`GeometrySink`]. All other events are passed
/// through.
///
/// Z values are dropped since [`geo_types`] geometries are planar.
pub struct GeometryAssembler<S> {
    sink: S,
    stack: Vec<Frame>,
}

struct Frame {
    kind: GeometryKind,
    shape: Shape,
}

enum Shape {
    Coords(Vec<Coord<f64>>),
    Polygon {
        boundary: Option<Boundary>,
        exterior: Option<LineString<f64>>,
        interiors: Vec<LineString<f64>>,
    },
    MultiPoint(Vec<Point<f64>>),
    MultiLineString(Vec<LineString<f64>>),
    MultiPolygon(Vec<Polygon<f64>>),
    Collection(Vec<Geometry<f64>>),
}

fn invalid(kind: GeometryKind, reason: impl Into<String>) -> Error {
    Error::InvalidGeometry {
        kind,
        reason: reason.into(),
    }
}

impl Frame {
    fn new(kind: GeometryKind) -> Self {
        let shape = match kind {
            GeometryKind::Point
            | GeometryKind::LineString
            | GeometryKind::LinearRing
            | GeometryKind::Box => Shape::Coords(Vec::new()),
            GeometryKind::Polygon => Shape::Polygon {
                boundary: None,
                exterior: None,
                interiors: Vec::new(),
            },
            GeometryKind::MultiPoint => Shape::MultiPoint(Vec::new()),
            GeometryKind::MultiLineString => Shape::MultiLineString(Vec::new()),
            GeometryKind::MultiPolygon => Shape::MultiPolygon(Vec::new()),
            GeometryKind::GeometryCollection => Shape::Collection(Vec::new()),
        };
        Self { kind, shape }
    }

    fn push(&mut self, coordinate: Coordinate) -> Result<(), Error> {
        match &mut self.shape {
            Shape::Coords(coords) => {
                coords.push(coordinate.into());
                Ok(())
            }
            _ => Err(invalid(
                self.kind,
                format!("coordinate {coordinate} outside of a ring or member"),
            )),
        }
    }

    fn toggle(&mut self, next: Boundary) -> Result<(), Error> {
        match &mut self.shape {
            // the boundary callback fires on start and end of the element
            Shape::Polygon { boundary, .. } => {
                *boundary = match *boundary {
                    Some(current) if current == next => None,
                    _ => Some(next),
                };
                Ok(())
            }
            _ => Err(invalid(
                self.kind,
                format!("{} outside of a polygon", next.local_name()),
            )),
        }
    }

    fn attach(&mut self, child_kind: GeometryKind, child: Geometry<f64>) -> Result<(), Error> {
        match (&mut self.shape, child) {
            (
                Shape::Polygon {
                    boundary,
                    exterior,
                    interiors,
                },
                Geometry::LineString(ring),
            ) if child_kind == GeometryKind::LinearRing => match boundary {
                Some(Boundary::Outer) if exterior.is_none() => {
                    *exterior = Some(ring);
                    Ok(())
                }
                Some(Boundary::Outer) => Err(invalid(self.kind, "more than one outer boundary")),
                Some(Boundary::Inner) => {
                    interiors.push(ring);
                    Ok(())
                }
                None => Err(invalid(self.kind, "ring outside of a boundary")),
            },
            (Shape::MultiPoint(points), Geometry::Point(point)) => {
                points.push(point);
                Ok(())
            }
            (Shape::MultiLineString(lines), Geometry::LineString(line))
                if child_kind == GeometryKind::LineString =>
            {
                lines.push(line);
                Ok(())
            }
            (Shape::MultiPolygon(polygons), Geometry::Polygon(polygon)) => {
                polygons.push(polygon);
                Ok(())
            }
            (Shape::Collection(geometries), geometry) => {
                geometries.push(geometry);
                Ok(())
            }
            _ => Err(invalid(self.kind, format!("can't contain a {child_kind}"))),
        }
    }

    fn finish(self) -> Result<Geometry<f64>, Error> {
        let kind = self.kind;
        match self.shape {
            Shape::Coords(coords) => finish_coords(kind, coords),
            Shape::Polygon {
                exterior: Some(exterior),
                interiors,
                ..
            } => Ok(Geometry::Polygon(Polygon::new(exterior, interiors))),
            Shape::Polygon { exterior: None, .. } => Err(invalid(kind, "missing outer boundary")),
            Shape::MultiPoint(points) => Ok(Geometry::MultiPoint(MultiPoint::new(points))),
            Shape::MultiLineString(lines) => {
                Ok(Geometry::MultiLineString(MultiLineString::new(lines)))
            }
            Shape::MultiPolygon(polygons) => {
                Ok(Geometry::MultiPolygon(MultiPolygon::new(polygons)))
            }
            Shape::Collection(geometries) => Ok(Geometry::GeometryCollection(
                GeometryCollection::new_from(geometries),
            )),
        }
    }
}

fn finish_coords(kind: GeometryKind, coords: Vec<Coord<f64>>) -> Result<Geometry<f64>, Error> {
    let n = coords.len();
    match kind {
        GeometryKind::Point if n == 1 => Ok(Geometry::Point(Point(coords[0]))),
        GeometryKind::Point => Err(invalid(kind, format!("expected 1 coordinate, found {n}"))),
        GeometryKind::LineString if n >= 2 => Ok(Geometry::LineString(LineString::new(coords))),
        GeometryKind::LineString => {
            Err(invalid(kind, format!("expected at least 2 coordinates, found {n}")))
        }
        GeometryKind::LinearRing if n < 4 => {
            Err(invalid(kind, format!("expected at least 4 coordinates, found {n}")))
        }
        GeometryKind::LinearRing if coords[0] != coords[n - 1] => {
            Err(invalid(kind, "first and last coordinate differ"))
        }
        GeometryKind::LinearRing => Ok(Geometry::LineString(LineString::new(coords))),
        GeometryKind::Box if n == 2 => Ok(Geometry::Rect(Rect::new(coords[0], coords[1]))),
        GeometryKind::Box => Err(invalid(kind, format!("expected 2 coordinates, found {n}"))),
        _ => Err(invalid(kind, "has no coordinates of its own")),
    }
}

impl<S: GeometrySink> GeometryAssembler<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            stack: Vec::new(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Returns the number of geometries currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl<S: GeometrySink> ContentHandler for GeometryAssembler<S> {
    fn start_element(&mut self, name: &ElementName, attrs: &Attributes) -> Result<(), Error> {
        self.sink.start_element(name, attrs)
    }

    fn characters(&mut self, text: &str) -> Result<(), Error> {
        self.sink.characters(text)
    }

    fn end_element(&mut self, name: &ElementName) -> Result<(), Error> {
        self.sink.end_element(name)
    }
}

impl<S: GeometrySink> GeometryHandler for GeometryAssembler<S> {
    fn geometry_start(&mut self, kind: GeometryKind, _attrs: &Attributes) -> Result<(), Error> {
        self.stack.push(Frame::new(kind));
        Ok(())
    }

    fn geometry_end(&mut self, kind: GeometryKind) -> Result<(), Error> {
        let frame = match self.stack.pop() {
            Some(frame) if frame.kind == kind => frame,
            Some(frame) => {
                return Err(invalid(
                    frame.kind,
                    format!("closed by the end of a {kind}"),
                ))
            }
            None => return Err(invalid(kind, "ends without being started")),
        };

        let geometry = frame.finish()?;
        match self.stack.last_mut() {
            Some(parent) => parent.attach(kind, geometry),
            None => self.sink.geometry(geometry),
        }
    }

    fn geometry_sub(&mut self, boundary: Boundary) -> Result<(), Error> {
        match self.stack.last_mut() {
            Some(frame) => frame.toggle(boundary),
            None => {
                debug!("ignoring {} outside of a geometry", boundary.local_name());
                Ok(())
            }
        }
    }

    fn coordinate(&mut self, coordinate: Coordinate) -> Result<(), Error> {
        match self.stack.last_mut() {
            Some(frame) => frame.push(coordinate),
            None => {
                debug!("ignoring coordinate {coordinate} outside of a geometry");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{coord, line_string, point, polygon};

    #[derive(Default)]
    struct Geometries {
        geometries: Vec<Geometry<f64>>,
        passed: Vec<String>,
    }

    impl ContentHandler for Geometries {
        fn start_element(&mut self, name: &ElementName, _: &Attributes) -> Result<(), Error> {
            self.passed.push(format!("<{}", name.local));
            Ok(())
        }

        fn end_element(&mut self, name: &ElementName) -> Result<(), Error> {
            self.passed.push(format!(">{}", name.local));
            Ok(())
        }
    }

    impl GeometrySink for Geometries {
        fn geometry(&mut self, geometry: Geometry<f64>) -> Result<(), Error> {
            self.geometries.push(geometry);
            Ok(())
        }
    }

    fn assembler() -> GeometryAssembler<Geometries> {
        GeometryAssembler::new(Geometries::default())
    }

    fn ring(a: &mut GeometryAssembler<Geometries>, coords: &[(f64, f64)]) -> Result<(), Error> {
        a.geometry_start(GeometryKind::LinearRing, &Attributes::new())?;
        for (x, y) in coords {
            a.coordinate(Coordinate::xy(*x, *y))?;
        }
        a.geometry_end(GeometryKind::LinearRing)
    }

    #[test]
    fn point() {
        let mut a = assembler();
        a.geometry_start(GeometryKind::Point, &Attributes::new()).unwrap();
        a.coordinate(Coordinate::xyz(1.0, 2.0, 3.0)).unwrap();
        a.geometry_end(GeometryKind::Point).unwrap();

        assert_eq!(a.depth(), 0);
        assert_eq!(a.into_inner().geometries, vec![Geometry::Point(point!(x: 1.0, y: 2.0))]);
    }

    #[test]
    fn polygon_with_hole() {
        let mut a = assembler();
        a.geometry_start(GeometryKind::Polygon, &Attributes::new()).unwrap();
        a.geometry_sub(Boundary::Outer).unwrap();
        ring(&mut a, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]).unwrap();
        a.geometry_sub(Boundary::Outer).unwrap();
        a.geometry_sub(Boundary::Inner).unwrap();
        ring(&mut a, &[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 1.0)]).unwrap();
        a.geometry_sub(Boundary::Inner).unwrap();
        a.geometry_end(GeometryKind::Polygon).unwrap();

        let expected = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 0.0)],
            interiors: [[(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 2.0), (x: 1.0, y: 1.0)]],
        );
        assert_eq!(a.into_inner().geometries, vec![Geometry::Polygon(expected)]);
    }

    #[test]
    fn ring_outside_boundary() {
        let mut a = assembler();
        a.geometry_start(GeometryKind::Polygon, &Attributes::new()).unwrap();
        let err = ring(&mut a, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidGeometry {
                kind: GeometryKind::Polygon,
                ..
            }
        ));
    }

    #[test]
    fn unclosed_ring() {
        let mut a = assembler();
        let err = ring(&mut a, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidGeometry {
                kind: GeometryKind::LinearRing,
                reason: "first and last coordinate differ".to_string(),
            }
        );
    }

    #[test]
    fn multi_line_string_passes_member_elements() {
        let mut a = assembler();
        let member = ElementName::new(crate::GML_NAMESPACE, "lineStringMember", "gml:lineStringMember");

        a.geometry_start(GeometryKind::MultiLineString, &Attributes::new()).unwrap();
        for offset in [0.0, 5.0] {
            a.start_element(&member, &Attributes::new()).unwrap();
            a.geometry_start(GeometryKind::LineString, &Attributes::new()).unwrap();
            a.coordinate(Coordinate::xy(offset, 0.0)).unwrap();
            a.coordinate(Coordinate::xy(offset, 1.0)).unwrap();
            a.geometry_end(GeometryKind::LineString).unwrap();
            a.end_element(&member).unwrap();
        }
        a.geometry_end(GeometryKind::MultiLineString).unwrap();

        let sink = a.into_inner();
        assert_eq!(
            sink.geometries,
            vec![Geometry::MultiLineString(MultiLineString::new(vec![
                line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 1.0)],
                line_string![(x: 5.0, y: 0.0), (x: 5.0, y: 1.0)],
            ]))]
        );
        assert_eq!(
            sink.passed,
            vec![
                "<lineStringMember",
                ">lineStringMember",
                "<lineStringMember",
                ">lineStringMember"
            ]
        );
    }

    #[test]
    fn box_becomes_rect() {
        let mut a = assembler();
        a.geometry_start(GeometryKind::Box, &Attributes::new()).unwrap();
        a.coordinate(Coordinate::xy(0.0, 0.0)).unwrap();
        a.coordinate(Coordinate::xy(2.0, 3.0)).unwrap();
        a.geometry_end(GeometryKind::Box).unwrap();

        assert_eq!(
            a.into_inner().geometries,
            vec![Geometry::Rect(Rect::new(
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 2.0, y: 3.0 }
            ))]
        );
    }

    #[test]
    fn multi_point_rejects_line_strings() {
        let mut a = assembler();
        a.geometry_start(GeometryKind::MultiPoint, &Attributes::new()).unwrap();
        a.geometry_start(GeometryKind::LineString, &Attributes::new()).unwrap();
        a.coordinate(Coordinate::xy(0.0, 0.0)).unwrap();
        a.coordinate(Coordinate::xy(1.0, 1.0)).unwrap();
        let err = a.geometry_end(GeometryKind::LineString).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidGeometry {
                kind: GeometryKind::MultiPoint,
                ..
            }
        ));
    }

    #[test]
    fn collection_accepts_anything() {
        let mut a = assembler();
        a.geometry_start(GeometryKind::GeometryCollection, &Attributes::new()).unwrap();
        a.geometry_start(GeometryKind::Point, &Attributes::new()).unwrap();
        a.coordinate(Coordinate::xy(1.0, 1.0)).unwrap();
        a.geometry_end(GeometryKind::Point).unwrap();
        a.geometry_start(GeometryKind::LineString, &Attributes::new()).unwrap();
        a.coordinate(Coordinate::xy(0.0, 0.0)).unwrap();
        a.coordinate(Coordinate::xy(1.0, 1.0)).unwrap();
        a.geometry_end(GeometryKind::LineString).unwrap();
        a.geometry_end(GeometryKind::GeometryCollection).unwrap();

        match &a.into_inner().geometries[..] {
            [Geometry::GeometryCollection(gc)] => assert_eq!(gc.0.len(), 2),
            other => panic!("expected one collection, got {other:?}"),
        }
    }

    #[test]
    fn point_needs_exactly_one_coordinate() {
        let mut a = assembler();
        a.geometry_start(GeometryKind::Point, &Attributes::new()).unwrap();
        let err = a.geometry_end(GeometryKind::Point).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidGeometry {
                kind: GeometryKind::Point,
                reason: "expected 1 coordinate, found 0".to_string(),
            }
        );
    }

    #[test]
    fn mismatched_end() {
        let mut a = assembler();
        a.geometry_start(GeometryKind::Point, &Attributes::new()).unwrap();
        assert!(a.geometry_end(GeometryKind::LineString).is_err());
        assert!(assembler().geometry_end(GeometryKind::Point).is_err());
    }

    #[test]
    fn stray_coordinates_are_ignored() {
        let mut a = assembler();
        a.coordinate(Coordinate::xy(1.0, 1.0)).unwrap();
        a.geometry_sub(Boundary::Inner).unwrap();
        assert!(a.into_inner().geometries.is_empty());
    }
}
