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

//! Decoding of the two GML 2 coordinate notations.
//!
//! A `coordinates` element holds delimited text like `1.0,2.0 3.0,4.0` where
//! tuples are separated by whitespace and the components of a tuple by a
//! comma. A `coord` element holds one `X`, `Y` and optional `Z` element per
//! coordinate. All three delimiters can be configured with [`Delimiters`].

use std::borrow::Cow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A decoded coordinate with an optional z value.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Coordinate {
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }
}

impl From<Coordinate> for geo_types::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo_types::Coord { x: c.x, y: c.y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.z {
            Some(z) => write!(f, "({}, {}, {z})", self.x, self.y),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// A separator between tuples or between the components of a tuple.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Separator {
    /// Any run of whitespace.
    Whitespace,
    Char(char),
}

impl Separator {
    fn matches(&self, c: char) -> bool {
        match self {
            Self::Whitespace => c.is_whitespace(),
            Self::Char(s) => *s == c,
        }
    }

    /// Whether some character is matched by both separators.
    fn overlaps(self, other: Self) -> bool {
        match (self, other) {
            (Self::Char(c), other) | (other, Self::Char(c)) => other.matches(c),
            (Self::Whitespace, Self::Whitespace) => true,
        }
    }

    /// Splits the `text` into trimmed, non-empty tokens.
    fn split<'a>(self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        text.split(move |c: char| self.matches(c))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whitespace => write!(f, "whitespace"),
            Self::Char(c) => write!(f, "'{c}'"),
        }
    }
}

/// The coordinate, tuple and decimal separators used to read `coordinates`
/// text.
///
/// # Examples
///
/// Reading coordinates written with a decimal comma:
///
/// ```
/// use gml::{Coordinate, Delimiters, Separator};
///
/// let delimiters = Delimiters::new(Separator::Whitespace, Separator::Char(';'), ',')?;
/// let coords = delimiters
///     .tuples("1,5 2,5;3,5 4,5")
///     .collect::<Result<Vec<_>, _>>()?;
///
/// assert_eq!(coords, vec![Coordinate::xy(1.5, 2.5), Coordinate::xy(3.5, 4.5)]);
/// # Ok::<(), gml::Error>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "DelimitersRepr", into = "DelimitersRepr")
)]
pub struct Delimiters {
    coordinate: Separator,
    tuple: Separator,
    decimal: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            coordinate: Separator::Char(','),
            tuple: Separator::Whitespace,
            decimal: '.',
        }
    }
}

impl Delimiters {
    /// Creates delimiters after checking that no two of them can be confused.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDelimiters`] if a character is matched by both
    /// the coordinate and tuple separators (e.g. `' '` and whitespace), or if
    /// the decimal separator is matched by either of them.
    pub fn new(coordinate: Separator, tuple: Separator, decimal: char) -> Result<Self, Error> {
        if coordinate.overlaps(tuple) || coordinate.matches(decimal) || tuple.matches(decimal) {
            return Err(Error::InvalidDelimiters {
                coordinate: coordinate.to_string(),
                tuple: tuple.to_string(),
                decimal,
            });
        }

        Ok(Self {
            coordinate,
            tuple,
            decimal,
        })
    }

    pub fn with_coordinate_separator(self, coordinate: Separator) -> Result<Self, Error> {
        Self::new(coordinate, self.tuple, self.decimal)
    }

    pub fn with_tuple_separator(self, tuple: Separator) -> Result<Self, Error> {
        Self::new(self.coordinate, tuple, self.decimal)
    }

    pub fn with_decimal_separator(self, decimal: char) -> Result<Self, Error> {
        Self::new(self.coordinate, self.tuple, decimal)
    }

    pub fn coordinate(&self) -> Separator {
        self.coordinate
    }

    pub fn tuple(&self) -> Separator {
        self.tuple
    }

    pub fn decimal(&self) -> char {
        self.decimal
    }

    /// Decodes the tuples of `coordinates` text, one coordinate per tuple in
    /// the order they appear.
    ///
    /// A tuple needs an x and y component; a third component is read as z and
    /// any further components are ignored.
    pub fn tuples<'a>(
        self,
        text: &'a str,
    ) -> impl Iterator<Item = Result<Coordinate, Error>> + 'a {
        self.tuple.split(text).map(move |tuple| self.parse_tuple(tuple))
    }

    fn parse_tuple(&self, tuple: &str) -> Result<Coordinate, Error> {
        let mut components = self.coordinate.split(tuple);
        let mut next = |required: bool| -> Result<Option<f64>, Error> {
            match components.next() {
                Some(token) => self.parse_number(token).map(Some).map_err(|_| {
                    Error::MalformedNumber {
                        text: tuple.to_string(),
                        context: "coordinates",
                    }
                }),
                None if required => Err(Error::MissingOrdinate {
                    tuple: tuple.to_string(),
                }),
                None => Ok(None),
            }
        };

        let x = next(true)?.unwrap_or_default();
        let y = next(true)?.unwrap_or_default();
        let z = next(false)?;

        Ok(Coordinate { x, y, z })
    }

    /// Decodes the text of an `X`, `Y` or `Z` element.
    pub fn value(&self, text: &str, context: &'static str) -> Result<f64, Error> {
        self.parse_number(text.trim())
            .map_err(|_| Error::MalformedNumber {
                text: text.trim().to_string(),
                context,
            })
    }

    fn parse_number(&self, token: &str) -> Result<f64, std::num::ParseFloatError> {
        let token = if self.decimal == '.' {
            Cow::Borrowed(token)
        } else {
            Cow::Owned(token.replace(self.decimal, "."))
        };
        token.parse()
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct DelimitersRepr {
    coordinate: Separator,
    tuple: Separator,
    decimal: char,
}

#[cfg(feature = "serde")]
impl TryFrom<DelimitersRepr> for Delimiters {
    type Error = Error;

    fn try_from(repr: DelimitersRepr) -> Result<Self, Self::Error> {
        Self::new(repr.coordinate, repr.tuple, repr.decimal)
    }
}

#[cfg(feature = "serde")]
impl From<Delimiters> for DelimitersRepr {
    fn from(d: Delimiters) -> Self {
        Self {
            coordinate: d.coordinate,
            tuple: d.tuple,
            decimal: d.decimal,
        }
    }
}

/// What to do with a `coord` element that closes without a complete
/// coordinate (e.g. only an `X` child).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoordinatePolicy {
    /// Drop the coordinate and continue.
    #[default]
    Lenient,
    /// Fail with [`Error::IncompleteCoordinate`].
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(delimiters: &Delimiters, text: &str) -> Result<Vec<Coordinate>, Error> {
        delimiters.tuples(text).collect()
    }

    #[test]
    fn decode_2d_tuples() {
        let coords = decode(&Delimiters::default(), "1.0,2.0 3.0,4.0  5,6").unwrap();
        assert_eq!(
            coords,
            vec![
                Coordinate::xy(1.0, 2.0),
                Coordinate::xy(3.0, 4.0),
                Coordinate::xy(5.0, 6.0)
            ]
        );
    }

    #[test]
    fn decode_3d_tuples() {
        let coords = decode(&Delimiters::default(), "1,2,3\n4,5,6").unwrap();
        assert_eq!(
            coords,
            vec![Coordinate::xyz(1.0, 2.0, 3.0), Coordinate::xyz(4.0, 5.0, 6.0)]
        );
    }

    #[test]
    fn components_are_trimmed() {
        let delimiters = Delimiters::default()
            .with_tuple_separator(Separator::Char(';'))
            .unwrap();
        let coords = decode(&delimiters, " 1.5 , 2.5 ; 3 , 4 ").unwrap();
        assert_eq!(coords, vec![Coordinate::xy(1.5, 2.5), Coordinate::xy(3.0, 4.0)]);
    }

    #[test]
    fn extra_components_are_ignored() {
        let coords = decode(&Delimiters::default(), "1,2,3,4").unwrap();
        assert_eq!(coords, vec![Coordinate::xyz(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn round_trip_generated_text() {
        let pairs: Vec<(f64, f64)> = (0..50)
            .map(|i| {
                let i = i as f64;
                (i * 0.123456789 - 3.0, -i * 17.5 + 0.000001)
            })
            .collect();
        let text = pairs
            .iter()
            .map(|(x, y)| format!("{x},{y}"))
            .collect::<Vec<_>>()
            .join(" ");

        let coords = decode(&Delimiters::default(), &text).unwrap();
        assert_eq!(coords.len(), pairs.len());
        for (c, (x, y)) in coords.iter().zip(&pairs) {
            assert_eq!(c.x, *x);
            assert_eq!(c.y, *y);
            assert_eq!(c.z, None);
        }
    }

    #[test]
    fn decimal_comma() {
        let delimiters =
            Delimiters::new(Separator::Whitespace, Separator::Char(';'), ',').unwrap();
        assert_eq!(
            decode(&delimiters, "1,5 2,5").unwrap(),
            vec![Coordinate::xy(1.5, 2.5)]
        );
        assert_eq!(delimiters.value(" -0,25 ", "X").unwrap(), -0.25);
    }

    #[test]
    fn decimal_separator_must_not_collide() {
        assert!(matches!(
            Delimiters::default().with_decimal_separator(','),
            Err(Error::InvalidDelimiters { decimal: ',', .. })
        ));
        assert!(Delimiters::new(Separator::Whitespace, Separator::Whitespace, '.').is_err());
        assert!(Delimiters::new(Separator::Char(';'), Separator::Whitespace, ' ').is_err());
    }

    #[test]
    fn separators_must_not_overlap() {
        assert!(Delimiters::new(Separator::Char(' '), Separator::Whitespace, '.').is_err());
        assert!(Delimiters::new(Separator::Whitespace, Separator::Char('\n'), '.').is_err());
        assert!(Delimiters::new(Separator::Char(';'), Separator::Char(';'), '.').is_err());
        assert!(matches!(
            Delimiters::default().with_coordinate_separator(Separator::Char('\t')),
            Err(Error::InvalidDelimiters { .. })
        ));
        assert!(Delimiters::new(Separator::Char(' '), Separator::Char(';'), '.').is_ok());
    }

    #[test]
    fn missing_ordinate() {
        let err = decode(&Delimiters::default(), "1.0,2.0 3.0").unwrap_err();
        assert_eq!(
            err,
            Error::MissingOrdinate {
                tuple: "3.0".to_string()
            }
        );
    }

    #[test]
    fn malformed_number_names_the_tuple() {
        let err = decode(&Delimiters::default(), "1.0,2.0 3.0,abc").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedNumber {
                text: "3.0,abc".to_string(),
                context: "coordinates",
            }
        );
    }

    #[test]
    fn malformed_single_value() {
        let err = Delimiters::default().value("1.2.3", "Y").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedNumber {
                text: "1.2.3".to_string(),
                context: "Y",
            }
        );
    }

    #[test]
    fn coordinates_before_an_error_are_still_yielded() {
        let mut tuples = Delimiters::default().tuples("1,2 x,y 3,4");
        assert_eq!(tuples.next(), Some(Ok(Coordinate::xy(1.0, 2.0))));
        assert!(matches!(tuples.next(), Some(Err(Error::MalformedNumber { .. }))));
    }

    #[test]
    fn tuples_outlive_the_delimiters() {
        let mut tuples = {
            let delimiters = Delimiters::default();
            delimiters.tuples("1,2 x,y 3,4")
        };
        assert_eq!(tuples.next(), Some(Ok(Coordinate::xy(1.0, 2.0))));
        assert!(matches!(tuples.next(), Some(Err(Error::MalformedNumber { .. }))));
        assert_eq!(tuples.next(), Some(Ok(Coordinate::xy(3.0, 4.0))));
        assert_eq!(tuples.next(), None);
    }
}
