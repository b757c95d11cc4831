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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coordinates::{CoordinatePolicy, Delimiters};

/// Settings of a [`GeometryFilter`](crate::GeometryFilter).
///
/// # Examples
///
/// ```
/// use gml::{CoordinatePolicy, FilterConfig};
///
/// let config = FilterConfig::default()
///     .with_coordinate_policy(CoordinatePolicy::Strict)
///     .with_namespace_aware(false);
///
/// assert!(!config.namespace_aware);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterConfig {
    pub delimiters: Delimiters,
    pub coordinate_policy: CoordinatePolicy,
    /// Only interpret elements in the GML namespace. If `false`, GML elements
    /// are recognized by their local name in any namespace.
    pub namespace_aware: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            coordinate_policy: CoordinatePolicy::default(),
            namespace_aware: true,
        }
    }
}

impl FilterConfig {
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn with_coordinate_policy(mut self, policy: CoordinatePolicy) -> Self {
        self.coordinate_policy = policy;
        self
    }

    pub fn with_namespace_aware(mut self, namespace_aware: bool) -> Self {
        self.namespace_aware = namespace_aware;
        self
    }
}
