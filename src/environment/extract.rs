// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dot-path extraction over [`Attributes`].
//!
//! ```text
//! "location.short"
//!   server.attribute("location") --> Nested(location)
//!   location.attribute("short")  --> Scalar("us.nyc")
//!
//! missing / null / scalar-in-the-middle / object-at-the-end --> None
//! ```

use std::borrow::Cow;

use crate::model::{Attr, Attributes};

/// Extracts the value at `path` from `entity`.
///
/// Never fails: any miss along the way yields `None`.
#[must_use]
pub fn extract(entity: &dyn Attributes, path: &str) -> Option<String> {
    walk(entity, path.split('.'))
}

fn walk<'p>(entity: &dyn Attributes, segments: impl IntoIterator<Item = &'p str>) -> Option<String> {
    let mut segments = segments.into_iter();
    let mut current = entity.attribute(segments.next()?)?;

    for segment in segments {
        current = match current {
            Attr::Nested(object) => object.attribute(segment)?,
            Attr::Scalar(_) => return None,
        };
    }

    match current {
        Attr::Scalar(value) => Some(value.into_owned()),
        Attr::Nested(_) => None,
    }
}

/// A validated, dot-delimited attribute path such as `location.short`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributePath(Cow<'static, str>);

impl AttributePath {
    /// Parses a path, rejecting empty paths and empty segments.
    ///
    /// # Errors
    ///
    /// Returns a short description of the problem.
    pub fn parse(path: impl Into<String>) -> std::result::Result<Self, &'static str> {
        let path = path.into();
        check(path.as_bytes())?;
        Ok(Self(Cow::Owned(path)))
    }

    /// Builds a path from a literal, validated at compile time when used in
    /// a `const`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is empty or has an empty segment.
    #[must_use]
    pub const fn from_static(path: &'static str) -> Self {
        assert!(check(path.as_bytes()).is_ok(), "invalid attribute path");
        Self(Cow::Borrowed(path))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Extracts this path from `entity`.
    #[must_use]
    pub fn extract(&self, entity: &dyn Attributes) -> Option<String> {
        walk(entity, self.segments())
    }
}

const fn check(path: &[u8]) -> std::result::Result<(), &'static str> {
    if path.is_empty() {
        return Err("path is empty");
    }
    let mut i = 0;
    let mut segment_start = true;
    while i < path.len() {
        if path[i] == b'.' {
            if segment_start {
                return Err("path contains an empty segment");
            }
            segment_start = true;
        } else {
            segment_start = false;
        }
        i += 1;
    }
    if segment_start {
        return Err("path contains an empty segment");
    }
    Ok(())
}

impl std::fmt::Display for AttributePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for AttributePath {
    type Err = &'static str;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}
