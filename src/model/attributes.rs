// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Named attribute access over the server graph.
//!
//! ```text
//! Attributes::attribute(name) -> Option<Attr>
//!   Attr::Scalar("...")        leaf value, rendered as a string
//!   Attr::Nested(&dyn ..)      object that can be walked further
//!   None                       missing or null
//! ```

use serde_json::Value;
use std::borrow::Cow;

use super::{Allocation, Location, Server};

/// A single attribute value.
pub enum Attr<'a> {
    /// Leaf value rendered as a string.
    Scalar(Cow<'a, str>),
    /// Nested object.
    Nested(&'a dyn Attributes),
}

impl<'a> Attr<'a> {
    fn display(value: impl ToString) -> Self {
        Self::Scalar(Cow::Owned(value.to_string()))
    }

    fn text(value: &'a str) -> Self {
        Self::Scalar(Cow::Borrowed(value))
    }

    /// Wraps a JSON value; `null` is treated as absent.
    #[must_use]
    pub fn from_json(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::display(b)),
            Value::Number(n) => Some(Self::display(n)),
            Value::String(s) => Some(Self::text(s)),
            Value::Array(_) | Value::Object(_) => Some(Self::Nested(value)),
        }
    }
}

impl std::fmt::Debug for Attr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(s) => f.debug_tuple("Scalar").field(s).finish(),
            Self::Nested(_) => f.write_str("Nested(..)"),
        }
    }
}

/// Capability to look up a field by name.
pub trait Attributes {
    /// Returns the named field, or `None` if it is missing or null.
    fn attribute(&self, name: &str) -> Option<Attr<'_>>;
}

impl Attributes for Server {
    fn attribute(&self, name: &str) -> Option<Attr<'_>> {
        match name {
            "id" => self.id.map(Attr::display),
            "uuid" => self.uuid.as_deref().map(Attr::text),
            "uuid_short" | "uuidShort" => self.uuid_short.as_deref().map(Attr::text),
            "name" => self.name.as_deref().map(Attr::text),
            "description" => self.description.as_deref().map(Attr::text),
            "startup" => self.startup.as_deref().map(Attr::text),
            "image" => self.image.as_deref().map(Attr::text),
            "memory" => self.memory.map(Attr::display),
            "swap" => self.swap.map(Attr::display),
            "disk" => self.disk.map(Attr::display),
            "io" => self.io.map(Attr::display),
            "cpu" => self.cpu.map(Attr::display),
            "allocation_limit" => self.allocation_limit.map(Attr::display),
            "database_limit" => self.database_limit.map(Attr::display),
            "location" => self
                .location
                .as_ref()
                .map(|location| Attr::Nested(location)),
            "allocation" => self
                .allocation
                .as_ref()
                .map(|allocation| Attr::Nested(allocation)),
            _ => self.extra.get(name).and_then(Attr::from_json),
        }
    }
}

impl Attributes for Location {
    fn attribute(&self, name: &str) -> Option<Attr<'_>> {
        match name {
            "id" => self.id.map(Attr::display),
            "short" => self.short.as_deref().map(Attr::text),
            "long" => self.long.as_deref().map(Attr::text),
            _ => None,
        }
    }
}

impl Attributes for Allocation {
    fn attribute(&self, name: &str) -> Option<Attr<'_>> {
        match name {
            "ip" => self.ip.as_deref().map(Attr::text),
            "port" => self.port.map(Attr::display),
            "alias" => self.alias.as_deref().map(Attr::text),
            _ => None,
        }
    }
}

/// Objects are looked up by key, arrays by numeric index.
impl Attributes for Value {
    fn attribute(&self, name: &str) -> Option<Attr<'_>> {
        let child = match self {
            Self::Object(map) => map.get(name)?,
            Self::Array(items) => items.get(name.parse::<usize>().ok()?)?,
            _ => return None,
        };
        Attr::from_json(child)
    }
}
