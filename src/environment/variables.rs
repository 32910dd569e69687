// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Seeds the environment from a server's variable records.

use std::collections::BTreeMap;

use crate::model::Server;

/// Maps each variable record to its effective value.
///
/// Record names are expected to be unique. A repeated name is logged and the
/// later record wins.
#[must_use]
pub fn seed(server: &Server) -> BTreeMap<String, Option<String>> {
    let mut seeded = BTreeMap::new();

    for record in server.variables() {
        let value = record.effective_value().map(str::to_owned);
        if seeded.insert(record.name.clone(), value).is_some() {
            tracing::warn!(
                key = %record.name,
                server = server.uuid.as_deref().unwrap_or_default(),
                "Duplicate variable record name, later record wins"
            );
        }
    }

    seeded
}
