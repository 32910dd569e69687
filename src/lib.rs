// panel-env: Server Environment Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        resolve / explain / builtins
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              | TOML, environment_variables|
//!              '-------------+-------------'
//!                            v
//!              ,---------------------------,
//!              |        environment        |
//!              |  resolver  <-- providers  |
//!              |  extract   <-- variables  |
//!              '-------------+-------------'
//!                            v
//!                 model (Server, records)
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod environment;
pub mod error;
pub mod logging;
pub mod model;
