// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

#[macro_use]
mod macros;

pub mod chart;
pub mod config;
pub mod error;
pub mod logger;
pub mod results;
pub mod terminal;

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::logger::Logger;
pub use crate::results::{Record, Series, Variant, RESULTS};
pub use crate::terminal::TerminalBackend;
