// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

use dotbench_graph::config::{NAME, VERSION};
use dotbench_graph::{chart, fatal, Config, Logger};

fn main() {
    let config = Config::new().unwrap_or_else(|e| {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    });

    Logger::new()
        .label("dotbench_graph")
        .level(config.logging())
        .init()
        .expect("Failed to initialize logger");

    info!("{} {} initializing...", NAME, VERSION);

    config.print();

    if let Err(e) = chart::show(&config) {
        fatal!("{}", e);
    }
}
