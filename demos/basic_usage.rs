// SPDX-License-Identifier: MIT

//! Basic usage example for the dotcfg crate.
//!
//! This example demonstrates:
//! - Declaring a schema with defaults, validation rules and bindings
//! - Constructing a configuration from a YAML document
//! - Reading values by dot-path from the raw snapshot
//! - The difference between bound fields and raw snapshot reads
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use dotcfg::prelude::*;

#[derive(Default)]
struct AppConfig {
    name: String,
    workers: i64,
    debug: bool,
}

impl ConfigSchema for AppConfig {
    fn defaults() -> ConfigMap {
        let mut defaults = ConfigMap::new();
        defaults.insert("name", "demo-app");
        defaults.insert("workers", 4);
        defaults.insert("debug", false);
        defaults
    }

    fn validation_rules() -> FieldRules {
        FieldRules::new()
            .with("name", TypeRule::Primitive(ValueKind::Str))
            .with("workers", TypeRule::Primitive(ValueKind::Int))
            .with("debug", TypeRule::Primitive(ValueKind::Bool))
    }

    fn bind(registry: &mut BindingRegistry<Self>) {
        registry.field("name", |state, value| {
            if let Some(name) = value.as_str() {
                state.name = name.to_string();
            }
        });
        registry.field("workers", |state, value| {
            if let Some(workers) = value.as_i64() {
                state.workers = workers;
            }
        });
        registry.field("debug", |state, value| {
            if let Some(debug) = value.as_bool() {
                state.debug = debug;
            }
        });
    }
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== dotcfg: Basic Usage ===\n");

    // Example 1: Parse a YAML document and bind it
    println!("--- Example 1: Binding a Document ---");
    let supplied = dotcfg::adapters::yaml::from_str(
        "workers: 16\ndebug: true\nlog:\n  level: debug\n  file: /tmp/app.log\n",
    )?;

    let mut configuration = Configuration::<AppConfig>::new(supplied)?;
    println!("name:    {} (from defaults)", configuration.state().name);
    println!("workers: {} (from the document)", configuration.state().workers);
    println!("debug:   {}", configuration.state().debug);

    // Example 2: Dot-path reads against the raw snapshot
    println!("\n--- Example 2: Dot-Path Reads ---");
    let level = configuration.get("log.level")?;
    println!("log.level: {level:?}");

    if configuration.has("log.rotate") {
        println!("log.rotate is set");
    } else {
        println!("log.rotate is not set");
    }

    // Example 3: Updating the snapshot
    println!("\n--- Example 3: Updating the Snapshot ---");
    configuration.set("workers", 32)?;
    println!("snapshot workers: {:?}", configuration.get("workers")?);
    println!(
        "bound workers:    {} (unchanged until the next load)",
        configuration.state().workers
    );

    // Example 4: Validation rejects the wrong type
    println!("\n--- Example 4: Validation ---");
    match configuration.set("workers", "many") {
        Ok(()) => println!("unexpected: the set was accepted"),
        Err(e) => println!("rejected as expected: {e}"),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
