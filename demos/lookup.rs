// SPDX-License-Identifier: MIT OR Apache-2.0

//! Looks up a single key against a local Consul agent.
//!
//! Run with:
//! ```sh
//! cargo run --example lookup -- app/greeting
//! ```
//!
//! Environment variables `CONSUL_HOST`, `CONSUL_PORT` and `CONSUL_TOKEN`
//! override the default agent address.

use consulcfg::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let key = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "app/greeting".to_string());

    let mut config = AgentConfig::default();
    if let Ok(host) = std::env::var("CONSUL_HOST") {
        config.host = host;
    }
    if let Ok(port) = std::env::var("CONSUL_PORT") {
        config.port = port.parse().unwrap_or(config.port);
    }
    if let Ok(token) = std::env::var("CONSUL_TOKEN") {
        config.token = Some(token);
    }

    let gateway = ConsulGateway::new(config)?;
    match gateway.lookup(&key)? {
        Some(entry) => {
            println!("key:   {}", entry.key);
            match entry.decoded_value_utf8()? {
                Some(value) => println!("value: {}", value),
                None => println!("value: <empty>"),
            }
            if let Some(index) = entry.modify_index {
                println!("index: {}", index);
            }
        }
        None => println!("key '{}' not present in store", key),
    }
    Ok(())
}
