//! Global configuration tests
//!
//! Runs in its own test binary so the process-wide config starts empty.

use std::thread;

use agentlink::config::{StaticConfig, get_config, init_config, update_config};

fn config_with_port(port: u16) -> StaticConfig {
    let mut config = StaticConfig::default();
    config.server.port = port;
    config
}

#[test]
fn test_update_config_wins_over_concurrent_init() {
    let loader = thread::spawn(init_config);
    update_config(config_with_port(4321));
    loader.join().expect("init thread panicked");

    assert_eq!(get_config().server.port, 4321);

    update_config(config_with_port(4322));
    assert_eq!(get_config().server.port, 4322);
}
