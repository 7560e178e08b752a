use std::collections::HashMap;

use registry::config::DEFAULT_API_BASE_URL;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = HostConfig::from_lookup(lookup(&[]));
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.registry.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
}

#[test]
fn reads_port_and_upstream_overrides() {
    let cfg = HostConfig::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("SMARTFACE_API_BASE_URL", "http://localhost:8000/api/"),
    ]));
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.registry.api_base_url, "http://localhost:8000/api");
}

#[test]
fn invalid_port_falls_back_to_default() {
    let cfg = HostConfig::from_lookup(lookup(&[("PORT", "eighty")]));
    assert_eq!(cfg.port, DEFAULT_PORT);
}
