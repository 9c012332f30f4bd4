#![allow(dead_code)]

use std::sync::Once;

use dns_models::DNSConfig;

/// Registers a global default tracing subscriber when called for the first time. This is intended
/// for use in tests.
pub fn subscribe() {
    static INSTALL_TRACING_SUBSCRIBER: Once = Once::new();
    INSTALL_TRACING_SUBSCRIBER.call_once(|| {
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).unwrap();
    });
}

pub const EXAMPLE_CONFIG: &str = r#"{
  "registrars": [
    {"name": "inside", "type": "NONE"}
  ],
  "dns_providers": [
    {"name": "bind", "type": "BIND", "meta": {"directory": "zones"}}
  ],
  "domains": [
    {
      "name": "example.com",
      "registrar": "inside",
      "dnsProviders": {"bind": -1},
      "meta": {"dnssec": "off"},
      "records": [
        {"type": "A", "name": "@", "target": "192.0.2.1"},
        {"type": "A", "name": "www", "target": "192.0.2.1", "ttl": 120},
        {"type": "A", "name": "www", "target": "192.0.2.2", "ttl": 120},
        {"type": "MX", "name": "@", "target": "mail.example.com.", "priority": 10},
        {"type": "MX", "name": "@", "target": "backup.example.net.", "priority": 20},
        {"type": "TXT", "name": "@", "target": "v=spf1 include:\"_spf.example.net\" -all"},
        {"type": "CNAME", "name": "docs", "target": "www.example.com."},
        {"type": "SRV", "name": "_sip._tcp", "target": "10 5 5060 sip.example.com."}
      ],
      "nameservers": [
        {"name": "ns1.example.net."},
        {"name": "ns2.example.net", "target": "198.51.100.53"}
      ],
      "keepunknown": false
    },
    {
      "name": "example.org",
      "registrar": "inside",
      "dnsProviders": {"bind": 0},
      "records": [
        {"type": "AAAA", "name": "@", "target": "2001:db8::1"},
        {"type": "SPELLING", "name": "oops", "target": "nothing"}
      ]
    }
  ]
}"#;

pub fn example_config() -> DNSConfig {
    DNSConfig::from_json_str(EXAMPLE_CONFIG).expect("example configuration is valid")
}
