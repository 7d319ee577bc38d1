//! Listen address classification.
//!
//! # Responsibilities
//! - Infer the transport family from a listen specification
//! - Produce an address usable for both dialing and listening
//!
//! # Rules (first match wins)
//! ```text
//! ddd.ddd.ddd.ddd:ppppp  → tcp, unchanged
//! ppppp                  → tcp, ":ppppp" (all interfaces)
//! anything else          → unix, treated as a socket path
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static IP_PORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}:[0-9]{2,5}$")
        .expect("ip:port pattern is valid")
});

static BARE_PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("port pattern is valid"));

/// Transport family of a listen address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    Tcp,
    Unix,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Tcp => "tcp",
            Transport::Unix => "unix",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified listen specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenAddress {
    transport: Transport,
    address: String,
}

impl ListenAddress {
    /// Classify a listen specification.
    ///
    /// Never fails: any string that is neither `ip:port` nor a bare port is
    /// taken as a unix socket path, including the empty string.
    pub fn resolve(spec: &str) -> Self {
        let (transport, address) = if IP_PORT.is_match(spec) {
            (Transport::Tcp, spec.to_string())
        } else if BARE_PORT.is_match(spec) {
            (Transport::Tcp, format!(":{}", spec))
        } else {
            (Transport::Unix, spec.to_string())
        };

        Self { transport, address }
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    /// The address in listen form (`":9000"` for a bare port).
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The address to dial. An empty tcp host means the local host.
    pub fn dial_address(&self) -> String {
        match self.transport {
            Transport::Tcp if self.address.starts_with(':') => {
                format!("127.0.0.1{}", self.address)
            }
            _ => self.address.clone(),
        }
    }
}

impl fmt::Display for ListenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.transport, self.address)
    }
}
