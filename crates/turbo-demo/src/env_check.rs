//! Startup check that the start location's server can be resolved.
//!
//! Only logs; a cold boot against an unreachable server still runs and
//! surfaces as a failed visit.

use std::net::ToSocketAddrs;

use url::{Host, Url};

/// Host and port of an `http`/`https` location, the port defaulting to the
/// scheme's.
///
/// Returns `None` for other schemes, unparseable locations and locations
/// without a host.
pub fn server_address(location: &str) -> Option<(String, u16)> {
    let url = Url::parse(location).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = match url.host()? {
        // host_str keeps the brackets, which the resolver rejects
        Host::Ipv6(addr) => addr.to_string(),
        Host::Ipv4(addr) => addr.to_string(),
        Host::Domain(domain) => domain.to_string(),
    };
    Some((host, url.port_or_known_default()?))
}

/// Log whether the server behind `location` resolves.
pub fn check_start_location(location: &str) -> bool {
    let Some((host, port)) = server_address(location) else {
        tracing::warn!(location, "start location has no http(s) server address");
        return false;
    };

    match (host.as_str(), port).to_socket_addrs() {
        Ok(mut addrs) => match addrs.next() {
            Some(addr) => {
                tracing::info!(location, %addr, "start location resolved");
                true
            }
            None => {
                tracing::warn!(location, host, "start location resolved to no addresses");
                false
            }
        },
        Err(e) => {
            tracing::warn!(location, host, error = %e, "start location did not resolve");
            false
        }
    }
}
