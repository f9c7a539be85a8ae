//! Decoding of the tagged binary peer addresses carried by tap events.
use std::net::{
    IpAddr,
    Ipv4Addr,
    Ipv6Addr,
};

use crate::event::IpAddress;

/// Decode a tagged address into a std `IpAddr`.
///
/// IPv6 wins when present; an IPv4 value of zero is treated the same as a missing address.
pub fn decode_ip(ip: Option<&IpAddress>) -> Option<IpAddr> {
    match ip? {
        IpAddress::Ipv6(halves) => {
            let mut octets = [0u8; 16];
            octets[..8].copy_from_slice(&halves.first.to_be_bytes());
            octets[8..].copy_from_slice(&halves.last.to_be_bytes());
            Some(IpAddr::V6(Ipv6Addr::from(octets)))
        },
        IpAddress::Ipv4(0) => None,
        IpAddress::Ipv4(v4) => Some(IpAddr::V4(Ipv4Addr::from(*v4))),
    }
}

/// Canonical text for a tagged address; a missing address is the empty string.
pub fn ip_to_string(ip: Option<&IpAddress>) -> String {
    decode_ip(ip).map(|ip| ip.to_string()).unwrap_or_default()
}

/// Joins a host and port, bracketing hosts that look like IPv6 literals.
pub fn join_host_port(host: &str, port: u32) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}
