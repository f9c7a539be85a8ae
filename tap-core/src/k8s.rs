//! Kubernetes resource kinds as they appear in peer labels.
//!
//! The proxy labels each peer with the owning resources, keyed by the canonical (lowercase,
//! singular) kind name, e.g. `deployment=web`.  Wide output looks up the tapped resource kind in
//! those labels and prints it using its short name.
use std::collections::HashMap;

use lazy_static::lazy_static;

pub const AUTHORITY: &str = "authority";
pub const DAEMON_SET: &str = "daemonset";
pub const DEPLOYMENT: &str = "deployment";
pub const JOB: &str = "job";
pub const NAMESPACE: &str = "namespace";
pub const POD: &str = "pod";
pub const REPLICATION_CONTROLLER: &str = "replicationcontroller";
pub const REPLICA_SET: &str = "replicaset";
pub const SERVICE: &str = "service";
pub const STATEFUL_SET: &str = "statefulset";

/// Label holding the peer's TLS identity status.
pub const TLS_LABEL: &str = "tls";

lazy_static! {
    static ref DEFAULT_SHORT_NAMES: HashMap<&'static str, &'static str> = HashMap::from([
        (AUTHORITY, "au"),
        (DAEMON_SET, "ds"),
        (DEPLOYMENT, "deploy"),
        (JOB, "job"),
        (NAMESPACE, "ns"),
        (POD, "po"),
        (REPLICATION_CONTROLLER, "rc"),
        (REPLICA_SET, "rs"),
        (SERVICE, "svc"),
        (STATEFUL_SET, "sts"),
    ]);
}

/// Resolve a user-friendly kind (`deploy`, `Deployments`, `deployment`) to its canonical name.
pub fn canonical_resource_name(friendly: &str) -> Option<&'static str> {
    let kind = match friendly.to_lowercase().as_str() {
        "au" | "authority" | "authorities" => AUTHORITY,
        "ds" | "daemonset" | "daemonsets" => DAEMON_SET,
        "deploy" | "deployment" | "deployments" => DEPLOYMENT,
        "job" | "jobs" => JOB,
        "ns" | "namespace" | "namespaces" => NAMESPACE,
        "po" | "pod" | "pods" => POD,
        "rc" | "replicationcontroller" | "replicationcontrollers" => REPLICATION_CONTROLLER,
        "rs" | "replicaset" | "replicasets" => REPLICA_SET,
        "svc" | "service" | "services" => SERVICE,
        "sts" | "statefulset" | "statefulsets" => STATEFUL_SET,
        _ => return None,
    };
    Some(kind)
}

/// Canonical-kind to short-name lookup used when rendering wide output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortNames(HashMap<String, String>);

impl ShortNames {
    /// No abbreviations at all; every kind is printed as given.
    pub fn empty() -> Self {
        ShortNames(HashMap::new())
    }

    pub fn insert(&mut self, kind: impl Into<String>, short: impl Into<String>) {
        self.0.insert(kind.into(), short.into());
    }

    /// The abbreviated form of `kind`, or `kind` itself when there is none.
    pub fn shorten<'a>(&'a self, kind: &'a str) -> &'a str {
        match self.0.get(kind) {
            Some(short) if !short.is_empty() => short,
            _ => kind,
        }
    }
}

impl Default for ShortNames {
    fn default() -> Self {
        ShortNames(
            DEFAULT_SHORT_NAMES
                .iter()
                .map(|(kind, short)| ((*kind).into(), (*short).into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ShortNames {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ShortNames(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
