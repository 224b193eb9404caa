//! Network reachability classification.
//!
//! Every reference host is pinged once, all at the same time, and the
//! classifier waits for the last probe before deciding. The decision uses
//! only the two discriminating hosts; the others are probed and logged but
//! reserved for future weighting.

use std::collections::BTreeMap;
use std::fmt;
use std::thread;

use crate::shell::{CommandRunner, PlatformKind, RunOptions};

/// Hosts probed on every run.
pub const REFERENCE_HOSTS: [&str; 4] = ["github.com", "baidu.com", "google.com", "cn.bing.com"];

/// Hosts whose joint reachability means an unrestricted network.
pub const DISCRIMINATING_HOSTS: [&str; 2] = ["github.com", "google.com"];

/// Where the installer appears to be running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkClass {
    /// Unrestricted access; use canonical sources.
    International,
    /// Restricted access; use mirrors.
    Domestic,
}

impl fmt::Display for NetworkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkClass::International => write!(f, "international"),
            NetworkClass::Domestic => write!(f, "domestic"),
        }
    }
}

/// Reachability of each probed host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkProbeResult {
    reachability: BTreeMap<String, bool>,
}

impl NetworkProbeResult {
    /// A result with every host marked unreachable.
    pub fn unreachable<S: AsRef<str>>(hosts: &[S]) -> Self {
        Self {
            reachability: hosts
                .iter()
                .map(|h| (h.as_ref().to_string(), false))
                .collect(),
        }
    }

    /// Record a probe outcome.
    pub fn record(&mut self, host: &str, reachable: bool) {
        self.reachability.insert(host.to_string(), reachable);
    }

    /// Whether a host answered. Unknown hosts are unreachable.
    pub fn is_reachable(&self, host: &str) -> bool {
        self.reachability.get(host).copied().unwrap_or(false)
    }

    /// Iterate over `(host, reachable)` pairs in host order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.reachability.iter().map(|(h, r)| (h.as_str(), *r))
    }

    /// Number of hosts probed.
    pub fn len(&self) -> usize {
        self.reachability.len()
    }

    /// Whether no host was probed.
    pub fn is_empty(&self) -> bool {
        self.reachability.is_empty()
    }
}

/// International iff every discriminating host is reachable.
pub fn classify_result<S: AsRef<str>>(result: &NetworkProbeResult, discriminating: &[S]) -> NetworkClass {
    let unrestricted = !discriminating.is_empty()
        && discriminating
            .iter()
            .all(|host| result.is_reachable(host.as_ref()));
    if unrestricted {
        NetworkClass::International
    } else {
        NetworkClass::Domestic
    }
}

/// Single-echo ping with a short timeout.
pub fn ping_command(host: &str, platform: PlatformKind) -> String {
    match platform {
        PlatformKind::Windows => format!("ping -n 1 -w 150 {}", host),
        PlatformKind::Unix => format!("ping -c 1 -W 1 {}", host),
        // BSD ping takes -W in milliseconds.
        PlatformKind::MacOs => format!("ping -c 1 -W 1000 {}", host),
    }
}

/// Classification together with the probe results behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAssessment {
    /// The decision.
    pub class: NetworkClass,
    /// Every probe outcome, including reserved hosts.
    pub probes: NetworkProbeResult,
}

/// Classifies the network by pinging reference hosts concurrently.
pub struct NetworkClassifier<'a> {
    runner: &'a dyn CommandRunner,
    hosts: Vec<String>,
    discriminating: Vec<String>,
    platform: PlatformKind,
}

impl<'a> NetworkClassifier<'a> {
    /// Create a classifier for the built-in reference hosts.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self::with_hosts(runner, &REFERENCE_HOSTS, &DISCRIMINATING_HOSTS)
    }

    /// Create a classifier for custom hosts.
    pub fn with_hosts<S: AsRef<str>>(
        runner: &'a dyn CommandRunner,
        hosts: &[S],
        discriminating: &[S],
    ) -> Self {
        Self {
            runner,
            hosts: hosts.iter().map(|h| h.as_ref().to_string()).collect(),
            discriminating: discriminating
                .iter()
                .map(|h| h.as_ref().to_string())
                .collect(),
            platform: PlatformKind::current(),
        }
    }

    /// Use another platform's ping syntax.
    pub fn with_platform(mut self, platform: PlatformKind) -> Self {
        self.platform = platform;
        self
    }

    /// Probe every host concurrently and wait for all of them.
    pub fn probe_all(&self) -> NetworkProbeResult {
        let runner = self.runner;
        let platform = self.platform;

        let outcomes: Vec<(&str, bool)> = thread::scope(|scope| {
            let handles: Vec<_> = self
                .hosts
                .iter()
                .map(|host| {
                    let handle = scope.spawn(move || {
                        let command = ping_command(host, platform);
                        runner.run(&command, &RunOptions::silent()).is_ok()
                    });
                    (host.as_str(), handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(host, handle)| (host, handle.join().unwrap_or(false)))
                .collect()
        });

        let mut result = NetworkProbeResult::unreachable(&self.hosts);
        for (host, reachable) in outcomes {
            tracing::debug!("{} reachable: {}", host, reachable);
            result.record(host, reachable);
        }
        result
    }

    /// Probe and classify.
    pub fn assess(&self) -> NetworkAssessment {
        let probes = self.probe_all();
        let class = classify_result(&probes, &self.discriminating);
        tracing::info!("Network classified as {}", class);
        NetworkAssessment { class, probes }
    }

    /// Probe and return only the classification.
    pub fn classify(&self) -> NetworkClass {
        self.assess().class
    }
}
