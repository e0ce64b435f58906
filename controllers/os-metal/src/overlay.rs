//! Provider overlay.
//!
//! Derives the files the metal provider adds on top of an
//! OperatingSystemConfig: containerd configuration, registry mirrors and,
//! for network-isolated clusters, DNS and NTP settings.

use crds::{CriConfig, CriName, File, FileContent, NetworkIsolation, RegistryMirror};
use tracing::debug;

/// Header written at the top of every generated config file
pub const GENERATED_HEADER: &str = "# Generated by os-extension-metal";

pub const CONTAINERD_CONFIG_PATH: &str = "/etc/containerd/config.toml";
pub const CONTAINERD_CERTS_DIR: &str = "/etc/containerd/certs.d";
pub const RESOLVED_DROPIN_PATH: &str = "/etc/systemd/resolved.conf.d/dns.conf";
pub const RESOLV_CONF_PATH: &str = "/etc/resolv.conf";
pub const TIMESYNCD_CONF_PATH: &str = "/etc/systemd/timesyncd.conf";

const DEFAULT_PERMISSIONS: i32 = 0o644;

/// Files the provider contributes for one OperatingSystemConfig.
#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a> {
    isolation: &'a NetworkIsolation,
    cri: Option<&'a CriConfig>,
}

impl<'a> Overlay<'a> {
    pub fn new(isolation: &'a NetworkIsolation, cri: Option<&'a CriConfig>) -> Self {
        Self { isolation, cri }
    }

    fn uses_containerd(&self) -> bool {
        self.cri.is_some_and(|c| c.name == CriName::Containerd)
    }

    /// Overlay files in write order: DNS, NTP, containerd, registry mirrors.
    pub fn files(&self) -> Vec<File> {
        let mut files = Vec::new();

        files.extend(dns_files(&self.isolation.dns_servers));
        files.extend(ntp_files(&self.isolation.ntp_servers));

        if self.uses_containerd() {
            files.push(containerd_config_file());
            files.extend(registry_mirror_files(&self.isolation.registry_mirrors));
        }

        debug!(
            "Provider overlay derived {} files: {:?}",
            files.len(),
            files.iter().map(|f| f.path.as_str()).collect::<Vec<_>>()
        );
        files
    }
}

fn plain_file(path: impl Into<String>, permissions: Option<i32>, data: String) -> File {
    File {
        path: path.into(),
        permissions,
        content: FileContent::inline_plain(data),
    }
}

fn containerd_config_file() -> File {
    let data = format!(
        r#"{GENERATED_HEADER}
version = 2
imports = ["/etc/containerd/conf.d/*.toml"]
disabled_plugins = []

[plugins."io.containerd.grpc.v1.cri".registry]
  config_path = "{CONTAINERD_CERTS_DIR}"

[plugins."io.containerd.grpc.v1.cri".containerd.runtimes.runc]
  runtime_type = "io.containerd.runc.v2"
"#
    );
    plain_file(CONTAINERD_CONFIG_PATH, Some(DEFAULT_PERMISSIONS), data)
}

fn dns_files(dns_servers: &[String]) -> Vec<File> {
    if dns_servers.is_empty() {
        return Vec::new();
    }

    let resolved = format!(
        "{GENERATED_HEADER}\n[Resolve]\nDNS={}\nDomain=~.\n",
        dns_servers.join(" ")
    );

    let mut resolv_conf = format!("{GENERATED_HEADER}\n");
    for ip in dns_servers {
        resolv_conf.push_str(&format!("nameserver {ip}\n"));
    }

    vec![
        plain_file(RESOLVED_DROPIN_PATH, None, resolved),
        plain_file(RESOLV_CONF_PATH, None, resolv_conf),
    ]
}

fn ntp_files(ntp_servers: &[String]) -> Vec<File> {
    if ntp_servers.is_empty() {
        return Vec::new();
    }

    let timesyncd = format!("{GENERATED_HEADER}\n[Time]\nNTP={}\n", ntp_servers.join(" "));
    vec![plain_file(TIMESYNCD_CONF_PATH, Some(DEFAULT_PERMISSIONS), timesyncd)]
}

/// One `hosts.toml` per mirrored registry, pointing containerd at the mirror.
fn registry_mirror_files(mirrors: &[RegistryMirror]) -> Vec<File> {
    mirrors
        .iter()
        .flat_map(|mirror| {
            mirror.mirror_of.iter().map(move |registry| {
                let data = format!(
                    "server = \"https://{registry}\"\n\n[host.\"{}\"]\n  capabilities = [\"pull\", \"resolve\"]\n",
                    mirror.endpoint
                );
                plain_file(format!("{CONTAINERD_CERTS_DIR}/{registry}/hosts.toml"), None, data)
            })
        })
        .collect()
}
