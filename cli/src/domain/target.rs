//! Target normalization — where the provisioning run applies.

/// Resolved deployment target.
///
/// Normalized once, before any downstream logic inspects it; nothing after
/// resolution compares address strings again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Provision the machine running this CLI; no remote connection.
    Local,
    /// Provision a remote host over SSH.
    Remote {
        /// Hostname or address to connect to.
        addr: String,
    },
}

impl Target {
    /// Map the `--local` flag and the target address onto one canonical
    /// variant. The flag wins over any address; the loopback address and
    /// the literal local hostname are aliases for local mode.
    ///
    /// Returns `None` when no target can be determined — the validator
    /// turns that into a fatal usage error.
    #[must_use]
    pub fn resolve(local_flag: bool, addr: Option<&str>) -> Option<Target> {
        if local_flag {
            return Some(Target::Local);
        }
        match addr {
            None | Some("") => None,
            Some("127.0.0.1" | "localhost") => Some(Target::Local),
            Some(a) => Some(Target::Remote {
                addr: a.to_string(),
            }),
        }
    }

    /// Whether this run touches no remote host.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Target::Local)
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
