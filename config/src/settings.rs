// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Settings controlling validation

use std::sync::LazyLock;
use tracing::warn;

/// Environment variable that, when set to a truthy value, disables the syntactic check of
/// host fields (DNS servers, overlay hosts).
pub const DISABLE_HOST_CHECK_ENV: &str = "CLUSTERNET_DISABLE_HOST_CHECK";

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Process-wide switch, read once on first use
static HOST_CHECK_DISABLED: LazyLock<bool> = LazyLock::new(|| {
    let disabled = std::env::var(DISABLE_HOST_CHECK_ENV).is_ok_and(|v| is_truthy(&v));
    if disabled {
        warn!("Host field validation is disabled by {DISABLE_HOST_CHECK_ENV}");
    }
    disabled
});

/// Tell if host field validation has been disabled for this process
#[must_use]
pub fn host_check_disabled() -> bool {
    *HOST_CHECK_DISABLED
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ValidationSettings {
    pub host_check: bool, /* validate host fields (IP literal or domain name) */
}

impl ValidationSettings {
    #[must_use]
    pub fn new() -> Self {
        Self {
            host_check: !host_check_disabled(),
        }
    }
    #[must_use]
    pub fn set_host_check(mut self, value: bool) -> Self {
        self.host_check = value;
        self
    }
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "On"] {
            assert!(is_truthy(value), "{value} should be truthy");
        }
        for value in ["", "0", "false", "no", "off", "disabled"] {
            assert!(!is_truthy(value), "{value} should not be truthy");
        }
    }

    #[test]
    fn explicit_settings() {
        let settings = ValidationSettings::new().set_host_check(false);
        assert!(!settings.host_check);
        assert!(settings.set_host_check(true).host_check);
    }
}
