// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Validation of the overlay (VPCMIDO) settings

use tracing::debug;

use crate::field::Field;
use crate::model::midonet::MidonetConfig;
use crate::settings::ValidationSettings;
use crate::validation::primitive::{Check, FieldRule, apply_rules};
use crate::validation::sink::ErrorSink;

const MIDONET_RULES: &[FieldRule<MidonetConfig>] = &[
    FieldRule {
        field: Field::EucanetdHost,
        value: |m| m.eucanetd_host.as_deref(),
        checks: &[Check::Required, Check::Host],
    },
    FieldRule {
        field: Field::GatewayHost,
        value: |m| m.gateway_host.as_deref(),
        checks: &[Check::Required, Check::Host],
    },
    FieldRule {
        field: Field::GatewayIp,
        value: |m| m.gateway_ip.as_deref(),
        checks: &[Check::Required, Check::Ip],
    },
    FieldRule {
        field: Field::GatewayInterface,
        value: |m| m.gateway_interface.as_deref(),
        checks: &[Check::Required],
    },
    FieldRule {
        field: Field::PublicNetwork,
        value: |m| m.public_network.as_deref(),
        checks: &[Check::Required, Check::Cidr],
    },
    FieldRule {
        field: Field::PublicGatewayIp,
        value: |m| m.public_gateway_ip.as_deref(),
        checks: &[Check::Required, Check::Ip],
    },
];

/// Validate the overlay settings. All of them are mandatory.
pub fn validate_midonet(mido: &MidonetConfig, settings: &ValidationSettings, sink: &mut ErrorSink) {
    debug!("Validating overlay settings...");
    apply_rules(mido, MIDONET_RULES, settings, sink);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use pretty_assertions::assert_eq;

    fn mido() -> MidonetConfig {
        MidonetConfig::new()
            .set_eucanetd_host("ctl.example.com")
            .set_gateway_host("gw.example.com")
            .set_gateway_ip("10.111.5.11")
            .set_gateway_interface("em1.116")
            .set_public_network("10.116.128.0/17")
            .set_public_gateway_ip("10.116.133.173")
    }

    fn failures(mido: &MidonetConfig, settings: &ValidationSettings) -> Vec<(String, ErrorCode)> {
        let mut sink = ErrorSink::new();
        {
            let mut scope = sink.scope(Field::Mido);
            validate_midonet(mido, settings, &mut scope);
        }
        sink.into_failures()
            .into_iter()
            .map(|f| (f.path, f.code))
            .collect()
    }

    #[test]
    fn complete_overlay_settings() {
        let settings = ValidationSettings::new().set_host_check(true);
        assert!(failures(&mido(), &settings).is_empty());
    }

    #[test]
    fn everything_is_required() {
        let settings = ValidationSettings::new().set_host_check(true);
        let paths: Vec<_> = failures(&MidonetConfig::new(), &settings)
            .into_iter()
            .map(|(path, code)| {
                assert_eq!(code, ErrorCode::Required);
                path
            })
            .collect();
        assert_eq!(
            paths,
            vec![
                "Mido.EucanetdHost",
                "Mido.GatewayHost",
                "Mido.GatewayIP",
                "Mido.GatewayInterface",
                "Mido.PublicNetwork",
                "Mido.PublicGatewayIP",
            ]
        );
    }

    #[test]
    fn bad_values() {
        let settings = ValidationSettings::new().set_host_check(true);
        let mido = mido()
            .set_gateway_host("-gw-")
            .set_public_network("10.116.128.0")
            .set_public_gateway_ip("10.116.133");
        assert_eq!(
            failures(&mido, &settings),
            vec![
                ("Mido.GatewayHost".to_owned(), ErrorCode::InvalidHost),
                ("Mido.PublicNetwork".to_owned(), ErrorCode::InvalidCidr),
                ("Mido.PublicGatewayIP".to_owned(), ErrorCode::InvalidIp),
            ]
        );
    }

    #[test]
    fn host_check_can_be_disabled() {
        let settings = ValidationSettings::new().set_host_check(false);
        let mido = mido().set_eucanetd_host("not a host!").set_gateway_host("");
        assert_eq!(
            failures(&mido, &settings),
            vec![("Mido.GatewayHost".to_owned(), ErrorCode::Required)]
        );
    }
}
