use std::fmt;
use std::str::FromStr;

use crate::error::{IviError, IviResult};

/// Class-specification compliance declared by a driver.
///
/// This documents what the driver implements. It does not check which
/// instrument is actually attached; `Driver::new_verified` does that on
/// request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    pub class_spec_major_version: u32,
    pub class_spec_minor_version: u32,
    pub class_spec_revision: &'static str,
    pub group_capabilities: &'static [&'static str],
    pub supported_models: &'static [&'static str],
}

impl CapabilityDescriptor {
    /// Panics (at compile time when used in a `const`) on an empty group or
    /// model list.
    pub const fn new(
        major: u32,
        minor: u32,
        revision: &'static str,
        group_capabilities: &'static [&'static str],
        supported_models: &'static [&'static str],
    ) -> Self {
        assert!(
            !group_capabilities.is_empty(),
            "a driver must declare at least one capability group"
        );
        assert!(
            !supported_models.is_empty(),
            "a driver must support at least one model"
        );
        CapabilityDescriptor {
            class_spec_major_version: major,
            class_spec_minor_version: minor,
            class_spec_revision: revision,
            group_capabilities,
            supported_models,
        }
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.group_capabilities.contains(&group)
    }

    /// Model names are compared without regard to case; `E3631A` also matches
    /// a reply of `e3631a`.
    pub fn supports_model(&self, model: &str) -> bool {
        let model = model.trim();
        self.supported_models
            .iter()
            .any(|m| m.eq_ignore_ascii_case(model))
    }
}

/// Parsed `*IDN?` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    pub firmware_revision: String,
}

impl FromStr for Identification {
    type Err = IviError;

    fn from_str(reply: &str) -> IviResult<Self> {
        let fields: Vec<&str> = reply.trim().split(',').map(str::trim).collect();
        match fields.as_slice() {
            [manufacturer, model, serial_number, firmware_revision]
                if !manufacturer.is_empty() && !model.is_empty() =>
            {
                Ok(Identification {
                    manufacturer: manufacturer.to_string(),
                    model: model.to_string(),
                    serial_number: serial_number.to_string(),
                    firmware_revision: firmware_revision.to_string(),
                })
            }
            _ => Err(IviError::decode("identification", reply)),
        }
    }
}

impl fmt::Display for Identification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (serial {}, firmware {})",
            self.manufacturer, self.model, self.serial_number, self.firmware_revision
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: CapabilityDescriptor =
        CapabilityDescriptor::new(4, 4, "3.0", &["IviDCPwrBase"], &["E3631A"]);

    #[test]
    fn idn_reply_splits_into_four_fields() {
        let id: Identification = "Agilent Technologies,E3631A,0,2.1-5.0-1.0\n"
            .parse()
            .unwrap();
        assert_eq!(id.manufacturer, "Agilent Technologies");
        assert_eq!(id.model, "E3631A");
        assert_eq!(id.serial_number, "0");
        assert_eq!(id.firmware_revision, "2.1-5.0-1.0");
    }

    #[test]
    fn truncated_idn_reply_is_decode_error() {
        match "Agilent Technologies,E3631A".parse::<Identification>() {
            Err(IviError::Decode { reply, .. }) => assert_eq!(reply, "Agilent Technologies,E3631A"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn model_match_ignores_case() {
        assert!(DESCRIPTOR.supports_model("e3631a"));
        assert!(!DESCRIPTOR.supports_model("E3632A"));
        assert!(DESCRIPTOR.has_group("IviDCPwrBase"));
        assert!(!DESCRIPTOR.has_group("IviDCPwrMeasurement"));
    }
}
