use clap::ValueEnum;

use crate::{
    constants::DEFAULT_BAUD_RATE,
    dcpwr::AgilentE36xx,
    driver::Model,
    error::{IviError, IviResult},
    fgen::{Ds345, Key33220},
    inherent::CapabilityDescriptor,
    session::SerialSessionParams,
};

/// Every instrument model with a driver in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InstrumentModel {
    /// Agilent/Keysight E3631A triple output power supply
    E3631a,

    /// Agilent/Keysight 33220A 20 MHz function generator
    #[value(name = "33220a")]
    Fgen33220a,

    /// Agilent/Keysight 33210A 10 MHz function generator
    #[value(name = "33210a")]
    Fgen33210a,

    /// Stanford Research Systems DS345 function generator
    Ds345,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentClass {
    DcPwr,
    Fgen,
}

impl InstrumentModel {
    pub fn class(self) -> InstrumentClass {
        match self {
            InstrumentModel::E3631a => InstrumentClass::DcPwr,
            InstrumentModel::Fgen33220a | InstrumentModel::Fgen33210a | InstrumentModel::Ds345 => {
                InstrumentClass::Fgen
            }
        }
    }

    pub fn descriptor(self) -> CapabilityDescriptor {
        match self {
            InstrumentModel::E3631a => AgilentE36xx::DESCRIPTOR,
            InstrumentModel::Fgen33220a | InstrumentModel::Fgen33210a => Key33220::DESCRIPTOR,
            InstrumentModel::Ds345 => Ds345::DESCRIPTOR,
        }
    }

    pub fn channel_names(self) -> &'static [&'static str] {
        match self {
            InstrumentModel::E3631a => AgilentE36xx::CHANNEL_NAMES,
            InstrumentModel::Fgen33220a | InstrumentModel::Fgen33210a => Key33220::CHANNEL_NAMES,
            InstrumentModel::Ds345 => Ds345::CHANNEL_NAMES,
        }
    }

    /// Fill in serial defaults for this model. The port must be given:
    /// instrument discovery is left to the caller.
    pub fn session_params(
        self,
        port: Option<String>,
        baud: Option<u32>,
    ) -> IviResult<SerialSessionParams> {
        let port = port.ok_or_else(|| {
            IviError::Configuration(format!("No serial port given for {:?}", self))
        })?;
        Ok(SerialSessionParams::new(
            port,
            baud.unwrap_or(DEFAULT_BAUD_RATE),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_model_is_listed_by_its_driver() {
        for model in InstrumentModel::value_variants() {
            let name = model
                .to_possible_value()
                .map(|v| v.get_name().to_ascii_uppercase())
                .unwrap_or_default();
            assert!(
                model.descriptor().supports_model(&name),
                "{name} missing from its driver's supported models"
            );
            assert!(!model.channel_names().is_empty());
        }
    }

    #[test]
    fn session_params_require_port() {
        assert!(matches!(
            InstrumentModel::Ds345.session_params(None, None),
            Err(IviError::Configuration(_))
        ));
        let params = InstrumentModel::E3631a
            .session_params(Some("/dev/ttyUSB0".into()), None)
            .unwrap();
        assert_eq!(params.baud, DEFAULT_BAUD_RATE);
    }
}
