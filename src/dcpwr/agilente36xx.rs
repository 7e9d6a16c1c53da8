//! Agilent/Keysight E3600 series triple-output supplies (E3631A).
//!
//! Outputs are addressed with `INST:SEL <name>` chained in front of each
//! command, so selection and setting travel in one write. The output switch
//! and trigger source are instrument wide on this series: changing them
//! through one channel changes them for all three.

use tracing::info;

use super::{
    DcPwrBase, DcPwrInitiate, DcPwrMeasurement, DcPwrSoftwareTrigger, DcPwrTrigger,
    GROUP_BASE, GROUP_MEASUREMENT, GROUP_SOFTWARE_TRIGGER, GROUP_TRIGGER, MeasurementType,
    TriggerSource,
};
use crate::codec::{format_bool, format_real, parse_bool, parse_real};
use crate::constants::SOFTWARE_TRIGGER_COMMAND;
use crate::driver::{Channel, ChannelSpec, Driver, Model};
use crate::error::IviResult;
use crate::inherent::CapabilityDescriptor;
use crate::keywords::KeywordTable;

pub struct AgilentE36xx;

pub type E36xxDriver = Driver<AgilentE36xx>;

impl Model for AgilentE36xx {
    const DESCRIPTOR: CapabilityDescriptor = CapabilityDescriptor::new(
        4,
        4,
        "3.0",
        &[GROUP_BASE, GROUP_TRIGGER, GROUP_SOFTWARE_TRIGGER, GROUP_MEASUREMENT],
        &["E3631A"],
    );

    const CHANNEL_NAMES: &'static [&'static str] = &["P6V", "P25V", "N25V"];

    fn address(channel: &ChannelSpec, command: &str) -> String {
        format!("INST:SEL {};:{}", channel.name, command)
    }
}

impl KeywordTable<TriggerSource> for AgilentE36xx {
    const ATTRIBUTE: &'static str = "trigger source";
    const TABLE: &'static [(TriggerSource, &'static str)] = &[
        (TriggerSource::Immediate, "IMM"),
        (TriggerSource::Software, "BUS"),
    ];
}

impl DcPwrBase for Channel<'_, AgilentE36xx> {
    fn voltage_level(&self) -> IviResult<f64> {
        parse_real(&self.query("VOLT?")?)
    }

    fn set_voltage_level(&self, volts: f64) -> IviResult<()> {
        self.write(&format!("VOLT {}", format_real("voltage level", volts)?))
    }

    fn current_limit(&self) -> IviResult<f64> {
        parse_real(&self.query("CURR?")?)
    }

    fn set_current_limit(&self, amps: f64) -> IviResult<()> {
        self.write(&format!("CURR {}", format_real("current limit", amps)?))
    }

    fn output_enabled(&self) -> IviResult<bool> {
        parse_bool(&self.query("OUTP?")?)
    }

    fn set_output_enabled(&self, enabled: bool) -> IviResult<()> {
        self.write(&format!("OUTP {}", format_bool(enabled)))
    }
}

impl DcPwrTrigger for Channel<'_, AgilentE36xx> {
    fn trigger_source(&self) -> IviResult<TriggerSource> {
        AgilentE36xx::decode(&self.query("TRIG:SOUR?")?)
    }

    fn set_trigger_source(&self, source: TriggerSource) -> IviResult<()> {
        self.write(&format!("TRIG:SOUR {}", AgilentE36xx::encode(source)?))
    }

    fn triggered_voltage_level(&self) -> IviResult<f64> {
        parse_real(&self.query("VOLT:TRIG?")?)
    }

    fn set_triggered_voltage_level(&self, volts: f64) -> IviResult<()> {
        self.write(&format!(
            "VOLT:TRIG {}",
            format_real("triggered voltage level", volts)?
        ))
    }

    fn triggered_current_limit(&self) -> IviResult<f64> {
        parse_real(&self.query("CURR:TRIG?")?)
    }

    fn set_triggered_current_limit(&self, amps: f64) -> IviResult<()> {
        self.write(&format!(
            "CURR:TRIG {}",
            format_real("triggered current limit", amps)?
        ))
    }
}

impl DcPwrMeasurement for Channel<'_, AgilentE36xx> {
    fn measure(&self, kind: MeasurementType) -> IviResult<f64> {
        let function = match kind {
            MeasurementType::Voltage => "VOLT",
            MeasurementType::Current => "CURR",
        };
        // MEASure takes the output as a parameter instead of INST:SEL
        parse_real(&self.query_raw(&format!("MEAS:{}? {}", function, self.name()))?)
    }
}

impl DcPwrInitiate for E36xxDriver {
    fn initiate(&self) -> IviResult<()> {
        self.write("INIT")
    }
}

impl DcPwrSoftwareTrigger for E36xxDriver {
    fn send_software_trigger(&self) -> IviResult<()> {
        info!("Sending software trigger");
        self.write(SOFTWARE_TRIGGER_COMMAND)
    }
}
