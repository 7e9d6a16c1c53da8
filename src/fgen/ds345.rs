//! Stanford Research Systems DS345 function generator.
//!
//! Enumerated settings are numeric codes on this instrument. Amplitude is
//! sent and reported with a unit suffix; the driver always works in
//! peak-to-peak volts (`VP`). The output has no switch and a fixed 50 ohm
//! source, so the base group reports those as constants.

use super::{
    FgenBase, FgenBurst, FgenInternalTrigger, FgenStdFunc, FgenTrigger, GROUP_BASE, GROUP_BURST,
    GROUP_INTERNAL_TRIGGER, GROUP_STDFUNC, GROUP_TRIGGER, StandardFunction, StandardWaveform,
    TriggerSource,
};
use crate::codec::{format_real, parse_count, parse_real, parse_real_with_unit};
use crate::driver::{Channel, Driver, Model};
use crate::error::{IviError, IviResult};
use crate::inherent::CapabilityDescriptor;
use crate::keywords::KeywordTable;

pub struct Ds345;

pub type Ds345Driver = Driver<Ds345>;

const PEAK_TO_PEAK: &str = "VP";

/// Square wave duty cycle is fixed in hardware
const FIXED_DUTY_CYCLE: f64 = 50.0;

const OUTPUT_IMPEDANCE: f64 = 50.0;

impl Model for Ds345 {
    const DESCRIPTOR: CapabilityDescriptor = CapabilityDescriptor::new(
        4,
        3,
        "5.2",
        &[
            GROUP_BASE,
            GROUP_STDFUNC,
            GROUP_TRIGGER,
            GROUP_INTERNAL_TRIGGER,
            GROUP_BURST,
        ],
        &["DS345"],
    );

    const CHANNEL_NAMES: &'static [&'static str] = &["Output"];
}

impl KeywordTable<StandardWaveform> for Ds345 {
    const ATTRIBUTE: &'static str = "waveform";
    const TABLE: &'static [(StandardWaveform, &'static str)] = &[
        (StandardWaveform::Sine, "0"),
        (StandardWaveform::Square, "1"),
        (StandardWaveform::Triangle, "2"),
        (StandardWaveform::RampUp, "3"),
    ];
}

impl KeywordTable<TriggerSource> for Ds345 {
    const ATTRIBUTE: &'static str = "trigger source";
    const TABLE: &'static [(TriggerSource, &'static str)] = &[
        (TriggerSource::Software, "0"),
        (TriggerSource::Internal, "1"),
        (TriggerSource::External, "2"),
    ];
}

impl FgenBase for Channel<'_, Ds345> {
    fn output_enabled(&self) -> IviResult<bool> {
        Ok(true)
    }

    fn set_output_enabled(&self, enabled: bool) -> IviResult<()> {
        if enabled {
            return Ok(());
        }
        Err(IviError::UnsupportedValue {
            attribute: "output enabled",
            value: enabled.to_string(),
        })
    }

    fn output_impedance(&self) -> IviResult<f64> {
        Ok(OUTPUT_IMPEDANCE)
    }

    fn set_output_impedance(&self, ohms: f64) -> IviResult<()> {
        if ohms == OUTPUT_IMPEDANCE {
            return Ok(());
        }
        Err(IviError::UnsupportedValue {
            attribute: "output impedance",
            value: ohms.to_string(),
        })
    }
}

fn check_duty_cycle(percent: f64) -> IviResult<()> {
    if percent == FIXED_DUTY_CYCLE {
        return Ok(());
    }
    Err(IviError::UnsupportedValue {
        attribute: "duty cycle high",
        value: percent.to_string(),
    })
}

impl FgenStdFunc for Channel<'_, Ds345> {
    // Ask for the reply in Vpp whatever unit the front panel shows
    fn amplitude(&self) -> IviResult<f64> {
        parse_real_with_unit(
            &self.query(&format!("AMPL? {}", PEAK_TO_PEAK))?,
            PEAK_TO_PEAK,
        )
    }

    fn set_amplitude(&self, volts: f64) -> IviResult<()> {
        self.write(&format!(
            "AMPL {}{}",
            format_real("amplitude", volts)?,
            PEAK_TO_PEAK
        ))
    }

    fn dc_offset(&self) -> IviResult<f64> {
        parse_real(&self.query("OFFS?")?)
    }

    fn set_dc_offset(&self, volts: f64) -> IviResult<()> {
        self.write(&format!("OFFS {}", format_real("DC offset", volts)?))
    }

    fn duty_cycle_high(&self) -> IviResult<f64> {
        Ok(FIXED_DUTY_CYCLE)
    }

    fn set_duty_cycle_high(&self, percent: f64) -> IviResult<()> {
        check_duty_cycle(percent)
    }

    fn frequency(&self) -> IviResult<f64> {
        parse_real(&self.query("FREQ?")?)
    }

    fn set_frequency(&self, hertz: f64) -> IviResult<()> {
        self.write(&format!("FREQ {}", format_real("frequency", hertz)?))
    }

    fn start_phase(&self) -> IviResult<f64> {
        parse_real(&self.query("PHSE?")?)
    }

    fn set_start_phase(&self, degrees: f64) -> IviResult<()> {
        self.write(&format!("PHSE {}", format_real("start phase", degrees)?))
    }

    fn waveform(&self) -> IviResult<StandardWaveform> {
        Ds345::decode(&self.query("FUNC?")?)
    }

    fn set_waveform(&self, waveform: StandardWaveform) -> IviResult<()> {
        self.write(&format!("FUNC {}", Ds345::encode(waveform)?))
    }

    fn configure_standard_function(&self, function: &StandardFunction) -> IviResult<()> {
        let code = Ds345::encode(function.waveform)?;
        if function.waveform == StandardWaveform::Square {
            check_duty_cycle(function.duty_cycle_high)?;
        }
        let frequency = format_real("frequency", function.frequency)?;
        let amplitude = format_real("amplitude", function.amplitude)?;
        let offset = format_real("DC offset", function.dc_offset)?;
        let phase = format_real("start phase", function.start_phase)?;

        self.write(&format!("FUNC {}", code))?;
        self.write(&format!("FREQ {}", frequency))?;
        self.write(&format!("AMPL {}{}", amplitude, PEAK_TO_PEAK))?;
        self.write(&format!("OFFS {}", offset))?;
        self.write(&format!("PHSE {}", phase))
    }
}

impl FgenTrigger for Channel<'_, Ds345> {
    fn trigger_source(&self) -> IviResult<TriggerSource> {
        Ds345::decode(&self.query("TSRC?")?)
    }

    fn set_trigger_source(&self, source: TriggerSource) -> IviResult<()> {
        self.write(&format!("TSRC {}", Ds345::encode(source)?))
    }
}

impl FgenBurst for Channel<'_, Ds345> {
    fn burst_count(&self) -> IviResult<u32> {
        parse_count(&self.query("BCNT?")?)
    }

    fn set_burst_count(&self, cycles: u32) -> IviResult<()> {
        self.write(&format!("BCNT {}", cycles))
    }
}

impl FgenInternalTrigger for Ds345Driver {
    fn internal_trigger_rate(&self) -> IviResult<f64> {
        parse_real(&self.query("TRAT?")?)
    }

    fn set_internal_trigger_rate(&self, hertz: f64) -> IviResult<()> {
        self.write(&format!(
            "TRAT {}",
            format_real("internal trigger rate", hertz)?
        ))
    }
}
