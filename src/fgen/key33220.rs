//! Agilent/Keysight 33220A and 33210A function generators.
//!
//! Single output, so commands carry no selector. A standard function is set
//! up with one `APPLy` command, followed by the attributes APPLy does not
//! cover.

use super::{
    FgenBase, FgenBurst, FgenInternalTrigger, FgenStdFunc, FgenTrigger, GROUP_BASE, GROUP_BURST,
    GROUP_INTERNAL_TRIGGER, GROUP_STDFUNC, GROUP_TRIGGER, StandardFunction, StandardWaveform,
    TriggerSource,
};
use crate::codec::{format_bool, format_real, parse_bool, parse_count, parse_real};
use crate::driver::{Channel, Driver, Model};
use crate::error::{IviError, IviResult};
use crate::inherent::CapabilityDescriptor;
use crate::keywords::KeywordTable;

pub struct Key33220;

pub type Key33220Driver = Driver<Key33220>;

impl Model for Key33220 {
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
        &["33220A", "33210A"],
    );

    const CHANNEL_NAMES: &'static [&'static str] = &["Output"];
}

impl KeywordTable<StandardWaveform> for Key33220 {
    const ATTRIBUTE: &'static str = "waveform";
    const TABLE: &'static [(StandardWaveform, &'static str)] = &[
        (StandardWaveform::Sine, "SIN"),
        (StandardWaveform::Square, "SQU"),
        (StandardWaveform::Triangle, "TRI"),
        (StandardWaveform::RampUp, "RAMP"),
        (StandardWaveform::RampDown, "NRAM"),
        (StandardWaveform::DC, "DC"),
    ];
}

impl KeywordTable<TriggerSource> for Key33220 {
    const ATTRIBUTE: &'static str = "trigger source";
    const TABLE: &'static [(TriggerSource, &'static str)] = &[
        (TriggerSource::Immediate, "IMM"),
        (TriggerSource::External, "EXT"),
        (TriggerSource::Software, "BUS"),
    ];
}

/// 33220A reports an infinite (high-Z) load as 9.9E+37
const HIGH_IMPEDANCE: f64 = 9.9e37;

impl FgenBase for Channel<'_, Key33220> {
    fn output_enabled(&self) -> IviResult<bool> {
        parse_bool(&self.query("OUTP?")?)
    }

    fn set_output_enabled(&self, enabled: bool) -> IviResult<()> {
        self.write(&format!("OUTP {}", format_bool(enabled)))
    }

    fn output_impedance(&self) -> IviResult<f64> {
        let ohms = parse_real(&self.query("OUTP:LOAD?")?)?;
        Ok(if ohms >= HIGH_IMPEDANCE {
            f64::INFINITY
        } else {
            ohms
        })
    }

    fn set_output_impedance(&self, ohms: f64) -> IviResult<()> {
        if ohms == f64::INFINITY {
            return self.write("OUTP:LOAD INF");
        }
        self.write(&format!(
            "OUTP:LOAD {}",
            format_real("output impedance", ohms)?
        ))
    }
}

impl FgenStdFunc for Channel<'_, Key33220> {
    fn amplitude(&self) -> IviResult<f64> {
        parse_real(&self.query("VOLT?")?)
    }

    fn set_amplitude(&self, volts: f64) -> IviResult<()> {
        self.write(&format!("VOLT {}", format_real("amplitude", volts)?))
    }

    fn dc_offset(&self) -> IviResult<f64> {
        parse_real(&self.query("VOLT:OFFS?")?)
    }

    fn set_dc_offset(&self, volts: f64) -> IviResult<()> {
        self.write(&format!("VOLT:OFFS {}", format_real("DC offset", volts)?))
    }

    fn duty_cycle_high(&self) -> IviResult<f64> {
        parse_real(&self.query("FUNC:SQU:DCYC?")?)
    }

    fn set_duty_cycle_high(&self, percent: f64) -> IviResult<()> {
        self.write(&format!(
            "FUNC:SQU:DCYC {}",
            format_real("duty cycle high", percent)?
        ))
    }

    fn frequency(&self) -> IviResult<f64> {
        parse_real(&self.query("FREQ?")?)
    }

    fn set_frequency(&self, hertz: f64) -> IviResult<()> {
        self.write(&format!("FREQ {}", format_real("frequency", hertz)?))
    }

    fn start_phase(&self) -> IviResult<f64> {
        parse_real(&self.query("BURS:PHAS?")?)
    }

    fn set_start_phase(&self, degrees: f64) -> IviResult<()> {
        self.write(&format!("BURS:PHAS {}", format_real("start phase", degrees)?))
    }

    fn waveform(&self) -> IviResult<StandardWaveform> {
        Key33220::decode(&self.query("FUNC?")?)
    }

    fn set_waveform(&self, waveform: StandardWaveform) -> IviResult<()> {
        self.write(&format!("FUNC {}", Key33220::encode(waveform)?))
    }

    fn configure_standard_function(&self, function: &StandardFunction) -> IviResult<()> {
        let keyword = Key33220::encode(function.waveform)?;
        let offset = format_real("DC offset", function.dc_offset)?;
        let apply = if function.waveform == StandardWaveform::DC {
            format!("APPL:{} DEF, DEF, {}", keyword, offset)
        } else {
            format!(
                "APPL:{} {}, {}, {}",
                keyword,
                format_real("frequency", function.frequency)?,
                format_real("amplitude", function.amplitude)?,
                offset
            )
        };
        let duty_cycle = match function.waveform {
            StandardWaveform::Square => Some(format_real(
                "duty cycle high",
                function.duty_cycle_high,
            )?),
            _ => None,
        };
        let phase = format_real("start phase", function.start_phase)?;

        self.write(&apply)?;
        if let Some(percent) = duty_cycle {
            self.write(&format!("FUNC:SQU:DCYC {}", percent))?;
        }
        self.write(&format!("BURS:PHAS {}", phase))
    }
}

impl FgenTrigger for Channel<'_, Key33220> {
    fn trigger_source(&self) -> IviResult<TriggerSource> {
        Key33220::decode(&self.query("TRIG:SOUR?")?)
    }

    fn set_trigger_source(&self, source: TriggerSource) -> IviResult<()> {
        self.write(&format!("TRIG:SOUR {}", Key33220::encode(source)?))
    }
}

impl FgenBurst for Channel<'_, Key33220> {
    fn burst_count(&self) -> IviResult<u32> {
        parse_count(&self.query("BURS:NCYC?")?)
    }

    fn set_burst_count(&self, cycles: u32) -> IviResult<()> {
        self.write(&format!("BURS:NCYC {}", cycles))
    }
}

// The 33220A programs the internal burst period, not a rate
impl FgenInternalTrigger for Key33220Driver {
    fn internal_trigger_rate(&self) -> IviResult<f64> {
        let reply = self.query("BURS:INT:PER?")?;
        let period = parse_real(&reply)?;
        if period <= 0.0 {
            return Err(IviError::decode("burst period", &reply));
        }
        Ok(1.0 / period)
    }

    fn set_internal_trigger_rate(&self, hertz: f64) -> IviResult<()> {
        self.write(&format!(
            "BURS:INT:PER {}",
            format_real("internal trigger rate", 1.0 / hertz)?
        ))
    }
}
