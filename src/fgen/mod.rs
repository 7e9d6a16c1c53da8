//! IviFgen class: function generators (IVI-4.3).

pub mod ds345;
pub mod key33220;

pub use ds345::{Ds345, Ds345Driver};
pub use key33220::{Key33220, Key33220Driver};

use crate::error::IviResult;

pub const GROUP_BASE: &str = "IviFgenBase";
pub const GROUP_STDFUNC: &str = "IviFgenStdfunc";
pub const GROUP_TRIGGER: &str = "IviFgenTrigger";
pub const GROUP_INTERNAL_TRIGGER: &str = "IviFgenInternalTrigger";
pub const GROUP_BURST: &str = "IviFgenBurst";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardWaveform {
    Sine,
    Square,
    Triangle,
    RampUp,
    RampDown,
    DC,
}

impl StandardWaveform {
    pub const ALL: [StandardWaveform; 6] = [
        StandardWaveform::Sine,
        StandardWaveform::Square,
        StandardWaveform::Triangle,
        StandardWaveform::RampUp,
        StandardWaveform::RampDown,
        StandardWaveform::DC,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Immediate,
    External,
    Software,
    Internal,
}

/// Settings for one standard waveform, in volts, hertz, degrees and percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardFunction {
    pub waveform: StandardWaveform,
    /// Peak-to-peak volts
    pub amplitude: f64,
    pub dc_offset: f64,
    pub duty_cycle_high: f64,
    pub frequency: f64,
    pub start_phase: f64,
}

impl StandardFunction {
    pub fn new(waveform: StandardWaveform, amplitude: f64, frequency: f64) -> Self {
        StandardFunction {
            waveform,
            amplitude,
            dc_offset: 0.0,
            duty_cycle_high: 50.0,
            frequency,
            start_phase: 0.0,
        }
    }

    pub fn with_dc_offset(mut self, volts: f64) -> Self {
        self.dc_offset = volts;
        self
    }

    pub fn with_duty_cycle_high(mut self, percent: f64) -> Self {
        self.duty_cycle_high = percent;
        self
    }

    pub fn with_start_phase(mut self, degrees: f64) -> Self {
        self.start_phase = degrees;
        self
    }
}

/// IviFgenBase, per output
pub trait FgenBase {
    fn output_enabled(&self) -> IviResult<bool>;
    fn set_output_enabled(&self, enabled: bool) -> IviResult<()>;

    /// Load impedance in ohms
    fn output_impedance(&self) -> IviResult<f64>;
    fn set_output_impedance(&self, ohms: f64) -> IviResult<()>;
}

/// IviFgenStdfunc, per output
pub trait FgenStdFunc {
    fn amplitude(&self) -> IviResult<f64>;
    fn set_amplitude(&self, volts: f64) -> IviResult<()>;

    fn dc_offset(&self) -> IviResult<f64>;
    fn set_dc_offset(&self, volts: f64) -> IviResult<()>;

    fn duty_cycle_high(&self) -> IviResult<f64>;
    fn set_duty_cycle_high(&self, percent: f64) -> IviResult<()>;

    fn frequency(&self) -> IviResult<f64>;
    fn set_frequency(&self, hertz: f64) -> IviResult<()>;

    fn start_phase(&self) -> IviResult<f64>;
    fn set_start_phase(&self, degrees: f64) -> IviResult<()>;

    fn waveform(&self) -> IviResult<StandardWaveform>;
    fn set_waveform(&self, waveform: StandardWaveform) -> IviResult<()>;

    /// Apply every field of `function`. Amplitude, frequency and duty cycle
    /// are skipped where the waveform has no use for them.
    ///
    /// Every value is checked before the first command is sent, so a refused
    /// function leaves the instrument untouched.
    fn configure_standard_function(&self, function: &StandardFunction) -> IviResult<()>;
}

/// IviFgenTrigger, per output
pub trait FgenTrigger {
    fn trigger_source(&self) -> IviResult<TriggerSource>;
    fn set_trigger_source(&self, source: TriggerSource) -> IviResult<()>;
}

/// IviFgenInternalTrigger
pub trait FgenInternalTrigger {
    /// Triggers per second
    fn internal_trigger_rate(&self) -> IviResult<f64>;
    fn set_internal_trigger_rate(&self, hertz: f64) -> IviResult<()>;
}

/// IviFgenBurst, per output
pub trait FgenBurst {
    fn burst_count(&self) -> IviResult<u32>;
    fn set_burst_count(&self, cycles: u32) -> IviResult<()>;
}
