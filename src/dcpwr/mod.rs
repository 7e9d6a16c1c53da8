//! IviDCPwr class: programmable DC power supplies (IVI-4.4).
//!
//! Each capability group is a trait. Per-output operations are implemented on
//! [`Channel`](crate::driver::Channel), whole-instrument operations on
//! [`Driver`](crate::driver::Driver).

pub mod agilente36xx;

pub use agilente36xx::{AgilentE36xx, E36xxDriver};

use crate::error::IviResult;

pub const GROUP_BASE: &str = "IviDCPwrBase";
pub const GROUP_TRIGGER: &str = "IviDCPwrTrigger";
pub const GROUP_SOFTWARE_TRIGGER: &str = "IviDCPwrSoftwareTrigger";
pub const GROUP_MEASUREMENT: &str = "IviDCPwrMeasurement";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Immediate,
    Software,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementType {
    Voltage,
    Current,
}

/// IviDCPwrBase, per output
pub trait DcPwrBase {
    fn voltage_level(&self) -> IviResult<f64>;
    fn set_voltage_level(&self, volts: f64) -> IviResult<()>;

    fn current_limit(&self) -> IviResult<f64>;
    fn set_current_limit(&self, amps: f64) -> IviResult<()>;

    fn output_enabled(&self) -> IviResult<bool>;
    fn set_output_enabled(&self, enabled: bool) -> IviResult<()>;

    fn configure_output(&self, volts: f64, amps: f64) -> IviResult<()> {
        self.set_voltage_level(volts)?;
        self.set_current_limit(amps)
    }
}

/// IviDCPwrTrigger, per output
pub trait DcPwrTrigger {
    fn trigger_source(&self) -> IviResult<TriggerSource>;
    fn set_trigger_source(&self, source: TriggerSource) -> IviResult<()>;

    fn triggered_voltage_level(&self) -> IviResult<f64>;
    fn set_triggered_voltage_level(&self, volts: f64) -> IviResult<()>;

    fn triggered_current_limit(&self) -> IviResult<f64>;
    fn set_triggered_current_limit(&self, amps: f64) -> IviResult<()>;
}

/// IviDCPwrTrigger, instrument wide
pub trait DcPwrInitiate {
    /// Arm the trigger system
    fn initiate(&self) -> IviResult<()>;
}

/// IviDCPwrSoftwareTrigger
pub trait DcPwrSoftwareTrigger {
    fn send_software_trigger(&self) -> IviResult<()>;
}

/// IviDCPwrMeasurement, per output
pub trait DcPwrMeasurement {
    fn measure(&self, kind: MeasurementType) -> IviResult<f64>;
}
