use std::time::Duration;

use clap::{Args, Subcommand};
use ivibench::{
    Instrument, InstrumentModel,
    dcpwr::{DcPwrBase, DcPwrMeasurement, MeasurementType},
    error::{IviError, IviResult},
    fgen::FgenStdFunc,
    session::SerialPortSession,
};
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub(crate) struct ConnectOptions {
    /// Instrument model
    #[clap(short, long)]
    model: InstrumentModel,

    /// Serial port
    #[clap(short, long)]
    port: Option<String>,

    /// Baud rate
    #[clap(short, long)]
    baud: Option<u32>,

    /// Reply timeout in milliseconds
    #[clap(short, long)]
    timeout_ms: Option<u64>,

    /// Reset the instrument before running the command
    #[clap(short, long, default_value_t = false)]
    reset: bool,

    /// Refuse to run unless the instrument identifies as the given model
    #[clap(long, default_value_t = false)]
    verify_model: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Action {
    /// Print the *IDN? reply and the driver's declared capabilities
    Identify,

    /// Reset the instrument to its power-on state
    Reset,

    /// List the outputs by index
    Channels,

    /// Get or set a function generator output amplitude (Vpp)
    Amplitude {
        #[clap(short, long, default_value_t = 0)]
        channel: usize,
        value: Option<f64>,
    },

    /// Get or set a power supply output voltage level
    Voltage {
        #[clap(short, long, default_value_t = 0)]
        channel: usize,
        value: Option<f64>,
    },

    /// Measure a power supply output
    Measure {
        #[clap(short, long, default_value_t = 0)]
        channel: usize,

        /// Measure current instead of voltage
        #[clap(long, default_value_t = false)]
        current: bool,
    },
}

pub(crate) fn handle_action(opts: ConnectOptions, action: Action) -> IviResult<()> {
    let mut params = opts.model.session_params(opts.port, opts.baud)?;
    if let Some(ms) = opts.timeout_ms {
        params.timeout = Duration::from_millis(ms);
    }

    let session = SerialPortSession::open(params)?;
    let instrument = Instrument::open(opts.model, session, opts.reset, opts.verify_model)?;

    let result = run(&instrument, action);
    if let Err(e) = instrument.close() {
        warn!("Failed to close session: {}", e);
    }
    result
}

fn run(instrument: &Instrument, action: Action) -> IviResult<()> {
    match action {
        Action::Identify => {
            println!("{}", instrument.identify()?);
            let descriptor = instrument.descriptor();
            println!(
                "Class spec {}.{} revision {}",
                descriptor.class_spec_major_version,
                descriptor.class_spec_minor_version,
                descriptor.class_spec_revision
            );
            println!("Capability groups: {}", descriptor.group_capabilities.join(", "));
            println!("Supported models: {}", descriptor.supported_models.join(", "));
        }
        Action::Reset => instrument.reset()?,
        Action::Channels => {
            for (index, name) in instrument.channel_names().iter().enumerate() {
                println!("{}: {}", index, name);
            }
        }
        Action::Amplitude { channel, value } => match instrument {
            Instrument::Key33220(d) => amplitude(d.channel(channel)?, value)?,
            Instrument::Ds345(d) => amplitude(d.channel(channel)?, value)?,
            Instrument::E36xx(_) => return Err(class_mismatch("amplitude", instrument)),
        },
        Action::Voltage { channel, value } => match instrument {
            Instrument::E36xx(d) => {
                let output = d.channel(channel)?;
                match value {
                    Some(volts) => output.set_voltage_level(volts)?,
                    None => println!("{}", output.voltage_level()?),
                }
            }
            _ => return Err(class_mismatch("voltage", instrument)),
        },
        Action::Measure { channel, current } => match instrument {
            Instrument::E36xx(d) => {
                let kind = if current {
                    MeasurementType::Current
                } else {
                    MeasurementType::Voltage
                };
                println!("{}", d.channel(channel)?.measure(kind)?);
            }
            _ => return Err(class_mismatch("measure", instrument)),
        },
    }

    Ok(())
}

fn amplitude(output: impl FgenStdFunc, value: Option<f64>) -> IviResult<()> {
    match value {
        Some(volts) => output.set_amplitude(volts),
        None => {
            println!("{}", output.amplitude()?);
            Ok(())
        }
    }
}

fn class_mismatch(command: &str, instrument: &Instrument) -> IviError {
    IviError::Configuration(format!(
        "'{}' is not available for {:?} instruments",
        command,
        instrument.class()
    ))
}
