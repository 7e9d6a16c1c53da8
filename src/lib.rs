use dcpwr::E36xxDriver;
use error::IviResult;
use fgen::{Ds345Driver, Key33220Driver};
use inherent::{CapabilityDescriptor, Identification};
pub use models::{InstrumentClass, InstrumentModel};
use session::Session;

pub mod codec;
pub(crate) mod constants;
pub mod dcpwr;
pub mod driver;
pub mod error;
pub mod fgen;
pub mod inherent;
pub mod keywords;
pub mod models;
pub mod session;

pub use driver::{Channel, Driver, Model};

/// A driver picked at run time from an [`InstrumentModel`].
pub enum Instrument {
    E36xx(E36xxDriver),
    Key33220(Key33220Driver),
    Ds345(Ds345Driver),
}

/// Run the same expression against whichever driver is inside
macro_rules! with_driver {
    ($instrument:expr, $driver:ident => $body:expr) => {
        match $instrument {
            Instrument::E36xx($driver) => $body,
            Instrument::Key33220($driver) => $body,
            Instrument::Ds345($driver) => $body,
        }
    };
}

impl Instrument {
    /// Build the driver for `model`. With `verify` the instrument must
    /// identify as one of the driver's supported models; with `reset` it is
    /// reset once the driver exists.
    pub fn open(
        model: InstrumentModel,
        session: impl Session + 'static,
        reset: bool,
        verify: bool,
    ) -> IviResult<Self> {
        fn build<M: Model>(
            session: impl Session + 'static,
            reset: bool,
            verify: bool,
        ) -> IviResult<Driver<M>> {
            if verify {
                Driver::new_verified(session, reset)
            } else {
                Ok(Driver::new(session, reset)?)
            }
        }

        Ok(match model {
            InstrumentModel::E3631a => Instrument::E36xx(build(session, reset, verify)?),
            InstrumentModel::Fgen33220a | InstrumentModel::Fgen33210a => {
                Instrument::Key33220(build(session, reset, verify)?)
            }
            InstrumentModel::Ds345 => Instrument::Ds345(build(session, reset, verify)?),
        })
    }

    pub fn class(&self) -> InstrumentClass {
        match self {
            Instrument::E36xx(_) => InstrumentClass::DcPwr,
            Instrument::Key33220(_) | Instrument::Ds345(_) => InstrumentClass::Fgen,
        }
    }

    pub fn descriptor(&self) -> &CapabilityDescriptor {
        with_driver!(self, d => d.descriptor())
    }

    pub fn output_count(&self) -> usize {
        with_driver!(self, d => d.output_count())
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        with_driver!(self, d => d.channels().map(|c| c.name()).collect())
    }

    pub fn identify(&self) -> IviResult<Identification> {
        with_driver!(self, d => d.identify())
    }

    pub fn reset(&self) -> IviResult<()> {
        with_driver!(self, d => d.reset())
    }

    pub fn close(self) -> IviResult<()> {
        with_driver!(self, d => d.close())
    }
}
