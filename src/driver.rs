use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, trace};

use crate::constants::{IDN_QUERY, RESET_COMMAND};
use crate::error::{IviError, IviResult, ResetError};
use crate::inherent::{CapabilityDescriptor, Identification};
use crate::session::Session;

/// Static description of one driver family.
///
/// Implemented by zero-sized marker types; the capability traits a family
/// supports are implemented for `Driver<M>` and `Channel<'_, M>`.
pub trait Model: Sized + 'static {
    const DESCRIPTOR: CapabilityDescriptor;

    /// Output names in channel index order
    const CHANNEL_NAMES: &'static [&'static str];

    /// Embed the channel selector in `command`. Single-output models send the
    /// command unchanged.
    fn address(channel: &ChannelSpec, command: &str) -> String {
        let _ = channel;
        command.to_string()
    }
}

/// Position and name of one output, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSpec {
    pub index: usize,
    pub name: &'static str,
}

type SharedSession = Mutex<Box<dyn Session>>;

pub struct Driver<M: Model> {
    session: SharedSession,
    descriptor: CapabilityDescriptor,
    channels: Vec<ChannelSpec>,
    _model: PhantomData<M>,
}

impl<M: Model> Driver<M> {
    /// Build the driver around an open session, optionally resetting the
    /// instrument. A failed reset still hands back the driver inside the
    /// error.
    pub fn new(session: impl Session + 'static, reset: bool) -> Result<Self, ResetError<Self>> {
        let driver = Self::assemble(Box::new(session));
        info!(
            "Created driver for {:?} with {} output(s)",
            driver.descriptor.supported_models,
            driver.output_count()
        );

        if reset {
            if let Err(e) = driver.reset() {
                return Err(ResetError::new(driver, e));
            }
        }
        Ok(driver)
    }

    /// Like [`Driver::new`], but first asks the instrument to identify itself
    /// and refuses models this driver does not list.
    pub fn new_verified(session: impl Session + 'static, reset: bool) -> IviResult<Self> {
        let driver = Self::assemble(Box::new(session));
        let id = driver.identify()?;
        if !driver.descriptor.supports_model(&id.model) {
            return Err(IviError::UnsupportedModel {
                model: id.model,
                supported: driver.descriptor.supported_models.to_vec(),
            });
        }
        info!("Verified attached instrument: {}", id);

        if reset {
            driver.reset()?;
        }
        Ok(driver)
    }

    fn assemble(session: Box<dyn Session>) -> Self {
        let channels = M::CHANNEL_NAMES
            .iter()
            .enumerate()
            .map(|(index, name)| ChannelSpec { index, name: *name })
            .collect();

        Driver {
            session: Mutex::new(session),
            descriptor: M::DESCRIPTOR,
            channels,
            _model: PhantomData,
        }
    }

    pub fn descriptor(&self) -> &CapabilityDescriptor {
        &self.descriptor
    }

    pub fn output_count(&self) -> usize {
        self.channels.len()
    }

    /// Look up an output. Out-of-range indices fail here, before any bus
    /// traffic.
    pub fn channel(&self, index: usize) -> IviResult<Channel<'_, M>> {
        let spec = self.channels.get(index).ok_or(IviError::InvalidChannel {
            index,
            count: self.channels.len(),
        })?;
        Ok(Channel {
            spec,
            session: &self.session,
            _model: PhantomData,
        })
    }

    pub fn channel_by_name(&self, name: &str) -> Option<Channel<'_, M>> {
        self.channels
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|spec| Channel {
                spec,
                session: &self.session,
                _model: PhantomData,
            })
    }

    pub fn channels(&self) -> impl Iterator<Item = Channel<'_, M>> {
        self.channels.iter().map(|spec| Channel {
            spec,
            session: &self.session,
            _model: PhantomData,
        })
    }

    pub fn identify(&self) -> IviResult<Identification> {
        let reply = self.query(IDN_QUERY)?;
        reply.parse()
    }

    /// Send the standard reset command. Transport errors are returned as is.
    pub fn reset(&self) -> IviResult<()> {
        info!("Resetting instrument");
        self.write(RESET_COMMAND)
    }

    /// Close the session. Consuming the driver guarantees no channel view
    /// outlives it.
    pub fn close(self) -> IviResult<()> {
        let mut session = self
            .session
            .into_inner()
            .map_err(|_| IviError::Transport("Session lock poisoned".to_string()))?;
        info!("Closing session");
        session.close()
    }

    pub(crate) fn write(&self, command: &str) -> IviResult<()> {
        lock(&self.session)?.write(command)
    }

    pub(crate) fn query(&self, command: &str) -> IviResult<String> {
        lock(&self.session)?.query(command)
    }
}

/// Borrowed view of one output of a [`Driver`].
pub struct Channel<'a, M: Model> {
    spec: &'a ChannelSpec,
    session: &'a SharedSession,
    _model: PhantomData<M>,
}

impl<M: Model> Clone for Channel<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: Model> Copy for Channel<'_, M> {}

impl<'a, M: Model> Channel<'a, M> {
    pub fn index(&self) -> usize {
        self.spec.index
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn spec(&self) -> &'a ChannelSpec {
        self.spec
    }

    /// Send `command` with this channel's selector embedded
    pub(crate) fn write(&self, command: &str) -> IviResult<()> {
        let command = M::address(self.spec, command);
        debug!("{} <- {:?}", self.spec.name, command);
        lock(self.session)?.write(&command)
    }

    pub(crate) fn query(&self, command: &str) -> IviResult<String> {
        let command = M::address(self.spec, command);
        debug!("{} <- {:?}", self.spec.name, command);
        lock(self.session)?.query(&command)
    }

    /// Send `command` as is, for models whose syntax puts the selector
    /// somewhere [`Model::address`] cannot.
    pub(crate) fn query_raw(&self, command: &str) -> IviResult<String> {
        debug!("{} <- {:?}", self.spec.name, command);
        lock(self.session)?.query(command)
    }
}

fn lock(session: &SharedSession) -> IviResult<MutexGuard<'_, Box<dyn Session>>> {
    trace!("Waiting for session");
    session
        .lock()
        .map_err(|_| IviError::Transport("Session lock poisoned".to_string()))
}
