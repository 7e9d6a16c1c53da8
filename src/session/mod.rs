pub mod loopback;
pub mod serialport;

pub use loopback::LoopbackSession;
pub use serialport::{SerialPortSession, SerialSessionParams};

use crate::error::IviResult;

/// Synchronous request/response link to one instrument.
///
/// Implementations do not need to be thread safe themselves: drivers keep the
/// session behind a lock and hold it for the whole write-then-read exchange.
pub trait Session: Send {
    /// Send a command that produces no reply
    fn write(&mut self, command: &str) -> IviResult<()>;

    /// Send a command and block until its reply arrives or the session times out
    fn query(&mut self, command: &str) -> IviResult<String>;

    /// Release the underlying connection
    fn close(&mut self) -> IviResult<()>;
}

impl<S: Session + ?Sized> Session for Box<S> {
    fn write(&mut self, command: &str) -> IviResult<()> {
        (**self).write(command)
    }

    fn query(&mut self, command: &str) -> IviResult<String> {
        (**self).query(command)
    }

    fn close(&mut self) -> IviResult<()> {
        (**self).close()
    }
}
