pub(crate) const SERIAL_TIMEOUT_MS: u64 = 2000;
pub(crate) const SERIAL_POLL_MS: u64 = 20;
pub(crate) const MAX_RESPONSE_SIZE: usize = 1024;
pub(crate) const DEFAULT_BAUD_RATE: u32 = 9600;

pub(crate) const TERMINATOR: &str = "\n";

pub(crate) const IDN_QUERY: &str = "*IDN?";
pub(crate) const RESET_COMMAND: &str = "*RST";
pub(crate) const SOFTWARE_TRIGGER_COMMAND: &str = "*TRG";
