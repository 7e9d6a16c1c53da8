use std::io::{Read, Write};
use std::time::{Duration, Instant};

use tracing::{info, trace};

use super::Session;
use crate::constants::{MAX_RESPONSE_SIZE, SERIAL_POLL_MS, SERIAL_TIMEOUT_MS, TERMINATOR};
use crate::error::{IviError, IviResult};

pub type ComPort = String;
pub type BaudRate = u32;

#[derive(Debug, Clone)]
pub struct SerialSessionParams {
    pub port: ComPort,
    pub baud: BaudRate,
    pub timeout: Duration,
}

impl SerialSessionParams {
    pub fn new(port: impl Into<ComPort>, baud: BaudRate) -> Self {
        SerialSessionParams {
            port: port.into(),
            baud,
            timeout: Duration::from_millis(SERIAL_TIMEOUT_MS),
        }
    }
}

/// Serial port session. Commands are newline terminated in both directions.
pub struct SerialPortSession {
    serial_port: Option<Box<dyn serialport::SerialPort>>,
    timeout: Duration,
    pending: Vec<u8>,
}

impl SerialPortSession {
    pub fn open(params: SerialSessionParams) -> IviResult<SerialPortSession> {
        let serial_port = serialport::new(params.port.as_str(), params.baud)
            .timeout(Duration::from_millis(SERIAL_POLL_MS))
            .open()
            .map_err(|e| IviError::Transport(format!("{:?}", e)))?;

        info!("Opened {} at {} baud", params.port, params.baud);
        Ok(SerialPortSession {
            serial_port: Some(serial_port),
            timeout: params.timeout,
            pending: Vec::with_capacity(MAX_RESPONSE_SIZE),
        })
    }

    fn port(&mut self) -> IviResult<&mut Box<dyn serialport::SerialPort>> {
        self.serial_port
            .as_mut()
            .ok_or_else(|| IviError::Transport("Serial session is closed".to_string()))
    }

    fn read_line(&mut self, command: &str) -> IviResult<String> {
        let deadline = Instant::now() + self.timeout;
        let mut chunk = [0u8; MAX_RESPONSE_SIZE];

        loop {
            if let Some(end) = self.pending.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = self.pending.drain(..=end).collect();
                let reply = String::from_utf8_lossy(&line).trim().to_string();
                trace!("Received {:?}", reply);
                return Ok(reply);
            }

            if Instant::now() >= deadline {
                return Err(IviError::Timeout {
                    command: command.to_string(),
                    timeout: self.timeout,
                });
            }

            let size = self
                .port()?
                .read(&mut chunk)
                // Timeout error is fine, keep polling until the deadline
                .or_else(|e| {
                    if e.kind() == std::io::ErrorKind::TimedOut {
                        Ok(0)
                    } else {
                        Err(e)
                    }
                })
                .map_err(|e| IviError::Transport(format!("{:?}", e)))?;

            self.pending.extend_from_slice(&chunk[..size]);
        }
    }
}

impl Session for SerialPortSession {
    fn write(&mut self, command: &str) -> IviResult<()> {
        let port = self.port()?;
        port.write_all(format!("{}{}", command, TERMINATOR).as_bytes())
            .map_err(|e| IviError::Transport(format!("{:?}", e)))?;
        port.flush()
            .map_err(|e| IviError::Transport(format!("Failed to flush {:?}", e)))?;
        trace!("Sent {:?}", command);
        Ok(())
    }

    fn query(&mut self, command: &str) -> IviResult<String> {
        // Drop anything left over from an earlier timed out exchange
        self.pending.clear();
        self.write(command)?;
        self.read_line(command)
    }

    fn close(&mut self) -> IviResult<()> {
        match self.serial_port.take() {
            Some(port) => {
                drop(port);
                info!("Closed serial session");
                Ok(())
            }
            None => Err(IviError::Transport(
                "Serial session already closed".to_string(),
            )),
        }
    }
}
