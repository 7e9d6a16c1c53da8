use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::trace;

use super::Session;
use crate::error::{IviError, IviResult};

/// One exchange seen by a [`LoopbackSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    Write(String),
    Query(String),
    Close,
}

#[derive(Default)]
struct LoopbackState {
    replies: HashMap<String, String>,
    failures: HashMap<String, String>,
    fail_all: Option<String>,
    log: Vec<Exchange>,
    in_flight: bool,
    overlaps: usize,
    closed: bool,
}

/// Scripted in-memory session.
///
/// Queries are answered from a command to reply table, writes are only
/// recorded. Clones share the same state, so a test can keep one handle to
/// inspect the exchanges after moving the other into a driver.
#[derive(Clone, Default)]
pub struct LoopbackSession {
    state: Arc<Mutex<LoopbackState>>,
}

impl LoopbackSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `reply`
    pub fn reply(self, command: &str, reply: &str) -> Self {
        self.lock()
            .replies
            .insert(command.to_string(), reply.to_string());
        self
    }

    /// Fail `command` (write or query) with a transport error
    pub fn fail(self, command: &str, message: &str) -> Self {
        self.lock()
            .failures
            .insert(command.to_string(), message.to_string());
        self
    }

    /// Fail every exchange with a transport error, as a dropped bus would
    pub fn disconnect(&self, message: &str) {
        self.lock().fail_all = Some(message.to_string());
    }

    pub fn exchanges(&self) -> Vec<Exchange> {
        self.lock().log.clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.lock()
            .log
            .iter()
            .filter_map(|e| match e {
                Exchange::Write(cmd) => Some(cmd.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn queries(&self) -> Vec<String> {
        self.lock()
            .log
            .iter()
            .filter_map(|e| match e {
                Exchange::Query(cmd) => Some(cmd.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of exchanges that started while another one was still running
    pub fn overlaps(&self) -> usize {
        self.lock().overlaps
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> MutexGuard<'_, LoopbackState> {
        // A panicking test thread must not hide the log from the others
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn exchange(&self, entry: Exchange, command: &str) -> IviResult<Option<String>> {
        {
            let mut state = self.lock();
            if state.closed {
                return Err(IviError::Transport("Loopback session is closed".to_string()));
            }
            if state.in_flight {
                state.overlaps += 1;
            }
            state.in_flight = true;
            state.log.push(entry.clone());
        }

        // Give a concurrent caller the chance to overlap if nothing serializes us
        std::thread::yield_now();

        let mut state = self.lock();
        state.in_flight = false;

        if let Some(message) = state.fail_all.as_ref().or(state.failures.get(command)) {
            return Err(IviError::Transport(message.clone()));
        }

        match entry {
            Exchange::Query(_) => match state.replies.get(command) {
                Some(reply) => {
                    trace!("Loopback {:?} -> {:?}", command, reply);
                    Ok(Some(reply.clone()))
                }
                None => Err(IviError::Timeout {
                    command: command.to_string(),
                    timeout: std::time::Duration::ZERO,
                }),
            },
            _ => Ok(None),
        }
    }
}

impl Session for LoopbackSession {
    fn write(&mut self, command: &str) -> IviResult<()> {
        self.exchange(Exchange::Write(command.to_string()), command)?;
        Ok(())
    }

    fn query(&mut self, command: &str) -> IviResult<String> {
        self.exchange(Exchange::Query(command.to_string()), command)?
            .ok_or_else(|| IviError::decode("reply", ""))
    }

    fn close(&mut self) -> IviResult<()> {
        let mut state = self.lock();
        if state.closed {
            return Err(IviError::Transport(
                "Loopback session already closed".to_string(),
            ));
        }
        state.log.push(Exchange::Close);
        state.closed = true;
        Ok(())
    }
}
