//! Input collaborators for the `INPUT` builtin
//!
//! `INPUT` is the only point where evaluation waits on the outside world. The
//! engine asks an [`InputSource`] for one bit and blocks until it answers.
//! Cancelling a request aborts the whole run.

use crate::value::Bit;
use crossbeam_channel::{Receiver, Sender};
use std::fmt;
use std::io::{BufRead, Write};
use std::sync::Arc;

/// Why an input request produced no bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// No input source was configured
    Unavailable,
    /// The source gave up on the request
    Cancelled,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Unavailable => write!(f, "no input source"),
            InputError::Cancelled => write!(f, "input cancelled"),
        }
    }
}

impl std::error::Error for InputError {}

/// Supplies bits to `INPUT`
pub trait InputSource {
    /// Request one bit, showing `prompt` to whoever answers
    fn request(&mut self, prompt: &str) -> Result<Bit, InputError>;
}

/// The default source: every request fails with [`InputError::Unavailable`]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn request(&mut self, _prompt: &str) -> Result<Bit, InputError> {
        Err(InputError::Unavailable)
    }
}

/// Input answered by a closure; returning `None` cancels the run
///
/// ```
/// use bitlogic::engine::{FnInput, InputSource};
/// use bitlogic::Bit;
///
/// let mut input = FnInput::new(|_prompt: &str| Some(Bit::One));
/// assert_eq!(input.request("A?"), Ok(Bit::One));
/// ```
pub struct FnInput<F> {
    answer: F,
}

impl<F> FnInput<F>
where
    F: FnMut(&str) -> Option<Bit>,
{
    pub fn new(answer: F) -> Self {
        FnInput { answer }
    }
}

impl<F> InputSource for FnInput<F>
where
    F: FnMut(&str) -> Option<Bit>,
{
    fn request(&mut self, prompt: &str) -> Result<Bit, InputError> {
        (self.answer)(prompt).ok_or(InputError::Cancelled)
    }
}

/// A pending request sent over a [`ChannelInput`]
///
/// Answer it with [`InputRequest::respond`]; dropping it cancels the run that
/// is waiting on it.
#[derive(Debug)]
pub struct InputRequest {
    prompt: Arc<str>,
    reply: Sender<Bit>,
}

impl InputRequest {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Send the answer back; returns false if the run is already gone
    pub fn respond(self, bit: Bit) -> bool {
        self.reply.send(bit).is_ok()
    }

    /// Refuse the request, aborting the run
    pub fn cancel(self) {}
}

/// Input answered by another thread through a channel round-trip
///
/// The engine side blocks in [`InputSource::request`] until the receiving side
/// responds, cancels, or hangs up.
#[derive(Debug, Clone)]
pub struct ChannelInput {
    requests: Sender<InputRequest>,
}

impl ChannelInput {
    /// Create the engine-side source and the receiver the answering side polls
    pub fn channel() -> (ChannelInput, Receiver<InputRequest>) {
        let (requests, receiver) = crossbeam_channel::unbounded();
        (ChannelInput { requests }, receiver)
    }
}

impl InputSource for ChannelInput {
    fn request(&mut self, prompt: &str) -> Result<Bit, InputError> {
        let (reply, answer) = crossbeam_channel::bounded(1);
        self.requests
            .send(InputRequest {
                prompt: Arc::from(prompt),
                reply,
            })
            .map_err(|_| InputError::Cancelled)?;
        answer.recv().map_err(|_| InputError::Cancelled)
    }
}

/// Line-based input for terminals: writes the prompt, reads `0` or `1`
///
/// Lines that are not a single bit are re-prompted. End of input cancels.
pub struct ReaderInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ReaderInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        ReaderInput { reader, writer }
    }
}

impl<R: BufRead, W: Write> InputSource for ReaderInput<R, W> {
    fn request(&mut self, prompt: &str) -> Result<Bit, InputError> {
        let mut line = String::new();
        loop {
            let prompted = write!(self.writer, "{} [0/1]: ", prompt).and_then(|_| self.writer.flush());
            if let Err(err) = prompted {
                log::warn!("Failed to write input prompt: {}", err);
                return Err(InputError::Cancelled);
            }

            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return Err(InputError::Cancelled),
                Ok(_) => {}
                Err(err) => {
                    log::warn!("Failed to read input: {}", err);
                    return Err(InputError::Cancelled);
                }
            }

            let mut chars = line.trim().chars();
            match (chars.next().and_then(Bit::from_char), chars.next()) {
                (Some(bit), None) => return Ok(bit),
                _ => log::debug!("Rejected input line {:?}", line.trim()),
            }
        }
    }
}
