//! Group poller and data logger
//!
//! The logger walks the configured groups cyclically: one request, one
//! response, one decoded block appended to the current line. When the last
//! configured group has been answered the line is written out and a new one
//! starts with a fresh time stamp. The units header goes out once, after the
//! first completed line.
//!
//! Every failure ends the session. The caller gets a [`SessionResult`] and
//! decides whether to start another one.

use crate::clock::{Clock, format_stamp};
use crate::config::Config;
use crate::decoder::{decode_units, decode_values};
use crate::error::{KwLogError, Result};
use crate::logging::{LogContext, StructuredLogger, get_logger_with_context};
use crate::storage::LogSink;
use crate::transport::{LinkStatus, Response, Transport};
use std::time::Duration;
use tokio::sync::watch;

mod cancel;
mod cycle;
pub mod line;
mod progress;

pub use cancel::CancelFlag;
pub use cycle::GroupCycle;
pub use line::LineBuffer;
pub use progress::{SPINNER_FRAMES, SessionProgress, Spinner};

use line::{NO_ACK_FIELDS, UNITS_PREFIX, header_line};

/// Terminal outcome of a logging session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionResult {
    /// Cancellation was observed
    UserTerminated,
    /// Link not operational, response timeout or malformed exchange
    CommunicationError,
    /// A line could not be stored
    StorageError,
}

impl SessionResult {
    /// Numeric outcome (0 user, 1 communication, 2 storage)
    pub fn code(self) -> u8 {
        match self {
            SessionResult::UserTerminated => 0,
            SessionResult::CommunicationError => 1,
            SessionResult::StorageError => 2,
        }
    }
}

impl std::fmt::Display for SessionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionResult::UserTerminated => "terminated by user",
            SessionResult::CommunicationError => "communication error",
            SessionResult::StorageError => "storage error",
        };
        f.write_str(s)
    }
}

/// Logger state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerState {
    Init,
    Polling,
    Flushing,
    Terminated(SessionResult),
}

/// Lines under construction
struct Accumulator {
    line: LineBuffer,
    /// `None` once the units header has been written
    units: Option<LineBuffer>,
}

/// Polls measurement groups over a [`Transport`] and logs them to a [`LogSink`]
pub struct GroupLogger<T: Transport, S: LogSink, C: Clock> {
    cycle: GroupCycle,
    response_timeout: Duration,
    max_line_length: usize,
    transport: T,
    sink: S,
    clock: C,
    cancel: CancelFlag,
    progress: watch::Sender<SessionProgress>,
    spinner: Spinner,
    logger: StructuredLogger,
}

impl<T: Transport, S: LogSink, C: Clock> GroupLogger<T, S, C> {
    pub fn new(
        config: &Config,
        transport: T,
        sink: S,
        clock: C,
        cancel: CancelFlag,
    ) -> Result<Self> {
        let cycle = GroupCycle::new(config.groups.clone())?;
        let session_id = uuid::Uuid::new_v4().to_string();
        let groups = cycle
            .groups()
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let logger = get_logger_with_context(
            LogContext::new("logger")
                .with_session_id(session_id)
                .with_field("groups", groups),
        );
        let (progress, _) = watch::channel(SessionProgress::default());

        Ok(Self {
            cycle,
            response_timeout: config.response_timeout(),
            max_line_length: config.max_line_length,
            transport,
            sink,
            clock,
            cancel,
            progress,
            spinner: Spinner::default(),
            logger,
        })
    }

    /// Receive progress snapshots
    pub fn subscribe_progress(&self) -> watch::Receiver<SessionProgress> {
        self.progress.subscribe()
    }

    /// Run the session to its end
    pub async fn run(mut self) -> SessionResult {
        self.logger.info("Logging session started");
        let result = match self.session().await {
            Ok(result) => result,
            Err(e) => {
                self.logger.error(&e.to_string());
                e.session_result()
            }
        };
        self.set_state(LoggerState::Terminated(result));
        self.logger.info(&format!(
            "Logging session ended: {} (code {})",
            result,
            result.code()
        ));
        result
    }

    async fn session(&mut self) -> Result<SessionResult> {
        let mut acc = self.init().await?;
        self.set_state(LoggerState::Polling);
        loop {
            if let Some(result) = self.step(&mut acc).await? {
                return Ok(result);
            }
        }
    }

    async fn init(&mut self) -> Result<Accumulator> {
        let header = header_line(self.cycle.groups());
        if header.len() > self.max_line_length {
            return Err(KwLogError::capacity(format!(
                "Header needs {} bytes, limit is {}",
                header.len(),
                self.max_line_length
            )));
        }
        self.append(&header).await?;

        let mut units = LineBuffer::new(self.max_line_length);
        units.push_str(UNITS_PREFIX)?;

        self.clock.reset();
        let mut line = LineBuffer::new(self.max_line_length);
        self.start_line(&mut line)?;

        Ok(Accumulator {
            line,
            units: Some(units),
        })
    }

    /// One polling iteration. `Some` ends the session.
    async fn step(&mut self, acc: &mut Accumulator) -> Result<Option<SessionResult>> {
        if self.cancel.take() {
            if !acc.line.is_empty() {
                self.logger
                    .debug(&format!("Discarding unflushed line ({} bytes)", acc.line.len()));
            }
            return Ok(Some(SessionResult::UserTerminated));
        }

        if self.transport.status() != LinkStatus::Operational {
            return Err(KwLogError::communication("Transport link not operational"));
        }

        let group = self.cycle.current();
        self.transport.request(group);
        let response = self.transport.await_response(self.response_timeout).await?;

        self.record(group, response, acc)?;
        self.tick();

        if self.cycle.completes_line(group) {
            self.set_state(LoggerState::Flushing);
            self.flush(acc).await?;
            self.set_state(LoggerState::Polling);
        }

        self.cycle.advance();
        Ok(None)
    }

    fn record(&self, group: u8, response: Response, acc: &mut Accumulator) -> Result<()> {
        match response {
            Response::Measurement(block) => {
                acc.line.push_str(&decode_values(&block))?;
                if let Some(units) = acc.units.as_mut() {
                    units.push_str(&decode_units(&block))?;
                }
            }
            Response::NoAck => {
                self.logger.warn(&format!("Group {} not acknowledged", group));
                acc.line.push_str(NO_ACK_FIELDS)?;
            }
            Response::Other(title) => {
                self.logger.warn(&format!(
                    "Unexpected response 0x{:02x} to group {}",
                    title, group
                ));
                acc.line.push_str(&format!("0x{:02x};;;;", title))?;
            }
        }
        Ok(())
    }

    async fn flush(&mut self, acc: &mut Accumulator) -> Result<()> {
        if let Some(mut units) = acc.units.take() {
            let text = units.finish()?;
            self.append(text).await?;
            self.logger.debug("Units header written");
        }

        let text = acc.line.finish()?;
        self.append(text).await?;
        self.logger.trace(&format!("Line written ({} bytes)", text.len()));

        acc.line.clear();
        self.start_line(&mut acc.line)
    }

    fn start_line(&self, line: &mut LineBuffer) -> Result<()> {
        line.push_str(&format_stamp(self.clock.elapsed()))?;
        line.push_str(";")
    }

    async fn append(&mut self, text: &str) -> Result<()> {
        self.sink.append_line(text).await?;
        self.progress.send_modify(|p| p.lines_written += 1);
        Ok(())
    }

    fn tick(&mut self) {
        let symbol = self.spinner.advance();
        self.progress.send_modify(|p| {
            p.responses += 1;
            p.spinner = symbol;
        });
    }

    fn set_state(&self, state: LoggerState) {
        self.progress.send_modify(|p| p.state = state);
    }
}
