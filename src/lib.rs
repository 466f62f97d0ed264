//! # kwlog - KW1281 measurement group logger
//!
//! Polls measurement groups from a vehicle ECU over a request/response
//! diagnostic transport, decodes each 12-byte measurement block into physical
//! values and units, and writes a time-stamped `;`-delimited data log.
//!
//! ## Architecture
//!
//! - `config`: Configuration management and validation
//! - `logging`: Structured diagnostic logging and tracing
//! - `error`: Error type and session outcome mapping
//! - `decoder`: Type-code formula table, value and unit rendering
//! - `transport`: Transport seam, typed duplex channel and simulated ECU
//! - `logger`: Group poller state machine and line assembly
//! - `storage`: Data log sinks
//! - `clock`: Elapsed-time source for line stamps

pub mod clock;
pub mod config;
pub mod decoder;
pub mod error;
pub mod logger;
pub mod logging;
pub mod storage;
pub mod transport;

// Re-export commonly used types
pub use config::Config;
pub use error::{KwLogError, Result};
pub use logger::{CancelFlag, GroupLogger, SessionResult};
