//! Transport seam between the group logger and the diagnostic bus
//!
//! The bus wake-up, handshake and block framing live outside this crate. What
//! the logger sees is a capability to check link status, enqueue a group
//! request and wait for the matching response with a bounded timeout.

use crate::error::{KwLogError, Result};
use std::time::Duration;

mod channel;
mod sim;

pub use channel::{ChannelTransport, EcuEndpoint, duplex};
pub use sim::SimulatedEcu;

/// Bytes in one measurement block (4 triplets)
pub const BLOCK_LEN: usize = 12;

/// KW1281 block title: read measurement group
pub const BLOCK_GROUP_REQUEST: u8 = 0x29;
/// KW1281 block title: measurement group response
pub const BLOCK_GROUP_RESPONSE: u8 = 0xE7;
/// KW1281 block title: no acknowledgment
pub const BLOCK_NO_ACK: u8 = 0x0A;

/// One (type code, A, B) entry of a measurement block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triplet {
    pub code: u8,
    pub a: u8,
    pub b: u8,
}

/// The 12-byte payload of a group response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementBlock([u8; BLOCK_LEN]);

impl MeasurementBlock {
    pub fn new(bytes: [u8; BLOCK_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; BLOCK_LEN] {
        &self.0
    }

    /// The four triplets in block order
    pub fn triplets(&self) -> impl Iterator<Item = Triplet> + '_ {
        self.0.chunks_exact(3).map(|t| Triplet {
            code: t[0],
            a: t[1],
            b: t[2],
        })
    }
}

impl TryFrom<&[u8]> for MeasurementBlock {
    type Error = KwLogError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; BLOCK_LEN] = bytes.try_into().map_err(|_| {
            KwLogError::communication(format!(
                "Measurement block must be {} bytes, got {}",
                BLOCK_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }
}

/// Classified answer to a group request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Group response carrying a measurement block
    Measurement(MeasurementBlock),
    /// ECU refused the request
    NoAck,
    /// Any other block title
    Other(u8),
}

impl Response {
    /// Classify a received block by its title
    pub fn from_block(title: u8, payload: &[u8]) -> Result<Self> {
        match title {
            BLOCK_GROUP_RESPONSE => Ok(Response::Measurement(MeasurementBlock::try_from(
                payload,
            )?)),
            BLOCK_NO_ACK => Ok(Response::NoAck),
            other => Ok(Response::Other(other)),
        }
    }
}

/// Link state reported by the transport actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Operational,
    Degraded,
}

/// Request/response capability used by the group logger.
#[async_trait::async_trait]
pub trait Transport: Send {
    /// Current link state
    fn status(&self) -> LinkStatus;

    /// Enqueue a group request. Never blocks; a request that cannot be
    /// enqueued is dropped and surfaces as a missing response.
    fn request(&mut self, group: u8);

    /// Wait for the next response. Expiry and transport failure are errors.
    async fn await_response(&mut self, timeout: Duration) -> Result<Response>;
}
