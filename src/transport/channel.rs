//! Single-slot duplex channel between the logger and a transport actor

use super::{LinkStatus, Response, Transport};
use crate::error::{KwLogError, Result};
use crate::logging::get_logger;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch};
use tokio::time::timeout;

/// Logger-side half: sends group numbers, receives owned responses
pub struct ChannelTransport {
    request_tx: mpsc::Sender<u8>,
    response_rx: mpsc::Receiver<Response>,
    status_rx: watch::Receiver<LinkStatus>,
    logger: crate::logging::StructuredLogger,
}

/// Actor-side half: receives group numbers, answers with responses
pub struct EcuEndpoint {
    request_rx: mpsc::Receiver<u8>,
    response_tx: mpsc::Sender<Response>,
    status_tx: watch::Sender<LinkStatus>,
}

/// Create a connected pair. Both directions hold at most one message.
pub fn duplex() -> (ChannelTransport, EcuEndpoint) {
    let (request_tx, request_rx) = mpsc::channel(1);
    let (response_tx, response_rx) = mpsc::channel(1);
    let (status_tx, status_rx) = watch::channel(LinkStatus::Operational);
    (
        ChannelTransport {
            request_tx,
            response_rx,
            status_rx,
            logger: get_logger("transport"),
        },
        EcuEndpoint {
            request_rx,
            response_tx,
            status_tx,
        },
    )
}

#[async_trait::async_trait]
impl Transport for ChannelTransport {
    fn status(&self) -> LinkStatus {
        *self.status_rx.borrow()
    }

    fn request(&mut self, group: u8) {
        match self.request_tx.try_send(group) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => self
                .logger
                .warn(&format!("Request slot busy, group {} request dropped", group)),
            Err(TrySendError::Closed(_)) => self
                .logger
                .warn(&format!("Transport gone, group {} request dropped", group)),
        }
    }

    async fn await_response(&mut self, window: Duration) -> Result<Response> {
        match timeout(window, self.response_rx.recv()).await {
            Ok(Some(response)) => Ok(response),
            Ok(None) => Err(KwLogError::communication("Response channel closed")),
            Err(_) => Err(KwLogError::timeout(format!(
                "No response within {} ms",
                window.as_millis()
            ))),
        }
    }
}

impl EcuEndpoint {
    /// Next requested group, or `None` once the logger side is dropped
    pub async fn next_request(&mut self) -> Option<u8> {
        self.request_rx.recv().await
    }

    /// Hand a response over to the logger
    pub async fn respond(&self, response: Response) -> Result<()> {
        self.response_tx
            .send(response)
            .await
            .map_err(|_| KwLogError::communication("Logger side closed"))
    }

    /// Publish the link state
    pub fn set_status(&self, status: LinkStatus) {
        // No receivers only means the logger is gone
        let _ = self.status_tx.send(status);
    }
}
