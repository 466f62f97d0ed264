//! In-process ECU stand-in serving canned measurement blocks

use super::{EcuEndpoint, LinkStatus, MeasurementBlock, Response};
use crate::config::SimulatorConfig;
use crate::error::Result;
use crate::logging::get_logger;
use std::collections::HashMap;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Transport actor answering group requests from a fixed table.
///
/// Unknown groups get a no-acknowledgment, like a real ECU asked for a group
/// it does not implement.
pub struct SimulatedEcu {
    responses: HashMap<u8, Response>,
    latency: Duration,
    fail_after: Option<u64>,
}

impl SimulatedEcu {
    pub fn new(latency: Duration) -> Self {
        Self {
            responses: HashMap::new(),
            latency,
            fail_after: None,
        }
    }

    /// Build from configuration
    pub fn from_config(config: &SimulatorConfig) -> Result<Self> {
        let mut ecu = Self::new(Duration::from_millis(config.latency_ms));
        for g in &config.groups {
            let block = MeasurementBlock::try_from(g.block.as_slice())?;
            ecu = ecu.with_group(g.group, block);
        }
        Ok(ecu)
    }

    /// Serve `block` for `group`
    pub fn with_group(self, group: u8, block: MeasurementBlock) -> Self {
        self.with_response(group, Response::Measurement(block))
    }

    /// Serve an arbitrary response for `group`
    pub fn with_response(mut self, group: u8, response: Response) -> Self {
        self.responses.insert(group, response);
        self
    }

    /// Report a degraded link from the `count`-th response on
    pub fn fail_after(mut self, count: u64) -> Self {
        self.fail_after = Some(count);
        self
    }

    /// Run the actor until the logger side goes away
    pub fn spawn(self, mut endpoint: EcuEndpoint) -> JoinHandle<()> {
        tokio::spawn(async move {
            let logger = get_logger("simulator");
            let mut served: u64 = 0;
            endpoint.set_status(LinkStatus::Operational);

            while let Some(group) = endpoint.next_request().await {
                if !self.latency.is_zero() {
                    sleep(self.latency).await;
                }
                let response = self
                    .responses
                    .get(&group)
                    .cloned()
                    .unwrap_or(Response::NoAck);
                served += 1;
                // Degrade before the response is visible to the logger
                if self.fail_after.is_some_and(|n| served >= n) {
                    logger.info(&format!("Link degraded after {} responses", served));
                    endpoint.set_status(LinkStatus::Degraded);
                }
                if endpoint.respond(response).await.is_err() {
                    break;
                }
            }
            logger.debug(&format!("Simulator stopped after {} responses", served));
        })
    }
}
