//! Notification channels opened by the `watch` operations.

use tracing::instrument;

use crate::error::NormalizedError;
use crate::resource::{Operation, Request, ResourceCore};
use crate::types::{ChannelStop, ChannelStopped};

const STOP: Operation = Operation::new("Channels.stop", crate::resource::Call::Post, &[204]);

#[derive(Clone)]
pub struct Channels {
    core: ResourceCore,
}

impl Channels {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    /// Stop push notifications on a channel.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `Channels.stop`.
    #[instrument(skip(self), level = "info")]
    pub async fn stop(&self, channel: &ChannelStop) -> Result<ChannelStopped, NormalizedError> {
        STOP.require(&channel.id, "id")?;
        STOP.require(&channel.resource_id, "resourceId")?;
        let body = STOP.body(channel)?;

        let reply = self
            .core
            .send(&STOP, Request::new(self.core.url(&["stop"])).body(body))
            .await?;

        Ok(ChannelStopped {
            id: channel.id.clone(),
            resource_id: channel.resource_id.clone(),
            status_code: reply.status_code,
            status_message: reply.status_message,
            message: "Stop watching channel successfully".to_string(),
        })
    }
}
