//! Port for delivering the outbound SMS reply.

use async_trait::async_trait;
use domain::ReplyMessage;
#[cfg(test)]
use mockall::automock;

use crate::error::PipelineError;

/// Delivers composed replies back to the rider.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SmsDeliveryPort: Send + Sync {
    /// Send `reply` to the rider identified by `recipient_id`.
    ///
    /// One attempt per request; a failed send is final.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::DeliveryFailed`] when the gateway rejects
    /// or cannot carry the message.
    async fn send_reply(
        &self,
        recipient_id: &str,
        reply: &ReplyMessage,
    ) -> Result<(), PipelineError>;
}
