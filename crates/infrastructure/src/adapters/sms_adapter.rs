//! SMS adapter - implements the reply-delivery port using integration_sms

use application::error::PipelineError;
use application::ports::SmsDeliveryPort;
use async_trait::async_trait;
use domain::ReplyMessage;
use integration_sms::SmsClient;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Adapter delivering composed replies through the SMS gateway
///
/// Sends are not retried: duplicate texts annoy riders more than a
/// missing one, and the pipeline already reports delivery failures.
pub struct Fast2SmsDeliveryAdapter {
    client: Arc<dyn SmsClient>,
}

impl std::fmt::Debug for Fast2SmsDeliveryAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fast2SmsDeliveryAdapter")
            .field("client", &"SmsClient")
            .finish()
    }
}

impl Fast2SmsDeliveryAdapter {
    /// Create a new delivery adapter
    pub fn new(client: Arc<dyn SmsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SmsDeliveryPort for Fast2SmsDeliveryAdapter {
    #[instrument(skip_all, fields(chars = reply.char_count()))]
    async fn send_reply(
        &self,
        recipient_id: &str,
        reply: &ReplyMessage,
    ) -> Result<(), PipelineError> {
        match self.client.send_sms(recipient_id, reply.text()).await {
            Ok(report) => {
                debug!(request_id = ?report.request_id, "reply accepted by the gateway");
                Ok(())
            },
            Err(err) => Err(PipelineError::DeliveryFailed(err.to_string())),
        }
    }
}
