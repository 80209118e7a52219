pub mod dispatcher;
pub mod twilio;

pub use dispatcher::AlertDispatcher;
pub use twilio::TwilioSender;

use crate::error::Result;

/// Sink for outbound alert messages.
///
/// `from` and `to` are channel-qualified addresses (`whatsapp:+1555...`).
#[async_trait::async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(&self, from: &str, to: &str, body: &str) -> Result<()>;
}
