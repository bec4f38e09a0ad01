//! Support message handlers.

mod submit_support_message;

pub use submit_support_message::{SubmitSupportMessageCommand, SubmitSupportMessageHandler};
