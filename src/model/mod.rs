//! Domain model types (pure).

pub mod campaign;
pub mod error;
pub mod format;
pub mod key_action;

pub use campaign::{Campaign, CampaignDates, Metrics, Report};
pub use error::AppError;
pub use key_action::KeyAction;
