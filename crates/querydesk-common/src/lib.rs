pub mod errors;
pub mod events;
pub mod id;
pub mod notifications;

pub use errors::{ConfigError, QueryDeskError};
pub use events::{Event, EventBus};
pub use id::{new_correlation_id, SessionId};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
