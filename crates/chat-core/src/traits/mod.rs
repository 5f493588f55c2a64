//! Ports consumed by the application layer

mod clock;
mod repositories;

pub use clock::{Clock, ManualClock, SystemClock};
pub use repositories::{MessageRepository, ParticipantRepository, RepoResult};
