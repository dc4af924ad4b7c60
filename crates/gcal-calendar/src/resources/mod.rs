//! One wrapper per Calendar API resource.

pub mod acl;
pub mod calendar_list;
pub mod calendars;
pub mod channels;
pub mod colors;
pub mod events;
pub mod free_busy;
pub mod settings;

pub use acl::Acl;
pub use calendar_list::CalendarList;
pub use calendars::Calendars;
pub use channels::Channels;
pub use colors::Colors;
pub use events::Events;
pub use free_busy::FreeBusy;
pub use settings::Settings;

use crate::error::NormalizedError;
use crate::resource::Operation;
use crate::types::WatchRequest;

/// A channel registration needs its id and delivery address.
fn check_channel(op: &Operation, channel: &WatchRequest) -> Result<(), NormalizedError> {
    op.require(&channel.id, "channel id")?;
    op.require(&channel.address, "channel address")
}
