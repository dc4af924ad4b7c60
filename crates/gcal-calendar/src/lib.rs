//! Google Calendar v3 client.
//!
//! [`CalendarApi`] is the entry point; it hands out one wrapper per REST
//! resource. Every wrapper call either yields the extracted payload or a
//! [`NormalizedError`] naming the failing operation.

pub mod api;
pub mod error;
pub mod resource;
pub mod resources;
pub mod rest;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{CalendarApi, CALENDAR_API_BASE};
pub use error::{ErrorDetail, NormalizedError, RemoteStatus, RestError, TransportError};
pub use resources::{Acl, CalendarList, Calendars, Channels, Colors, Events, FreeBusy, Settings};
pub use rest::{QueryParams, RestClient};
pub use transport::{HttpTransport, ResourceRequest, ResourceResponse, Transport};
pub use types::{
    AclRuleDeleted, Attendee, ChannelStop, ChannelStopped, Cleared, DeleteOptions, Deleted,
    EventDateTime, EventInput, EventListQuery, EventStatus, FreeBusyQuery, ReminderOverride,
    Reminders, WatchRequest,
};
