//! Calendar API facade.

use std::sync::Arc;

use gcal_auth::{Credential, KeyMaterial};
use gcal_core::{ConfigError, ServiceAccountConfig};
use tokio_util::sync::CancellationToken;

use crate::resource::ResourceCore;
use crate::resources::{Acl, CalendarList, Calendars, Channels, Colors, Events, FreeBusy, Settings};
use crate::rest::RestClient;
use crate::transport::{HttpTransport, Transport};

pub const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Entry point: one credential, one transport, one wrapper per resource.
///
/// Cheap to clone; clones share the transport and its token cache.
#[derive(Clone)]
pub struct CalendarApi {
    rest: Arc<RestClient>,
    credential: Arc<Credential>,
    base_url: String,
    timezone: String,
    events: Events,
    calendars: Calendars,
    calendar_list: CalendarList,
    acl: Acl,
    settings: Settings,
    free_busy: FreeBusy,
    colors: Colors,
    channels: Channels,
}

impl CalendarApi {
    /// Client authenticating as the configured service account.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the account id is empty or the key
    /// material is missing or ambiguous.
    pub fn new(config: &ServiceAccountConfig) -> Result<Self, ConfigError> {
        Self::with_transport(config, Arc::new(HttpTransport::service_account()))
    }

    /// Client sending every request through `transport`.
    ///
    /// # Errors
    /// Same configuration checks as [`CalendarApi::new`].
    pub fn with_transport(
        config: &ServiceAccountConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        config.check()?;

        let key_material = match (&config.key_file, &config.key) {
            (Some(path), _) if !path.as_os_str().is_empty() => KeyMaterial::File(path.clone()),
            (_, Some(key)) => KeyMaterial::Raw(key.clone()),
            _ => return Err(ConfigError::MissingKey(config.service_acct_id.clone())),
        };
        let credential = Arc::new(Credential::new(config.service_acct_id.clone(), key_material));

        tracing::info!(
            account = %credential.account_email,
            timezone = config.effective_timezone(),
            "Calendar API client ready"
        );

        Ok(Self::assemble(
            Arc::new(RestClient::new(transport)),
            credential,
            CALENDAR_API_BASE.to_string(),
            config.effective_timezone().to_string(),
        ))
    }

    fn assemble(
        rest: Arc<RestClient>,
        credential: Arc<Credential>,
        base_url: String,
        timezone: String,
    ) -> Self {
        let root = base_url.trim_end_matches('/');
        let core = |path: &str| {
            ResourceCore::new(
                Arc::clone(&rest),
                Arc::clone(&credential),
                format!("{}{}", root, path),
            )
        };

        let events = Events::new(core("/calendars"));
        let calendars = Calendars::new(core("/calendars"));
        let calendar_list = CalendarList::new(core("/users/me/calendarList"));
        let acl = Acl::new(core("/calendars"));
        let settings = Settings::new(core("/users/me/settings"));
        let free_busy = FreeBusy::new(core("/freeBusy"), timezone.clone());
        let colors = Colors::new(core("/colors"));
        let channels = Channels::new(core("/channels"));

        Self {
            rest,
            credential,
            base_url,
            timezone,
            events,
            calendars,
            calendar_list,
            acl,
            settings,
            free_busy,
            colors,
            channels,
        }
    }

    /// Same client pointed at another API root, e.g. a mock server.
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        Self::assemble(self.rest, self.credential, base_url.into(), self.timezone)
    }

    /// Client whose pending and future calls fail with `Cancelled` once
    /// `token` fires. This client is unaffected.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self::assemble(
            Arc::new(self.rest.with_cancellation(token)),
            Arc::clone(&self.credential),
            self.base_url.clone(),
            self.timezone.clone(),
        )
    }

    /// Timezone used by free/busy queries that don't name one.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn service_account(&self) -> &str {
        &self.credential.account_email
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn calendars(&self) -> &Calendars {
        &self.calendars
    }

    pub fn calendar_list(&self) -> &CalendarList {
        &self.calendar_list
    }

    pub fn acl(&self) -> &Acl {
        &self.acl
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn free_busy(&self) -> &FreeBusy {
        &self.free_busy
    }

    pub fn colors(&self) -> &Colors {
        &self.colors
    }

    pub fn channels(&self) -> &Channels {
        &self.channels
    }
}
