//! User settings (`users/me/settings`). Read-only.

use serde_json::Value;
use tracing::instrument;

use crate::error::NormalizedError;
use crate::resource::{Operation, Request, ResourceCore};
use crate::rest::QueryParams;
use crate::types::WatchRequest;

const LIST: Operation = Operation::get("Settings.list");
const GET: Operation = Operation::get("Settings.get");
const WATCH: Operation = Operation::post("Settings.watch");

#[derive(Clone)]
pub struct Settings {
    core: ResourceCore,
}

impl Settings {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    /// # Errors
    /// Status or transport failures tagged `Settings.list`.
    #[instrument(skip(self, query), level = "info")]
    pub async fn list(&self, query: &QueryParams) -> Result<Vec<Value>, NormalizedError> {
        self.core
            .items(&LIST, Request::new(self.core.url(&[])).query(query.clone()))
            .await
    }

    /// A single setting such as `timezone` or `weekStart`.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `Settings.get`.
    #[instrument(skip(self), level = "info")]
    pub async fn get(&self, setting_id: &str) -> Result<Value, NormalizedError> {
        GET.require(setting_id, "settingId")?;
        self.core
            .body(&GET, Request::new(self.core.url(&[setting_id])))
            .await
    }

    /// # Errors
    /// Validation, status or transport failures tagged `Settings.watch`.
    #[instrument(skip(self, channel, query), level = "info")]
    pub async fn watch(
        &self,
        channel: &WatchRequest,
        query: &QueryParams,
    ) -> Result<Value, NormalizedError> {
        super::check_channel(&WATCH, channel)?;
        let body = WATCH.body(channel)?;
        self.core
            .body(
                &WATCH,
                Request::new(self.core.url(&["watch"]))
                    .query(query.clone())
                    .body(body),
            )
            .await
    }
}
