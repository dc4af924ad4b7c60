//! Access control rules of a calendar (`calendars/{calendarId}/acl`).

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::NormalizedError;
use crate::resource::{Operation, Request, ResourceCore};
use crate::rest::QueryParams;
use crate::types::{AclRuleDeleted, WatchRequest};

const LIST: Operation = Operation::get("Acl.list");
const GET: Operation = Operation::get("Acl.get");
const INSERT: Operation = Operation::post("Acl.insert");
const UPDATE: Operation = Operation::put("Acl.update");
const DELETE: Operation = Operation::delete("Acl.delete");
const WATCH: Operation = Operation::post("Acl.watch");

#[derive(Clone)]
pub struct Acl {
    core: ResourceCore,
}

impl Acl {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn check_ids(op: &Operation, calendar_id: &str, rule_id: &str) -> Result<(), NormalizedError> {
        op.require(calendar_id, "calendarId")?;
        op.require(rule_id, "ruleId")
    }

    /// # Errors
    /// Validation, status or transport failures tagged `Acl.list`.
    #[instrument(skip(self, query), level = "info")]
    pub async fn list(
        &self,
        calendar_id: &str,
        query: &QueryParams,
    ) -> Result<Vec<Value>, NormalizedError> {
        LIST.require(calendar_id, "calendarId")?;
        let url = self.core.url(&[calendar_id, "acl"]);
        self.core
            .items(&LIST, Request::new(url).query(query.clone()))
            .await
    }

    /// # Errors
    /// Validation, status or transport failures tagged `Acl.get`.
    #[instrument(skip(self), level = "info")]
    pub async fn get(&self, calendar_id: &str, rule_id: &str) -> Result<Value, NormalizedError> {
        Self::check_ids(&GET, calendar_id, rule_id)?;
        let url = self.core.url(&[calendar_id, "acl", rule_id]);
        self.core.body(&GET, Request::new(url)).await
    }

    /// Grant access, e.g. `{"role": "reader", "scope": {"type": "default"}}`.
    ///
    /// # Errors
    /// Validation, status or transport failures tagged `Acl.insert`.
    #[instrument(skip(self, rule, query), level = "info")]
    pub async fn insert<B: Serialize + ?Sized>(
        &self,
        calendar_id: &str,
        rule: &B,
        query: &QueryParams,
    ) -> Result<Value, NormalizedError> {
        INSERT.require(calendar_id, "calendarId")?;
        let body = INSERT.body(rule)?;
        let url = self.core.url(&[calendar_id, "acl"]);
        self.core
            .body(&INSERT, Request::new(url).query(query.clone()).body(body))
            .await
    }

    /// # Errors
    /// Validation, status or transport failures tagged `Acl.update`.
    #[instrument(skip(self, rule, query), level = "info")]
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        calendar_id: &str,
        rule_id: &str,
        rule: &B,
        query: &QueryParams,
    ) -> Result<Value, NormalizedError> {
        Self::check_ids(&UPDATE, calendar_id, rule_id)?;
        let body = UPDATE.body(rule)?;
        let url = self.core.url(&[calendar_id, "acl", rule_id]);
        self.core
            .body(&UPDATE, Request::new(url).query(query.clone()).body(body))
            .await
    }

    /// # Errors
    /// Validation, status or transport failures tagged `Acl.delete`.
    #[instrument(skip(self), level = "info")]
    pub async fn delete(
        &self,
        calendar_id: &str,
        rule_id: &str,
    ) -> Result<AclRuleDeleted, NormalizedError> {
        Self::check_ids(&DELETE, calendar_id, rule_id)?;
        let url = self.core.url(&[calendar_id, "acl", rule_id]);
        let reply = self.core.send(&DELETE, Request::new(url)).await?;

        Ok(AclRuleDeleted {
            rule_id: rule_id.to_string(),
            calendar_id: calendar_id.to_string(),
            status_code: reply.status_code,
            status_message: reply.status_message,
            message: "Acl rule deleted successfully".to_string(),
        })
    }

    /// # Errors
    /// Validation, status or transport failures tagged `Acl.watch`.
    #[instrument(skip(self, channel, query), level = "info")]
    pub async fn watch(
        &self,
        calendar_id: &str,
        channel: &WatchRequest,
        query: &QueryParams,
    ) -> Result<Value, NormalizedError> {
        WATCH.require(calendar_id, "calendarId")?;
        super::check_channel(&WATCH, channel)?;
        let body = WATCH.body(channel)?;
        let url = self.core.url(&[calendar_id, "acl", "watch"]);
        self.core
            .body(&WATCH, Request::new(url).query(query.clone()).body(body))
            .await
    }
}
