//! `cloudwatch-store` — [`AlarmStore`] backed by the CloudWatch API.
//!
//! ```text
//! alarmctl-core (sync)
//!     │  describe / put_actions
//!     ▼
//! CloudWatchStore      ← owns a current-thread Tokio runtime
//!     │  block_on
//!     ▼
//! aws-sdk-cloudwatch   ← DescribeAlarms / PutMetricAlarm
//! ```
//!
//! Credentials come from the SDK default provider chain (environment,
//! profile, web identity). Only metric alarms are handled.

mod convert;

use alarmctl_core::error::{AlarmError, Result};
use alarmctl_core::store::{ActionUpdate, AlarmStore};
use alarmctl_core::types::AlarmRecord;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudwatch::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_cloudwatch::types::{AlarmType, MetricAlarm};
use aws_sdk_cloudwatch::Client;
use std::collections::HashMap;

pub use convert::{merged_actions, record_from_alarm};

/// `DescribeAlarms` page size; matches the name-list limit so one batch is
/// normally one page.
const DESCRIBE_PAGE_SIZE: i32 = 100;

#[derive(Debug, Clone, Default)]
pub struct StoreSettings {
    /// Overrides the SDK default region.
    pub region: Option<String>,
    /// Endpoint override, e.g. LocalStack.
    pub endpoint_url: Option<String>,
}

pub struct CloudWatchStore {
    rt: tokio::runtime::Runtime,
    client: Client,
    /// Definitions returned by `describe`, needed to rebuild the full
    /// `PutMetricAlarm` request on write.
    definitions: HashMap<String, MetricAlarm>,
}

impl std::fmt::Debug for CloudWatchStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudWatchStore")
            .field("cached", &self.definitions.len())
            .finish()
    }
}

impl CloudWatchStore {
    pub fn connect(settings: StoreSettings) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = settings.region.filter(|r| !r.trim().is_empty()) {
            loader = loader.region(Region::new(region));
        }
        let sdk_config = rt.block_on(loader.load());

        let mut builder = aws_sdk_cloudwatch::config::Builder::from(&sdk_config);
        if let Some(endpoint) = settings.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }
        let client = Client::from_conf(builder.build());

        tracing::debug!(region = ?sdk_config.region(), "cloudwatch client ready");
        Ok(Self {
            rt,
            client,
            definitions: HashMap::new(),
        })
    }
}

fn sdk_message<E>(err: &E) -> String
where
    E: ProvideErrorMetadata + std::error::Error,
{
    match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        _ => DisplayErrorContext(err).to_string(),
    }
}

async fn describe_metric_alarms(
    client: &Client,
    names: &[String],
) -> std::result::Result<Vec<MetricAlarm>, String> {
    let mut alarms = Vec::new();
    let mut next_token: Option<String> = None;
    loop {
        let resp = client
            .describe_alarms()
            .set_alarm_names(Some(names.to_vec()))
            .alarm_types(AlarmType::MetricAlarm)
            .max_records(DESCRIBE_PAGE_SIZE)
            .set_next_token(next_token.take())
            .send()
            .await
            .map_err(|e| sdk_message(&e))?;

        alarms.extend(resp.metric_alarms().iter().cloned());
        match resp.next_token() {
            Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
            _ => break,
        }
    }
    Ok(alarms)
}

impl AlarmStore for CloudWatchStore {
    fn describe(&mut self, names: &[String]) -> Result<Vec<AlarmRecord>> {
        let alarms = self
            .rt
            .block_on(describe_metric_alarms(&self.client, names))
            .map_err(|e| AlarmError::BackendUnavailable(format!("DescribeAlarms failed: {e}")))?;

        let mut records = Vec::with_capacity(alarms.len());
        for alarm in alarms {
            if let Some(record) = record_from_alarm(&alarm) {
                self.definitions.insert(record.name.clone(), alarm);
                records.push(record);
            }
        }
        tracing::debug!(requested = names.len(), found = records.len(), "describe_alarms");
        Ok(records)
    }

    fn put_actions(&mut self, update: &ActionUpdate) -> Result<()> {
        let write_failed = |reason: String| AlarmError::WriteFailed {
            alarm: update.alarm.clone(),
            reason,
        };
        let alarm = self
            .definitions
            .get(&update.alarm)
            .ok_or_else(|| write_failed("alarm was not described in this run".into()))?;

        let request = convert::put_request(&self.client, alarm, update);
        self.rt
            .block_on(request.send())
            .map_err(|e| write_failed(sdk_message(&e)))?;
        Ok(())
    }
}
