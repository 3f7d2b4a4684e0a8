pub mod show;
pub mod update;
pub mod validate;

use alarmctl_core::alarm_list::load_alarm_list;
use alarmctl_core::config::Config;
use alarmctl_core::types::AlarmState;
use alarmctl_core::validate::{parse_state_list, states_from_flags};
use anyhow::Context;
use clap::Args;
use cloudwatch_store::{CloudWatchStore, StoreSettings};
use std::collections::BTreeSet;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Shared arguments
// ---------------------------------------------------------------------------

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// JSON file with alarm names: `["a", ...]` or `{"alarms": ["a", ...]}`
    #[arg(long = "list-alarms", env = "ALARMCTL_LIST_ALARMS")]
    pub list_alarms: PathBuf,
}

impl ListArgs {
    pub fn load(&self) -> anyhow::Result<Vec<String>> {
        load_alarm_list(&self.list_alarms).with_context(|| {
            format!("failed to load alarm list {}", self.list_alarms.display())
        })
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct StateArgs {
    /// Comma-separated states: OK,IN_ALARM,INSUFFICIENT_DATA
    #[arg(long, env = "ALARMCTL_STATES", conflicts_with_all = ["ok", "in_alarm", "insufficient_data"])]
    pub states: Option<String>,

    /// Select the OK state
    #[arg(long)]
    pub ok: bool,

    /// Select the IN_ALARM state
    #[arg(long)]
    pub in_alarm: bool,

    /// Select the INSUFFICIENT_DATA state
    #[arg(long)]
    pub insufficient_data: bool,
}

impl StateArgs {
    /// The selected states, from `--states` or the per-state flags.
    pub fn selected(&self) -> alarmctl_core::Result<BTreeSet<AlarmState>> {
        match &self.states {
            Some(list) => parse_state_list(list),
            None => states_from_flags(self.ok, self.in_alarm, self.insufficient_data),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_none() && !self.ok && !self.in_alarm && !self.insufficient_data
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// AWS region (default: SDK resolution)
    #[arg(long, env = "ALARMCTL_REGION")]
    pub region: Option<String>,

    /// Override the CloudWatch endpoint (e.g. LocalStack)
    #[arg(long, env = "ALARMCTL_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Alarm names per DescribeAlarms call (1-100)
    #[arg(long, env = "ALARMCTL_BATCH_SIZE")]
    pub batch_size: Option<usize>,
}

impl ConnectionArgs {
    pub fn batch_size(&self, config: &Config) -> usize {
        self.batch_size.unwrap_or(config.batch_size)
    }

    pub fn connect(&self, config: &Config) -> anyhow::Result<CloudWatchStore> {
        let settings = StoreSettings {
            region: self.region.clone().or_else(|| config.region.clone()),
            endpoint_url: self
                .endpoint_url
                .clone()
                .or_else(|| config.endpoint_url.clone()),
        };
        CloudWatchStore::connect(settings).context("failed to create CloudWatch client")
    }
}
