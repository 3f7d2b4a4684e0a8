use super::{ListArgs, StateArgs};
use crate::output::print_json;
use alarmctl_core::config::Config;
use alarmctl_core::fetch::check_batch_size;
use alarmctl_core::types::AlarmState;
use alarmctl_core::validate::validate_target;
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub list: ListArgs,

    #[command(flatten)]
    pub states: StateArgs,

    /// SNS topic ARN to check
    #[arg(long, env = "ALARMCTL_TOPIC_ARN")]
    pub topic_arn: Option<String>,
}

#[derive(Serialize)]
struct ValidationSummary {
    alarms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    states: Option<Vec<AlarmState>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic_arn: Option<String>,
    batch_size: usize,
}

/// Offline check of the inputs an `update` would use. Makes no AWS calls.
pub fn run(args: ValidateArgs, config: &Config, json: bool) -> anyhow::Result<()> {
    check_batch_size(config.batch_size)?;
    let alarms = args.list.load()?;

    let states = if args.states.is_empty() {
        None
    } else {
        Some(args.states.selected()?.into_iter().collect::<Vec<_>>())
    };
    let topic_arn = args
        .topic_arn
        .as_deref()
        .map(validate_target)
        .transpose()?;

    let summary = ValidationSummary {
        alarms,
        states,
        topic_arn,
        batch_size: config.batch_size,
    };

    if json {
        return print_json(&summary);
    }

    println!("OK: {} alarm(s) in {}", summary.alarms.len(), args.list.list_alarms.display());
    if let Some(states) = &summary.states {
        let names: Vec<&str> = states.iter().map(|s| s.as_str()).collect();
        println!("States: {}", names.join(", "));
    }
    if let Some(arn) = &summary.topic_arn {
        println!("Topic:  {arn}");
    }
    println!("Batch size: {}", summary.batch_size);
    Ok(())
}
