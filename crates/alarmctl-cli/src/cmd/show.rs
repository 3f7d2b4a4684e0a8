use super::{ConnectionArgs, ListArgs};
use crate::output::{format_actions, print_json, print_table};
use alarmctl_core::config::Config;
use alarmctl_core::fetch::{check_batch_size, fetch};
use alarmctl_core::types::AlarmState;
use anyhow::Context;
use clap::Args;

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub list: ListArgs,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Read-only view of the current action lists for the listed alarms.
pub fn run(args: ShowArgs, config: &Config, json: bool) -> anyhow::Result<()> {
    let batch_size = args.connection.batch_size(config);
    check_batch_size(batch_size)?;
    let alarms = args.list.load()?;

    let mut store = args.connection.connect(config)?;
    let fetched = fetch(&mut store, &alarms, batch_size).context("failed to describe alarms")?;

    if json {
        return print_json(&fetched);
    }

    let mut rows = Vec::new();
    for record in fetched.records.values() {
        for &state in AlarmState::all() {
            rows.push(vec![
                record.name.clone(),
                state.to_string(),
                format_actions(record.actions(state)),
            ]);
        }
    }
    if rows.is_empty() {
        println!("No alarms found.");
    } else {
        print_table(&["ALARM", "STATE", "ACTIONS"], rows);
    }

    if !fetched.not_found.is_empty() {
        println!();
        println!("Not found ({}):", fetched.not_found.len());
        for name in &fetched.not_found {
            println!("  {name}");
        }
    }
    Ok(())
}
