use super::{ConnectionArgs, ListArgs, StateArgs};
use crate::output::{format_actions, print_json, rule};
use alarmctl_core::config::Config;
use alarmctl_core::execute::RunReport;
use alarmctl_core::fetch::check_batch_size;
use alarmctl_core::run::{run_update, UpdateRequest};
use alarmctl_core::types::{AlarmPlan, Operation};
use alarmctl_core::validate::{validate_target, Selection};
use anyhow::Context;
use clap::Args;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// add or remove
    #[arg(long, env = "ALARMCTL_ACTION")]
    pub action: Operation,

    #[command(flatten)]
    pub states: StateArgs,

    /// SNS topic ARN to add or remove
    #[arg(long, env = "ALARMCTL_TOPIC_ARN")]
    pub topic_arn: String,

    /// Show what would change without writing anything
    #[arg(long, env = "ALARMCTL_DRY_RUN", value_parser = clap::builder::FalseyValueParser::new())]
    pub dry_run: bool,

    /// Fail if any listed alarm does not exist
    #[arg(long)]
    pub fail_on_missing: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(args: UpdateArgs, config: &Config, json: bool) -> anyhow::Result<()> {
    // Everything that can be checked offline is checked before a client exists.
    let batch_size = args.connection.batch_size(config);
    check_batch_size(batch_size)?;
    let selection = Selection {
        target: validate_target(&args.topic_arn)?,
        states: args.states.selected()?,
    };
    let alarms = args.list.load()?;

    let mut store = args.connection.connect(config)?;
    let request = UpdateRequest {
        alarms,
        operation: args.action,
        target: selection.target.clone(),
        states: selection.states.iter().map(|s| s.as_str().to_string()).collect(),
        dry_run: args.dry_run,
        batch_size,
        fail_on_missing: args.fail_on_missing || config.fail_on_missing,
    };
    let report = run_update(&mut store, request).context("update aborted")?;

    if json {
        print_json(&report)?;
    } else {
        write_report(&mut io::stdout().lock(), &report, args.action, &selection)?;
    }

    if !report.succeeded() {
        anyhow::bail!("{} alarm(s) failed to update", report.counts.failed);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn status(report: &RunReport, plan: &AlarmPlan) -> String {
    if let Some(f) = report.failure(&plan.alarm) {
        return format!("FAILED: {}", f.error);
    }
    match (plan.changed, report.dry_run) {
        (true, true) => "would change".to_string(),
        (true, false) => "updated".to_string(),
        (false, _) => "no change".to_string(),
    }
}

fn write_report(
    out: &mut impl Write,
    report: &RunReport,
    op: Operation,
    selection: &Selection,
) -> io::Result<()> {
    writeln!(out, "{}", rule())?;
    if report.dry_run {
        writeln!(out, "DRY RUN - no changes will be made")?;
    }
    writeln!(out, "Action: {}", op.as_str().to_uppercase())?;
    writeln!(out, "Topic:  {}", selection.target)?;
    let states: Vec<&str> = selection.states.iter().map(|s| s.as_str()).collect();
    writeln!(out, "States: {}", states.join(", "))?;
    writeln!(out, "{}", rule())?;

    for plan in &report.plans {
        writeln!(out)?;
        writeln!(out, "Alarm: {} ({})", plan.alarm, status(report, plan))?;
        for o in &plan.outcomes {
            writeln!(out, "  [{}] {}", o.state, o.classification)?;
            writeln!(out, "      before: {}", format_actions(&o.previous))?;
            writeln!(out, "      after:  {}", format_actions(&o.new))?;
        }
    }

    if report.plans.is_empty() {
        writeln!(out)?;
        writeln!(out, "None of the listed alarms were found.")?;
    }

    if !report.not_found.is_empty() {
        writeln!(out)?;
        writeln!(out, "Not found ({}):", report.not_found.len())?;
        for name in &report.not_found {
            writeln!(out, "  {name}")?;
        }
    }

    let c = &report.counts;
    writeln!(out)?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "Summary:")?;
    writeln!(out, "  Attempted: {}", c.attempted)?;
    writeln!(out, "  Changed:   {}", c.changed)?;
    writeln!(out, "  Unchanged: {}", c.unchanged)?;
    writeln!(out, "  Not found: {}", c.not_found)?;
    if !report.dry_run {
        writeln!(out, "  Written:   {}", c.written)?;
        writeln!(out, "  Failed:    {}", c.failed)?;
    }
    writeln!(out, "{}", rule())
}
