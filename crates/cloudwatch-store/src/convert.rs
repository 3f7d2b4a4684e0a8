use alarmctl_core::store::ActionUpdate;
use alarmctl_core::types::{AlarmRecord, AlarmState};
use aws_sdk_cloudwatch::operation::put_metric_alarm::builders::PutMetricAlarmFluentBuilder;
use aws_sdk_cloudwatch::types::MetricAlarm;
use aws_sdk_cloudwatch::Client;

fn current_actions(alarm: &MetricAlarm, state: AlarmState) -> &[String] {
    match state {
        AlarmState::Ok => alarm.ok_actions(),
        AlarmState::InAlarm => alarm.alarm_actions(),
        AlarmState::InsufficientData => alarm.insufficient_data_actions(),
    }
}

/// Alarms without a name cannot be addressed and are skipped.
pub fn record_from_alarm(alarm: &MetricAlarm) -> Option<AlarmRecord> {
    let name = alarm.alarm_name()?;
    Some(AlarmRecord {
        name: name.to_string(),
        arn: alarm.alarm_arn().map(str::to_string),
        ok_actions: alarm.ok_actions().to_vec(),
        alarm_actions: alarm.alarm_actions().to_vec(),
        insufficient_data_actions: alarm.insufficient_data_actions().to_vec(),
    })
}

/// All three action lists for the write: updated ones from `update`, the rest
/// as CloudWatch returned them. Order: OK, ALARM, INSUFFICIENT_DATA.
pub fn merged_actions(alarm: &MetricAlarm, update: &ActionUpdate) -> [Vec<String>; 3] {
    [AlarmState::Ok, AlarmState::InAlarm, AlarmState::InsufficientData].map(|state| {
        update
            .actions
            .get(&state)
            .cloned()
            .unwrap_or_else(|| current_actions(alarm, state).to_vec())
    })
}

fn non_empty<T: Clone>(items: &[T]) -> Option<Vec<T>> {
    (!items.is_empty()).then(|| items.to_vec())
}

/// Rebuild a `PutMetricAlarm` request from the described definition.
///
/// `PutMetricAlarm` replaces the whole alarm, so every configurable field is
/// carried over; only the action lists differ.
pub(crate) fn put_request(
    client: &Client,
    alarm: &MetricAlarm,
    update: &ActionUpdate,
) -> PutMetricAlarmFluentBuilder {
    let [ok, in_alarm, insufficient] = merged_actions(alarm, update);
    client
        .put_metric_alarm()
        .alarm_name(&update.alarm)
        .set_alarm_description(alarm.alarm_description().map(str::to_string))
        .set_actions_enabled(alarm.actions_enabled())
        .set_ok_actions(Some(ok))
        .set_alarm_actions(Some(in_alarm))
        .set_insufficient_data_actions(Some(insufficient))
        .set_metric_name(alarm.metric_name().map(str::to_string))
        .set_namespace(alarm.namespace().map(str::to_string))
        .set_statistic(alarm.statistic().cloned())
        .set_extended_statistic(alarm.extended_statistic().map(str::to_string))
        .set_dimensions(non_empty(alarm.dimensions()))
        .set_period(alarm.period())
        .set_unit(alarm.unit().cloned())
        .set_evaluation_periods(alarm.evaluation_periods())
        .set_datapoints_to_alarm(alarm.datapoints_to_alarm())
        .set_threshold(alarm.threshold())
        .set_comparison_operator(alarm.comparison_operator().cloned())
        .set_treat_missing_data(alarm.treat_missing_data().map(str::to_string))
        .set_evaluate_low_sample_count_percentile(
            alarm.evaluate_low_sample_count_percentile().map(str::to_string),
        )
        .set_metrics(non_empty(alarm.metrics()))
        .set_threshold_metric_id(alarm.threshold_metric_id().map(str::to_string))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
