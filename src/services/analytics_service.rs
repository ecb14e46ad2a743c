// src/services/analytics_service.rs

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    common::error::AppError,
    db::AnalyticsRepository,
    models::analytics::{
        DailyActivity, MetricRecord, MonthlyTrend, OrganizationActivity, OrganizationAnalytics,
        PlatformAnalytics,
    },
};

const DAILY_WINDOW_DAYS: i64 = 7;
const MONTHLY_WINDOWS: i64 = 6;
// Months are approximated as 30 days
const MONTH_DAYS: i64 = 30;
const TOP_ORGANIZATIONS: usize = 5;

#[derive(Clone)]
pub struct AnalyticsService {
    repo: AnalyticsRepository,
}

impl AnalyticsService {
    pub fn new(repo: AnalyticsRepository) -> Self {
        Self { repo }
    }

    pub async fn organization_analytics(
        &self,
        organization_id: i64,
        now: DateTime<Utc>,
    ) -> Result<OrganizationAnalytics, AppError> {
        let snapshot = self
            .repo
            .organization_snapshot(organization_id, earliest_window_start(now))
            .await?;

        Ok(OrganizationAnalytics {
            total_messages: snapshot.total_messages,
            total_appointments: snapshot.total_appointments,
            active_users: snapshot.active_users,
            avg_response_time: round2(snapshot.avg_response_time.unwrap_or(0.0)),
            daily_activity: daily_activity(
                now,
                &snapshot.message_timestamps,
                &snapshot.appointment_timestamps,
            ),
            monthly_trends: monthly_trends(
                now,
                &snapshot.message_timestamps,
                &snapshot.appointment_timestamps,
            ),
            channel_breakdown: snapshot.channel_breakdown,
            appointment_status_breakdown: snapshot.appointment_status_breakdown,
        })
    }

    pub async fn platform_analytics(&self) -> Result<PlatformAnalytics, AppError> {
        let snapshot = self.repo.platform_snapshot().await?;

        Ok(PlatformAnalytics {
            total_organizations: snapshot.total_organizations,
            active_organizations: snapshot.active_organizations,
            total_users: snapshot.total_users,
            total_messages: snapshot.total_messages,
            total_appointments: snapshot.total_appointments,
            top_organizations: rank_top_organizations(snapshot.activity),
        })
    }

    pub async fn list_metrics(
        &self,
        organization_id: i64,
        metric_name: Option<&str>,
    ) -> Result<Vec<MetricRecord>, AppError> {
        self.repo.list_metrics(organization_id, metric_name).await
    }
}

// =============================================================================
//  BUCKETING
// =============================================================================

/// Start of the current month with the time of day of `now` kept.
fn current_month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(i64::from(now.day0()))
}

/// Half-open `[start, end)` windows, most recent first.
pub fn monthly_windows(now: DateTime<Utc>) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let month_start = current_month_start(now);
    (0..MONTHLY_WINDOWS)
        .map(|i| {
            let start = month_start - Duration::days(MONTH_DAYS * i);
            (start, start + Duration::days(MONTH_DAYS))
        })
        .collect()
}

/// Oldest instant any daily or monthly bucket can cover.
pub fn earliest_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let first_day = (now.date_naive() - Duration::days(DAILY_WINDOW_DAYS - 1))
        .and_time(NaiveTime::MIN)
        .and_utc();
    let oldest_month = monthly_windows(now)
        .last()
        .map(|(start, _)| *start)
        .unwrap_or(first_day);
    first_day.min(oldest_month)
}

/// Today and the six preceding UTC days, most recent first, zero-filled.
pub fn daily_activity(
    now: DateTime<Utc>,
    messages: &[DateTime<Utc>],
    appointments: &[DateTime<Utc>],
) -> Vec<DailyActivity> {
    let today = now.date_naive();
    (0..DAILY_WINDOW_DAYS)
        .map(|offset| {
            let date = today - Duration::days(offset);
            let on_date = |ts: &&DateTime<Utc>| ts.date_naive() == date;
            DailyActivity {
                date,
                messages: messages.iter().filter(on_date).count() as i64,
                appointments: appointments.iter().filter(on_date).count() as i64,
            }
        })
        .collect()
}

pub fn monthly_trends(
    now: DateTime<Utc>,
    messages: &[DateTime<Utc>],
    appointments: &[DateTime<Utc>],
) -> Vec<MonthlyTrend> {
    monthly_windows(now)
        .into_iter()
        .map(|(start, end)| {
            let in_window = |ts: &&DateTime<Utc>| **ts >= start && **ts < end;
            MonthlyTrend {
                month: start.format("%b").to_string(),
                messages: messages.iter().filter(in_window).count() as i64,
                appointments: appointments.iter().filter(in_window).count() as i64,
            }
        })
        .collect()
}

/// Busiest organizations by message count. `activity` arrives ordered by
/// id and the sort is stable, so ties keep ascending id order.
pub fn rank_top_organizations(mut activity: Vec<OrganizationActivity>) -> Vec<OrganizationActivity> {
    activity.sort_by(|a, b| b.messages.cmp(&a.messages));
    activity.truncate(TOP_ORGANIZATIONS);
    activity
}

/// Two decimals, ties to even on the exact binary value (0.125 -> 0.12).
pub fn round2(value: f64) -> f64 {
    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
            rounded.mantissa() as f64 / 10f64.powi(rounded.scale() as i32)
        }
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn activity(id: i64, messages: i64) -> OrganizationActivity {
        OrganizationActivity {
            id,
            name: format!("Org {id}"),
            messages,
            appointments: 0,
        }
    }

    #[test]
    fn daily_activity_is_zero_filled_and_most_recent_first() {
        let now = at(2024, 6, 15, 14);
        let messages = vec![at(2024, 6, 15, 9), at(2024, 6, 15, 10), at(2024, 6, 15, 13)];

        let days = daily_activity(now, &messages, &[]);

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(days[0].messages, 3);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
        assert_eq!(days[1].messages, 0);
        assert_eq!(days[6].date, NaiveDate::from_ymd_opt(2024, 6, 9).unwrap());
        assert!(days.iter().all(|d| d.appointments == 0));
    }

    #[test]
    fn daily_activity_counts_each_entity_independently() {
        let now = at(2024, 6, 15, 14);
        let messages = vec![at(2024, 6, 13, 8)];
        let appointments = vec![at(2024, 6, 13, 23), at(2024, 6, 12, 0), at(2024, 5, 1, 12)];

        let days = daily_activity(now, &messages, &appointments);

        assert_eq!((days[2].messages, days[2].appointments), (1, 1));
        assert_eq!((days[3].messages, days[3].appointments), (0, 1));
        let total: i64 = days.iter().map(|d| d.appointments).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn monthly_windows_step_back_thirty_days_from_the_month_start() {
        let now = at(2024, 6, 15, 10);
        let windows = monthly_windows(now);

        assert_eq!(windows.len(), 6);
        assert_eq!(windows[0], (at(2024, 6, 1, 10), at(2024, 7, 1, 10)));
        assert_eq!(windows[1].0, at(2024, 5, 2, 10));
        assert_eq!(windows[1].1, windows[0].0);

        let labels: Vec<String> = monthly_trends(now, &[], &[])
            .into_iter()
            .map(|t| t.month)
            .collect();
        assert_eq!(labels, ["Jun", "May", "Apr", "Mar", "Feb", "Jan"]);
    }

    #[test]
    fn window_boundaries_are_half_open() {
        let now = at(2024, 6, 15, 10);
        let boundary = at(2024, 6, 1, 10);
        let trends = monthly_trends(now, &[boundary], &[boundary - Duration::seconds(1)]);

        assert_eq!(trends[0].messages, 1);
        assert_eq!(trends[1].messages, 0);
        assert_eq!(trends[0].appointments, 0);
        assert_eq!(trends[1].appointments, 1);
    }

    #[test]
    fn earliest_start_covers_the_oldest_month_window() {
        let now = at(2024, 6, 15, 10);
        assert_eq!(earliest_window_start(now), monthly_windows(now)[5].0);
        assert!(earliest_window_start(now) <= at(2024, 6, 9, 0));
    }

    #[test]
    fn top_organizations_are_capped_and_sorted() {
        let ranked = rank_top_organizations(vec![
            activity(1, 3),
            activity(2, 10),
            activity(3, 0),
            activity(4, 10),
            activity(5, 7),
            activity(6, 1),
            activity(7, 2),
        ]);

        let ids: Vec<i64> = ranked.iter().map(|o| o.id).collect();
        assert_eq!(ids, [2, 4, 5, 1, 7]);
        assert!(ranked.windows(2).all(|w| w[0].messages >= w[1].messages));
    }

    #[test]
    fn averages_round_to_two_decimals() {
        assert_eq!(round2(2.345_678), 2.35);
        assert_eq!(round2(12.0), 12.0);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn exact_ties_round_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.625), 0.62);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2((0.1 + 0.15) / 2.0), 0.12);
        // 2.675 is stored as 2.67499..., so it rounds down
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(65.5 / 3.0), 21.83);
    }
}
