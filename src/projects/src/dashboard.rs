use std::collections::HashMap;

use chrono::{DateTime, Days, Utc};

use common::error::{TechdocError, TechdocResult};
use types::project::{DashboardResp, TrendPoint};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;
const TREND_DAYS: usize = 14;

pub async fn dashboard() -> TechdocResult<DashboardResp> {
    let now = common::timestamp_millis();

    let projects_total = storage::project::count()
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    let projects_last_week = storage::project::count_since(now - 7 * DAY_MILLIS)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    let equipments_total = storage::equipment::count()
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    let points_total = storage::point::count()
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;

    let equipments_by_type = storage::equipment::count_by_type()
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?
        .into_iter()
        .map(|(typ, count)| (typ, count as usize))
        .collect();

    Ok(DashboardResp {
        projects_total: projects_total as usize,
        projects_last_week: projects_last_week as usize,
        equipments_total: equipments_total as usize,
        points_total: points_total as usize,
        equipments_by_type,
        trends: trends(TREND_DAYS).await?,
    })
}

/// Projects created per day over the trailing window, one contiguous
/// entry per day including empty ones.
async fn trends(length: usize) -> TechdocResult<Vec<TrendPoint>> {
    let today = Utc::now().date_naive();
    let from = today
        .checked_sub_days(Days::new(length as u64 - 1))
        .unwrap_or(today);
    let from_ts = from
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis();

    let rows = storage::project::read_ts_since(from_ts)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for ts in rows {
        if let Some(dt) = DateTime::from_timestamp_millis(ts) {
            *counts
                .entry(dt.date_naive().format("%Y-%m-%d").to_string())
                .or_default() += 1;
        }
    }

    let mut series = Vec::with_capacity(length);
    for i in 0..length {
        let date = from
            .checked_add_days(Days::new(i as u64))
            .unwrap_or(today)
            .format("%Y-%m-%d")
            .to_string();
        series.push(TrendPoint {
            x: i,
            y: counts.get(&date).copied().unwrap_or(0),
            date,
        });
    }
    Ok(series)
}
