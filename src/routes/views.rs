//! The four analytical views over the consumption time series.
//!
//! - `/views/1` – per-day consumption totals for one month
//! - `/views/2` – raw per-device events for one day
//! - `/views/3` – monthly totals next to the ±5% square-footage peer average
//! - `/views/4` – peak-priced usage crossed with cheaper same-day prices
//!
//! All four are stateless reads. Inputs are validated at the boundary
//! (typed extractors plus `window::*`), then bound into parameterized SQL;
//! unknown customer ids simply produce empty results. Time filtering uses
//! half-open `[start, end)` windows on the event/price timestamps.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::models::{DailyConsumptionRow, DeviceEventRow, PeerComparisonRow, Ret, SavingsRow};
use crate::window;
use crate::Config;

// ---

pub fn router() -> Router<(PgPool, Config)> {
    // ---
    Router::new()
        .route("/views/1", get(daily_consumption))
        .route("/views/2", get(device_breakdown))
        .route("/views/3", get(peer_comparison))
        .route("/views/4", get(peak_savings))
}

/// Query string of `/views/1` and `/views/3`.
#[derive(Debug, Deserialize)]
struct MonthParams {
    user_id: i32,
    month: u32,
    year: i32,
}

/// Query string of `/views/2` and `/views/4`.
#[derive(Debug, Deserialize)]
struct DayParams {
    user_id: i32,
    day: NaiveDate,
}

// ---

/// Handle `GET /views/1?user_id=&month=&year=`.
///
/// One row per calendar day of the month that has at least one
/// `energy_use` event across the customer's devices, with the values
/// summed per day. Months without events yield an empty list.
async fn daily_consumption(
    State((pool, _config)): State<(PgPool, Config)>,
    Query(params): Query<MonthParams>,
) -> Result<Json<Ret<Vec<DailyConsumptionRow>>>, ApiError> {
    // ---
    debug!(
        "GET /views/1 - user_id={} month={} year={}",
        params.user_id, params.month, params.year
    );
    let (start, end) = window::month_window(params.year, params.month)?;

    let rows = fetch_daily_consumption(&pool, params.user_id, start, end).await?;

    info!("GET /views/1 - returning {} day(s)", rows.len());
    Ok(Json(Ret { ret: rows }))
}

/// Handle `GET /views/2?user_id=&day=`.
///
/// Every raw `energy_use` event logged that day by the customer's
/// devices, one row per stored event, ordered by timestamp.
async fn device_breakdown(
    State((pool, _config)): State<(PgPool, Config)>,
    Query(params): Query<DayParams>,
) -> Result<Json<Ret<Vec<DeviceEventRow>>>, ApiError> {
    // ---
    debug!("GET /views/2 - user_id={} day={}", params.user_id, params.day);
    let (start, end) = window::day_window(params.day)?;

    let rows = fetch_device_breakdown(&pool, params.user_id, start, end).await?;

    info!("GET /views/2 - returning {} event(s)", rows.len());
    Ok(Json(Ret { ret: rows }))
}

/// Handle `GET /views/3?user_id=&month=&year=`.
///
/// For each of the customer's locations with consumption that month: its
/// monthly total alongside the average monthly total of other locations
/// whose square footage lies within ±5% (inclusive) of its own. The
/// average is null when the size band holds no other location.
async fn peer_comparison(
    State((pool, _config)): State<(PgPool, Config)>,
    Query(params): Query<MonthParams>,
) -> Result<Json<Ret<Vec<PeerComparisonRow>>>, ApiError> {
    // ---
    debug!(
        "GET /views/3 - user_id={} month={} year={}",
        params.user_id, params.month, params.year
    );
    let (start, end) = window::month_window(params.year, params.month)?;

    let rows = fetch_peer_comparison(&pool, params.user_id, start, end).await?;

    info!("GET /views/3 - returning {} location(s)", rows.len());
    Ok(Json(Ret { ret: rows }))
}

/// Handle `GET /views/4?user_id=&day=`.
///
/// Pairs every priced consumption moment of the customer's day against
/// every strictly cheaper price sample recorded that day for the involved
/// zip codes, with the savings each pairing would have bought. The result
/// grows as O(peak rows × cheaper samples).
async fn peak_savings(
    State((pool, _config)): State<(PgPool, Config)>,
    Query(params): Query<DayParams>,
) -> Result<Json<Ret<Vec<SavingsRow>>>, ApiError> {
    // ---
    debug!("GET /views/4 - user_id={} day={}", params.user_id, params.day);
    let (start, end) = window::day_window(params.day)?;

    let rows = fetch_peak_savings(&pool, params.user_id, start, end).await?;

    info!("GET /views/4 - returning {} pairing(s)", rows.len());
    Ok(Json(Ret { ret: rows }))
}

// ---

/// Sum `energy_use` values per calendar day over one customer's devices.
async fn fetch_daily_consumption(
    pool: &PgPool,
    user_id: i32,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<DailyConsumptionRow>, sqlx::Error> {
    // ---
    sqlx::query_as(
        r#"
        SELECT
            sl.cid AS user_id,
            CAST(de.timestamp AS DATE) AS date,
            SUM(de.value) AS total_energy_consumption
        FROM service_location sl
        JOIN enroll_device ed ON sl.lid = ed.lid
        JOIN device_event de ON ed.did = de.did
        WHERE sl.cid = $1
          AND de.event_label = 'energy_use'
          AND de.timestamp >= $2
          AND de.timestamp < $3
        GROUP BY sl.cid, CAST(de.timestamp AS DATE)
        ORDER BY date
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}

/// Every raw `energy_use` event for the customer's devices in the window,
/// unaggregated.
async fn fetch_device_breakdown(
    pool: &PgPool,
    user_id: i32,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<DeviceEventRow>, sqlx::Error> {
    // ---
    sqlx::query_as(
        r#"
        SELECT
            ed.did AS device_id,
            de.timestamp AS datetime,
            de.value AS energy_consumption
        FROM service_location sl
        JOIN enroll_device ed ON sl.lid = ed.lid
        JOIN device_event de ON ed.did = de.did
        WHERE sl.cid = $1
          AND de.event_label = 'energy_use'
          AND de.timestamp >= $2
          AND de.timestamp < $3
        ORDER BY de.timestamp, ed.did
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}

/// Monthly totals for the customer's locations, each beside the average
/// total of other locations within ±5% of its square footage.
///
/// `monthly` totals every location in the system once; the customer's
/// rows are then left-joined against it so a location with an empty size
/// band keeps its row with a null average. `peer.lid <> own.lid` keeps a
/// location from counting as its own peer.
async fn fetch_peer_comparison(
    pool: &PgPool,
    user_id: i32,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<PeerComparisonRow>, sqlx::Error> {
    // ---
    sqlx::query_as(
        r#"
        WITH monthly AS (
            SELECT
                sl.cid,
                sl.lid,
                sl.size_sqft,
                SUM(de.value) AS cons
            FROM service_location sl
            JOIN enroll_device ed ON sl.lid = ed.lid
            JOIN device_event de ON ed.did = de.did
            WHERE de.event_label = 'energy_use'
              AND de.timestamp >= $2
              AND de.timestamp < $3
            GROUP BY sl.cid, sl.lid, sl.size_sqft
        )
        SELECT
            own.lid AS location_id,
            own.size_sqft AS size_sqft,
            own.cons AS consumption,
            AVG(peer.cons) AS avg_peer_consumption
        FROM monthly own
        LEFT JOIN monthly peer
            ON peer.lid <> own.lid
           AND peer.size_sqft BETWEEN own.size_sqft * 0.95 AND own.size_sqft * 1.05
        WHERE own.cid = $1
        GROUP BY own.lid, own.size_sqft, own.cons
        ORDER BY own.lid
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}

/// Priced consumption moments crossed with cheaper same-day price samples.
///
/// `peak_usage` sums simultaneous events per location and joins the price
/// in effect at that exact timestamp and zip code; `prices` carries every
/// sample that day for the involved zips. Only pairs where the peak price
/// strictly exceeds the candidate are kept.
async fn fetch_peak_savings(
    pool: &PgPool,
    user_id: i32,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<SavingsRow>, sqlx::Error> {
    // ---
    sqlx::query_as(
        r#"
        WITH peak_usage AS (
            SELECT
                sl.lid,
                sl.zip_code,
                de.timestamp AS datetime,
                ep.price AS energy_price,
                SUM(de.value) AS energy_consumption
            FROM service_location sl
            JOIN enroll_device ed ON sl.lid = ed.lid
            JOIN device_event de ON ed.did = de.did
            JOIN energy_price ep
              ON ep.zip_code = sl.zip_code AND ep.datetime = de.timestamp
            WHERE sl.cid = $1
              AND de.event_label = 'energy_use'
              AND de.timestamp >= $2
              AND de.timestamp < $3
            GROUP BY sl.lid, sl.zip_code, de.timestamp, ep.price
        ),
        prices AS (
            SELECT ep.zip_code, ep.datetime, ep.price
            FROM energy_price ep
            WHERE ep.zip_code IN (SELECT zip_code FROM peak_usage)
              AND ep.datetime >= $2
              AND ep.datetime < $3
        )
        SELECT
            pu.datetime AS peak_time,
            pu.energy_price AS peak_energy_price,
            pu.energy_consumption AS peak_energy_consumption,
            op.datetime AS off_peak_time,
            op.price AS off_peak_energy_price,
            (pu.energy_price - op.price) * pu.energy_consumption AS potential_savings
        FROM peak_usage pu
        CROSS JOIN prices op
        WHERE pu.energy_price > op.price
        ORDER BY pu.datetime, op.datetime
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}
