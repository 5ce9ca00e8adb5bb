//! Enrolled device endpoints: registration, removal, and listing.

use axum::extract::{Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::error::ApiError;
use crate::models::{DeviceList, DeviceSummary, NewDevice, Ret};
use crate::Config;

// ---

pub fn router() -> Router<(PgPool, Config)> {
    // ---
    Router::new()
        .route("/devices/register", post(register))
        // The web frontend sends removals as PUT; both verbs work.
        .route("/devices/remove", put(remove).delete(remove))
        .route("/devices", get(list))
}

/// Handle `POST /devices/register`: enroll the device and return the
/// generated id as `{"ret": <did>}`. A `lid` that does not exist is
/// rejected by the foreign-key constraint and surfaced as a client error.
async fn register(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(device): Json<NewDevice>,
) -> Result<Json<Ret<i32>>, ApiError> {
    // ---
    device.validate()?;

    let did: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO enroll_device (lid, time_added, type, model)
        VALUES ($1, $2, $3, $4)
        RETURNING did
        "#,
    )
    .bind(device.lid)
    .bind(device.time_added)
    .bind(&device.device_type)
    .bind(&device.model)
    .fetch_one(&pool)
    .await?;

    info!("registered device did={did} at location lid={}", device.lid);
    Ok(Json(Ret { ret: did }))
}

/// Query string of `PUT|DELETE /devices/remove`.
#[derive(Debug, Deserialize)]
struct RemoveParams {
    device_id: i32,
}

/// Handle `PUT|DELETE /devices/remove?device_id=`.
///
/// Returns the number of rows deleted as `{"ret": <count>}`; removing an
/// unknown id is a no-op reported as zero. The device's event history goes
/// with it (ON DELETE CASCADE).
async fn remove(
    State((pool, _config)): State<(PgPool, Config)>,
    Query(params): Query<RemoveParams>,
) -> Result<Json<Ret<u64>>, ApiError> {
    // ---
    let result = sqlx::query("DELETE FROM enroll_device WHERE did = $1")
        .bind(params.device_id)
        .execute(&pool)
        .await?;

    info!(
        "removed device did={} ({} row(s))",
        params.device_id,
        result.rows_affected()
    );
    Ok(Json(Ret {
        ret: result.rows_affected(),
    }))
}

/// Query string of `GET /devices`.
#[derive(Debug, Deserialize)]
struct ListParams {
    user_id: i32,
}

/// Handle `GET /devices?user_id=`: every device enrolled at one of the
/// customer's locations, with the location's address, wrapped as
/// `{"Devices": [...]}`. Unknown customers yield an empty list.
async fn list(
    State((pool, _config)): State<(PgPool, Config)>,
    Query(params): Query<ListParams>,
) -> Result<Json<DeviceList>, ApiError> {
    // ---
    let devices: Vec<DeviceSummary> = sqlx::query_as(
        r#"
        SELECT
            ed.did     AS device_id,
            ed.type    AS device_type,
            ed.model   AS model,
            sl.address AS location_address
        FROM service_location sl
        JOIN enroll_device ed ON sl.lid = ed.lid
        WHERE sl.cid = $1
        ORDER BY ed.did
        "#,
    )
    .bind(params.user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(DeviceList { devices }))
}
