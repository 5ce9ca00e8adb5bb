//! Service location endpoints: registration, removal, and listing.

use axum::extract::{Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::error::ApiError;
use crate::models::{LocationList, NewLocation, Ret, ServiceLocation};
use crate::Config;

// ---

pub fn router() -> Router<(PgPool, Config)> {
    // ---
    Router::new()
        .route("/locations/register", post(register))
        // The web frontend sends removals as PUT; both verbs work.
        .route("/locations/remove", put(remove).delete(remove))
        .route("/locations", get(list))
}

/// Handle `POST /locations/register`: insert the location and return the
/// generated id as `{"ret": <lid>}`. A `cid` that does not exist is
/// rejected by the foreign-key constraint and surfaced as a client error.
async fn register(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(location): Json<NewLocation>,
) -> Result<Json<Ret<i32>>, ApiError> {
    // ---
    location.validate()?;

    let lid: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO service_location
            (cid, address, unit_no, zip_code, start_date, size_sqft, num_beds, num_occupants)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING lid
        "#,
    )
    .bind(location.cid)
    .bind(&location.address)
    .bind(&location.unit_no)
    .bind(&location.zip_code)
    .bind(location.start_date)
    .bind(location.size_sqft)
    .bind(location.num_beds)
    .bind(location.num_occupants)
    .fetch_one(&pool)
    .await?;

    info!("registered location lid={lid} for customer cid={}", location.cid);
    Ok(Json(Ret { ret: lid }))
}

/// Query string of `PUT|DELETE /locations/remove`.
#[derive(Debug, Deserialize)]
struct RemoveParams {
    location_id: i32,
}

/// Handle `PUT|DELETE /locations/remove?location_id=`.
///
/// Returns the number of rows deleted as `{"ret": <count>}`; removing an
/// unknown id is a no-op reported as zero. Enrolled devices and their
/// events go with the location (ON DELETE CASCADE).
async fn remove(
    State((pool, _config)): State<(PgPool, Config)>,
    Query(params): Query<RemoveParams>,
) -> Result<Json<Ret<u64>>, ApiError> {
    // ---
    let result = sqlx::query("DELETE FROM service_location WHERE lid = $1")
        .bind(params.location_id)
        .execute(&pool)
        .await?;

    info!(
        "removed location lid={} ({} row(s))",
        params.location_id,
        result.rows_affected()
    );
    Ok(Json(Ret {
        ret: result.rows_affected(),
    }))
}

/// Query string of `GET /locations`.
#[derive(Debug, Deserialize)]
struct ListParams {
    user_id: i32,
}

/// Handle `GET /locations?user_id=`: every location registered to the
/// customer, wrapped as `{"Locations": [...]}`. Unknown customers yield an
/// empty list.
async fn list(
    State((pool, _config)): State<(PgPool, Config)>,
    Query(params): Query<ListParams>,
) -> Result<Json<LocationList>, ApiError> {
    // ---
    let locations: Vec<ServiceLocation> = sqlx::query_as(
        r#"
        SELECT lid, cid, address, unit_no, zip_code, start_date,
               size_sqft, num_beds, num_occupants
        FROM service_location
        WHERE cid = $1
        ORDER BY lid
        "#,
    )
    .bind(params.user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(LocationList { locations }))
}
