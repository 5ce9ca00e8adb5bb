//! Customer registration endpoint.

use axum::{extract::State, routing::post, Json, Router};
use sqlx::PgPool;
use tracing::info;

use crate::error::ApiError;
use crate::models::{NewCustomer, Ret};
use crate::Config;

// ---

pub fn router() -> Router<(PgPool, Config)> {
    // ---
    Router::new().route("/users/register", post(register))
}

/// Handle `POST /users/register`: insert the customer and return the
/// generated id as `{"ret": <cid>}`.
async fn register(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(customer): Json<NewCustomer>,
) -> Result<Json<Ret<i32>>, ApiError> {
    // ---
    customer.validate()?;

    let cid: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO customer (name, billing_addr)
        VALUES ($1, $2)
        RETURNING cid
        "#,
    )
    .bind(&customer.name)
    .bind(&customer.billing_addr)
    .fetch_one(&pool)
    .await?;

    info!("registered customer cid={cid}");
    Ok(Json(Ret { ret: cid }))
}
