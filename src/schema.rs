//! Database schema management for wattflow.
//!
//! Ensures required tables and indexes exist before serving requests.
//! Applied once on startup from `main.rs`.
//!
//! Deletes cascade down the ownership chain: removing a customer removes
//! its locations, removing a location removes its enrolled devices, and
//! removing a device removes its event history. `device_event` and
//! `energy_price` are written by external ingestion; the API only reads
//! them.

use anyhow::Result;
use sqlx::PgPool;

// ---

/// Create or update the database schema (idempotent).
///
/// Safe to call on every startup; no-op if objects already exist.
/// Errors are propagated if any SQL execution fails.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customer (
            cid          SERIAL PRIMARY KEY,
            name         TEXT NOT NULL,
            billing_addr TEXT NOT NULL
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS service_location (
            lid           SERIAL  PRIMARY KEY,
            cid           INTEGER NOT NULL REFERENCES customer (cid) ON DELETE CASCADE,
            address       TEXT    NOT NULL,
            unit_no       TEXT    NOT NULL,
            zip_code      TEXT    NOT NULL,
            start_date    DATE    NOT NULL,
            size_sqft     INTEGER NOT NULL,
            num_beds      INTEGER NOT NULL,
            num_occupants INTEGER NOT NULL
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS enroll_device (
            did        SERIAL    PRIMARY KEY,
            lid        INTEGER   NOT NULL REFERENCES service_location (lid) ON DELETE CASCADE,
            time_added TIMESTAMP NOT NULL,
            type       TEXT      NOT NULL,
            model      TEXT      NOT NULL
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Append-only time series; timestamps are wall-clock values that must
    // line up exactly with energy_price sampling times.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS device_event (
            did         INTEGER          NOT NULL REFERENCES enroll_device (did) ON DELETE CASCADE,
            event_label TEXT             NOT NULL,
            timestamp   TIMESTAMP        NOT NULL,
            value       DOUBLE PRECISION NOT NULL
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS energy_price (
            zip_code TEXT             NOT NULL,
            datetime TIMESTAMP        NOT NULL,
            price    DOUBLE PRECISION NOT NULL,
            PRIMARY KEY (zip_code, datetime)
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Basic indexes for the ownership joins and time-window scans
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_service_location_cid
            ON service_location (cid);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_enroll_device_lid
            ON enroll_device (lid);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_device_event_did_timestamp
            ON device_event (did, timestamp);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // The views only ever read 'energy_use' rows
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_device_event_event_label
            ON device_event (event_label);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
