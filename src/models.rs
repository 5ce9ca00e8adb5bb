//! Data models for the energy monitoring API.
//!
//! Three groups live here:
//! - registration payloads with their boundary validation
//! - row types the listing and view queries map onto (`sqlx::FromRow`)
//! - the single-key response envelopes the API wraps everything in
//!   (`ret` / `Devices` / `Locations`)

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ---

/// Body of `POST /users/register`.
#[derive(Debug, Deserialize)]
pub struct NewCustomer {
    // ---
    pub name: String,
    pub billing_addr: String,
}

/// Body of `POST /locations/register`.
#[derive(Debug, Deserialize)]
pub struct NewLocation {
    // ---
    pub cid: i32,
    pub address: String,
    /// May be empty for single-unit homes.
    pub unit_no: String,
    pub zip_code: String,
    pub start_date: NaiveDate,
    pub size_sqft: i32,
    pub num_beds: i32,
    pub num_occupants: i32,
}

/// Body of `POST /devices/register`.
#[derive(Debug, Deserialize)]
pub struct NewDevice {
    // ---
    pub lid: i32,
    pub time_added: NaiveDateTime,
    #[serde(rename = "type")]
    pub device_type: String,
    pub model: String,
}

impl NewCustomer {
    /// Reject structurally invalid payloads before they reach the store.
    pub fn validate(&self) -> Result<(), ApiError> {
        // ---
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("name must not be empty".into()));
        }
        if self.billing_addr.trim().is_empty() {
            return Err(ApiError::Validation("billing_addr must not be empty".into()));
        }
        Ok(())
    }
}

impl NewLocation {
    pub fn validate(&self) -> Result<(), ApiError> {
        // ---
        if self.address.trim().is_empty() {
            return Err(ApiError::Validation("address must not be empty".into()));
        }
        if self.zip_code.trim().is_empty() {
            return Err(ApiError::Validation("zip_code must not be empty".into()));
        }
        if self.size_sqft <= 0 {
            return Err(ApiError::Validation("size_sqft must be positive".into()));
        }
        if self.num_beds < 0 {
            return Err(ApiError::Validation("num_beds must not be negative".into()));
        }
        if self.num_occupants < 0 {
            return Err(ApiError::Validation("num_occupants must not be negative".into()));
        }
        Ok(())
    }
}

impl NewDevice {
    pub fn validate(&self) -> Result<(), ApiError> {
        // ---
        if self.device_type.trim().is_empty() {
            return Err(ApiError::Validation("type must not be empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(ApiError::Validation("model must not be empty".into()));
        }
        Ok(())
    }
}

// ---

/// One row of `GET /locations`.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ServiceLocation {
    // ---
    pub lid: i32,
    pub cid: i32,
    pub address: String,
    pub unit_no: String,
    pub zip_code: String,
    pub start_date: NaiveDate,
    pub size_sqft: i32,
    pub num_beds: i32,
    pub num_occupants: i32,
}

/// One row of `GET /devices`: a device plus the address it serves.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct DeviceSummary {
    // ---
    pub device_id: i32,
    #[serde(rename = "type")]
    pub device_type: String,
    pub model: String,
    pub location_address: String,
}

/// One row of the Daily Consumption View (`GET /views/1`): the sum of all
/// `energy_use` event values logged by the customer's devices on one day.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct DailyConsumptionRow {
    // ---
    pub user_id: i32,
    pub date: NaiveDate,
    pub total_energy_consumption: f64,
}

/// One raw event row of the Per-Device Daily Breakdown (`GET /views/2`).
/// Never aggregated: N stored events produce N rows.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct DeviceEventRow {
    // ---
    pub device_id: i32,
    pub datetime: NaiveDateTime,
    pub energy_consumption: f64,
}

/// One row of the Peer-Comparison View (`GET /views/3`): a location's
/// monthly total next to the average over similarly sized locations.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct PeerComparisonRow {
    // ---
    pub location_id: i32,
    pub size_sqft: i32,
    pub consumption: f64,
    /// Null when no other location falls within ±5% of this one's size.
    pub avg_peer_consumption: Option<f64>,
}

/// One (peak, off-peak) pairing of the Savings View (`GET /views/4`).
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct SavingsRow {
    // ---
    pub peak_time: NaiveDateTime,
    pub peak_energy_price: f64,
    pub peak_energy_consumption: f64,
    pub off_peak_time: NaiveDateTime,
    pub off_peak_energy_price: f64,
    pub potential_savings: f64,
}

// ---

/// `{"ret": ...}` envelope used by registration, removal, and view
/// responses.
#[derive(Debug, Serialize)]
pub struct Ret<T> {
    pub ret: T,
}

/// `{"Devices": [...]}` envelope of `GET /devices`.
#[derive(Debug, Serialize)]
pub struct DeviceList {
    #[serde(rename = "Devices")]
    pub devices: Vec<DeviceSummary>,
}

/// `{"Locations": [...]}` envelope of `GET /locations`.
#[derive(Debug, Serialize)]
pub struct LocationList {
    #[serde(rename = "Locations")]
    pub locations: Vec<ServiceLocation>,
}
