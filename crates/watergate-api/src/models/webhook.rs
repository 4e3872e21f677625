//! Inbound webhook events.
//!
//! The device pushes `{ "type": "...", "data": { ... } }` envelopes to the
//! configured webhook URL. [`WebhookEvent::parse`] maps the `type` tag onto
//! one of a fixed set of payload shapes and rejects anything else.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AutoShutOffReport, PowerSupply, TelemetryData, ValveState};
use crate::error::Error;

// ── Payloads ─────────────────────────────────────────────────────────

/// Payload of a `valve` event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValveEventData {
    pub state: Option<ValveState>,
}

/// Payload of a `power-supply-changed` event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerSupplyChangedEventData {
    pub supply: Option<PowerSupply>,
}

/// Payload of a `wifi-changed` event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiChangedEventData {
    pub ip: Option<String>,
    pub gateway: Option<String>,
    pub subnet: Option<String>,
    pub ssid: Option<String>,
    /// Signal strength in dBm.
    pub rssi: Option<i32>,
}

// ── Event ────────────────────────────────────────────────────────────

/// A parsed webhook event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum WebhookEvent {
    AutoShutOffReport(AutoShutOffReport),
    Telemetry(TelemetryData),
    Valve(ValveEventData),
    PowerSupplyChanged(PowerSupplyChangedEventData),
    WifiChanged(WifiChangedEventData),
    /// The device came online. Carries no data.
    Online,
}

/// Raw envelope before dispatch.
#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    event_type: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

impl WebhookEvent {
    /// Dispatch a raw envelope on its `type` tag.
    ///
    /// A missing or `null` `data` is treated as `{}`; payload fields that
    /// are absent come back as `None`. An unrecognized or missing `type`
    /// yields [`Error::UnknownEventType`].
    pub fn parse(raw: &Value) -> Result<Self, Error> {
        let envelope =
            Envelope::deserialize(raw).map_err(|e| Error::deserialization(&e, raw.to_string()))?;
        let data = envelope
            .data
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        match envelope.event_type.as_deref() {
            Some("auto-shut-off-report") => payload(&data).map(Self::AutoShutOffReport),
            Some("telemetry") => payload(&data).map(Self::Telemetry),
            Some("valve") => payload(&data).map(Self::Valve),
            Some("power-supply-changed") => payload(&data).map(Self::PowerSupplyChanged),
            Some("wifi-changed") => payload(&data).map(Self::WifiChanged),
            Some("online") => Ok(Self::Online),
            other => Err(Error::UnknownEventType(other.unwrap_or_default().to_owned())),
        }
    }

    /// Parse a webhook request body.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        let raw: Value =
            serde_json::from_str(body).map_err(|e| Error::deserialization(&e, body))?;
        Self::parse(&raw)
    }

    /// The wire tag of this event.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::AutoShutOffReport(_) => "auto-shut-off-report",
            Self::Telemetry(_) => "telemetry",
            Self::Valve(_) => "valve",
            Self::PowerSupplyChanged(_) => "power-supply-changed",
            Self::WifiChanged(_) => "wifi-changed",
            Self::Online => "online",
        }
    }
}

fn payload<T: DeserializeOwned>(data: &Value) -> Result<T, Error> {
    T::deserialize(data).map_err(|e| Error::deserialization(&e, data.to_string()))
}
