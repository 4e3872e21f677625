// Response and request models for the local API.
//
// Every field is optional: firmware versions differ in what they send, and
// a missing key must come back as `None` rather than a made-up default.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

mod auto_shut_off;
mod device;
mod networking;
mod telemetry;
pub mod webhook;

pub use auto_shut_off::{AutoShutOffReport, AutoShutOffState, AutoShutOffType, AutoShutOffUpdate};
pub use device::{DeviceState, DeviceStateV2, PowerSupply, ValveState, WaterMeter, WaterMeterV2};
pub use networking::NetworkingData;
pub use telemetry::{TelemetryData, WaterEvent};
pub use webhook::{
    PowerSupplyChangedEventData, ValveEventData, WebhookEvent, WifiChangedEventData,
};

/// Nested record that is absent when sent as `null` or `{}`.
fn non_empty<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) if map.is_empty() => Ok(None),
        Some(value) => T::deserialize(value).map(Some).map_err(de::Error::custom),
    }
}
