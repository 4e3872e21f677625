// Device state models (`GET /api/sonic/`).

use serde::{Deserialize, Serialize};

// ── Enumerations ─────────────────────────────────────────────────────

/// Valve position as reported by the device.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ValveState {
    Open,
    Closed,
    Opening,
    Closing,
    /// Any value newer firmware may add.
    #[serde(other)]
    Unknown,
}

/// Where the device currently draws power from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum PowerSupply {
    #[serde(rename = "battery")]
    #[strum(serialize = "battery")]
    Battery,
    #[serde(rename = "external")]
    #[strum(serialize = "external")]
    External,
    #[serde(rename = "external+battery")]
    #[strum(serialize = "external+battery")]
    ExternalBattery,
    #[serde(other, rename = "unknown")]
    #[strum(serialize = "unknown")]
    Unknown,
}

// ── Water meter ──────────────────────────────────────────────────────

/// Cumulative water meter reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterMeter {
    pub volume: Option<i64>,
    pub duration: Option<i64>,
}

/// v2 meter: forward and reverse flow reported separately.
///
/// Each reading is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterMeterV2 {
    #[serde(deserialize_with = "super::non_empty")]
    pub positive: Option<WaterMeter>,
    #[serde(deserialize_with = "super::non_empty")]
    pub negative: Option<WaterMeter>,
}

// ── Device state ─────────────────────────────────────────────────────

/// Device state, v1 representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceState {
    pub valve_state: Option<ValveState>,
    #[serde(rename = "waterFlowing")]
    pub water_flow_indicator: Option<bool>,
    #[serde(rename = "mqttConnected")]
    pub mqtt_status: Option<bool>,
    #[serde(rename = "wifiConnected")]
    pub wifi_status: Option<bool>,
    pub power_supply: Option<PowerSupply>,
    pub firmware_version: Option<String>,
    /// Seconds since boot.
    pub uptime: Option<i64>,
    pub serial_number: Option<String>,
    #[serde(deserialize_with = "super::non_empty")]
    pub water_meter: Option<WaterMeter>,
}

/// Device state, v2 representation with split meter readings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceStateV2 {
    pub valve_state: Option<ValveState>,
    #[serde(rename = "waterFlowing")]
    pub water_flow_indicator: Option<bool>,
    #[serde(rename = "mqttConnected")]
    pub mqtt_status: Option<bool>,
    #[serde(rename = "wifiConnected")]
    pub wifi_status: Option<bool>,
    pub power_supply: Option<PowerSupply>,
    pub firmware_version: Option<String>,
    pub uptime: Option<i64>,
    pub serial_number: Option<String>,
    #[serde(deserialize_with = "super::non_empty")]
    pub water_meter: Option<WaterMeterV2>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    #[test]
    fn device_state_maps_all_fields() {
        let state: DeviceState = serde_json::from_value(json!({
            "valveState": "closed",
            "waterFlowing": false,
            "mqttConnected": true,
            "wifiConnected": true,
            "powerSupply": "external",
            "firmwareVersion": "2024.1.0",
            "waterMeter": { "volume": 567_820, "duration": 3908 },
            "uptime": 1_024_560
        }))
        .unwrap();

        assert_eq!(state.valve_state, Some(ValveState::Closed));
        assert_eq!(state.water_flow_indicator, Some(false));
        assert_eq!(state.mqtt_status, Some(true));
        assert_eq!(state.wifi_status, Some(true));
        assert_eq!(state.power_supply, Some(PowerSupply::External));
        assert_eq!(state.firmware_version.as_deref(), Some("2024.1.0"));
        assert_eq!(state.uptime, Some(1_024_560));
        assert_eq!(state.serial_number, None);
        let meter = state.water_meter.unwrap();
        assert_eq!(meter.volume, Some(567_820));
        assert_eq!(meter.duration, Some(3908));
    }

    #[test]
    fn device_state_without_water_meter() {
        let state: DeviceState = serde_json::from_value(json!({
            "waterFlowing": false,
            "mqttConnected": false,
            "wifiConnected": false,
            "powerSupply": "battery",
            "firmwareVersion": "1.0.0",
            "uptime": 1234
        }))
        .unwrap();

        assert_eq!(state.power_supply, Some(PowerSupply::Battery));
        assert_eq!(state.uptime, Some(1234));
        assert!(state.valve_state.is_none());
        assert!(state.water_meter.is_none());
    }

    #[test]
    fn empty_object_yields_all_none() {
        let state: DeviceState = serde_json::from_value(json!({})).unwrap();
        assert_eq!(state, DeviceState::default());
    }

    #[test]
    fn empty_water_meter_is_absent() {
        let state: DeviceState =
            serde_json::from_value(json!({ "uptime": 9, "waterMeter": {} })).unwrap();
        assert_eq!(state.uptime, Some(9));
        assert!(state.water_meter.is_none());

        let state: DeviceState = serde_json::from_value(json!({ "waterMeter": null })).unwrap();
        assert!(state.water_meter.is_none());
    }

    #[test]
    fn v2_empty_readings_are_absent() {
        let state: DeviceStateV2 = serde_json::from_value(json!({
            "waterMeter": { "positive": {}, "negative": { "volume": 3 } }
        }))
        .unwrap();
        let meter = state.water_meter.unwrap();
        assert!(meter.positive.is_none());
        assert_eq!(meter.negative.unwrap().volume, Some(3));

        let state: DeviceStateV2 = serde_json::from_value(json!({ "waterMeter": {} })).unwrap();
        assert!(state.water_meter.is_none());
    }

    #[test]
    fn water_meter_fields_are_independent() {
        let meter: WaterMeter = serde_json::from_value(json!({ "duration": 12 })).unwrap();
        assert_eq!(meter.volume, None);
        assert_eq!(meter.duration, Some(12));
    }

    #[test]
    fn v2_positive_reading_only() {
        let state: DeviceStateV2 = serde_json::from_value(json!({
            "valveState": "open",
            "serialNumber": "WG-0001",
            "waterMeter": { "positive": { "volume": 100, "duration": 7 } }
        }))
        .unwrap();

        assert_eq!(state.serial_number.as_deref(), Some("WG-0001"));
        let meter = state.water_meter.unwrap();
        assert_eq!(
            meter.positive,
            Some(WaterMeter {
                volume: Some(100),
                duration: Some(7)
            })
        );
        assert!(meter.negative.is_none());
    }

    #[test]
    fn v2_without_water_meter_key() {
        let state: DeviceStateV2 = serde_json::from_value(json!({ "uptime": 5 })).unwrap();
        assert!(state.water_meter.is_none());
    }

    #[test]
    fn unrecognized_enum_values_do_not_fail() {
        let state: DeviceState = serde_json::from_value(json!({
            "valveState": "stuck",
            "powerSupply": "solar"
        }))
        .unwrap();

        assert_eq!(state.valve_state, Some(ValveState::Unknown));
        assert_eq!(state.power_supply, Some(PowerSupply::Unknown));
    }

    #[test]
    fn power_supply_wire_names() {
        let supply: PowerSupply = serde_json::from_value(json!("external+battery")).unwrap();
        assert_eq!(supply, PowerSupply::ExternalBattery);
        assert_eq!(supply.to_string(), "external+battery");
        assert_eq!(
            serde_json::to_value(PowerSupply::Battery).unwrap(),
            json!("battery")
        );
    }

    #[test]
    fn valve_state_parses_from_str() {
        assert_eq!(ValveState::from_str("open").unwrap(), ValveState::Open);
        assert_eq!(ValveState::Closing.as_ref(), "closing");
        assert!(ValveState::from_str("ajar").is_err());
    }
}
