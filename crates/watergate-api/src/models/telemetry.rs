// Telemetry model (`GET /api/sonic/telemetry` and the `telemetry` webhook).

use serde::{Deserialize, Serialize};

/// Volume and duration of the water event in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterEvent {
    pub volume: Option<i64>,
    pub duration: Option<i64>,
}

/// Live sensor readings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryData {
    /// Flow rate in ml/min.
    pub flow: Option<f64>,
    /// Pressure in mbar.
    pub pressure: Option<f64>,
    /// Water temperature in °C.
    #[serde(rename = "temperature")]
    pub water_temperature: Option<f64>,
    #[serde(rename = "event", deserialize_with = "super::non_empty")]
    pub ongoing_event: Option<WaterEvent>,
    /// Sensors currently in error, e.g. `"flow"`, `"pressure"`.
    pub errors: Option<Vec<String>>,
}

impl TelemetryData {
    /// `true` if the device reports an error for `sensor`.
    pub fn has_error(&self, sensor: &str) -> bool {
        self.errors
            .as_deref()
            .is_some_and(|errors| errors.iter().any(|e| e == sensor))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn telemetry_with_ongoing_event() {
        let data: TelemetryData = serde_json::from_value(json!({
            "flow": 6800,
            "pressure": 2320,
            "temperature": 23.5,
            "event": { "volume": 16000, "duration": 90 },
            "errors": ["flow"]
        }))
        .unwrap();

        assert_eq!(data.flow, Some(6800.0));
        assert_eq!(data.pressure, Some(2320.0));
        assert_eq!(data.water_temperature, Some(23.5));
        let event = data.ongoing_event.as_ref().unwrap();
        assert_eq!(event.volume, Some(16000));
        assert_eq!(event.duration, Some(90));
        assert!(data.has_error("flow"));
        assert!(!data.has_error("pressure"));
    }

    #[test]
    fn telemetry_without_ongoing_event() {
        let data: TelemetryData =
            serde_json::from_value(json!({ "flow": 12, "pressure": 34, "temperature": 56 }))
                .unwrap();

        assert_eq!(data.flow, Some(12.0));
        assert_eq!(data.water_temperature, Some(56.0));
        assert!(data.ongoing_event.is_none());
        assert!(data.errors.is_none());
        assert!(!data.has_error("flow"));
    }

    #[test]
    fn empty_event_is_absent() {
        let data: TelemetryData =
            serde_json::from_value(json!({ "flow": 0, "event": {} })).unwrap();
        assert_eq!(data.flow, Some(0.0));
        assert!(data.ongoing_event.is_none());
    }
}
