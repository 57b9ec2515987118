//! Small shared value types.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

///
/// Timestamp
///
/// Unix seconds as recorded by the operator's device. Stored raw so the
/// value survives serialization across stores; formatting is a view
/// concern and may fail only on absurd out-of-range values.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    #[must_use]
    pub const fn from_unix_secs(secs: u64) -> Self {
        Self(secs)
    }

    #[must_use]
    pub const fn unix_secs(self) -> u64 {
        self.0
    }

    /// Render as RFC 3339, e.g. `2024-05-17T09:30:00Z`.
    #[must_use]
    pub fn to_rfc3339(self) -> Option<String> {
        let dt = OffsetDateTime::from_unix_timestamp(i64::try_from(self.0).ok()?).ok()?;
        dt.format(&Rfc3339).ok()
    }

    /// Parse an RFC 3339 string; pre-epoch instants are rejected.
    #[must_use]
    pub fn parse_rfc3339(s: &str) -> Option<Self> {
        let dt = OffsetDateTime::parse(s, &Rfc3339).ok()?;
        u64::try_from(dt.unix_timestamp()).ok().map(Self)
    }
}

///
/// GpsPoint
///
/// WGS84 coordinate pair attached to field equipment.
///

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

///
/// PortStatus
///
/// Shared by distribution-frame ports and subscriber drop ports.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PortStatus {
    Connected,
    #[default]
    Unconnected,
}

impl PortStatus {
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_formats_rfc3339() {
        let ts = Timestamp::from_unix_secs(1_716_000_000);
        let text = ts.to_rfc3339().unwrap();
        assert!(text.starts_with("2024-05-18T"), "got {text}");
        assert_eq!(Timestamp::parse_rfc3339(&text), Some(ts));
    }

    #[test]
    fn timestamp_rejects_pre_epoch_text() {
        assert_eq!(Timestamp::parse_rfc3339("1969-12-31T23:59:59Z"), None);
    }

    #[test]
    fn port_status_defaults_unconnected() {
        assert_eq!(PortStatus::default(), PortStatus::Unconnected);
        assert!(!PortStatus::default().is_connected());
    }
}
