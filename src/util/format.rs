use chrono::{DateTime, SecondsFormat, TimeZone as _, Utc};
use std::convert::TryFrom;

pub trait IsoTimestamp {
    /// `2024-01-02T03:04:05.000Z`
    fn as_iso_timestamp(&self) -> String;
}

impl IsoTimestamp for DateTime<Utc> {
    fn as_iso_timestamp(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

pub fn from_epoch_secs(secs: u64) -> anyhow::Result<DateTime<Utc>> {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .ok_or_else(|| anyhow::anyhow!("invalid timestamp: {} seconds", secs))
}

pub fn from_epoch_millis(millis: u64) -> anyhow::Result<DateTime<Utc>> {
    i64::try_from(millis)
        .ok()
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
        .ok_or_else(|| anyhow::anyhow!("invalid timestamp: {} milliseconds", millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_timestamp() {
        let ts = from_epoch_secs(1_700_000_000).unwrap();
        assert_eq!(ts.as_iso_timestamp(), "2023-11-14T22:13:20.000Z");

        let ts = from_epoch_millis(1_700_000_000_123).unwrap();
        assert_eq!(ts.as_iso_timestamp(), "2023-11-14T22:13:20.123Z");

        let ts = from_epoch_secs(0).unwrap();
        assert_eq!(ts.as_iso_timestamp(), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn out_of_range() {
        assert!(from_epoch_secs(u64::MAX).is_err());
        assert!(from_epoch_secs(i64::MAX as u64).is_err());
        assert!(from_epoch_millis(u64::MAX).is_err());
    }
}
