//! Options controlling how a [`crate::LocalizedDataLoader`] runs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::selector::DEFAULT_SEGMENT;

/// Load behavior options.
///
/// Deserializable, so it can sit in an application config file:
///
/// ```toml
/// acquire_timeout_ms = 5000
/// default_segment = "default"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Stop waiting for the package source after this long and complete with
    /// an empty result. `None` leaves waiting entirely to the source.
    ///
    /// Requires the runtime's time driver.
    #[serde(rename = "acquire_timeout_ms", with = "millis")]
    pub acquire_timeout: Option<Duration>,
    /// Directory name of the culture-independent layer.
    pub default_segment: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            acquire_timeout: None,
            default_segment: DEFAULT_SEGMENT.to_string(),
        }
    }
}

impl LoadOptions {
    /// Creates default load options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the acquisition timeout.
    pub fn with_acquire_timeout(mut self, acquire_timeout: Option<Duration>) -> Self {
        self.acquire_timeout = acquire_timeout;
        self
    }

    /// Sets the default segment name.
    pub fn with_default_segment(mut self, default_segment: impl Into<String>) -> Self {
        self.default_segment = default_segment.into();
        self
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&(duration.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoadOptions::new();
        assert_eq!(options.acquire_timeout, None);
        assert_eq!(options.default_segment, "default");
    }

    #[test]
    fn test_builder_methods() {
        let options = LoadOptions::new()
            .with_acquire_timeout(Some(Duration::from_secs(2)))
            .with_default_segment("base");
        assert_eq!(options.acquire_timeout, Some(Duration::from_secs(2)));
        assert_eq!(options.default_segment, "base");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let options: LoadOptions = serde_json::from_str(r#"{"acquire_timeout_ms": 1500}"#).unwrap();
        assert_eq!(options.acquire_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(options.default_segment, "default");
    }

    #[test]
    fn test_serialize_round_trip() {
        let options = LoadOptions::new().with_acquire_timeout(Some(Duration::from_millis(250)));
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"acquire_timeout_ms":250,"default_segment":"default"}"#);
        assert_eq!(serde_json::from_str::<LoadOptions>(&json).unwrap(), options);
    }
}
