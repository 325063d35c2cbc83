use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_key!(
    /// Facility handle for one court at one time slot
    SessionId
);

string_key!(
    /// Date key as the facility reports it (e.g. "20240115")
    DateKey
);

string_key!(
    /// Start time of a slot as the facility reports it (e.g. "18:30")
    TimeOfDay
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_order_lexically() {
        let mut hours = vec![TimeOfDay::from("19:00"), TimeOfDay::from("08:30")];
        hours.sort();
        assert_eq!(hours[0].as_str(), "08:30");
    }

    #[test]
    fn test_session_id_serializes_as_plain_string() {
        let id = SessionId::new("48211");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"48211\"");
        assert_eq!(id.to_string(), "48211");
    }
}
