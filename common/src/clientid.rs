use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::PARAM_CLIENT_ID;
use crate::InvalidArgument;

/// Identifier of the application receiving a grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClientId {
    type Error = InvalidArgument;

    fn try_from(client_id: String) -> Result<Self, Self::Error> {
        if client_id.is_empty() {
            return Err(InvalidArgument::new(PARAM_CLIENT_ID));
        }
        Ok(Self(client_id))
    }
}

impl TryFrom<&str> for ClientId {
    type Error = InvalidArgument;

    fn try_from(client_id: &str) -> Result<Self, Self::Error> {
        Self::try_from(client_id.to_string())
    }
}

impl FromStr for ClientId {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ClientId> for String {
    fn from(client_id: ClientId) -> Self {
        client_id.0
    }
}

impl Serialize for ClientId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ClientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clientid_valid() {
        let id = ClientId::try_from("AaiyAPdpYdesoKnqjj8HJqRn4T5titww").unwrap();
        assert_eq!(id.as_str(), "AaiyAPdpYdesoKnqjj8HJqRn4T5titww");
    }

    #[test]
    fn test_clientid_empty() {
        let err = ClientId::try_from(String::new()).unwrap_err();
        assert_eq!(err.parameter(), "client_id");
        assert!(err.to_string().contains("client_id"));
    }

    #[test]
    fn test_clientid_into_string() {
        let id = ClientId::try_from("cid").unwrap();
        let s: String = id.into();
        assert_eq!(s, "cid");
    }
}
