//! Client grant resource types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Audience, ClientId};

/// A grant of API scopes to an application, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientGrant {
    pub id: String,
    pub client_id: ClientId,
    pub audience: Audience,
    #[serde(default)]
    pub scope: Vec<String>,
    /// Fields the API returns that this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Paged listing, returned when `include_totals` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientGrantPage {
    pub client_grants: Vec<ClientGrant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientGrantList {
    Grants(Vec<ClientGrant>),
    Page(ClientGrantPage),
}

impl ClientGrantList {
    #[must_use]
    pub fn grants(&self) -> &[ClientGrant] {
        match self {
            Self::Grants(grants) => grants,
            Self::Page(page) => &page.client_grants,
        }
    }

    #[must_use]
    pub fn into_grants(self) -> Vec<ClientGrant> {
        match self {
            Self::Grants(grants) => grants,
            Self::Page(page) => page.client_grants,
        }
    }

    /// Total count reported by the API, only present on paged listings.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        match self {
            Self::Grants(_) => None,
            Self::Page(page) => page.total,
        }
    }
}

/// Body of a create request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientGrant {
    pub client_id: ClientId,
    pub audience: Audience,
    pub scope: Vec<String>,
}

/// Body of an update request. The scope list replaces the stored one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateClientGrant {
    pub scope: Vec<String>,
}
