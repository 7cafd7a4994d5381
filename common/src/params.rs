use crate::constants::{
    PARAM_AUDIENCE, PARAM_CLIENT_ID, PARAM_INCLUDE_TOTALS, PARAM_PAGE, PARAM_PER_PAGE,
};
use crate::{Audience, ClientId};

/// Query parameters accepted by the client grants listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub audience: Option<Audience>,
    pub client_id: Option<ClientId>,
    pub include_totals: Option<bool>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl ListParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn audience(mut self, audience: Audience) -> Self {
        self.audience = Some(audience);
        self
    }

    #[must_use]
    pub fn client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    #[must_use]
    pub const fn include_totals(mut self, include_totals: bool) -> Self {
        self.include_totals = Some(include_totals);
        self
    }

    #[must_use]
    pub const fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub const fn per_page(mut self, per_page: u64) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Set parameters as query pairs, in a stable order. Unset ones are skipped.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::with_capacity(5);
        if let Some(audience) = &self.audience {
            query.push((PARAM_AUDIENCE, audience.to_string()));
        }
        if let Some(client_id) = &self.client_id {
            query.push((PARAM_CLIENT_ID, client_id.to_string()));
        }
        if let Some(include_totals) = self.include_totals {
            query.push((PARAM_INCLUDE_TOTALS, include_totals.to_string()));
        }
        if let Some(page) = self.page {
            query.push((PARAM_PAGE, page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push((PARAM_PER_PAGE, per_page.to_string()));
        }
        query
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_produce_no_query() {
        assert!(ListParams::new().to_query().is_empty());
    }

    #[test]
    fn test_query_order_and_encoding() {
        let params = ListParams::new()
            .per_page(10)
            .page(2)
            .include_totals(true)
            .client_id(ClientId::try_from("cid").unwrap())
            .audience(Audience::try_from("aud").unwrap());
        assert_eq!(
            params.to_query(),
            vec![
                ("audience", "aud".to_string()),
                ("client_id", "cid".to_string()),
                ("include_totals", "true".to_string()),
                ("page", "2".to_string()),
                ("per_page", "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_include_totals_false_is_sent() {
        let params = ListParams::new().include_totals(false);
        assert_eq!(
            params.to_query(),
            vec![("include_totals", "false".to_string())]
        );
    }
}
