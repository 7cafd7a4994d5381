use common::constants::{CLIENT_GRANTS_PATH, PARAM_AUDIENCE, PARAM_PAGE, PARAM_PER_PAGE};
use common::{
    Audience, ClientGrant, ClientGrantList, ClientId, CreateClientGrant, ListParams,
    UpdateClientGrant,
};

use crate::{ApiRequest, ManagementClient, ManagementError, Transport};

/// Accessor for the `client-grants` resource.
///
/// Page numbers are zero based. Negative page values are made positive.
pub struct ClientGrantsApi<'a, T> {
    client: &'a ManagementClient<T>,
}

impl<'a, T: Transport> ClientGrantsApi<'a, T> {
    pub(crate) const fn new(client: &'a ManagementClient<T>) -> Self {
        Self { client }
    }

    /// Lists grants matching `params`. `page` and `per_page` override the
    /// values already set in `params`.
    pub fn list_all(
        &self,
        params: &ListParams,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> Result<ClientGrantList, ManagementError> {
        let mut params = params.clone();
        if let Some(page) = page {
            params.page = Some(page.unsigned_abs());
        }
        if let Some(per_page) = per_page {
            params.per_page = Some(per_page.unsigned_abs());
        }

        let request = ApiRequest::get()
            .add_path(CLIENT_GRANTS_PATH)
            .with_params(params.to_query());
        self.client.call(&request)
    }

    pub fn list_by_audience(
        &self,
        audience: &str,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> Result<ClientGrantList, ManagementError> {
        let audience = Audience::try_from(audience)?;
        self.list_all(&ListParams::new().audience(audience), page, per_page)
    }

    pub fn list_by_client_id(
        &self,
        client_id: &str,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> Result<ClientGrantList, ManagementError> {
        let client_id = ClientId::try_from(client_id)?;
        self.list_all(&ListParams::new().client_id(client_id), page, per_page)
    }

    pub fn create(
        &self,
        client_id: &str,
        audience: &str,
        scope: &[String],
    ) -> Result<ClientGrant, ManagementError> {
        let body = CreateClientGrant {
            client_id: ClientId::try_from(client_id)?,
            audience: Audience::try_from(audience)?,
            scope: scope.to_vec(),
        };
        let request = ApiRequest::post()
            .add_path(CLIENT_GRANTS_PATH)
            .with_body(&body)?;
        self.client.call(&request)
    }

    /// Replaces the scopes of grant `id`; existing scopes are not merged.
    pub fn update(&self, id: &str, scope: &[String]) -> Result<ClientGrant, ManagementError> {
        let body = UpdateClientGrant {
            scope: scope.to_vec(),
        };
        let request = ApiRequest::patch()
            .add_path(CLIENT_GRANTS_PATH)
            .add_path(id)
            .with_body(&body)?;
        self.client.call(&request)
    }

    pub fn delete(&self, id: &str) -> Result<(), ManagementError> {
        let request = ApiRequest::delete().add_path(CLIENT_GRANTS_PATH).add_path(id);
        self.client.call_empty(&request)
    }

    /// Lists grants, optionally filtered by `audience`. `_id` is not sent.
    #[deprecated(note = "the API cannot fetch a single client grant; use `find` or `list_all`")]
    pub fn get(
        &self,
        _id: &str,
        audience: Option<&str>,
    ) -> Result<ClientGrantList, ManagementError> {
        self.list_for_audience(audience, None, None)
    }

    /// Looks grant `id` up in one page of the listing filtered by `audience`.
    ///
    /// Only the requested page is searched (the API default page when `page`
    /// is `None`); `None` means the grant is not on that page.
    pub fn find(
        &self,
        id: &str,
        audience: Option<&str>,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> Result<Option<ClientGrant>, ManagementError> {
        Ok(self
            .list_for_audience(
                audience,
                page.map(i64::unsigned_abs),
                per_page.map(i64::unsigned_abs),
            )?
            .into_grants()
            .into_iter()
            .find(|grant| grant.id == id))
    }

    fn list_for_audience(
        &self,
        audience: Option<&str>,
        page: Option<u64>,
        per_page: Option<u64>,
    ) -> Result<ClientGrantList, ManagementError> {
        let mut request = ApiRequest::get().add_path(CLIENT_GRANTS_PATH);
        if let Some(audience) = audience {
            request = request.with_param(PARAM_AUDIENCE, audience);
        }
        if let Some(page) = page {
            request = request.with_param(PARAM_PAGE, page.to_string());
        }
        if let Some(per_page) = per_page {
            request = request.with_param(PARAM_PER_PAGE, per_page.to_string());
        }
        self.client.call(&request)
    }
}
