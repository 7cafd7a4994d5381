pub const CLIENT_GRANTS_PATH: &str = "client-grants";
pub const PARAM_AUDIENCE: &str = "audience";
pub const PARAM_CLIENT_ID: &str = "client_id";
pub const PARAM_INCLUDE_TOTALS: &str = "include_totals";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_PER_PAGE: &str = "per_page";
