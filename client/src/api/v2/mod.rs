mod client_grants;

pub use client_grants::ClientGrantsApi;
