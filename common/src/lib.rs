//! Types shared by the client grants library and command line tool.

mod audience;
mod clientid;
pub mod constants;
mod error;
mod grant;
mod params;

pub use audience::Audience;
pub use clientid::ClientId;
pub use error::{ApiError, InvalidArgument};
pub use grant::{
    ClientGrant, ClientGrantList, ClientGrantPage, CreateClientGrant, UpdateClientGrant,
};
pub use params::ListParams;
