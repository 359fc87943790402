#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod auth;
mod error;
mod http;

pub use auth::{CredentialProvider, KinitProvider, NoAuth, StaticTokenProvider};
pub use error::{KerbError, KerbResult};
pub use http::{DefaultTicketClient, RawResponse, ReqwestTransport, TicketClient, Transport};

#[cfg(feature = "test-utils")]
pub use http::testing;
