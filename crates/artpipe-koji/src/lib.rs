#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod xmlrpc;

pub use client::{DefaultKojiClient, KojiClient, ReqwestRpcBackend, RpcBackend};
