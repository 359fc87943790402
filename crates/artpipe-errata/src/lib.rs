#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod models;

pub use client::{DefaultErrataClient, ErrataClient};
