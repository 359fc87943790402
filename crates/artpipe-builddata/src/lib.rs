#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod doozer;
mod parse;
mod recipes;
mod runner;

pub use doozer::DoozerTables;
pub use recipes::{BuildDataClient, DefaultBuildDataClient, HttpBackend, ReqwestBackend};
pub use runner::{CommandOutput, CommandRunner, TokioCommandRunner};
