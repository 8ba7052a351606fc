#![doc = include_str!("../README.md")]

mod channel;
mod config;
mod coordinator;
mod debounce;
mod disambiguation;
mod engine;
mod error;
mod futures;
mod lookup;
mod model;
mod postal_code;
mod state;
mod status;

pub use crate::channel::*;
pub use crate::config::*;
pub use crate::disambiguation::*;
pub use crate::engine::*;
pub use crate::error::*;
pub use crate::futures::*;
pub use crate::lookup::*;
pub use crate::model::*;
pub use crate::postal_code::*;
pub use crate::state::*;
pub use crate::status::*;
