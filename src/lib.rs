#![doc = include_str!("../README.md")]

#[macro_use]
mod macros;

pub mod api;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod selectors;
pub mod services;
pub mod tools;
pub mod types;


pub use engine::*;
pub use error::{Result, ReviewError};
pub use services::*;
pub use types::*;
