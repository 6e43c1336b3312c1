#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod compare;
pub mod constraint;
mod error;
mod pre_release;
mod version;

pub use compare::AsVersion;
pub use constraint::*;
pub use error::*;
pub use pre_release::*;
pub use version::*;
