//! fanlog core - shared types, formatting, configuration and error handling

pub mod charset;
pub mod config;
pub mod constants;
pub mod destination;
pub mod error;
pub mod format;
pub mod types;

pub use charset::Charset;
pub use config::*;
pub use constants::*;
pub use destination::{Destination, DestinationId, Threshold};
pub use error::{Error, Result};
pub use format::{format_line, PrefixStyle};
pub use types::*;
