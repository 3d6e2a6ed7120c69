#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod log;
mod settings;

pub use settings::*;
