#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod achievement;
mod archetype;
mod assembler;
mod catalog;
mod error;
mod history;
mod longevity;
mod muscle;
mod prescription;
mod profile;
mod readiness;
mod recovery;
mod sampler;
mod scoring;
mod service;
mod session;
mod state;
mod statistics;
mod training;
mod tuning;

pub use achievement::*;
pub use archetype::*;
pub use assembler::*;
pub use catalog::*;
pub use error::*;
pub use history::*;
pub use longevity::*;
pub use muscle::*;
pub use prescription::*;
pub use profile::*;
pub use readiness::*;
pub use recovery::*;
pub use sampler::*;
pub use scoring::*;
pub use service::*;
pub use session::*;
pub use state::*;
pub use statistics::*;
pub use training::*;
pub use tuning::*;
