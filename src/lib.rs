pub mod clock;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod highscore;
pub mod input;

pub use error::{Error, Result};
