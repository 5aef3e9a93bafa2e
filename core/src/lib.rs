#![no_std]

extern crate alloc;

pub use error::*;
pub use likeness::*;
pub use minefield::*;

mod error;
mod likeness;
mod minefield;
