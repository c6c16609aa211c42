#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod classifier;
mod domain;

pub use classifier::*;
pub use domain::*;
