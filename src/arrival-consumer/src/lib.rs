#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Reads vessel position records as json lines, classifies whether each vessel has arrived at its
//! reported destination and writes the verdicts back out as json lines.

pub mod consumer;
pub mod error;
pub mod models;
pub mod settings;
pub mod startup;
