#![no_std]
#![doc = include_str!("../README.md")]

pub mod arpeggiator;
pub mod clock;
pub mod config;
pub mod error;
pub mod indicator;
mod lookup_tables;
pub mod note_queue;
pub mod pattern;
pub mod quantizer;
pub mod smoothing;
mod utils;
