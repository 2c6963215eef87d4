#![forbid(unsafe_code)]

//! Core: geometry and canonical key events shared by the kfview crates.

pub mod event;
pub mod geometry;
