//! Decision Graph - daily decision lifecycle engine
//!
//! A cycle moves from a situation, through generated options and a single
//! selection, into a timed change window and lock, and ends in a reveal.
//! The phase is derived from the cycle's inputs and the clock, persisted
//! after every change, and restored across restarts.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
