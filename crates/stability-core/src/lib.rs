//! Core library for the stability sweep driver: parameter-grid
//! construction, deterministic job partitioning, the time-series
//! simulator seam, and per-step `.npz` archive packaging.

pub mod archive;
pub mod common;
pub mod domain;
pub mod manifest;
pub mod runner;
pub mod sim;
pub mod sweep;
