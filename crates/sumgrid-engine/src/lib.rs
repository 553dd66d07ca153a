//! sumgrid_engine - Cell model and additive formula language.

pub mod engine;
