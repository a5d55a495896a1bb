//! Command-line front end for the ActionEditor4 codec.

pub mod cli;
pub mod commands;
pub mod keys;
pub mod logging;
