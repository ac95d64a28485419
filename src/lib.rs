//! Solvr - an oracle-driven Advent of Code solver
//!
//! A reasoning service is given a puzzle and a fixed set of tools. It writes a
//! test, a solution and a solve runner through those tools, runs them, and
//! reports the answer. This crate owns the tool-use loop, the tools, and the
//! files they act on.

pub mod artifact;
pub mod collab;
pub mod command;
pub mod domain;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod runner;
pub mod tools;

pub use error::{Result, SolvrError};
