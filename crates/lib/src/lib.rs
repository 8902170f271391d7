//! julibuild-lib: build orchestration for juli sources
//!
//! This crate provides the pieces of the `julib` build driver:
//! - `source`: deciding what counts as a compilable source and where its
//!   object artifact goes
//! - `runner`: running the external compiler and linker as child processes
//! - `config`: the compiler/linker command templates from `julibuild.toml`
//! - `builder`: the orchestrator that compiles, links, and cleans up

pub mod builder;
pub mod config;
pub mod consts;
pub mod runner;
pub mod source;
