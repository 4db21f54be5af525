//! # CVFS Architecture
//!
//! CVFS is a **comprehensive virtual file system** that lives entirely in
//! memory: disks holding directories and typed documents, a small language of
//! named criteria for filtering them, and undo/redo for every change. Like the
//! rest of this codebase it is a library first; the REPL binary is one client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Reads command lines, renders results                     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the session              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Resolve paths, call into the core, record history        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (disk.rs, criteria/, history.rs, workspace.rs)        │
//! │  - Node tree with size propagation                          │
//! │  - Criterion evaluation                                     │
//! │  - Invertible history records                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DiskStore trait, FileStore and InMemoryStore             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O in the Core
//!
//! From `api.rs` inward, code takes Rust arguments and returns
//! `Result<CmdResult>` or plain data. It never prints and never exits. It
//! logs through `tracing`, and installing a subscriber is left to the
//! binary.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: one module per user command
//! - [`disk`]: the node tree, paths, listings
//! - [`criteria`]: criterion parsing, registry and evaluation
//! - [`history`]: undo/redo records and the two-stack logger
//! - [`workspace`]: session state and how history records are applied to it
//! - [`store`]: saved-disk persistence
//! - [`model`]: nodes, document types, ids
//! - [`config`] / [`init`]: configuration and start-up wiring
//! - [`error`]: error kinds
//! - `cli`: line parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod criteria;
pub mod disk;
pub mod error;
pub mod history;
pub mod init;
pub mod model;
pub mod store;
pub mod workspace;
