//! Infrastructure layer for the plugin.
//!
//! Contains the adapters to everything the host application owns: the file
//! explorer click signal, the vault root, transient notices, per-plugin data
//! storage, process spawning, and the host that drives plugin lifecycles.
//!
//! **Dependency rule**: this layer may depend on `cfv_core`, but the domain in
//! `cfv_core` MUST NOT depend on it.

pub mod explorer;
pub mod host;
pub mod launcher;
pub mod notice;
pub mod storage;
pub mod vault;
