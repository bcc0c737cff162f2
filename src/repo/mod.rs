//! Repository layer: the key/value persistence boundary.
//!
//! # Responsibility
//! - Define the slot-oriented read/write contract the stores depend on.
//! - Isolate SQLite details from service/business orchestration.
//!
//! # Invariants
//! - A slot holds exactly one serialized collection; writes replace the
//!   whole blob.
//! - Backends report transport errors only; semantic errors belong to the
//!   service layer.

pub mod kv_repo;
