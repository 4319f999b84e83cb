//! Purpose: Shared core library crate used by the `rejig` CLI and tests.
//! Exports: `api` (public surface), `core` (taxonomy, load/dump walks,
//! inspection, cycle and radix utilities).
//! Role: Bidirectional mapping between flat JSON-style records and
//! navigable object-node trees, plus a general graph flattener.
//! Invariants: Both directions are synchronous, allocation-local tree
//! walks; the crate holds no process-wide state.
pub mod api;
pub mod core;
