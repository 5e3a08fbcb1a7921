// SPDX-License-Identifier: MIT

//! Storage layer.
//!
//! The production system reaches a relational store through an ORM;
//! that collaborator is external to this service, so the `Store` here
//! is an in-memory stand-in with the same row-oriented surface.

pub mod memory;

pub use memory::{Store, StoreError};
