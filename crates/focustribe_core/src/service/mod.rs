//! Use-case services over the repositories.
//!
//! # Responsibility
//! - Compose repositories, identifier allocation and durability into the
//!   backend facade.
//! - Keep the identity adjunct separate from entity state.

pub mod auth_service;
pub mod backend;
