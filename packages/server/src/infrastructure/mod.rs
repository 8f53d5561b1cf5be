//! Infrastructure layer
//!
//! Concrete implementations behind the domain traits: in-memory
//! repositories, the live room connection manager, credential handling and
//! DTOs.

pub mod auth;
pub mod connection;
pub mod dto;
pub mod repository;
