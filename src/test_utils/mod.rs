//! Test utilities for the service clients and views.
//!
//! This module provides:
//! - Trait-level fakes (TrackedBackendClient, TrackedDatabaseClient) that record calls
//! - In-process gRPC servers (spawn_fake_backend, spawn_fake_database) for client tests

pub mod grpc_servers;
pub mod service_clients;

pub use grpc_servers::{spawn_fake_backend, spawn_fake_database};
pub use service_clients::{TrackedBackendClient, TrackedDatabaseClient};
