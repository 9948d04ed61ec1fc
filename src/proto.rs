//! Generated gRPC bindings for the Backend and Database services.

pub mod backend {
    tonic::include_proto!("backend");
}

pub mod database {
    tonic::include_proto!("database");
}
