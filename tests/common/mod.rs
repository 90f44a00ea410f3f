//! Integration test common infrastructure.
//!
//! Provides an in-process server and clients connected to it over
//! in-memory duplex pipes, plus helpers for asserting on IRC message flows.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use server::TestServer;
