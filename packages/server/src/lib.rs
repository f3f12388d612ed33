// Factory Management API - core
//
// CRUD over three related entities (Factory, Machine, Worker) backed by a
// relational store. The three resources share one generic contract in
// kernel/, parameterized by per-entity metadata in domains/*/models.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
