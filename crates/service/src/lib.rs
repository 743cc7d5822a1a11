//! Service layer for the wine catalogue.
//! - `gateway`: the repository gateway trait and its in-memory and SeaORM
//!   implementations.
//! - `query`: equality predicates and typed conversion shared by listings.
//! - `services`: one service per entity type.
//! - `relay`: image transfer publish/consume pair over a message broker.

pub mod errors;
pub mod gateway;
pub mod query;
pub mod relay;
pub mod services;
#[cfg(test)]
pub mod test_support;
