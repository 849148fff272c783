//! Settle Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Settle layout
//! engine and its collaborators. It includes:
//!
//! - **Geometry**: 2D points and vectors ([`geometry::Point`])
//! - **Identifiers**: Arena-index node identities ([`identifier::NodeId`])
//! - **Graph**: The node arena with per-node edge lists ([`graph`] module)

pub mod geometry;
pub mod graph;
pub mod identifier;
