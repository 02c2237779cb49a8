//! Arrange Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Arrange layout
//! engine and its front ends. It includes:
//!
//! - **Identifiers**: Stable node identifiers ([`identifier::NodeId`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Graph**: The node/edge data model and the [`graph::GraphAdapter`] seam
//!   through which the engine reads a graph and writes positions back

pub mod geometry;
pub mod graph;
pub mod identifier;
