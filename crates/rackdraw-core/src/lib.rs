//! Rackdraw Core Types and Definitions
//!
//! This crate provides the foundational types used to build draw.io rack
//! diagrams. It includes:
//!
//! - **Geometry**: Points, sizes and bounds in page space ([`geometry`] module)
//! - **Identifiers**: Unique cell identifier generation ([`identifier::IdGenerator`])
//! - **Styles**: Ordered draw.io style strings ([`style::Style`])
//! - **XML**: Element tree and serializer for the output file ([`xml`] module)

pub mod geometry;
pub mod identifier;
pub mod style;
pub mod xml;
