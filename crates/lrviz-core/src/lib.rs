//! lrviz Core Types and Definitions
//!
//! This crate provides the foundational types shared by the lrviz crates:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Positions and bounding boxes ([`geometry`] module)
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Automaton**: Item-set nodes, transition edges and automaton graphs ([`automaton`] module)
//! - **Table**: Parse tables as produced by grammar analysis ([`table::ParseTable`])
//! - **Snapshot**: Raw analysis output for a whole grammar ([`snapshot`] module)

pub mod automaton;
pub mod color;
pub mod geometry;
pub mod identifier;
pub mod snapshot;
pub mod table;
