//! Core domain types for ticonv.
//!
//! This crate contains the pure conversion pipeline with no IO and no async:
//!
//! - [`equation`]: the `y = expression {constraint}` grammar
//! - [`normalize`]: identifier canonicalization and chained-inequality rewrite
//! - [`codegen`]: slot-bound instruction pairs and fixed-capacity program chunks
//! - [`color`]: color tokens and the per-equation color map
//! - [`classify`]: function-kind labels for display
//! - [`plaintext`]: LaTeX/unicode preprocessing filter

pub mod classify;
pub mod codegen;
pub mod color;
pub mod equation;
pub mod normalize;
pub mod plaintext;

pub use classify::FunctionKind;
pub use codegen::{
    ChunkOverflowError, Instruction, InstructionPair, ProgramChunk, SLOTS_PER_CHUNK, Slot,
    SlotError, chunk_count, render_chunk, render_equation, render_programs, trailer,
};
pub use color::{ColorMap, ColorToken};
pub use equation::{Equation, ParsedInput, RejectReason, RejectedLine, parse_lines};
pub use normalize::normalize;
pub use plaintext::to_plaintext;
