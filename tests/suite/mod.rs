//! Integration test modules.

mod curation;
mod files;
mod pipeline;
