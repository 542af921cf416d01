//! Applies autopep8 fixes one pycodestyle rule at a time and records every
//! file a rule changed as its own git commit.
//!
//! The result is a reviewable, bisectable history of mechanical style fixes
//! instead of a single mass-reformat commit.
pub mod builders;
pub mod core;
pub mod utils;
