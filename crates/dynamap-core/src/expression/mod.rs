//! Update-description translation.
//!
//! This module turns a typed per-field update description into the store's
//! update-expression string plus placeholder tables. The pipeline is:
//!
//! 1. **Lowering**: collapse each field's expression tree into the closed
//!    clause set, rejecting anything outside it.
//! 2. **Classification**: map each lowered clause (plus the field's
//!    metadata) onto one clause category, running captured literals through
//!    the value pipeline.
//! 3. **Rendering**: assemble the four clause lists into the final
//!    expression string.

pub mod ast;
pub mod classifier;
pub mod context;
pub mod renderer;
pub mod translator;

pub use ast::{BinaryOp, FieldUpdate, UpdateClause, UpdateDescription, UpdateExpr};
pub use context::ExpressionContext;
pub use translator::Translator;
