//! Clause classification.
//!
//! Two steps live here. `lower` collapses a caller-supplied expression tree
//! into the closed [`UpdateClause`] set, rejecting every shape outside it
//! (unknown functions, multi-level arithmetic, arithmetic that does not
//! reference the updated field, bad arities). `classify` then maps a lowered
//! clause plus the field's metadata onto exactly one clause category and its
//! rendered text.
//!
//! The one non-obvious mapping is the numeric-delta split. The native `ADD`
//! clause writes a raw numeric delta, so there is nowhere to apply a format
//! string; a numeric field that carries one must fall back to explicit path
//! arithmetic under `SET`, where the formatted delta travels as an ordinary
//! value parameter.

use dynamap_model::{PropertyMetadata, Value};

use super::ast::{
    BinaryOp, FN_DELETE_FROM_SET, FN_IF_NOT_EXISTS, FN_LIST_APPEND, UpdateClause, UpdateExpr,
};
use super::context::ExpressionContext;
use crate::error::TranslationError;

/// Lower a field's expression into the closed clause set.
///
/// # Errors
///
/// Returns [`TranslationError::UnsupportedShape`] for any expression outside
/// the closed set, carrying a rendering of the rejected (sub-)expression.
pub fn lower(field_name: &str, expr: &UpdateExpr) -> Result<UpdateClause, TranslationError> {
    let unsupported = |detail: &str, shape: &dyn std::fmt::Display| {
        Err(TranslationError::UnsupportedShape {
            field_name: field_name.to_owned(),
            shape: format!("{detail}: {shape}"),
        })
    };

    match expr {
        UpdateExpr::Null => Ok(UpdateClause::Remove),
        UpdateExpr::Literal(v) if v.is_null() => Ok(UpdateClause::Remove),
        UpdateExpr::Literal(v) => Ok(UpdateClause::Assign(v.clone())),
        UpdateExpr::FieldRef(_) => unsupported("bare field reference", expr),
        UpdateExpr::Binary { op, left, right } => {
            let UpdateExpr::FieldRef(referenced) = left.as_ref() else {
                return unsupported("arithmetic must start from the updated field", expr);
            };
            if referenced != field_name {
                return unsupported("arithmetic must reference the updated field itself", expr);
            }
            match right.as_ref() {
                UpdateExpr::Literal(v) if v.is_n() => Ok(UpdateClause::NumericDelta {
                    op: *op,
                    delta: v.clone(),
                }),
                UpdateExpr::Binary { .. } => unsupported("multi-level arithmetic", expr),
                _ => unsupported("arithmetic delta must be a numeric literal", expr),
            }
        }
        UpdateExpr::Call { function, args } => match function.as_str() {
            FN_IF_NOT_EXISTS => match args.as_slice() {
                [UpdateExpr::FieldRef(referenced), UpdateExpr::Literal(default)]
                    if referenced == field_name =>
                {
                    Ok(UpdateClause::ConditionalDefault(default.clone()))
                }
                _ => unsupported("if_not_exists expects (updated field, default)", expr),
            },
            FN_LIST_APPEND => match args.as_slice() {
                [UpdateExpr::FieldRef(referenced), UpdateExpr::Literal(items)]
                    if referenced == field_name =>
                {
                    Ok(UpdateClause::ListAppend(items.clone()))
                }
                [UpdateExpr::Literal(items), UpdateExpr::FieldRef(referenced)]
                    if referenced == field_name =>
                {
                    Ok(UpdateClause::ListPrepend(items.clone()))
                }
                _ => unsupported(
                    "list_append expects the updated field on exactly one side",
                    expr,
                ),
            },
            FN_DELETE_FROM_SET => match args.as_slice() {
                [UpdateExpr::FieldRef(referenced), UpdateExpr::Literal(items)]
                    if referenced == field_name =>
                {
                    Ok(UpdateClause::SetDelete(items.clone()))
                }
                _ => unsupported("delete_from_set expects (updated field, values)", expr),
            },
            _ => unsupported("unsupported function call", expr),
        },
    }
}

/// Map a lowered clause onto its category, rendering its clause text into
/// the context.
///
/// # Errors
///
/// Returns [`TranslationError::UnsupportedShape`] when the clause is illegal
/// for the field's declared type, or [`TranslationError::FormatFailed`] from
/// the value pipeline.
pub fn classify(
    ctx: &mut ExpressionContext<'_>,
    meta: &PropertyMetadata,
    clause: UpdateClause,
) -> Result<(), TranslationError> {
    let name = ctx.name_placeholder(&meta.attribute_name);

    match clause {
        UpdateClause::Remove => {
            ctx.push_remove(name);
        }
        UpdateClause::Assign(value) => {
            let p = ctx.capture(meta, value)?;
            ctx.push_set(format!("{name} = {p}"));
        }
        UpdateClause::ConditionalDefault(default) => {
            let p = ctx.capture(meta, default)?;
            ctx.push_set(format!("{name} = if_not_exists({name}, {p})"));
        }
        UpdateClause::NumericDelta { op, delta } => {
            if !meta.declared_type.is_numeric() {
                return Err(TranslationError::UnsupportedShape {
                    field_name: meta.field_name.clone(),
                    shape: format!(
                        "arithmetic update on non-numeric attribute (declared {})",
                        meta.declared_type
                    ),
                });
            }
            if meta.format.is_some() {
                // Explicit path arithmetic: the operator carries the sign and
                // the formatted magnitude travels as a value parameter.
                let p = ctx.capture(meta, delta)?;
                ctx.push_set(format!("{name} = {name} {op} {p}"));
            } else {
                let signed = match op {
                    BinaryOp::Add => delta,
                    BinaryOp::Sub => negate(&delta),
                };
                let p = ctx.capture(meta, signed)?;
                ctx.push_add(format!("{name} {p}"));
            }
        }
        UpdateClause::ListAppend(items) => {
            let p = ctx.capture(meta, items)?;
            ctx.push_set(format!("{name} = list_append({name}, {p})"));
        }
        UpdateClause::ListPrepend(items) => {
            let p = ctx.capture(meta, items)?;
            ctx.push_set(format!("{name} = list_append({p}, {name})"));
        }
        UpdateClause::SetDelete(items) => {
            if !meta.declared_type.is_set() {
                return Err(TranslationError::UnsupportedShape {
                    field_name: meta.field_name.clone(),
                    shape: format!(
                        "delete-from-set on non-set attribute (declared {})",
                        meta.declared_type
                    ),
                });
            }
            let p = ctx.capture(meta, items)?;
            ctx.push_delete(format!("{name} {p}"));
        }
    }
    Ok(())
}

/// Flip the sign of a string-encoded number. Lowering guarantees the value
/// is an `N` variant before this is reached.
fn negate(delta: &Value) -> Value {
    match delta.as_n() {
        Some(n) => match n.strip_prefix('-') {
            Some(positive) => Value::N(positive.to_owned()),
            None => Value::N(format!("-{n}")),
        },
        None => delta.clone(),
    }
}
