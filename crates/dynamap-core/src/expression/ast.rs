//! AST types for update descriptions.
//!
//! Callers describe a partial update as a list of per-field expressions
//! ([`UpdateDescription`]), usually through the builder methods below. The
//! expression tree is deliberately small: literals, the null/remove sentinel,
//! references to the updated field itself, single-level `+`/`-` arithmetic,
//! and named function calls. Lowering into the closed [`UpdateClause`] set
//! happens in the classifier; anything outside the closed set is rejected
//! there, never half-translated.

use std::fmt;

use dynamap_model::Value;

/// Function name recognized by the classifier: conditional default.
pub const FN_IF_NOT_EXISTS: &str = "if_not_exists";
/// Function name recognized by the classifier: list concatenation.
pub const FN_LIST_APPEND: &str = "list_append";
/// Function name recognized by the classifier: set-element removal.
pub const FN_DELETE_FROM_SET: &str = "delete_from_set";

/// One node of a caller-supplied update expression.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateExpr {
    /// A literal value to write.
    Literal(Value),
    /// The "absent" sentinel: the field is removed from the record.
    Null,
    /// A reference to a field of the record being updated.
    FieldRef(String),
    /// Arithmetic: `left + right` or `left - right`.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<UpdateExpr>,
        /// Right operand.
        right: Box<UpdateExpr>,
    },
    /// A named function call: `function(args...)`.
    Call {
        /// Function name.
        function: String,
        /// Function arguments.
        args: Vec<UpdateExpr>,
    },
}

impl fmt::Display for UpdateExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => write!(f, "{v}"),
            Self::Null => write!(f, "NULL"),
            Self::FieldRef(name) => write!(f, "{name}"),
            Self::Binary { op, left, right } => write!(f, "{left} {op} {right}"),
            Self::Call { function, args } => {
                write!(f, "{function}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Arithmetic operators allowed in update expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`).
    Sub,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
        }
    }
}

/// One field's update within an update description.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    /// Logical field name being updated.
    pub field_name: String,
    /// The expression producing the field's new state.
    pub expr: UpdateExpr,
}

/// An ordered list of per-field updates.
///
/// Field order is preserved: translation walks the updates in the order they
/// were added, which makes placeholder numbering deterministic.
///
/// # Examples
///
/// ```
/// use dynamap_core::expression::UpdateDescription;
///
/// let update = UpdateDescription::new()
///     .set("name", "x")
///     .increment("score", 10)
///     .remove("description");
/// assert_eq!(update.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateDescription {
    updates: Vec<FieldUpdate>,
}

impl UpdateDescription {
    /// Create an empty update description.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a literal value to a field.
    #[must_use]
    pub fn set(self, field_name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field_name, UpdateExpr::Literal(value.into()))
    }

    /// Remove a field from the record.
    #[must_use]
    pub fn remove(self, field_name: impl Into<String>) -> Self {
        self.push(field_name, UpdateExpr::Null)
    }

    /// Write `value` only if the field is currently absent.
    #[must_use]
    pub fn set_default(self, field_name: impl Into<String>, value: impl Into<Value>) -> Self {
        let field_name = field_name.into();
        let call = UpdateExpr::Call {
            function: FN_IF_NOT_EXISTS.to_owned(),
            args: vec![
                UpdateExpr::FieldRef(field_name.clone()),
                UpdateExpr::Literal(value.into()),
            ],
        };
        self.push(field_name, call)
    }

    /// Add `delta` to a numeric field.
    #[must_use]
    pub fn increment(self, field_name: impl Into<String>, delta: impl Into<Value>) -> Self {
        self.arithmetic(field_name, BinaryOp::Add, delta)
    }

    /// Subtract `delta` from a numeric field.
    #[must_use]
    pub fn decrement(self, field_name: impl Into<String>, delta: impl Into<Value>) -> Self {
        self.arithmetic(field_name, BinaryOp::Sub, delta)
    }

    /// Append `items` to the end of a list field.
    #[must_use]
    pub fn append(self, field_name: impl Into<String>, items: Vec<Value>) -> Self {
        let field_name = field_name.into();
        let call = UpdateExpr::Call {
            function: FN_LIST_APPEND.to_owned(),
            args: vec![
                UpdateExpr::FieldRef(field_name.clone()),
                UpdateExpr::Literal(Value::list(items)),
            ],
        };
        self.push(field_name, call)
    }

    /// Prepend `items` to the front of a list field.
    #[must_use]
    pub fn prepend(self, field_name: impl Into<String>, items: Vec<Value>) -> Self {
        let field_name = field_name.into();
        let call = UpdateExpr::Call {
            function: FN_LIST_APPEND.to_owned(),
            args: vec![
                UpdateExpr::Literal(Value::list(items)),
                UpdateExpr::FieldRef(field_name.clone()),
            ],
        };
        self.push(field_name, call)
    }

    /// Remove `items` from a set field.
    #[must_use]
    pub fn delete_from_set(self, field_name: impl Into<String>, items: impl Into<Value>) -> Self {
        let field_name = field_name.into();
        let call = UpdateExpr::Call {
            function: FN_DELETE_FROM_SET.to_owned(),
            args: vec![
                UpdateExpr::FieldRef(field_name.clone()),
                UpdateExpr::Literal(items.into()),
            ],
        };
        self.push(field_name, call)
    }

    /// Attach a hand-built expression to a field.
    ///
    /// The expression must still lower into the closed clause set; shapes
    /// outside it are rejected at translation time.
    #[must_use]
    pub fn set_expr(self, field_name: impl Into<String>, expr: UpdateExpr) -> Self {
        self.push(field_name, expr)
    }

    fn arithmetic(
        self,
        field_name: impl Into<String>,
        op: BinaryOp,
        delta: impl Into<Value>,
    ) -> Self {
        let field_name = field_name.into();
        let expr = UpdateExpr::Binary {
            op,
            left: Box::new(UpdateExpr::FieldRef(field_name.clone())),
            right: Box::new(UpdateExpr::Literal(delta.into())),
        };
        self.push(field_name, expr)
    }

    fn push(mut self, field_name: impl Into<String>, expr: UpdateExpr) -> Self {
        self.updates.push(FieldUpdate {
            field_name: field_name.into(),
            expr,
        });
        self
    }

    /// Number of field updates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Returns `true` if no field is updated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Iterate the field updates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldUpdate> {
        self.updates.iter()
    }
}

impl<'a> IntoIterator for &'a UpdateDescription {
    type Item = &'a FieldUpdate;
    type IntoIter = std::slice::Iter<'a, FieldUpdate>;

    fn into_iter(self) -> Self::IntoIter {
        self.updates.iter()
    }
}

/// The closed set of update shapes the translator renders.
///
/// Every caller-supplied expression lowers into exactly one of these per
/// targeted field, or translation fails.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateClause {
    /// Write a literal value.
    Assign(Value),
    /// Write a default only when the attribute is absent (`if_not_exists`).
    ConditionalDefault(Value),
    /// Self-referencing arithmetic (`field + k` / `field - k`).
    NumericDelta {
        /// The operator.
        op: BinaryOp,
        /// The delta literal, as supplied by the caller.
        delta: Value,
    },
    /// Concatenate items after the existing list.
    ListAppend(Value),
    /// Concatenate items before the existing list.
    ListPrepend(Value),
    /// Remove elements from a set attribute.
    SetDelete(Value),
    /// Remove the attribute.
    Remove,
}
