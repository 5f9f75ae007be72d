//! Structural checks over sequences.
//!
//! Each check is a stateless predicate that either passes or fails with
//! [`DashboardError::DataValidation`] carrying the caller's message. Callers
//! chain them with `?` to build multi-clause preconditions.

use crate::error::{DashboardError, Result};
use serde_json::Value;

/// Values that can be asked whether they are numeric.
///
/// Booleans in a JSON payload are never numeric, even though some dynamic
/// languages treat them as integers.
pub trait Numeric {
    fn is_numeric(&self) -> bool;
}

impl Numeric for Value {
    fn is_numeric(&self) -> bool {
        matches!(self, Value::Number(_))
    }
}

impl Numeric for f64 {
    fn is_numeric(&self) -> bool {
        self.is_finite()
    }
}

impl Numeric for i64 {
    fn is_numeric(&self) -> bool {
        true
    }
}

impl Numeric for u64 {
    fn is_numeric(&self) -> bool {
        true
    }
}

impl<T: Numeric + ?Sized> Numeric for &T {
    fn is_numeric(&self) -> bool {
        (**self).is_numeric()
    }
}

pub fn ensure_non_empty<T>(items: &[T], message: &str) -> Result<()> {
    if items.is_empty() {
        return Err(DashboardError::validation(message));
    }
    Ok(())
}

pub fn ensure_matching_lengths<A, B>(left: &[A], right: &[B], message: &str) -> Result<()> {
    if left.len() != right.len() {
        return Err(DashboardError::validation(message));
    }
    Ok(())
}

pub fn ensure_all_numeric<T: Numeric>(items: &[T], message: &str) -> Result<()> {
    if !items.iter().all(Numeric::is_numeric) {
        return Err(DashboardError::validation(message));
    }
    Ok(())
}
