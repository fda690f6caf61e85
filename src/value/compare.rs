use crate::*;

// Comparison rules, in order: matching scalar types compare directly;
// a class instance on the left may supply `__eq__` / `__lt__`; two
// empty holders are equal (but never ordered); anything else fails.

/// `lhs == rhs`.
pub fn equal(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &mut dyn Context,
) -> RuntimeResult<bool> {
    if let (Some(l), Some(r)) = (lhs.as_number(), rhs.as_number()) {
        return Ok(l == r);
    }
    if let (Some(l), Some(r)) = (lhs.as_str(), rhs.as_str()) {
        return Ok(*l == *r);
    }
    if let (Some(l), Some(r)) = (lhs.as_bool(), rhs.as_bool()) {
        return Ok(l == r);
    }
    if lhs.has_method("__eq__", 1) {
        return call_dunder(lhs, "__eq__", rhs, context);
    }
    if lhs.is_none() && rhs.is_none() {
        return Ok(true);
    }
    Err(RuntimeError::type_err("Cannot compare objects for equality"))
}

/// `lhs < rhs`. There is no `None` case: ordering empty holders is an
/// error.
pub fn less(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &mut dyn Context,
) -> RuntimeResult<bool> {
    if let (Some(l), Some(r)) = (lhs.as_number(), rhs.as_number()) {
        return Ok(l < r);
    }
    if let (Some(l), Some(r)) = (lhs.as_str(), rhs.as_str()) {
        return Ok(*l < *r);
    }
    if let (Some(l), Some(r)) = (lhs.as_bool(), rhs.as_bool()) {
        return Ok(!l && r);
    }
    if lhs.has_method("__lt__", 1) {
        return call_dunder(lhs, "__lt__", rhs, context);
    }
    Err(RuntimeError::type_err("Cannot compare objects for less"))
}

pub fn not_equal(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &mut dyn Context,
) -> RuntimeResult<bool> {
    Ok(!equal(lhs, rhs, context)?)
}

pub fn greater(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &mut dyn Context,
) -> RuntimeResult<bool> {
    Ok(!less(lhs, rhs, context)? && !equal(lhs, rhs, context)?)
}

pub fn less_or_equal(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &mut dyn Context,
) -> RuntimeResult<bool> {
    Ok(less(lhs, rhs, context)? || equal(lhs, rhs, context)?)
}

/// Defined as `!less`, so incomparable pairs that `equal` would reject
/// may still satisfy it. Callers relying on a total order should
/// screen out `None` first.
pub fn greater_or_equal(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &mut dyn Context,
) -> RuntimeResult<bool> {
    Ok(!less(lhs, rhs, context)?)
}

/// Delegate to a user-defined comparison method and validate that it
/// produced a `Bool`.
fn call_dunder(
    lhs: &ObjectHolder,
    name: &str,
    rhs: &ObjectHolder,
    context: &mut dyn Context,
) -> RuntimeResult<bool> {
    let result = lhs.call(name, std::slice::from_ref(rhs), context)?;
    result
        .as_bool()
        .ok_or_else(|| RuntimeError::type_err(format!("{} must return Bool", name)))
}
