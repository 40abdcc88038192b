//! Fixed-order feature vector construction.

use super::features::{DerivedFields, RawOrder};

/// Current feature vector layout version. Model artifacts declare the
/// layout they were fitted on and fail validation on a mismatch.
pub const FEATURE_VERSION: i64 = 1;
/// Number of `f32` values per feature vector.
pub const FEATURE_VECTOR_LEN: usize = 6;

/// Build the feature vector the model was fitted on.
///
/// Field order is `[quantity, unit_price, day_of_month, weekday,
/// is_weekend, revenue_per_unit]`. The model depends on this order;
/// reordering silently corrupts predictions, so both the single and batch
/// paths must go through this one function.
pub fn to_feature_vector(order: &RawOrder, derived: &DerivedFields) -> Vec<f32> {
    let mut out = Vec::with_capacity(FEATURE_VECTOR_LEN);
    out.push(order.quantity as f32);
    out.push(order.unit_price);
    out.push(order.day_of_month as f32);
    out.push(order.weekday as f32);
    out.push(if derived.is_weekend { 1.0 } else { 0.0 });
    out.push(derived.revenue_per_unit);
    debug_assert_eq!(out.len(), FEATURE_VECTOR_LEN);
    out
}
