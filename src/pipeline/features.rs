//! Derived-field computation for sales orders.

/// Raw attributes of one sales order known at prediction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawOrder {
    /// Number of units ordered, at least 1.
    pub quantity: u32,
    /// Price per unit, non-negative.
    pub unit_price: f32,
    /// Day of the month, 1..=31.
    pub day_of_month: i32,
    /// Day of the week, 0=Monday..6=Sunday.
    pub weekday: i32,
}

/// Fields computed deterministically from a [`RawOrder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFields {
    /// Whether the order day falls on a weekend.
    pub is_weekend: bool,
    /// Quantity times unit price, unrounded.
    pub revenue_per_unit: f32,
}

/// Whether a weekday (0=Monday..6=Sunday) falls on the weekend.
///
/// Values outside 0..=6 are not rejected; anything at or above 5 counts as a
/// weekend, matching the source data's encoding.
pub fn is_weekend(weekday: i32) -> bool {
    weekday >= 5
}

/// Revenue for the order line: quantity times unit price, unrounded.
///
/// Display layers may round for presentation; the value itself never is.
pub fn revenue_per_unit(quantity: u32, unit_price: f32) -> f32 {
    quantity as f32 * unit_price
}

/// Compute all derived fields for one order.
pub fn derive(order: &RawOrder) -> DerivedFields {
    DerivedFields {
        is_weekend: is_weekend(order.weekday),
        revenue_per_unit: revenue_per_unit(order.quantity, order.unit_price),
    }
}
