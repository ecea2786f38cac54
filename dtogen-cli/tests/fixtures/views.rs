//! Hand-written carrier types with attached synthesis requests.

#[dto(source = "crate::shop::Order", exclude = "internal")]
pub struct OrderView;

impl OrderView {
    pub fn custom_from_original(value: Self, _original: &crate::shop::Order) -> Self {
        value
    }
}

#[dto(
    source = "crate::shop::Order",
    make_optional,
    required = "id",
    exclude = "internal"
)]
pub struct SparseOrder;
