use dtogen_macros::dto;

pub mod shop {
    pub struct Order {
        pub id: i64,
        pub name: String,
        pub internal: String,
    }
}

#[dto(
    source = "crate::shop::Order",
    name = "OrderView",
    exclude = "internal",
    make_optional,
    required = "id",
    copy_attrs = false
)]
pub struct OrderView;

fn main() {
    let _ = OrderView;
}
