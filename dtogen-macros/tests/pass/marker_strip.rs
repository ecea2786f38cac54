use dtogen_macros::dto;

#[dto]
pub struct Order {
    pub id: i64,
    #[dto(nullable)]
    pub note: String,
}

fn main() {
    let order = Order {
        id: 1,
        note: "unwrapped".to_string(),
    };
    assert_eq!(order.id, 1);
    assert_eq!(order.note, "unwrapped");
}
