//! Source types used by the extraction and generation tests.

pub mod shop {
    use std::marker::PhantomData;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum Status {
        Pending,
        Shipped,
        Delivered,
    }

    #[derive(Debug, Clone, Default)]
    pub struct Address {
        pub street: String,
        pub city: String,
    }

    #[derive(Debug, Clone, Default)]
    pub struct Order {
        pub id: u64,
        #[serde(rename = "label")]
        pub name: String,
        #[dto(nullable)]
        pub coupon: String,
        pub note: Option<String>,
        pub status: Status,
        pub shipping: Address,
        pub(crate) internal: String,
        pub _marker: PhantomData<()>,
    }
}
