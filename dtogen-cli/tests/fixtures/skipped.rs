//! Requests that are collected as warnings or skipped during synthesis.

pub enum Payment {
    Card { last4: String },
    Cash,
}

#[dto(source = "Payment")]
pub struct PaymentView;

#[dto(source = "crate::billing::Missing")]
pub struct MissingView;

#[dto(source = "crate::shop::Order")]
pub enum BadCarrier {
    Unused,
}
