//! A trait-shaped source with a getter/setter surface.

pub trait IOrder {
    fn id(&self) -> u64;
    fn name(&self) -> String;
    fn set_name(&mut self, value: String);
}

#[dto(source = "IOrder")]
pub struct OrderRecord;
