//! A file with no synthesis requests at all.

pub struct Unrelated {
    pub value: i32,
}
