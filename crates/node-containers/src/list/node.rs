/// List node. `next` and `prev` are arena indices; neither owns the target.
#[derive(Clone, Debug)]
pub struct ListNode<T> {
    pub next: Option<u32>,
    pub prev: Option<u32>,
    pub value: T,
}

impl<T> ListNode<T> {
    pub fn new(value: T, next: Option<u32>, prev: Option<u32>) -> Self {
        Self { next, prev, value }
    }
}
