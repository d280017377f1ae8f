//! Single-slot hand-off between sibling traversal frames.

/// A slot holding at most one value.
///
/// Each `send` must be matched by exactly one `receive` before the next
/// `send`. Breaking that pairing is a bug in the caller and panics.
#[derive(Debug)]
pub struct Mailbox<T> {
    slot: Option<T>,
}

impl<T> Mailbox<T> {
    /// An empty mailbox.
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Post `value`. Panics if the previous value was never received.
    pub fn send(&mut self, value: T) {
        assert!(self.slot.is_none(), "mailbox already holds a value");
        self.slot = Some(value);
    }

    /// Take the posted value. Panics if nothing was sent.
    pub fn receive(&mut self) -> T {
        match self.slot.take() {
            Some(value) => value,
            None => panic!("mailbox is empty"),
        }
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}
