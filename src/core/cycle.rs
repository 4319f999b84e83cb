// Cyclic sequence iterator for looping playback-style consumption.
// Stateless after construction apart from the wrap position.
use crate::core::error::{Error, ErrorKind};

pub const MAX_ITEMS: usize = 32;

#[derive(Clone, Debug)]
pub struct Cycle<T> {
    items: Vec<T>,
    pos: usize,
}

impl<T> Cycle<T> {
    /// Builds a cycle over a fixed, non-empty sequence of at most
    /// `MAX_ITEMS` elements. Iteration starts at the first element and
    /// wraps forever in input order.
    pub fn new(items: impl IntoIterator<Item = T>) -> Result<Self, Error> {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput)
                .with_message("cycle requires at least one item"));
        }
        if items.len() > MAX_ITEMS {
            return Err(Error::new(ErrorKind::InvalidInput)
                .with_message(format!("cycle holds at most {MAX_ITEMS} items")));
        }
        Ok(Self { items, pos: 0 })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T: Clone> Iterator for Cycle<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.items[self.pos].clone();
        self.pos = (self.pos + 1) % self.items.len();
        Some(item)
    }
}
