use std::sync::atomic::{AtomicUsize, Ordering};

use crate::element::ElementId;

// Single static counter for all elements
static NEXT_ELEMENT_ID: AtomicUsize = AtomicUsize::new(1);

pub fn generate_id() -> ElementId {
    ElementId::new(NEXT_ELEMENT_ID.fetch_add(1, Ordering::SeqCst))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert!(b > a);
    }
}
