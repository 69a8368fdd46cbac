use std::sync::Arc;

use parking_lot::RwLock;

pub type Atomic<T> = Arc<RwLock<T>>;

#[inline]
pub fn atomic<T>(t: T) -> Atomic<T> {
    Arc::new(RwLock::new(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_shares_state_between_clones() {
        let shared = atomic(1);
        let other = shared.clone();
        *other.write() = 2;
        assert_eq!(*shared.read(), 2);
    }
}
