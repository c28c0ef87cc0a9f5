//! Hash collections used across sortflow.
//!
//! Item and container lookups happen on every pointer move, so the engine
//! uses AHash instead of SipHash for its maps.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert(7u64, "item");
        assert_eq!(map.get(&7), Some(&"item"));
        assert!(map.remove(&7).is_some());
        assert!(map.is_empty());
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        assert!(set.insert(42u64));
        assert!(!set.insert(42u64));
        assert!(set.contains(&42));
    }
}
