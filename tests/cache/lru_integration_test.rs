use std::num::NonZeroUsize;

use lrukit::cache::cache_traits::{CoreCache, LRUCacheTrait, MutableCache};
use lrukit::cache::entry::Entry;
use lrukit::cache::lru::LruCache;
use lrukit::common::config::CacheConfig;
use lrukit::common::exception::CacheError;

use crate::common::logger::init_test_logger;
use crate::{assert_err, assert_ok};

fn order<V: PartialEq>(cache: &LruCache<&'static str, V>) -> Vec<&'static str> {
    cache.iter().map(|(k, _)| *k).collect()
}

mod recency {
    use super::*;

    #[test]
    fn test_push_scenarios() {
        init_test_logger();
        let mut cache = LruCache::new(3);

        // One element is both head and tail
        assert!(cache.touch("A", "A_VAL_1"));
        assert_eq!(cache.peek_mru(), Some((&"A", &"A_VAL_1")));
        assert_eq!(cache.peek_lru(), Some((&"A", &"A_VAL_1")));

        cache.clear();
        cache.touch("A", "A_VAL_1");
        cache.touch("B", "B_VAL_1");
        assert_eq!(cache.peek_mru(), Some((&"B", &"B_VAL_1")));
        assert_eq!(cache.peek_lru(), Some((&"A", &"A_VAL_1")));

        cache.clear();
        for (key, value) in [
            ("A", "A_VAL_1"),
            ("B", "B_VAL_1"),
            ("C", "C_VAL_1"),
            ("D", "D_VAL_1"),
        ] {
            cache.touch(key, value);
        }
        assert_eq!(order(&cache), vec!["D", "C", "B"]);

        // Re-inserting an existing key only moves it to the top
        cache.touch("C", "C_VAL_2");
        assert_eq!(order(&cache), vec!["C", "D", "B"]);
        assert_eq!(cache.peek(&"C"), Some(&"C_VAL_2"));
        assert_eq!(cache.peek_lru(), Some((&"B", &"B_VAL_1")));
    }

    #[test]
    fn test_pop_scenarios() {
        init_test_logger();
        let mut cache = LruCache::new(3);

        cache.touch("A", "A_VAL_1");
        assert!(cache.evict());
        assert!(cache.is_empty());
        assert_eq!(cache.peek_mru(), None);

        for (key, value) in [("A", "A_VAL_1"), ("B", "B_VAL_1"), ("C", "C_VAL_1")] {
            cache.touch(key, value);
        }
        assert!(cache.evict());
        assert_eq!(order(&cache), vec!["C", "B"]);

        cache.clear();
        for (key, value) in [
            ("A", "A_VAL_1"),
            ("B", "B_VAL_1"),
            ("C", "C_VAL_1"),
            ("D", "C_VAL_1"),
            ("B", "B_VAL_2"),
            ("A", "A_VAL_2"),
        ] {
            cache.touch(key, value);
        }
        assert_eq!(order(&cache), vec!["A", "B", "D"]);
        for _ in 0..cache.len() {
            assert!(cache.evict());
        }
        assert!(cache.is_empty());

        // Evicting an empty cache is harmless
        assert!(!cache.evict());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_mixed_trait_and_inherent_calls() {
        let mut cache = LruCache::new(3);

        assert_eq!(cache.insert("A", 1), None);
        assert!(cache.touch("B", 2));
        assert_eq!(cache.get(&"A"), Some(&1));
        assert!(cache.promote(&"B"));
        assert_eq!(cache.remove(&"A"), Some(1));
        assert!(cache.touch("C", 3));

        assert_eq!(order(&cache), vec!["C", "B"]);
        assert_eq!(cache.recency_rank(&"B"), Some(1));
        assert_eq!(cache.access_count(), 3);
    }

    #[test]
    fn test_snapshot_matches_iter() {
        let mut cache = LruCache::new(4);
        for (key, value) in [("A", 1), ("B", 2), ("C", 3)] {
            cache.touch(key, value);
        }
        cache.get(&"A");

        let snapshot = cache.snapshot();
        assert_eq!(
            snapshot,
            vec![Entry::new("A", 1), Entry::new("C", 3), Entry::new("B", 2)]
        );
        let pairs: Vec<(&str, i32)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
        let from_snapshot: Vec<(&str, i32)> =
            snapshot.into_iter().map(Entry::into_parts).collect();
        assert_eq!(pairs, from_snapshot);
    }
}

mod rejection {
    use super::*;

    #[test]
    fn test_zero_capacity() {
        init_test_logger();
        let mut cache = LruCache::new(0);

        assert!(!cache.touch("A", 1));
        assert_err!(cache.try_touch("A", 1), CacheError::CapacityZero);
        assert_eq!(cache.iter().count(), 0);
        assert_eq!(cache.access_count(), 0);
    }

    #[test]
    fn test_budget_law() {
        init_test_logger();
        let max = NonZeroUsize::new(5).unwrap();
        let mut cache = LruCache::with_access_budget(3, max);

        for n in 0..5u32 {
            assert_ok!(cache.try_touch(n, n));
        }
        assert_eq!(cache.access_count(), 5);
        assert_eq!(cache.len(), 3);

        assert_err!(
            cache.try_touch(5, 5),
            CacheError::BudgetExceeded { max_accesses: 5 }
        );
        assert!(cache.is_empty());
        assert_eq!(cache.access_count(), 0);

        assert_ok!(cache.try_touch(6, 6), "first touch after reset");
        assert_eq!(cache.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec![6]);
    }

    #[test]
    fn test_budget_with_trait_insert() {
        let config = CacheConfig::default().with_capacity(4).with_max_accesses(2);
        let mut cache = LruCache::with_config(config);

        assert_eq!(cache.insert('x', 1), None);
        assert_eq!(cache.insert('x', 2), Some(1));
        // third write trips the budget; nothing is stored
        assert_eq!(cache.insert('y', 3), None);
        assert!(cache.is_empty());
        assert!(!cache.contains(&'y'));
    }

    #[test]
    fn test_long_run_budget_boundary() {
        init_test_logger();
        let mut cache = LruCache::with_access_budget(5000, NonZeroUsize::new(8000).unwrap());

        let values: Vec<String> = (0..10_000).map(|n| format!("v{:05}", n)).collect();
        let mut rejected = Vec::new();
        for (n, value) in values.iter().enumerate() {
            if !cache.touch(n, value.clone()) {
                rejected.push(n);
            }
        }

        assert_eq!(rejected, vec![8000]);
        assert_eq!(cache.len(), 1999);
        assert_eq!(cache.access_count(), 1999);
        assert_eq!(cache.peek_lru(), Some((&8001, &values[8001])));
        assert_eq!(cache.peek_mru(), Some((&9999, &values[9999])));
    }
}
