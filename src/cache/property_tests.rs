//! Property-Based Tests for the Cache Engine
//!
//! Uses proptest to check the store against a naive model across random
//! operation sequences.

use proptest::prelude::*;
use std::collections::HashMap;

use tokio::time::Instant;

use crate::cache::store::CacheStore;
use crate::config::{CacheConfig, Capacity};

// == Strategies ==
/// Small key space so operations collide often.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-f][0-9]{0,2}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,16}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Remove { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

fn bounded_store(limit: usize) -> CacheStore<String> {
    CacheStore::new(&CacheConfig::new().capacity(Capacity::Bounded(limit)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Membership and values always match a naive map, every removal is
    // reported exactly once for a previously live key, and the capacity
    // bound is never exceeded.
    #[test]
    fn prop_bounded_store_matches_model(
        limit in 1usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..80),
    ) {
        let now = Instant::now();
        let mut store = bounded_store(limit);
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    let evicted = store.set(key.clone(), value.clone(), None, now);
                    model.insert(key, value);
                    if let Some((gone_key, gone_value)) = evicted {
                        let modeled = model.remove(&gone_key);
                        prop_assert_eq!(
                            modeled, Some(gone_value),
                            "evicted key was not live with that value"
                        );
                    }
                }
                CacheOp::Get { key } => {
                    let (value, expired) = store.get(&key, now);
                    prop_assert!(expired.is_none(), "nothing can expire without a TTL");
                    prop_assert_eq!(value, model.get(&key).cloned());
                }
                CacheOp::Remove { key } => {
                    let removed = store.remove(&key);
                    let modeled = model.remove(&key).map(|v| (key, v));
                    prop_assert_eq!(removed, modeled);
                }
            }

            prop_assert!(store.len() <= limit, "capacity bound exceeded");
            prop_assert_eq!(store.len(), model.len());
            prop_assert_eq!(store.recency().len(), store.len());
            prop_assert_eq!(store.expiry().len(), 0);
        }
    }

    // An unbounded, no-TTL store is just a map: no index entries, no
    // evictions, exact membership.
    #[test]
    fn prop_unbounded_store_is_a_plain_map(
        ops in prop::collection::vec(cache_op_strategy(), 1..80),
    ) {
        let now = Instant::now();
        let mut store: CacheStore<String> = CacheStore::new(&CacheConfig::new());
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    prop_assert!(store.set(key.clone(), value.clone(), None, now).is_none());
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key, now).0, model.get(&key).cloned());
                }
                CacheOp::Remove { key } => {
                    let removed = store.remove(&key).map(|(_, v)| v);
                    prop_assert_eq!(removed, model.remove(&key));
                }
            }
            prop_assert_eq!(store.recency().len(), 0);
            prop_assert_eq!(store.expiry().len(), 0);
        }
        prop_assert_eq!(store.len(), model.len());
    }

    // Overwriting keeps exactly one entry and returns the newest value.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy(),
    ) {
        let now = Instant::now();
        let mut store = bounded_store(4);

        store.set(key.clone(), value1, None, now);
        store.set(key.clone(), value2.clone(), None, now);

        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(store.get(&key, now).0, Some(value2));
    }

    // Filling past capacity evicts the oldest untouched key first.
    #[test]
    fn prop_eviction_picks_least_recently_used(
        keys in prop::collection::hash_set(key_strategy(), 3..8),
        new_key in key_strategy(),
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        prop_assume!(!keys.contains(&new_key));

        let now = Instant::now();
        let mut store = bounded_store(keys.len());
        for key in &keys {
            store.set(key.clone(), "v".to_string(), None, now);
        }

        // Touch the natural victim so the next-oldest is evicted instead.
        let shielded = keys[0].clone();
        store.get(&shielded, now).0.unwrap();

        let evicted = store.set(new_key.clone(), "v".to_string(), None, now);
        prop_assert_eq!(evicted.map(|(k, _)| k), Some(keys[1].clone()));
        prop_assert!(store.get(&shielded, now).0.is_some());
        prop_assert!(store.get(&new_key, now).0.is_some());
    }

    // Hit and miss counters reconcile with the model across any sequence.
    #[test]
    fn prop_stats_accuracy(
        ops in prop::collection::vec(cache_op_strategy(), 1..60),
    ) {
        let now = Instant::now();
        let mut store: CacheStore<String> = CacheStore::new(&CacheConfig::new());
        let mut model: HashMap<String, String> = HashMap::new();
        let (mut hits, mut misses) = (0u64, 0u64);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value.clone(), None, now);
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    if store.get(&key, now).0.is_some() {
                        hits += 1;
                        prop_assert!(model.contains_key(&key));
                    } else {
                        misses += 1;
                        prop_assert!(!model.contains_key(&key));
                    }
                }
                CacheOp::Remove { key } => {
                    store.remove(&key);
                    model.remove(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.misses, misses);
        prop_assert_eq!(stats.entries, model.len());
    }
}
