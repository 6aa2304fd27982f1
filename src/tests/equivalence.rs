//! Random operation sequences checked against `BTreeMap`.

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::tests::Validate;
use crate::{DoubleArrayTrie, PatriciaTrie, SortedTrie, Trie, TrieStore};

#[derive(Clone, Debug)]
enum Op {
    Insert(Vec<u8>, u32),
    Upsert(Vec<u8>, u32),
    Remove(Vec<u8>),
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A small alphabet keeps keys colliding on shared prefixes.
    prop::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c'), Just(0xff)], 0..=6)
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        10 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Upsert(k, v)),
        40 => key.prop_map(Op::Remove),
    ];
    prop::collection::vec(op, 0..=300)
}

fn run<S>(ops: Vec<Op>) -> Result<(), TestCaseError>
where
    S: TrieStore<Elem = u8, Value = (Vec<u8>, u32)> + Validate,
{
    let mut trie: Trie<Vec<u8>, u32, S> = Trie::new();
    let mut model: BTreeMap<Vec<u8>, u32> = BTreeMap::new();
    let mut seen: Vec<Vec<u8>> = Vec::new();

    for op in ops {
        match op {
            Op::Insert(key, value) => {
                seen.push(key.clone());
                let fresh = !model.contains_key(&key);
                if fresh {
                    model.insert(key.clone(), value);
                }
                let (node, inserted) = trie.insert(key, value);
                prop_assert_eq!(inserted, fresh);
                prop_assert!(trie.entry_at(node).is_some());
            }
            Op::Upsert(key, value) => {
                seen.push(key.clone());
                *model.entry(key.clone()).or_default() = value;
                *trie.get_or_insert_default(key) = value;
            }
            Op::Remove(key) => {
                prop_assert_eq!(trie.remove(&key), model.remove(&key));
            }
        }

        trie.store().validate_all();
        prop_assert_eq!(trie.len(), model.len());
        for key in &seen {
            prop_assert_eq!(trie.get(key), model.get(key));
            prop_assert_eq!(trie.find(key).is_some(), model.contains_key(key));
        }
    }

    let got: Vec<(&Vec<u8>, &u32)> = trie.iter().collect();
    let expected: Vec<(&Vec<u8>, &u32)> = model.iter().collect();
    prop_assert_eq!(got, expected);

    for (key, _) in &model {
        prop_assert!(trie.remove(key).is_some());
    }
    prop_assert!(trie.is_empty());
    prop_assert_eq!(trie.store().node_count(), 1);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn double_array_matches_btreemap(ops in ops_strategy()) {
        run::<crate::DoubleArray<u8, (Vec<u8>, u32)>>(ops)?;
    }

    #[test]
    fn sorted_matches_btreemap(ops in ops_strategy()) {
        run::<crate::SortedChildren<u8, (Vec<u8>, u32)>>(ops)?;
    }

    #[test]
    fn patricia_matches_btreemap(ops in ops_strategy()) {
        run::<crate::Patricia<u8, (Vec<u8>, u32)>>(ops)?;
    }

    #[test]
    fn backends_agree(pairs in prop::collection::vec((key_strategy(), any::<u32>()), 0..=100)) {
        let da: DoubleArrayTrie<Vec<u8>, u32> = pairs.iter().cloned().collect();
        let sorted: SortedTrie<Vec<u8>, u32> = pairs.iter().cloned().collect();
        let patricia: PatriciaTrie<Vec<u8>, u32> = pairs.into_iter().collect();
        prop_assert!(da == sorted);
        prop_assert!(sorted == patricia);
    }
}
