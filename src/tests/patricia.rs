//! Patricia edge splitting and fusion.

use crate::tests::Validate;
use crate::{PatriciaTrie, TrieStore};

type Map = PatriciaTrie<String, i32>;

#[test]
fn single_key_is_one_edge() {
    let mut map = Map::new();
    map.insert("abcdef".to_owned(), 1);
    assert_eq!(map.store().node_count(), 2);
    assert_eq!(map.store().label_arena_len(), 6);
    assert_eq!(map.prefixed("abc").count(), 1);
    assert_eq!(map.get("abc"), None);
    assert!(map.subtrie("abc").is_none());
    assert!(map.subtrie("abcdef").is_some());
}

#[test]
fn diverging_key_splits_edge() {
    let mut map = Map::new();
    map.insert("abcdef".to_owned(), 1);
    map.insert("abcxyz".to_owned(), 2);
    // root, "abc", "def", "xyz"
    assert_eq!(map.store().node_count(), 4);
    // The split reuses the stored run; only "xyz" is new.
    assert_eq!(map.store().label_arena_len(), 9);
    assert!(map.subtrie("abc").is_some());
    map.store().validate_all();
}

#[test]
fn key_ending_inside_edge_splits_it() {
    let mut map = Map::new();
    map.insert("abcdef".to_owned(), 1);
    let (node, inserted) = map.insert("abc".to_owned(), 2);
    assert!(inserted);
    assert_eq!(map.store().node_count(), 3);
    assert_eq!(map.entry_at(node), Some((&"abc".to_owned(), &2)));
    assert_eq!(map.get("abcdef"), Some(&1));
    map.store().validate_all();
}

#[test]
fn extending_a_key_adds_one_node() {
    let mut map = Map::new();
    map.insert("abc".to_owned(), 1);
    map.insert("abcdef".to_owned(), 2);
    assert_eq!(map.store().node_count(), 3);
    map.store().validate_all();
}

#[test]
fn removing_split_point_value_fuses() {
    let mut map = Map::new();
    map.insert("abc".to_owned(), 1);
    map.insert("abcdef".to_owned(), 2);
    assert_eq!(map.remove("abc"), Some(1));
    assert_eq!(map.store().node_count(), 2);
    assert_eq!(map.get("abcdef"), Some(&2));
    assert_eq!(map.prefixed("ab").count(), 1);
    map.store().validate_all();
}

#[test]
fn removing_a_branch_fuses_parent() {
    let mut map = Map::new();
    map.insert("abcdef".to_owned(), 1);
    map.insert("abcxyz".to_owned(), 2);
    assert_eq!(map.remove("abcxyz"), Some(2));
    assert_eq!(map.store().node_count(), 2);
    assert_eq!(map.get("abcdef"), Some(&1));
    assert!(map.subtrie("abc").is_none());
    map.store().validate_all();
}

#[test]
fn fusion_keeps_grandchildren() {
    let mut map = Map::new();
    for (key, value) in [("ab", 1), ("abcd", 2), ("abce", 3), ("ax", 4)] {
        map.insert(key.to_owned(), value);
    }
    map.store().validate_all();
    // "a" splits into "b" and "x"; removing "ax" fuses "a" + "b".
    assert_eq!(map.remove("ax"), Some(4));
    map.store().validate_all();
    let keys: Vec<&str> = map.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["ab", "abcd", "abce"]);
    assert_eq!(map.remove("ab"), Some(1));
    map.store().validate_all();
    assert_eq!(map.get("abcd"), Some(&2));
    assert_eq!(map.get("abce"), Some(&3));
    // root, "abc", "d", "e"
    assert_eq!(map.store().node_count(), 4);
}

#[test]
fn shared_prefixes_compress() {
    let words = ["romane", "romanus", "romulus", "rubens", "ruber", "rubicon", "rubicundus"];
    let map: Map = words.iter().map(|w| ((*w).to_owned(), 0)).collect();
    map.store().validate_all();
    // Seven leaves and six branch points under the root.
    assert_eq!(map.store().node_count(), 14);
}

#[test]
fn churning_a_leaf_keeps_label_arena_bounded() {
    let mut map = Map::new();
    map.insert("keep".to_owned(), 0);
    for round in 0..10_000 {
        assert!(map.insert("abcdefgh".to_owned(), round).1);
        assert_eq!(map.remove("abcdefgh"), Some(round));
    }
    map.store().validate_all();
    assert_eq!(map.len(), 1);
    assert_eq!(map.store().node_count(), 2);
    assert_eq!(map.store().label_arena_len(), 4);
    assert_eq!(map.get("keep"), Some(&0));
}

#[test]
fn churning_a_split_point_keeps_label_arena_bounded() {
    let mut map = Map::new();
    map.insert("abcdef".to_owned(), 1);
    for round in 0..1_000 {
        // Splits "abcdef" at "ab", then fuses it back into one run.
        assert!(map.insert("ab".to_owned(), round).1);
        assert_eq!(map.store().node_count(), 3);
        assert_eq!(map.remove("ab"), Some(round));
        map.store().validate_all();
        assert!(map.store().label_arena_len() <= 2 * 6);
    }
    assert_eq!(map.store().node_count(), 2);
    assert_eq!(map.get("abcdef"), Some(&1));
}
