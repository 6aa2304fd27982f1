//! Map contract, stamped out once per backend.

macro_rules! contract_tests {
    ($mod_name:ident, $trie:ident) => {
        mod $mod_name {
            use crate::tests::{SCENARIO, SCENARIO_SORTED, Validate};
            use crate::{$trie, TrieStore};

            type Map = $trie<String, i32>;

            fn scenario() -> Map {
                let mut map = Map::new();
                for (key, value) in SCENARIO {
                    assert!(map.insert(key.to_owned(), value).1, "{key} reported as present");
                    map.store().validate_all();
                }
                map
            }

            fn keys(map: &Map) -> Vec<&str> {
                map.iter().map(|(k, _)| k.as_str()).collect()
            }

            fn under<'a>(map: &'a Map, prefix: &str) -> Vec<&'a str> {
                map.prefixed(prefix).map(|(k, _)| k.as_str()).collect()
            }

            #[test]
            fn empty_map() {
                let map = Map::new();
                assert_eq!(map.len(), 0);
                assert!(map.is_empty());
                assert_eq!(map.iter().next(), None);
                assert_eq!(map.get("anything"), None);
                assert_eq!(map.store().node_count(), 1);
            }

            #[test]
            fn concrete_scenario() {
                let mut map = scenario();
                assert_eq!(map.len(), 6);
                assert_eq!(map.get("test"), Some(&8));
                assert_eq!(map.get("tester"), Some(&20));
                assert_eq!(map.get("te"), None);
                assert_eq!(map.find("te"), None);
                assert_eq!(keys(&map), SCENARIO_SORTED);

                assert_eq!(map.remove("test"), Some(8));
                map.store().validate_all();
                assert_eq!(map.get("test"), None);
                assert_eq!(map.get("testera"), Some(&10));
                assert_eq!(map.len(), 5);
            }

            #[test]
            fn no_silent_overwrite() {
                let mut map = Map::new();
                let (first, inserted) = map.insert("key".to_owned(), 1);
                assert!(inserted);
                let (second, inserted) = map.insert("key".to_owned(), 2);
                assert!(!inserted);
                assert_eq!(first, second);
                assert_eq!(map.get("key"), Some(&1));
                assert_eq!(map.len(), 1);
            }

            #[test]
            fn insert_reports_the_key_node() {
                let mut map = Map::new();
                let (node, _) = map.insert("node".to_owned(), 5);
                assert_eq!(map.find("node"), Some(node));
                assert_eq!(map.entry_at(node), Some((&"node".to_owned(), &5)));
            }

            #[test]
            fn subscript_overwrite() {
                let mut map = scenario();
                *map.get_or_insert_default("tester".to_owned()) = 21;
                assert_eq!(map.get("tester"), Some(&21));
                assert_eq!(map.len(), 6);

                *map.get_or_insert_default("fresh".to_owned()) += 3;
                assert_eq!(map.get("fresh"), Some(&3));
                assert_eq!(map.len(), 7);
                map.store().validate_all();
            }

            #[test]
            fn get_mut_is_visible() {
                let mut map = scenario();
                *map.get_mut("etre").unwrap() *= 10;
                assert_eq!(map["etre"], 40);
                assert_eq!(map.get_mut("et"), None);
            }

            #[test]
            fn erase_is_idempotent() {
                let mut map = scenario();
                assert_eq!(map.remove("tertre"), Some(40));
                assert_eq!(map.remove("tertre"), None);
                assert_eq!(map.len(), 5);
                assert_eq!(map.get("tertrer"), Some(&48));
                map.store().validate_all();
            }

            #[test]
            fn erase_missing_keeps_size() {
                let mut map = scenario();
                let nodes = map.store().node_count();
                assert_eq!(map.remove("te"), None);
                assert_eq!(map.remove("testerab"), None);
                assert_eq!(map.remove("zzz"), None);
                assert_eq!(map.len(), 6);
                assert_eq!(map.store().node_count(), nodes);
            }

            #[test]
            fn erase_everything_leaves_root_only() {
                let mut map = scenario();
                for key in SCENARIO_SORTED.iter().rev() {
                    assert!(map.remove(*key).is_some(), "{key} missing");
                    map.store().validate_all();
                }
                assert!(map.is_empty());
                assert_eq!(map.store().node_count(), 1);
                assert_eq!(map.iter().count(), 0);
            }

            #[test]
            fn erase_then_reinsert() {
                let mut map = scenario();
                map.remove("tester");
                assert!(map.insert("tester".to_owned(), 99).1);
                assert_eq!(map.get("tester"), Some(&99));
                assert_eq!(map.get("testera"), Some(&10));
                map.store().validate_all();
            }

            #[test]
            fn empty_key_lives_at_root() {
                let mut map = scenario();
                let (node, inserted) = map.insert(String::new(), 0);
                assert!(inserted);
                assert_eq!(node, map.store().root());
                assert_eq!(map.get(""), Some(&0));
                assert_eq!(keys(&map).first(), Some(&""));

                assert_eq!(map.remove(""), Some(0));
                assert_eq!(map.get(""), None);
                assert_eq!(map.len(), 6);
                map.store().validate_all();
            }

            #[test]
            fn iteration_is_sorted() {
                let words = ["pear", "apple", "fig", "apricot", "banana", "app", "a", "b"];
                let map: Map = words.iter().map(|w| ((*w).to_owned(), 0)).collect();
                let mut expected = words.to_vec();
                expected.sort_unstable();
                assert_eq!(keys(&map), expected);
            }

            #[test]
            fn prefixed_iteration() {
                let map = scenario();
                assert_eq!(under(&map, "tes"), ["test", "tester", "testera"]);
                assert_eq!(under(&map, "te"), ["tertre", "tertrer", "test", "tester", "testera"]);
                assert_eq!(under(&map, "tester"), ["tester", "testera"]);
                assert_eq!(under(&map, "testera"), ["testera"]);
                assert_eq!(under(&map, ""), SCENARIO_SORTED);
                assert!(under(&map, "x").is_empty());
                assert!(under(&map, "testerax").is_empty());
                assert!(under(&map, "tez").is_empty());
            }

            #[test]
            fn iter_from_found_node() {
                let map = scenario();
                let node = map.find("tertrer").unwrap();
                let rest: Vec<&str> = map.iter_from(node).map(|(k, _)| k.as_str()).collect();
                assert_eq!(rest, ["tertrer", "test", "tester", "testera"]);
            }

            #[test]
            fn get_key_value_and_contains() {
                let map = scenario();
                assert_eq!(map.get_key_value("etre"), Some((&"etre".to_owned(), &4)));
                assert!(map.contains_key("tertrer"));
                assert!(!map.contains_key("tert"));
            }

            #[test]
            fn byte_keys() {
                let mut map: $trie<Vec<u8>, u8> = $trie::new();
                map.insert(vec![0, 255, 1], 1);
                map.insert(vec![0, 255], 2);
                map.insert(vec![255], 3);
                map.insert(vec![0], 4);
                let got: Vec<&[u8]> = map.iter().map(|(k, _)| k.as_slice()).collect();
                assert_eq!(got, [&[0][..], &[0, 255], &[0, 255, 1], &[255]]);
                assert_eq!(map.get(&[0_u8, 255][..]), Some(&2));
                map.store().validate_all();
            }

            #[test]
            fn u16_keys() {
                let mut map: $trie<Vec<u16>, &str> = $trie::new();
                map.insert(vec![0x4e2d, 0x6587], "zhongwen");
                map.insert(vec![0x4e2d], "zhong");
                map.insert(vec![0x0041], "A");
                assert_eq!(map.get(&[0x4e2d_u16][..]), Some(&"zhong"));
                let got: Vec<&str> = map.iter().map(|(_, v)| *v).collect();
                assert_eq!(got, ["A", "zhong", "zhongwen"]);
                assert_eq!(map.remove(&[0x4e2d_u16, 0x6587][..]), Some("zhongwen"));
                map.store().validate_all();
            }
        }
    };
}

contract_tests!(double_array, DoubleArrayTrie);
contract_tests!(sorted, SortedTrie);
contract_tests!(patricia, PatriciaTrie);
