use std::collections::HashMap;

use nug_core::hash::stable_hash_string;
use nug_core::serde::{from_json_slice, to_canonical_json_bytes};

#[test]
fn canonical_json_sorts_keys() {
    let mut value = HashMap::new();
    value.insert("zeta", 1);
    value.insert("alpha", 2);
    let bytes = to_canonical_json_bytes(&value).expect("encode");
    let text = String::from_utf8(bytes.clone()).expect("utf8");
    let alpha = text.find("alpha").expect("alpha");
    let zeta = text.find("zeta").expect("zeta");
    assert!(alpha < zeta);

    let decoded: HashMap<String, i32> = from_json_slice(&bytes).expect("decode");
    assert_eq!(decoded["zeta"], 1);
}

#[test]
fn hash_ignores_insertion_order() {
    let forward: HashMap<&str, f64> = [("lower", 1.0e6), ("upper", 4.0e6)].into_iter().collect();
    let reverse: HashMap<&str, f64> = [("upper", 4.0e6), ("lower", 1.0e6)].into_iter().collect();
    let hash = stable_hash_string(&forward).expect("hash");
    assert_eq!(hash, stable_hash_string(&reverse).expect("hash"));
    assert_eq!(hash.len(), 64);
}
