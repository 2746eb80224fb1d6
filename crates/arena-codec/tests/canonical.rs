use arena_codec::{digest, from_bytes, to_bytes, CodecError, Dictionary, Key, Value};
use proptest::prelude::*;

fn arb_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        proptest::collection::vec(any::<u8>(), 0..8).prop_map(Key::Binary),
        "[a-zA-Z0-9é]{0,8}".prop_map(Key::Text),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Boolean),
        any::<i64>().prop_map(Value::Integer),
        proptest::collection::vec(any::<u8>(), 0..24).prop_map(Value::Binary),
        ".{0,12}".prop_map(Value::Text),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            proptest::collection::vec((arb_key(), inner), 0..6)
                .prop_map(|pairs| Value::Dictionary(pairs.into_iter().collect::<Dictionary>())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_bytes_roundtrip(value in arb_value()) {
        let bytes = to_bytes(&value);
        let decoded = from_bytes(&bytes).unwrap();
        prop_assert_eq!(&decoded, &value);
        prop_assert_eq!(to_bytes(&decoded), bytes);
    }

    #[test]
    fn prop_truncation_never_decodes(value in arb_value()) {
        let bytes = to_bytes(&value);
        for cut in 0..bytes.len() {
            prop_assert!(from_bytes(&bytes[..cut]).is_err());
        }
    }
}

#[test]
fn test_equal_trees_hash_equal() {
    let a = Dictionary::new()
        .with("map", Dictionary::new())
        .with("gold", b"100".to_vec())
        .with("resetIndex", 0i64);
    let b = Dictionary::new()
        .with("resetIndex", 0i64)
        .with("gold", b"100".to_vec())
        .with("map", Dictionary::new());
    assert_eq!(to_bytes(&a.clone().into()), to_bytes(&b.clone().into()));
    assert_eq!(digest(&a.into()), digest(&b.into()));
}

#[test]
fn test_known_bytes() {
    let value: Value = Dictionary::new()
        .with("win", 1i64)
        .with("lose", 0i64)
        .with("draw", 2i64)
        .into();
    assert_eq!(to_bytes(&value), b"du4:drawi2eu4:losei0eu3:wini1ee".to_vec());
}

#[test]
fn test_error_offsets_point_at_problem() {
    assert_eq!(
        from_bytes(b"du1:ai1eu1:ai2ee"),
        Err(CodecError::NonCanonicalKeyOrder { offset: 8 })
    );
}
