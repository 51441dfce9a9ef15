//! Shared proptest strategies.

use docdiff_types::{Number, Value};
use proptest::prelude::*;

/// Arbitrary documents, small enough to keep shrinking fast. Keys include
/// pointer-escaped characters and the special `id`/`metadata` names.
pub(crate) fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(|f| Value::Number(Number::from_f64(f).unwrap())),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map("[a-z~/]{1,3}|id|metadata", inner, 0..5)
                .prop_map(Value::Object),
        ]
    })
}
