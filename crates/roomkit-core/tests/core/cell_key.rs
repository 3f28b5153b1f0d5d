use proptest::prelude::*;
use roomkit_core::{decode, encode, CellKey, KeyError};

fn rounded(v: f64) -> f64 {
    roomkit_core::normalize_coord(v)
}

proptest! {
    #[test]
    fn prop_decode_recovers_rounded_coordinates(x in -1.0e6f64..1.0e6, y in -1.0e6f64..1.0e6) {
        let (dx, dy) = decode(&encode(x, y)).unwrap();
        prop_assert!((dx - rounded(x)).abs() < 1e-9);
        prop_assert!((dy - rounded(y)).abs() < 1e-9);
    }

    #[test]
    fn prop_decode_is_exact_for_any_finite_value(
        x in proptest::num::f64::NORMAL,
        y in proptest::num::f64::NORMAL,
    ) {
        let (dx, dy) = decode(&encode(x, y)).unwrap();
        prop_assert_eq!(dx, rounded(x));
        prop_assert_eq!(dy, rounded(y));
    }

    #[test]
    fn prop_distinct_rounded_values_keep_distinct_keys(
        a in proptest::num::f64::NORMAL,
        b in proptest::num::f64::NORMAL,
    ) {
        prop_assume!(rounded(a) != rounded(b));
        prop_assert_ne!(CellKey::new(a, 0.0), CellKey::new(b, 0.0));
        prop_assert_ne!(encode(a, 0.0), encode(b, 0.0));
    }

    #[test]
    fn prop_encode_is_canonical(x in -1.0e4f64..1.0e4, y in -1.0e4f64..1.0e4) {
        let key = encode(x, y);
        let (dx, dy) = decode(&key).unwrap();
        prop_assert_eq!(encode(dx, dy), key);
    }

    #[test]
    fn prop_distinct_micro_coordinates_encode_differently(
        a in -1_000_000i64..1_000_000,
        b in -1_000_000i64..1_000_000,
    ) {
        prop_assume!(a != b);
        let xa = a as f64 / 1_000_000.0;
        let xb = b as f64 / 1_000_000.0;
        prop_assert_ne!(encode(xa, 0.0), encode(xb, 0.0));
    }
}

#[test]
fn test_keys_order_by_x_then_y() {
    let mut keys = vec![
        CellKey::new(1.0, 0.0),
        CellKey::new(0.0, 1.0),
        CellKey::new(0.0, 0.0),
    ];
    keys.sort();
    assert_eq!(
        keys,
        vec![
            CellKey::new(0.0, 0.0),
            CellKey::new(0.0, 1.0),
            CellKey::new(1.0, 0.0)
        ]
    );
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(matches!(
        "1,2,3".parse::<CellKey>(),
        Err(KeyError::Malformed { .. })
    ));
    assert!(matches!("".parse::<CellKey>(), Err(KeyError::Malformed { .. })));
    assert_eq!("0.5, 1".parse::<CellKey>().unwrap(), CellKey::new(0.5, 1.0));
}
