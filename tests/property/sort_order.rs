//! Sort properties: agreement with a stable reference sort, stability and
//! idempotence.

use std::cmp::Ordering;

use proptest::prelude::*;

use strqueue::{ByteOrder, Comparator, Queue};

fn queue_from(values: &[Vec<u8>]) -> Queue {
    let mut q = Queue::new();
    for v in values {
        q.insert_tail(v.as_slice()).unwrap();
    }
    q
}

fn contents(q: &Queue) -> Vec<Vec<u8>> {
    q.iter().map(<[u8]>::to_vec).collect()
}

fn words() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(b'a'..=b'e', 0..6), 0..64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn sort_matches_slice_sort(values in words()) {
        let mut q = queue_from(&values);
        q.sort();
        q.check_invariants();

        let mut expected = values.clone();
        expected.sort_by(|a, b| ByteOrder.compare(a, b));
        prop_assert_eq!(contents(&q), expected.clone());
        prop_assert_eq!(q.peek_tail().map(<[u8]>::to_vec), expected.last().cloned());
    }

    #[test]
    fn sort_is_idempotent(values in words()) {
        let mut q = queue_from(&values);
        q.sort();
        let once = contents(&q);
        q.sort();
        prop_assert_eq!(contents(&q), once);
    }

    #[test]
    fn sort_is_stable(keys in prop::collection::vec(b'a'..=b'c', 0..48)) {
        // Payload = key byte + insertion index; compare on the key byte only.
        let values: Vec<Vec<u8>> = keys
            .iter()
            .enumerate()
            .map(|(i, &k)| {
                let mut v = vec![k];
                v.extend_from_slice(&(i as u32).to_be_bytes());
                v
            })
            .collect();
        let key_only = |a: &[u8], b: &[u8]| -> Ordering { a[0].cmp(&b[0]) };

        let mut q = queue_from(&values);
        q.sort_by(&key_only);
        q.check_invariants();

        let mut expected = values.clone();
        expected.sort_by(|a, b| a[0].cmp(&b[0]));
        prop_assert_eq!(contents(&q), expected);
    }

    #[test]
    fn sort_never_grows_arena(values in words()) {
        let mut q = queue_from(&values);
        let slots = q.slot_count();
        q.sort();
        q.reverse();
        q.sort();
        prop_assert_eq!(q.slot_count(), slots);
        prop_assert_eq!(q.len(), values.len());
    }
}

#[test]
fn sorts_large_reverse_ordered_input() {
    let mut q = Queue::new();
    for i in (0..10_000u32).rev() {
        q.insert_tail(format!("{i:05}").as_str()).unwrap();
    }
    q.sort();
    q.check_invariants();

    let mut prev: Option<Vec<u8>> = None;
    for v in q.iter() {
        if let Some(p) = &prev {
            assert!(p.as_slice() <= v);
        }
        prev = Some(v.to_vec());
    }
    assert_eq!(q.peek_head(), Some(&b"00000"[..]));
    assert_eq!(q.peek_tail(), Some(&b"09999"[..]));
}
