//! Differential tests: random operation sequences against a `VecDeque` model.

use std::collections::VecDeque;

use proptest::prelude::*;

use strqueue::{handle, Queue, QueueError};

#[derive(Clone, Debug)]
enum Op {
    InsertHead(Vec<u8>),
    InsertTail(Vec<u8>),
    RemoveHead(usize),
    Reverse,
    Sort,
}

fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c'), any::<u8>()], 0..12)
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => payload_strategy().prop_map(Op::InsertHead),
        3 => payload_strategy().prop_map(Op::InsertTail),
        3 => (0usize..16).prop_map(Op::RemoveHead),
        1 => Just(Op::Reverse),
        1 => Just(Op::Sort),
    ]
}

/// Applies `op` to the model, returning what `remove_head` should report.
fn apply_model(model: &mut VecDeque<Vec<u8>>, op: &Op) -> Option<Result<Vec<u8>, QueueError>> {
    match op {
        Op::InsertHead(v) => {
            model.push_front(v.clone());
            None
        }
        Op::InsertTail(v) => {
            model.push_back(v.clone());
            None
        }
        Op::RemoveHead(cap) => {
            let Some(front) = model.front() else {
                return Some(Err(QueueError::Empty));
            };
            if *cap == 0 {
                return Some(Err(QueueError::ZeroCapacity));
            }
            let n = front.len().min(cap - 1);
            let expected = front[..n].to_vec();
            model.pop_front();
            Some(Ok(expected))
        }
        Op::Reverse => {
            model.make_contiguous().reverse();
            None
        }
        Op::Sort => {
            // Stable, same as the queue's merge sort.
            model.make_contiguous().sort();
            None
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn matches_vecdeque_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut q = Queue::new();
        let mut model: VecDeque<Vec<u8>> = VecDeque::new();
        let mut inserted = 0usize;
        let mut removed = 0usize;

        for op in &ops {
            let expected = apply_model(&mut model, op);
            match op {
                Op::InsertHead(v) => {
                    q.insert_head(v.as_slice()).unwrap();
                    inserted += 1;
                }
                Op::InsertTail(v) => {
                    q.insert_tail(v.as_slice()).unwrap();
                    inserted += 1;
                }
                Op::RemoveHead(cap) => {
                    let mut buf = vec![0xffu8; *cap];
                    let got = q.remove_head(&mut buf);
                    if let Ok(&n) = got.as_ref() {
                        prop_assert_eq!(buf[n], 0);
                        removed += 1;
                    }
                    let got = got.map(|n| buf[..n].to_vec());
                    prop_assert_eq!(Some(got), expected);
                }
                Op::Reverse => q.reverse(),
                Op::Sort => q.sort(),
            }

            q.check_invariants();
            prop_assert_eq!(q.len(), inserted - removed);
            prop_assert_eq!(q.len(), model.len());
        }

        let contents: Vec<Vec<u8>> = q.iter().map(<[u8]>::to_vec).collect();
        let expected: Vec<Vec<u8>> = model.into_iter().collect();
        prop_assert_eq!(contents, expected);
    }

    #[test]
    fn failed_removal_never_mutates(values in prop::collection::vec(payload_strategy(), 0..8)) {
        let mut q = handle::create();
        for v in &values {
            handle::insert_tail(q.as_deref_mut(), Some(v.as_slice())).unwrap();
        }
        let before: Vec<Vec<u8>> = q.as_deref().unwrap().iter().map(<[u8]>::to_vec).collect();

        let mut zero: [u8; 0] = [];
        let res = handle::remove_head(q.as_deref_mut(), Some(zero.as_mut_slice()));
        prop_assert!(res.is_err());
        let res = handle::remove_head(q.as_deref_mut(), None);
        prop_assert!(res.is_err());

        let after: Vec<Vec<u8>> = q.as_deref().unwrap().iter().map(<[u8]>::to_vec).collect();
        prop_assert_eq!(before, after);
        handle::destroy(q);
    }

    #[test]
    fn reverse_is_an_involution(values in prop::collection::vec(payload_strategy(), 0..32)) {
        let mut q = Queue::new();
        for v in &values {
            q.insert_tail(v.as_slice()).unwrap();
        }
        q.reverse();
        let reversed: Vec<Vec<u8>> = q.iter().map(<[u8]>::to_vec).collect();
        let mut expected = values.clone();
        expected.reverse();
        prop_assert_eq!(reversed, expected);

        q.reverse();
        q.check_invariants();
        let restored: Vec<Vec<u8>> = q.iter().map(<[u8]>::to_vec).collect();
        prop_assert_eq!(restored, values);
    }
}
