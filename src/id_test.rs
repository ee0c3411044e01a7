use super::*;

use std::{collections::HashSet, thread};

#[test]
fn test_next_id_increasing() {
    let mut prev = next_id();
    for _i in 0..1000 {
        let id = next_id();
        assert!(id > prev, "{} {}", id, prev);
        prev = id;
    }
}

#[test]
fn test_next_id_threads() {
    let n_threads = 8;
    let n_ids = 10_000;

    let mut handles = vec![];
    for _j in 0..n_threads {
        let h = thread::spawn(move || {
            let ids: Vec<u64> = (0..n_ids).map(|_| next_id()).collect();
            ids
        });
        handles.push(h);
    }

    let mut seen: HashSet<u64> = HashSet::new();
    for handle in handles.into_iter() {
        let ids = handle.join().unwrap();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        for id in ids.into_iter() {
            assert!(seen.insert(id), "duplicate id {}", id);
        }
    }
    assert_eq!(seen.len(), n_threads * n_ids);
}
