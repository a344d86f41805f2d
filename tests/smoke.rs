use anyhow::Result;

use FletchDB::consts::NO_CHILD;
use FletchDB::{Btree, FletchConfig, FletchError, Key, MemStore};

fn int_tree(max: i8, unique: bool) -> Btree<MemStore> {
    Btree::open_with_config(MemStore::new(), max, unique, &FletchConfig::default())
}

#[test]
fn single_insert_then_find() -> Result<()> {
    let mut tree = int_tree(4, true);
    tree.insert(Key::Int(1), 10)?;

    let root = tree.get_root()?;
    assert_eq!(root.elements.len(), 1);
    let e = &root.elements[0];
    assert_eq!(e.key, Key::Int(1));
    assert_eq!(e.location, 10);
    assert_eq!(e.less_location, NO_CHILD);
    assert_eq!(e.more_location, NO_CHILD);
    assert!(!e.has_children());

    assert_eq!(tree.find(&Key::Int(1))?, 10);
    Ok(())
}

#[test]
fn root_fills_in_key_order() -> Result<()> {
    let mut tree = int_tree(4, true);
    // Нарочно вразнобой.
    tree.insert(Key::Int(3), 30)?;
    tree.insert(Key::Int(1), 10)?;
    tree.insert(Key::Int(4), 40)?;
    tree.insert(Key::Int(2), 20)?;

    let root = tree.get_root()?;
    let keys: Vec<Key> = root.elements.iter().map(|e| e.key.clone()).collect();
    assert_eq!(
        keys,
        vec![Key::Int(1), Key::Int(2), Key::Int(3), Key::Int(4)]
    );

    for k in 1..=4i64 {
        assert_eq!(tree.find(&Key::Int(k))?, k * 10);
    }
    Ok(())
}

#[test]
fn duplicate_is_rejected_and_store_untouched() -> Result<()> {
    let mut tree = int_tree(4, true);
    for k in 1..=4i64 {
        tree.insert(Key::Int(k), k * 10)?;
    }

    let before = tree.store.as_bytes().to_vec();
    let err = tree.insert(Key::Int(2), 99).unwrap_err();
    assert_eq!(err, FletchError::DuplicateKey);
    assert_eq!(tree.store.as_bytes(), before.as_slice());

    // Старое значение живо.
    assert_eq!(tree.find(&Key::Int(2))?, 20);
    Ok(())
}

#[test]
fn full_leaf_rejects_new_key() -> Result<()> {
    let mut tree = int_tree(4, true);
    for k in 1..=4i64 {
        tree.insert(Key::Int(k), k * 10)?;
    }

    let before = tree.store.as_bytes().to_vec();
    let err = tree.insert(Key::Int(5), 50).unwrap_err();
    assert_eq!(err, FletchError::LeafFull);
    assert_eq!(tree.store.as_bytes(), before.as_slice());
    Ok(())
}

#[test]
fn non_unique_index_accepts_duplicate_key() -> Result<()> {
    let mut tree = int_tree(4, false);
    tree.insert(Key::Int(7), 70)?;
    tree.insert(Key::Int(7), 71)?;

    let root = tree.get_root()?;
    assert_eq!(root.elements.len(), 2);
    assert!(root.elements.iter().all(|e| e.key == Key::Int(7)));
    Ok(())
}

#[test]
fn string_keys_end_to_end() -> Result<()> {
    let mut tree = int_tree(8, true);
    tree.insert(Key::str("delta"), 4)?;
    tree.insert(Key::str("alpha"), 1)?;
    tree.insert(Key::str("bravo"), 2)?;

    assert_eq!(tree.find(&Key::str("alpha"))?, 1);
    assert_eq!(tree.find(&Key::str("bravo"))?, 2);
    assert_eq!(tree.find(&Key::str("delta"))?, 4);
    assert_eq!(
        tree.find(&Key::str("echo")).unwrap_err(),
        FletchError::KeyNotFound
    );

    // Порядок — как у big-endian целых: короткая строка меньше длинной.
    let root = tree.get_root()?;
    let keys: Vec<Key> = root.elements.iter().map(|e| e.key.clone()).collect();
    assert_eq!(
        keys,
        vec![Key::str("alpha"), Key::str("bravo"), Key::str("delta")]
    );
    Ok(())
}

#[test]
fn timestamp_keys_end_to_end() -> Result<()> {
    let mut tree = int_tree(4, true);
    tree.insert(Key::Ts(1_700_000_100), 1)?;
    tree.insert(Key::Ts(1_700_000_000), 2)?;

    assert_eq!(tree.find(&Key::Ts(1_700_000_000))?, 2);
    assert_eq!(tree.find(&Key::Ts(1_700_000_100))?, 1);

    let root = tree.get_root()?;
    assert_eq!(root.elements[0].key, Key::Ts(1_700_000_000));
    Ok(())
}

#[test]
fn mixed_kinds_in_one_index_are_rejected() -> Result<()> {
    let mut tree = int_tree(4, true);
    tree.insert(Key::Int(1), 10)?;
    let err = tree.insert(Key::str("oops"), 20).unwrap_err();
    assert_eq!(err, FletchError::MixedKinds);
    Ok(())
}
