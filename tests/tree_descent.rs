use anyhow::Result;

use FletchDB::consts::{NO_CHILD, NO_PARENT};
use FletchDB::node::KeyKind;
use FletchDB::{Btree, Descent, Element, FletchConfig, FletchError, Key, MemStore, Node};

fn tree() -> Btree<MemStore> {
    Btree::open_with_config(MemStore::new(), 4, true, &FletchConfig::default())
}

// Дерево из трёх узлов, собранное руками: лист 1 <- корень 2 -> лист 3.

#[test]
fn three_node_tree_find_descends_both_sides() -> Result<()> {
    let mut t = tree();

    let mut leaf_a = Node::new(0, 1, vec![Element::leaf(Key::Int(1), 10)], vec![0]);
    let l_a = t.write_node(&mut leaf_a)?;

    let mut leaf_b = Node::new(0, 2, vec![Element::leaf(Key::Int(3), 30)], vec![0]);
    let l_b = t.write_node(&mut leaf_b)?;

    let mut root = Node::new(
        NO_PARENT,
        0,
        vec![Element::new(KeyKind::Int, Key::Int(2), 20, l_a, l_b)?],
        Vec::new(),
    );
    t.write_root(&mut root)?;

    assert_eq!(t.find(&Key::Int(1))?, 10);
    assert_eq!(t.find(&Key::Int(2))?, 20);
    assert_eq!(t.find(&Key::Int(3))?, 30);

    // Мимо обоих листьев.
    assert_eq!(t.find(&Key::Int(4)).unwrap_err(), FletchError::KeyNotFound);
    assert_eq!(t.find(&Key::Int(0)).unwrap_err(), FletchError::KeyNotFound);
    Ok(())
}

#[test]
fn descent_reports_exact_and_nearest() -> Result<()> {
    let mut t = tree();

    let mut leaf = Node::new(0, 1, vec![Element::leaf(Key::Int(10), 100)], vec![0]);
    let l = t.write_node(&mut leaf)?;

    let mut root = Node::new(
        NO_PARENT,
        0,
        vec![Element::new(KeyKind::Int, Key::Int(20), 200, l, NO_CHILD)?],
        Vec::new(),
    );
    t.write_root(&mut root)?;

    // Точное попадание в корне.
    match t.find_node_by_key(0, &Key::Int(20))? {
        Descent::Exact(n) => assert!(n.is_root()),
        other => panic!("expected exact match, got {other:?}"),
    }

    // Промах уходит в лист: ключа нет, но лист — место, где он жил бы.
    match t.find_node_by_key(0, &Key::Int(11))? {
        Descent::Nearest(n) => {
            assert_eq!(n.id, 1);
            assert_eq!(n.self_location, l);
        }
        other => panic!("expected nearest leaf, got {other:?}"),
    }
    Ok(())
}

#[test]
fn descent_can_resume_from_an_inner_node() -> Result<()> {
    let mut t = tree();

    let mut leaf = Node::new(1, 2, vec![Element::leaf(Key::Int(5), 55)], vec![0, 1]);
    let l_leaf = t.write_node(&mut leaf)?;

    let mut mid = Node::new(
        0,
        1,
        vec![Element::new(KeyKind::Int, Key::Int(8), 88, l_leaf, NO_CHILD)?],
        vec![0],
    );
    let l_mid = t.write_node(&mut mid)?;

    let mut root = Node::new(
        NO_PARENT,
        0,
        vec![Element::new(KeyKind::Int, Key::Int(50), 500, l_mid, NO_CHILD)?],
        Vec::new(),
    );
    t.write_root(&mut root)?;

    // Спуск с середины дерева, минуя корень.
    let got = t.find_node_by_key(l_mid, &Key::Int(5))?;
    match got {
        Descent::Exact(n) => assert_eq!(n.id, 2),
        other => panic!("expected exact match from mid-tree start, got {other:?}"),
    }
    Ok(())
}

#[test]
fn three_level_tree_routes_by_distance() -> Result<()> {
    let mut t = tree();

    let mut leaf_a = Node::new(1, 3, vec![Element::leaf(Key::Int(10), 100)], vec![0, 1]);
    let l_a = t.write_node(&mut leaf_a)?;
    let mut leaf_b = Node::new(1, 4, vec![Element::leaf(Key::Int(30), 300)], vec![0, 1]);
    let l_b = t.write_node(&mut leaf_b)?;

    let mut mid = Node::new(
        0,
        1,
        vec![Element::new(KeyKind::Int, Key::Int(20), 200, l_a, l_b)?],
        vec![0],
    );
    let l_mid = t.write_node(&mut mid)?;

    let mut leaf_c = Node::new(0, 2, vec![Element::leaf(Key::Int(60), 600)], vec![0]);
    let l_c = t.write_node(&mut leaf_c)?;

    let mut root = Node::new(
        NO_PARENT,
        0,
        vec![Element::new(KeyKind::Int, Key::Int(40), 400, l_mid, l_c)?],
        Vec::new(),
    );
    t.write_root(&mut root)?;

    assert_eq!(t.find(&Key::Int(10))?, 100);
    assert_eq!(t.find(&Key::Int(20))?, 200);
    assert_eq!(t.find(&Key::Int(30))?, 300);
    assert_eq!(t.find(&Key::Int(40))?, 400);
    assert_eq!(t.find(&Key::Int(60))?, 600);
    assert_eq!(t.find(&Key::Int(25)).unwrap_err(), FletchError::KeyNotFound);
    Ok(())
}

#[test]
fn insert_lands_in_the_nearest_leaf() -> Result<()> {
    let mut t = tree();

    let mut leaf_a = Node::new(0, 1, vec![Element::leaf(Key::Int(1), 10)], vec![0]);
    let l_a = t.write_node(&mut leaf_a)?;
    let mut leaf_b = Node::new(0, 2, vec![Element::leaf(Key::Int(9), 90)], vec![0]);
    let l_b = t.write_node(&mut leaf_b)?;

    let mut root = Node::new(
        NO_PARENT,
        0,
        vec![Element::new(KeyKind::Int, Key::Int(5), 50, l_a, l_b)?],
        Vec::new(),
    );
    t.write_root(&mut root)?;

    // 2 ближе к 1: уйдёт в левый лист; лист перезапишется с форвардером,
    // но его адрес для родителя не изменится.
    t.insert(Key::Int(2), 22)?;
    assert_eq!(t.find(&Key::Int(2))?, 22);

    let leaf = t.read_node(l_a)?;
    assert_eq!(leaf.self_location, l_a);
    assert_eq!(leaf.elements.len(), 2);

    // Старые ключи на месте.
    assert_eq!(t.find(&Key::Int(1))?, 10);
    assert_eq!(t.find(&Key::Int(5))?, 50);
    assert_eq!(t.find(&Key::Int(9))?, 90);
    Ok(())
}
