use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TestKey(SlotKey);

impl ArenaKey for TestKey {
    fn from_slot(slot: SlotKey) -> Self {
        Self(slot)
    }

    fn slot(self) -> SlotKey {
        self.0
    }
}

#[test]
fn insert_get_remove() {
    let mut a = Arena::<TestKey, &str>::new();
    let k0 = a.insert("a");
    let k1 = a.insert("b");
    assert_eq!(a.len(), 2);
    assert_eq!(a.get(k0), Some(&"a"));
    assert_eq!(a.remove(k0), Some("a"));
    assert_eq!(a.get(k0), None);
    assert_eq!(a.remove(k0), None);
    assert_eq!(a.get(k1), Some(&"b"));
    assert_eq!(a.len(), 1);
}

#[test]
fn vacant_slots_are_reused_with_new_generation() {
    let mut a = Arena::<TestKey, u32>::new();
    let k0 = a.insert(10);
    let _k1 = a.insert(11);
    a.remove(k0);

    let k2 = a.insert(12);
    assert_eq!(k2.0.index(), k0.0.index());
    assert_ne!(k2.0.generation(), k0.0.generation());
    assert_eq!(a.get(k0), None, "stale key must not alias the reused slot");
    assert_eq!(a.get(k2), Some(&12));
}

#[test]
fn iteration_is_in_slot_order_and_skips_vacant() {
    let mut a = Arena::<TestKey, char>::new();
    let keys = ['a', 'b', 'c', 'd'].map(|c| a.insert(c));
    a.remove(keys[1]);
    let seen = a.iter().map(|(_, v)| *v).collect::<Vec<_>>();
    assert_eq!(seen, vec!['a', 'c', 'd']);
    for (_, v) in a.iter_mut() {
        *v = v.to_ascii_uppercase();
    }
    assert_eq!(a.keys().len(), 3);
    assert_eq!(a.get(keys[3]), Some(&'D'));
}

#[test]
fn insert_with_sees_own_key() {
    let mut a = Arena::<TestKey, TestKey>::new();
    let k = a.insert_with(|k| k);
    assert_eq!(a.get(k), Some(&k));
}
