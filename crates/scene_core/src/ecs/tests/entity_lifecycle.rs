//! Lifecycle scenarios: deferred flushes, callback ordering and sorting

use crate::ecs::{Entity, EntityBehaviour, EntityContext, EntityId, EntityList, EntityState, EntityStore, SceneId};
use crate::foundation::time::Timer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

struct Recorder {
    log: Log,
}

impl EntityBehaviour for Recorder {
    fn on_added_to_scene(&mut self, context: &EntityContext<'_>) {
        let name = context.entity().map_or("?", Entity::name).to_string();
        self.log.borrow_mut().push(format!("{name} added"));
    }

    fn on_removed_from_scene(&mut self, context: &EntityContext<'_>) {
        let name = context.entity().map_or("?", Entity::name).to_string();
        self.log.borrow_mut().push(format!("{name} removed"));
    }

    fn update(&mut self, context: &EntityContext<'_>) {
        let name = context.entity().map_or("?", Entity::name).to_string();
        self.log.borrow_mut().push(format!("{name} update"));
    }
}

/// Records what an added callback can see of its batch
struct SiblingProbe {
    sibling: &'static str,
    seen: Rc<RefCell<Vec<(bool, Option<EntityId>, usize)>>>,
}

impl EntityBehaviour for SiblingProbe {
    fn on_added_to_scene(&mut self, context: &EntityContext<'_>) {
        let live = context.list().state_of(context.id()) == EntityState::Live;
        let sibling = context.find_entity(self.sibling);
        let tagged = context.entities_with_tag(9).len();
        self.seen.borrow_mut().push((live, sibling, tagged));
    }
}

fn recorded(store: &mut EntityStore, log: &Log, name: &str) -> EntityId {
    store.insert(Entity::new(name).with_behaviour(Recorder { log: Rc::clone(log) }))
}

#[test]
fn test_add_remove_same_frame_fires_nothing() {
    let log = Log::default();
    let mut store = EntityStore::new();
    let mut list = EntityList::new(SceneId(0));
    let ghost = recorded(&mut store, &log, "ghost");

    list.add(ghost);
    list.remove(ghost);
    list.update_lists(&mut store, None);

    assert!(list.is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_two_frame_scenario() {
    let log = Log::default();
    let mut store = EntityStore::new();
    let mut list = EntityList::new(SceneId(3));

    let a = store.insert(
        Entity::new("a")
            .with_tag(1)
            .with_behaviour(Recorder { log: Rc::clone(&log) }),
    );
    let b = store.insert(
        Entity::new("b")
            .with_tag(2)
            .with_behaviour(Recorder { log: Rc::clone(&log) }),
    );
    list.add(a);
    list.add(b);
    list.update_lists(&mut store, None);

    assert_eq!(list.as_slice(), &[a, b]);
    assert_eq!(list.entities_with_tag(&store, 1), vec![a]);
    assert_eq!(list.entities_with_tag(&store, 2), vec![b]);
    assert_eq!(*log.borrow(), vec!["a added", "b added"]);

    let c = recorded(&mut store, &log, "c");
    list.remove(a);
    list.add(c);
    list.update_lists(&mut store, None);

    assert_eq!(list.as_slice(), &[b, c]);
    assert_eq!(store.get(a).unwrap().scene(), None);
    assert!(list.entities_with_tag(&store, 1).is_empty());
    assert_eq!(
        log.borrow().iter().filter(|entry| entry.as_str() == "a removed").count(),
        1
    );
    assert_eq!(log.borrow().last().map(String::as_str), Some("c added"));
}

#[test]
fn test_added_callbacks_see_whole_batch() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut store = EntityStore::new();
    let mut list = EntityList::new(SceneId(0));

    let a = store.insert(Entity::new("a").with_tag(9).with_behaviour(SiblingProbe {
        sibling: "b",
        seen: Rc::clone(&seen),
    }));
    let b = store.insert(Entity::new("b").with_tag(9).with_behaviour(SiblingProbe {
        sibling: "a",
        seen: Rc::clone(&seen),
    }));
    list.add(a);
    list.add(b);
    list.update_lists(&mut store, None);

    // a's callback already sees b, which was linked in the same flush
    assert_eq!(*seen.borrow(), vec![(true, Some(b), 2), (true, Some(a), 2)]);
}

#[test]
fn test_interleaved_frames_match_model() {
    let mut store = EntityStore::new();
    let mut list = EntityList::new(SceneId(0));
    let ids: Vec<EntityId> = (0..12)
        .map(|i| {
            let order = (i * 7) % 5 - 2;
            store.insert(Entity::new(format!("e{i}")).with_update_order(order))
        })
        .collect();

    let mut live: HashSet<EntityId> = HashSet::new();
    let mut to_add: HashSet<EntityId> = HashSet::new();
    let mut to_remove: HashSet<EntityId> = HashSet::new();
    let mut rng = StdRng::seed_from_u64(17);

    for _frame in 0..60 {
        for _ in 0..6 {
            let id = ids[rng.gen_range(0..ids.len())];
            if rng.gen_bool(0.5) {
                list.add(id);
                if !to_add.contains(&id) && !(live.contains(&id) && !to_remove.contains(&id)) {
                    to_add.insert(id);
                }
            } else {
                list.remove(id);
                // the latest request wins: a pending add is cancelled first
                if !to_add.remove(&id) {
                    to_remove.insert(id);
                }
            }
        }

        list.update_lists(&mut store, None);
        for id in to_remove.drain() {
            live.remove(&id);
        }
        live.extend(to_add.drain());

        let mut expected: Vec<EntityId> = live.iter().copied().collect();
        expected.sort_by(|&a, &b| store.compare(a, b));
        assert_eq!(list.as_slice(), expected.as_slice());
        for &id in &ids {
            let state = list.state_of(id);
            assert_eq!(state == EntityState::Live, live.contains(&id));
        }
    }
}

#[test]
fn test_update_interval_gating() {
    let log = Log::default();
    let mut store = EntityStore::new();
    let mut list = EntityList::new(SceneId(0));
    let mut timer = Timer::new();

    let every = recorded(&mut store, &log, "every");
    let third = store.insert(
        Entity::new("third")
            .with_update_interval(3)
            .with_behaviour(Recorder { log: Rc::clone(&log) }),
    );
    let off = recorded(&mut store, &log, "off");
    store.get_mut(off).unwrap().set_enabled(false);

    for id in [every, third, off] {
        list.add(id);
    }
    list.update_lists(&mut store, None);
    log.borrow_mut().clear();

    for _ in 0..6 {
        timer.advance(0.016);
        list.update(&mut store, &timer);
    }

    let log = log.borrow();
    assert_eq!(log.iter().filter(|entry| entry.as_str() == "every update").count(), 6);
    assert_eq!(log.iter().filter(|entry| entry.as_str() == "third update").count(), 2);
    assert!(!log.iter().any(|entry| entry.starts_with("off")));
}

#[test]
fn test_remove_all_flushes_stale_removals_first() {
    let log = Log::default();
    let mut store = EntityStore::new();
    let mut list = EntityList::new(SceneId(0));
    let stale = recorded(&mut store, &log, "stale");
    let kept = recorded(&mut store, &log, "kept");
    list.add(stale);
    list.add(kept);
    list.update_lists(&mut store, None);
    log.borrow_mut().clear();

    list.remove(stale);
    list.remove_all_entities(&mut store, None);

    assert_eq!(*log.borrow(), vec!["stale removed", "kept removed"]);
    assert!(!store.get(stale).unwrap().is_destroyed());
    assert!(store.get(kept).unwrap().is_destroyed());
    assert!(list.is_empty());
}
