use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU32, Ordering},
};

use prespawn::{
    Cancellable, EntityType, EventHandler, EventManager, EventPriority, PreCreatureSpawnEvent,
    PreSpawnVerdict, SpawnReason, world::pre_spawn_check,
};
use prespawn_util::{Location, WorldRef, math::vector3::Vector3};

fn candidate() -> Location {
    Location::new(WorldRef::new("world"), Vector3::new(10.0, 64.0, 10.0))
}

fn zombie(reason: SpawnReason) -> PreCreatureSpawnEvent {
    PreCreatureSpawnEvent::new(candidate(), &EntityType::ZOMBIE, reason)
}

struct Cancel;

impl EventHandler<PreCreatureSpawnEvent> for Cancel {
    fn handle_blocking(&self, event: &mut PreCreatureSpawnEvent) {
        event.set_cancelled(true);
    }
}

struct Abort;

impl EventHandler<PreCreatureSpawnEvent> for Abort {
    fn handle_blocking(&self, event: &mut PreCreatureSpawnEvent) {
        event.set_should_abort_spawn(true);
    }
}

struct Record {
    name: &'static str,
    order: Arc<Mutex<Vec<&'static str>>>,
}

impl EventHandler<PreCreatureSpawnEvent> for Record {
    fn handle_blocking(&self, _event: &mut PreCreatureSpawnEvent) {
        self.order.lock().unwrap().push(self.name);
    }
}

struct Count(AtomicU32);

impl EventHandler<PreCreatureSpawnEvent> for Count {
    fn handle(&self, _event: &PreCreatureSpawnEvent) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

struct Faulty;

impl EventHandler<PreCreatureSpawnEvent> for Faulty {
    fn handle_blocking(&self, event: &mut PreCreatureSpawnEvent) {
        event.set_cancelled(false);
        panic!("faulty listener");
    }
}

#[test]
fn no_listeners_proceeds() {
    let events = EventManager::new();
    let event = events.fire(zombie(SpawnReason::Natural));
    assert!(!event.cancelled());
    assert!(!event.should_abort_spawn());
    assert_eq!(event.verdict(), PreSpawnVerdict::Proceed);
}

#[test]
fn cancel_only_skips_candidate() {
    let events = EventManager::new();
    events.register::<PreCreatureSpawnEvent, _>(Arc::new(Cancel), EventPriority::Normal, true);

    let event = events.fire(zombie(SpawnReason::Natural));
    assert!(event.cancelled());
    assert!(!event.should_abort_spawn());
    assert_eq!(event.verdict(), PreSpawnVerdict::Skip);
}

#[test]
fn abort_only_stops_operation() {
    let events = EventManager::new();
    events.register::<PreCreatureSpawnEvent, _>(Arc::new(Abort), EventPriority::Normal, true);

    let event = events.fire(zombie(SpawnReason::Natural));
    assert!(!event.cancelled());
    assert!(event.should_abort_spawn());
    assert_eq!(event.verdict(), PreSpawnVerdict::Abort);
}

#[test]
fn cancel_and_abort_from_different_tiers() {
    for (cancel_priority, abort_priority) in [
        (EventPriority::Low, EventPriority::High),
        (EventPriority::High, EventPriority::Low),
    ] {
        let events = EventManager::new();
        events.register::<PreCreatureSpawnEvent, _>(Arc::new(Cancel), cancel_priority, true);
        events.register::<PreCreatureSpawnEvent, _>(Arc::new(Abort), abort_priority, true);

        let event = events.fire(zombie(SpawnReason::Natural));
        assert!(event.cancelled());
        assert!(event.should_abort_spawn());
        assert_eq!(event.verdict(), PreSpawnVerdict::Abort);
    }
}

#[test]
fn lower_tiers_run_first() {
    let events = EventManager::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    for (name, priority) in [
        ("highest", EventPriority::Highest),
        ("low-a", EventPriority::Low),
        ("normal", EventPriority::Normal),
        ("lowest", EventPriority::Lowest),
        ("low-b", EventPriority::Low),
        ("high", EventPriority::High),
    ] {
        events.register::<PreCreatureSpawnEvent, _>(
            Arc::new(Record {
                name,
                order: order.clone(),
            }),
            priority,
            true,
        );
    }

    events.fire(zombie(SpawnReason::Natural));
    assert_eq!(
        *order.lock().unwrap(),
        ["lowest", "low-a", "low-b", "normal", "high", "highest"]
    );
}

#[test]
fn failing_listener_keeps_earlier_flags() {
    let events = EventManager::new();
    events.register::<PreCreatureSpawnEvent, _>(Arc::new(Cancel), EventPriority::Low, true);
    events.register::<PreCreatureSpawnEvent, _>(Arc::new(Faulty), EventPriority::Normal, true);
    events.register::<PreCreatureSpawnEvent, _>(Arc::new(Abort), EventPriority::High, true);

    let event = events.fire(zombie(SpawnReason::Natural));
    assert!(event.cancelled());
    assert!(event.should_abort_spawn());
    assert_eq!(events.failed_invocations(), 1);
}

#[test]
fn listeners_cannot_move_the_candidate() {
    struct Tamper;

    impl EventHandler<PreCreatureSpawnEvent> for Tamper {
        fn handle_blocking(&self, event: &mut PreCreatureSpawnEvent) {
            let mut location = event.spawn_location();
            location.position.y = -64.0;
        }
    }

    let events = EventManager::new();
    events.register::<PreCreatureSpawnEvent, _>(Arc::new(Tamper), EventPriority::Normal, true);
    let event = events.fire(zombie(SpawnReason::Natural));
    assert_eq!(event.spawn_location(), candidate());
    assert_eq!(event.entity_type(), &EntityType::ZOMBIE);
    assert_eq!(event.reason(), SpawnReason::Natural);
}

#[test]
fn check_only_fires_for_covered_reasons() {
    let events = EventManager::new();
    let count = Arc::new(Count(AtomicU32::new(0)));
    events.register::<PreCreatureSpawnEvent, _>(count.clone(), EventPriority::Monitor, false);
    events.register::<PreCreatureSpawnEvent, _>(Arc::new(Abort), EventPriority::Normal, true);

    for reason in SpawnReason::ALL {
        let verdict = pre_spawn_check(&events, true, &candidate(), &EntityType::ZOMBIE, *reason);
        if reason.fires_pre_spawn_event() {
            assert_eq!(verdict, PreSpawnVerdict::Abort, "{reason}");
        } else {
            assert_eq!(verdict, PreSpawnVerdict::Proceed, "{reason}");
        }
    }
    assert_eq!(count.0.load(Ordering::Relaxed), 2);
}

#[test]
fn replacing_the_event_keeps_the_candidate() {
    struct Swap;

    impl EventHandler<PreCreatureSpawnEvent> for Swap {
        fn handle_blocking(&self, event: &mut PreCreatureSpawnEvent) {
            let mut other = PreCreatureSpawnEvent::new(
                Location::new(WorldRef::new("world_the_end"), Vector3::new(0.0, -64.0, 0.0)),
                &EntityType::CREEPER,
                SpawnReason::Custom,
            );
            other.set_cancelled(true);
            *event = other;
        }
    }

    struct Seen(Mutex<Vec<(Location, SpawnReason)>>);

    impl EventHandler<PreCreatureSpawnEvent> for Seen {
        fn handle(&self, event: &PreCreatureSpawnEvent) {
            self.0
                .lock()
                .unwrap()
                .push((event.spawn_location(), event.reason()));
        }
    }

    let events = EventManager::new();
    let seen = Arc::new(Seen(Mutex::new(Vec::new())));
    events.register::<PreCreatureSpawnEvent, _>(Arc::new(Swap), EventPriority::Low, true);
    events.register::<PreCreatureSpawnEvent, _>(seen.clone(), EventPriority::Monitor, false);

    let event = events.fire(zombie(SpawnReason::Natural));
    assert_eq!(event.spawn_location(), candidate());
    assert_eq!(event.entity_type(), &EntityType::ZOMBIE);
    assert_eq!(event.reason(), SpawnReason::Natural);
    // the flags are the listener's to set
    assert!(event.cancelled());
    assert_eq!(
        *seen.0.lock().unwrap(),
        [(candidate(), SpawnReason::Natural)]
    );
}
