use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use client_engine::{
    AttackResponse, AttackTarget, Collection, EngineApi, EngineError, GameMeta, JoinResponse,
    Feed, MemoryTransport, MoveResponse, SnapshotEvent, SnapshotTransport, TargetType,
    TickResponse,
};
use client_frontend_core::{
    ActionDispatcher, DispatchOutcome, FrontendConfig, Intent, Interaction, InteractionKind,
    Session, SessionIdentity, UpdateScope,
};
use game_core::{Entity, EntityCategory, EntityId, GridSize, Position, StepDelta};
use tokio::{sync::mpsc, time::timeout};

const UID: &str = "me";

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Join(String),
    Move(i32, i32),
    Attack(AttackTarget),
    Tick,
}

/// Engine fake that records every call and answers with canned responses.
#[derive(Default)]
struct RecordingEngine {
    calls: Mutex<Vec<Call>>,
    attack_reply: Mutex<Option<AttackResponse>>,
}

impl RecordingEngine {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EngineApi for RecordingEngine {
    async fn join(&self, uid: &str, display_name: &str) -> Result<JoinResponse, EngineError> {
        assert_eq!(uid, UID);
        self.calls.lock().unwrap().push(Call::Join(display_name.to_string()));
        Ok(JoinResponse {
            ok: true,
            x: Some(5),
            y: Some(5),
            ..Default::default()
        })
    }

    async fn move_player(&self, uid: &str, step: StepDelta) -> Result<MoveResponse, EngineError> {
        assert_eq!(uid, UID);
        self.calls.lock().unwrap().push(Call::Move(step.dx(), step.dy()));
        Ok(MoveResponse {
            ok: true,
            x: Some(5 + step.dx()),
            y: Some(5 + step.dy()),
            ..Default::default()
        })
    }

    async fn attack(&self, _uid: &str, target: &AttackTarget) -> Result<AttackResponse, EngineError> {
        self.calls.lock().unwrap().push(Call::Attack(target.clone()));
        match self.attack_reply.lock().unwrap().clone() {
            Some(reply) => Ok(reply),
            None => Err(EngineError::Status {
                status: 502,
                body: "bad gateway".to_string(),
            }),
        }
    }

    async fn tick(&self) -> Result<TickResponse, EngineError> {
        self.calls.lock().unwrap().push(Call::Tick);
        Ok(TickResponse {
            ok: true,
            zombies_moved: Some(3),
            ..Default::default()
        })
    }
}

fn session() -> Session {
    let mut session = Session::new(SessionIdentity::new(UID, "Tester"), &FrontendConfig::default());
    session.apply_snapshot(SnapshotEvent::Game(GameMeta {
        grid: GridSize::new(10, 10),
        ..Default::default()
    }));
    session.apply_entities(Collection::Players, vec![me_at(5, 5)]);
    session
}

fn me_at(x: i32, y: i32) -> Entity {
    Entity::new(UID, EntityCategory::Human, "PLAYER").at(Position::new(x, y))
}

fn walker(id: &str, x: i32, y: i32) -> Entity {
    Entity::new(id, EntityCategory::Zombie, "WALKER").at(Position::new(x, y))
}

async fn next_outcome(rx: &mut mpsc::Receiver<DispatchOutcome>) -> DispatchOutcome {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for outcome")
        .expect("dispatcher dropped")
}

#[test]
fn own_tile_tap_toggles_tile_selection() {
    let mut session = session();

    let reaction = session.tap_tile(Position::new(5, 5));
    assert!(reaction.intent.is_none());
    assert_eq!(
        session.selection(),
        &Interaction::Tile {
            position: Position::new(5, 5)
        }
    );

    session.tap_tile(Position::new(5, 5));
    assert!(session.selection().is_none());
}

#[test]
fn dead_zombie_selection_is_cleared_by_snapshot() {
    let mut session = session();
    session.apply_entities(Collection::Zombies, vec![walker("z1", 5, 5)]);

    session.tap_entity("z1");
    assert_eq!(
        session.selection(),
        &Interaction::Entity {
            category: EntityCategory::Zombie,
            id: EntityId::from("z1"),
            position: Position::new(5, 5),
        }
    );

    let scope =
        session.apply_entities(Collection::Zombies, vec![walker("z1", 5, 5).with_alive(false)]);
    assert!(scope.contains(UpdateScope::SELECTION));
    assert!(session.selection().is_none());

    let reaction = session.attack_selected();
    assert!(reaction.intent.is_none());
    assert_eq!(
        session.messages().last().map(|e| e.text.as_str()),
        Some("No target selected.")
    );
}

#[test]
fn far_tap_dispatches_nothing() {
    let mut session = session();
    session.tap_tile(Position::new(5, 5));

    let reaction = session.tap_tile(Position::new(7, 7));
    assert!(reaction.intent.is_none());
    assert!(session.selection().is_none());
}

#[test]
fn reconcile_is_idempotent_across_repeated_snapshots() {
    let mut session = session();
    session.apply_entities(Collection::Zombies, vec![walker("z1", 5, 5)]);
    session.tap_entity("z1");

    let first = session.apply_entities(Collection::Zombies, vec![walker("z1", 5, 5)]);
    let selection = session.selection().clone();
    let second = session.apply_entities(Collection::Zombies, vec![walker("z1", 5, 5)]);

    assert!(!first.contains(UpdateScope::SELECTION));
    assert!(!second.contains(UpdateScope::SELECTION));
    assert_eq!(session.selection(), &selection);
    assert_eq!(session.selection().kind(), InteractionKind::Zombie);
}

#[test]
fn removed_entity_clears_selection_in_any_arrival_order() {
    let mut session = session();
    session.apply_entities(
        Collection::Humans,
        vec![Entity::new("npc", EntityCategory::Human, "TRADER").at(Position::new(5, 5))],
    );
    session.tap_entity("npc");
    assert_eq!(session.selection().kind(), InteractionKind::Human);

    // Unrelated collections first, then the one that drops the target.
    session.apply_entities(Collection::Items, Vec::new());
    assert_eq!(session.selection().kind(), InteractionKind::Human);
    session.apply_entities(Collection::Humans, Vec::new());
    assert!(session.selection().is_none());
}

#[tokio::test]
async fn adjacent_tap_dispatches_exactly_one_move() {
    let engine = Arc::new(RecordingEngine::default());
    let (dispatcher, mut outcomes) = ActionDispatcher::new(engine.clone(), UID, 4);
    let mut session = session();
    session.tap_tile(Position::new(5, 5));

    let reaction = session.tap_tile(Position::new(6, 5));
    assert!(session.selection().is_none());
    let intent = reaction.intent.expect("move intent");
    assert_eq!(intent, Intent::Move(StepDelta::new(1, 0).unwrap()));

    dispatcher.dispatch(intent).await.unwrap();
    let scope = session.apply_outcome(next_outcome(&mut outcomes).await);

    assert_eq!(engine.calls(), vec![Call::Move(1, 0)]);
    assert!(scope.contains(UpdateScope::PLAYER));
    assert_eq!(session.local_position(), Some(Position::new(6, 5)));
    assert_eq!(
        session.messages().last().map(|e| e.text.as_str()),
        Some("Move ok to (6, 5).")
    );
}

#[tokio::test]
async fn attack_prefers_selected_zombie_and_reports_result() {
    let engine = Arc::new(RecordingEngine::default());
    *engine.attack_reply.lock().unwrap() = Some(AttackResponse {
        ok: true,
        hit: Some(true),
        damage: Some(5),
        hp_after: Some(10),
        ..Default::default()
    });
    let (dispatcher, mut outcomes) = ActionDispatcher::new(engine.clone(), UID, 4);
    let mut session = session();
    session.apply_entities(
        Collection::Zombies,
        vec![walker("a", 5, 5), walker("b", 5, 5)],
    );
    session.tap_entity("b");

    let intent = session.attack_selected().intent.expect("attack intent");
    dispatcher.dispatch(intent).await.unwrap();
    session.apply_outcome(next_outcome(&mut outcomes).await);

    assert_eq!(
        engine.calls(),
        vec![Call::Attack(AttackTarget {
            id: EntityId::from("b"),
            target_type: TargetType::Zombie,
        })]
    );
    assert_eq!(
        session.messages().last().map(|e| e.text.as_str()),
        Some("You hit the zombie for 5. HP is now 10.")
    );
    assert_eq!(session.selection().kind(), InteractionKind::Zombie);
}

#[tokio::test]
async fn failed_attack_keeps_selection() {
    let engine = Arc::new(RecordingEngine::default());
    let (dispatcher, mut outcomes) = ActionDispatcher::new(engine.clone(), UID, 4);
    let mut session = session();
    session.apply_entities(Collection::Zombies, vec![walker("z1", 5, 5)]);
    session.tap_entity("z1");

    let intent = session.attack_selected().intent.expect("attack intent");
    dispatcher.dispatch(intent).await.unwrap();
    session.apply_outcome(next_outcome(&mut outcomes).await);

    assert_eq!(
        session.messages().last().map(|e| e.text.as_str()),
        Some("Attack failed: network error")
    );
    assert_eq!(session.selection().kind(), InteractionKind::Zombie);
}

#[test]
fn attack_refusals() {
    let mut session = session();
    let last = |session: &Session| session.messages().last().map(|e| e.text.clone());

    session.tap_tile(Position::new(5, 5));
    assert!(session.attack_selected().intent.is_none());
    assert_eq!(last(&session).as_deref(), Some("You can't attack that."));

    session.apply_entities(
        Collection::Items,
        vec![Entity::new("i1", EntityCategory::Item, "CROWBAR").at(Position::new(5, 5))],
    );
    session.tap_entity("i1");
    assert!(session.attack_selected().intent.is_none());
    assert_eq!(last(&session).as_deref(), Some("You can't attack that."));

    // Selected, then the player moves away from the zombie's tile.
    session.apply_entities(Collection::Zombies, vec![walker("z1", 5, 5)]);
    session.tap_entity("z1");
    session.apply_entities(Collection::Players, vec![me_at(4, 5)]);
    assert!(session.attack_selected().intent.is_none());
    assert_eq!(
        last(&session).as_deref(),
        Some("The zombie is too far away to attack.")
    );
}

#[test]
fn cannot_attack_yourself() {
    let mut session = session();
    session.tap_entity(UID);
    assert_eq!(session.selection().kind(), InteractionKind::Human);

    assert!(session.attack_selected().intent.is_none());
    assert_eq!(
        session.messages().last().map(|e| e.text.as_str()),
        Some("There is no other human here.")
    );
}

#[test]
fn other_player_is_attacked_as_player() {
    let mut session = session();
    session.apply_entities(
        Collection::Players,
        vec![
            me_at(5, 5),
            Entity::new("rival", EntityCategory::Human, "PLAYER").at(Position::new(5, 5)),
        ],
    );
    session.tap_entity("rival");

    let intent = session.attack_selected().intent;
    assert_eq!(
        intent,
        Some(Intent::Attack(AttackTarget {
            id: EntityId::from("rival"),
            target_type: TargetType::Player,
        }))
    );
}

#[tokio::test]
async fn join_and_tick_feedback() {
    let engine = Arc::new(RecordingEngine::default());
    let (dispatcher, mut outcomes) = ActionDispatcher::new(engine.clone(), UID, 4);
    let mut session = Session::new(SessionIdentity::new(UID, "Tester"), &FrontendConfig::default());

    dispatcher.dispatch(session.join()).await.unwrap();
    session.apply_outcome(next_outcome(&mut outcomes).await);
    assert_eq!(session.local_position(), Some(Position::new(5, 5)));

    dispatcher.dispatch(session.tick()).await.unwrap();
    session.apply_outcome(next_outcome(&mut outcomes).await);

    assert_eq!(
        engine.calls(),
        vec![Call::Join("Tester".to_string()), Call::Tick]
    );
    let texts: Vec<_> = session.messages().iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Joined game at (5, 5).", "Tick: 3 zombie(s) moved"]);
}

#[tokio::test]
async fn memory_transport_feeds_the_session() {
    let transport = MemoryTransport::new();
    transport.publish(SnapshotEvent::Entities {
        collection: Collection::Zombies,
        entities: vec![walker("z1", 5, 5)],
    });

    let (sink, mut events) = mpsc::unbounded_channel();
    let _subscription = transport.subscribe(Feed::Entities(Collection::Zombies), sink);

    let mut session = session();
    let event = timeout(Duration::from_secs(2), events.recv())
        .await
        .unwrap()
        .unwrap();
    session.apply_snapshot(event);
    session.tap_entity("z1");
    assert_eq!(session.selection().kind(), InteractionKind::Zombie);

    transport.publish(SnapshotEvent::Entities {
        collection: Collection::Zombies,
        entities: Vec::new(),
    });
    let event = timeout(Duration::from_secs(2), events.recv())
        .await
        .unwrap()
        .unwrap();
    let scope = session.apply_snapshot(event);
    assert!(scope.contains(UpdateScope::SELECTION));
    assert!(session.selection().is_none());
}
