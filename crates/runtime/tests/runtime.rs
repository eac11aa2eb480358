use std::fs;
use std::time::Duration;

use battle_content::ContentFactory;
use battle_core::{
    ActorId, BattleConfig, BattleEvent, CastError, LockView, ManualClock, MatchStatus, SkillId,
    Tick,
};
use runtime::{Event, Runtime, RuntimeConfig, RuntimeError, Topic};
use tokio::sync::broadcast;

fn manual_config() -> RuntimeConfig {
    RuntimeConfig {
        tick_interval: None,
        ..RuntimeConfig::default()
    }
}

async fn manual_runtime() -> (Runtime, ManualClock) {
    let clock = ManualClock::new();
    let runtime = Runtime::builder()
        .config(manual_config())
        .clock(clock.clone())
        .build()
        .await
        .expect("runtime builds");
    (runtime, clock)
}

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn cast_lands_after_travel_time() {
    let (runtime, _clock) = manual_runtime().await;
    let handle = runtime.handle();
    let mut battle = handle.subscribe(Topic::Battle);

    let applied = handle.cast_skill(ActorId::Red, "fireball").await.unwrap();
    assert_eq!(applied.skill, SkillId::Fireball);
    assert_eq!(applied.target, ActorId::Blue);
    assert_eq!(applied.lands_at, Tick::from_millis(500));

    assert_eq!(handle.advance(Tick::from_millis(499)).await.unwrap(), 0);
    let view = handle.snapshot().await.unwrap();
    assert_eq!(view.actor(ActorId::Blue).health.current, 100);

    assert!(handle.advance(Tick::from_millis(500)).await.unwrap() >= 1);
    let view = handle.snapshot().await.unwrap();
    assert_eq!(view.actor(ActorId::Blue).health.current, 90);
    assert_eq!(view.actor(ActorId::Red).energy.current, 80);

    let events = drain(&mut battle);
    assert!(matches!(
        events.first(),
        Some(Event::Battle(BattleEvent::SkillCast { .. }))
    ));
    assert!(events.iter().any(|event| matches!(
        event,
        Event::Battle(BattleEvent::DamageLanded {
            target: ActorId::Blue,
            amount: 10,
            ..
        })
    )));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn locked_actor_is_rejected_and_reported() {
    let (runtime, _clock) = manual_runtime().await;
    let handle = runtime.handle();
    let mut battle = handle.subscribe(Topic::Battle);

    handle.cast_skill(ActorId::Red, "fireball").await.unwrap();
    handle.advance(Tick::from_secs(1)).await.unwrap();

    let err = handle
        .cast_skill(ActorId::Red, "wind_slash")
        .await
        .unwrap_err();
    assert_eq!(
        err.as_cast_error(),
        Some(&CastError::ActorLocked {
            actor: ActorId::Red,
            until: Tick::from_secs(30),
        })
    );

    // Blue is unaffected by red's lock.
    handle.cast_skill(ActorId::Blue, "wind_slash").await.unwrap();

    let rejected: Vec<_> = drain(&mut battle)
        .into_iter()
        .filter_map(|event| match event {
            Event::CastRejected(rejected) => Some(rejected),
            _ => None,
        })
        .collect();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].actor, ActorId::Red);
    assert_eq!(rejected[0].skill, "wind_slash");
    assert_eq!(rejected[0].at, Tick::from_secs(1));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn unknown_skill_is_a_cast_rejection() {
    let (runtime, _clock) = manual_runtime().await;
    let handle = runtime.handle();

    let err = handle.cast_skill(ActorId::Blue, "teleport").await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::CastRejected(CastError::UnknownSkill(ref skill)) if skill == "teleport"
    ));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn lock_topic_reports_rebate_and_release() {
    let (runtime, _clock) = manual_runtime().await;
    let handle = runtime.handle();
    let mut lock = handle.subscribe(Topic::Lock);

    handle.cast_skill(ActorId::Blue, "shield").await.unwrap();

    handle.advance(Tick::from_secs(5)).await.unwrap();
    let view = handle.snapshot().await.unwrap();
    assert_eq!(
        view.actor(ActorId::Blue).lock,
        LockView::Locked {
            until: Tick::from_secs(10),
            remaining: Tick::from_secs(5),
        }
    );

    handle.advance(Tick::from_secs(10)).await.unwrap();
    let view = handle.snapshot().await.unwrap();
    assert_eq!(view.actor(ActorId::Blue).lock, LockView::Idle);

    let events = drain(&mut lock);
    assert_eq!(
        events,
        vec![
            Event::Lock(BattleEvent::LockRebated {
                at: Tick::from_secs(5),
                actor: ActorId::Blue,
                until: Tick::from_secs(10),
            }),
            Event::Lock(BattleEvent::LockReleased {
                at: Tick::from_secs(10),
                actor: ActorId::Blue,
            }),
        ]
    );

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn reset_starts_a_fresh_match() {
    let (runtime, _clock) = manual_runtime().await;
    let handle = runtime.handle();

    handle.cast_skill(ActorId::Red, "meteor").await.unwrap();
    handle.advance(Tick::from_millis(500)).await.unwrap();
    assert_eq!(
        handle.snapshot().await.unwrap().actor(ActorId::Blue).health.current,
        90
    );

    handle.reset().await.unwrap();
    let view = handle.snapshot().await.unwrap();
    assert_eq!(view.status, MatchStatus::InProgress);
    for actor in &view.actors {
        assert_eq!(actor.health.current, 100);
        assert_eq!(actor.energy.current, 100);
        assert_eq!(actor.lock, LockView::Idle);
    }
    assert_eq!(view.pending_effects, 0);

    // The reset lifted red's lock.
    handle.cast_skill(ActorId::Red, "fireball").await.unwrap();

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn advance_requires_manual_clock() {
    let runtime = Runtime::builder()
        .config(manual_config())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    let err = handle.advance(Tick::from_secs(1)).await.unwrap_err();
    assert!(matches!(err, RuntimeError::ManualClockRequired));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn ticker_lands_effects_without_input() {
    let clock = ManualClock::new();
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            tick_interval: Some(Duration::from_millis(5)),
            ..RuntimeConfig::default()
        })
        .clock(clock.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut battle = handle.subscribe(Topic::Battle);

    handle.cast_skill(ActorId::Blue, "ice_spike").await.unwrap();
    clock.set(Tick::from_millis(500));

    let landed = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let Ok(Event::Battle(BattleEvent::DamageLanded { target, .. })) =
                battle.recv().await
            {
                break target;
            }
        }
    })
    .await
    .expect("ticker should land the hit");
    assert_eq!(landed, ActorId::Red);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn invalid_battle_config_fails_to_build() {
    let config = BattleConfig {
        max_energy: 30,
        ..BattleConfig::default()
    };
    let result = Runtime::builder()
        .config(manual_config())
        .battle_config(config)
        .build()
        .await;

    assert!(matches!(result, Err(RuntimeError::InvalidConfig(_))));
}

#[tokio::test]
async fn builds_from_content_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join(ContentFactory::CONFIG_FILE),
        "[lock]\nduration = 3000\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(ContentFactory::SKILLS_FILE),
        r#"(skills: [
            (id: wind_slash, name: "Wind Slash", category: Attack, cooldown: 1500,
                energy_cost: 10, effect: Damage(amount: 100, travel: 500)),
        ])"#,
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());
    let clock = ManualClock::new();
    let runtime = Runtime::builder()
        .config(manual_config())
        .battle_config(factory.load_config().unwrap())
        .catalog(factory.load_skills().unwrap())
        .clock(clock)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    assert_eq!(handle.catalog().len(), 1);

    handle.cast_skill(ActorId::Red, "wind_slash").await.unwrap();
    assert!(
        handle
            .cast_skill(ActorId::Blue, "fireball")
            .await
            .unwrap_err()
            .as_cast_error()
            .is_some_and(|err| matches!(err, CastError::UnknownSkill(_)))
    );

    handle.advance(Tick::from_secs(3)).await.unwrap();
    handle.cast_skill(ActorId::Red, "wind_slash").await.unwrap();

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn events_serialize_for_clients() {
    let (runtime, _clock) = manual_runtime().await;
    let handle = runtime.handle();
    let mut battle = handle.subscribe(Topic::Battle);

    handle.cast_skill(ActorId::Red, "dodge").await.unwrap();
    let event = battle.recv().await.unwrap();

    let json = serde_json::to_string(&event).unwrap();
    let back: Event = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);

    drop(handle);
    runtime.shutdown().await.unwrap();
}
