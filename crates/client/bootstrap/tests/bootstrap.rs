use std::fs;
use std::time::Duration;

use battle_core::{ActorId, LockPreset, ManualClock, Tick};
use client_bootstrap::{ClientConfig, ContentPaths, RuntimeBuilder};

#[tokio::test]
async fn builds_runtime_from_data_dir() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("battle.toml"), "max_health = 50\n").unwrap();

    let config = ClientConfig {
        content: ContentPaths {
            data_dir: Some(dir.path().to_path_buf()),
            ..ContentPaths::default()
        },
        lock_preset: Some(LockPreset::QUICK),
        tick_interval: Duration::ZERO,
        ..ClientConfig::default()
    };

    let clock = ManualClock::new();
    let setup = RuntimeBuilder::new(config)
        .clock(clock.clone())
        .build()
        .await
        .unwrap();
    assert_eq!(setup.battle.max_health, 50);
    assert_eq!(setup.battle.lock, LockPreset::QUICK);

    let handle = setup.runtime.handle();
    assert_eq!(handle.catalog().len(), 20);

    handle.cast_skill(ActorId::Red, "fireball").await.unwrap();
    handle.advance(Tick::from_millis(500)).await.unwrap();

    let view = handle.snapshot().await.unwrap();
    assert_eq!(view.actor(ActorId::Blue).health.current, 45);
    assert!(view.actor(ActorId::Red).lock.is_locked());

    handle.advance(Tick::from_secs(3)).await.unwrap();
    handle.cast_skill(ActorId::Red, "heal").await.unwrap();

    drop(handle);
    setup.runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn missing_content_file_fails_to_build() {
    let config = ClientConfig {
        content: ContentPaths {
            skills_path: Some("does/not/exist.ron".into()),
            ..ContentPaths::default()
        },
        tick_interval: Duration::ZERO,
        ..ClientConfig::default()
    };

    let err = RuntimeBuilder::new(config).build().await.err().expect("build fails");
    assert!(format!("{err:#}").contains("exist.ron"));
}
