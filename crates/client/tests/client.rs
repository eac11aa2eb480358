use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use battle_core::{ActorId, ManualClock, MatchStatus, Tick};
use client_bootstrap::{ClientConfig, RuntimeBuilder};
use kings_client::{Client, Frontend};
use runtime::RuntimeHandle;

/// Plays a scripted duel instead of reading input.
struct ScriptedFrontend {
    winner: Arc<Mutex<Option<ActorId>>>,
}

#[async_trait]
impl Frontend for ScriptedFrontend {
    async fn run(&mut self, handle: RuntimeHandle) -> Result<()> {
        let mut now = Tick::ZERO;
        for _ in 0..10 {
            handle.cast_skill(ActorId::Blue, "wind_slash").await?;
            now = now + 3_000;
            handle.advance(now).await?;
        }

        let view = handle.snapshot().await?;
        if let MatchStatus::GameOver { winner } = view.status {
            *self.winner.lock().unwrap() = Some(winner);
        }
        Ok(())
    }
}

#[tokio::test]
async fn client_runs_frontend_then_shuts_down() {
    let config = ClientConfig {
        lock_preset: Some(battle_core::LockPreset::QUICK),
        tick_interval: Duration::ZERO,
        ..ClientConfig::default()
    };
    let setup = RuntimeBuilder::new(config)
        .clock(ManualClock::new())
        .build()
        .await
        .unwrap();

    let winner = Arc::new(Mutex::new(None));
    let client = Client::builder()
        .runtime(setup.runtime)
        .frontend(ScriptedFrontend {
            winner: Arc::clone(&winner),
        })
        .build()
        .unwrap();

    tokio::time::timeout(Duration::from_secs(5), client.run())
        .await
        .expect("client should shut down once the frontend returns")
        .unwrap();

    assert_eq!(*winner.lock().unwrap(), Some(ActorId::Blue));
}

#[test]
fn builder_requires_runtime_and_frontend() {
    let err = Client::builder().build().err().expect("missing runtime");
    assert!(err.to_string().contains("Runtime is required"));
}
