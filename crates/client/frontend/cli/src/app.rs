//! Console frontend: reads commands from stdin and prints battle events.
use std::io::{self, BufRead, Write};
use std::thread;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use battle_core::BattleEvent;
use client_frontend_core::{
    BattleViewModel, EventConsumer, Frontend, FrontendConfig, MessageConsumer,
};
use runtime::{Event, RuntimeError, RuntimeHandle, Topic};

use crate::command::{CliCommand, ParseError};
use crate::config::CliConfig;
use crate::render::{HELP, render_skills, render_status};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Line-oriented console frontend.
pub struct CliFrontend {
    config: FrontendConfig,
    cli: CliConfig,
    consumer: MessageConsumer,
}

impl CliFrontend {
    pub fn new(config: FrontendConfig, cli: CliConfig) -> Self {
        let consumer = MessageConsumer::new(
            config.messages.capacity,
            config.messages.visibility.clone(),
        );
        Self {
            config,
            cli,
            consumer,
        }
    }

    async fn handle_line(&mut self, handle: &RuntimeHandle, line: &str) -> Result<Flow> {
        let command = match line.parse::<CliCommand>() {
            Ok(command) => command,
            Err(ParseError::Empty) => return Ok(Flow::Continue),
            Err(err) => {
                println!("{err}");
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "console command");

        match command {
            CliCommand::Cast { actor, skill } => match handle.cast_skill(actor, skill).await {
                Ok(_) => {
                    if self.cli.auto_status {
                        self.print_status(handle).await?;
                    }
                }
                // Reported through the event bus.
                Err(RuntimeError::CastRejected(_)) => {}
                Err(err) => return Err(err).context("cast failed"),
            },
            CliCommand::Skills(category) => {
                println!("{}", render_skills(handle.catalog(), category));
            }
            CliCommand::Status => self.print_status(handle).await?,
            CliCommand::Reset => handle.reset().await.context("reset failed")?,
            CliCommand::Help => println!("{HELP}"),
            CliCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    async fn print_status(&self, handle: &RuntimeHandle) -> Result<()> {
        let view = handle.snapshot().await.context("snapshot failed")?;
        let model = BattleViewModel::from_view(&view);
        println!(
            "{}",
            render_status(&model, self.consumer.message_log(), self.cli.status_messages)
        );
        Ok(())
    }

    async fn on_event(
        &mut self,
        handle: &RuntimeHandle,
        received: std::result::Result<Event, broadcast::error::RecvError>,
    ) -> Result<Flow> {
        let event = match received {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "console fell behind the event bus");
                println!("({missed} events missed)");
                return Ok(Flow::Continue);
            }
            Err(broadcast::error::RecvError::Closed) => return Ok(Flow::Quit),
        };

        let before = self.consumer.message_log().total_pushed();
        self.consumer.on_event(&event);
        if self.consumer.message_log().total_pushed() > before
            && let Some(entry) = self.consumer.message_log().latest()
        {
            println!("{}", entry.text);
        }

        if matches!(event, Event::Battle(BattleEvent::GameOver { .. })) {
            self.print_status(handle).await?;
            println!("type 'reset' for a rematch or 'quit' to leave");
        }

        Ok(Flow::Continue)
    }

    fn prompt(&self) {
        print!("{}", self.cli.prompt);
        let _ = io::stdout().flush();
    }
}

#[async_trait]
impl Frontend for CliFrontend {
    async fn run(&mut self, handle: RuntimeHandle) -> Result<()> {
        let (line_tx, mut line_rx) = mpsc::channel(self.config.channels.input_buffer);
        spawn_stdin_reader(line_tx)?;

        let mut battle = handle.subscribe(Topic::Battle);
        let mut lock = handle.subscribe(Topic::Lock);

        info!("console frontend started");
        println!("{HELP}");
        self.prompt();

        loop {
            let flow = tokio::select! {
                line = line_rx.recv() => match line {
                    Some(line) => {
                        let flow = self.handle_line(&handle, &line).await?;
                        self.prompt();
                        flow
                    }
                    // stdin closed
                    None => Flow::Quit,
                },
                received = battle.recv() => self.on_event(&handle, received).await?,
                received = lock.recv() => self.on_event(&handle, received).await?,
            };

            if flow == Flow::Quit {
                break;
            }
        }

        info!("console frontend stopped");
        Ok(())
    }
}

/// Blocking stdin reads run on a plain thread so they never hold up runtime
/// shutdown; the thread ends with the process or when the channel closes.
fn spawn_stdin_reader(tx: mpsc::Sender<String>) -> Result<()> {
    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(%err, "stdin read failed");
                        break;
                    }
                }
            }
        })
        .context("failed to spawn stdin reader")?;
    Ok(())
}
