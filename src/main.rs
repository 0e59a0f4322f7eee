//! Undangan - a wedding invitation with a live countdown
//!
//! This is the main entry point: it renders the invitation in the terminal
//! and reads guest interactions from stdin.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use undangan::{
    config::Config,
    invitation::Invitation,
    services::{SimulatedMedia, MUSIC_SOURCES},
    state::{PresentationState, RemainingDuration},
    tasks::{CountdownClock, PresentationCoordinator},
    terminal::{render_content, render_countdown, render_gate, render_status, Interaction, Snapshot},
    utils::{shutdown_signal, ShiftedClock, SystemClock},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr, stdout is the page
    tracing_subscriber::fmt()
        .with_env_filter(format!("undangan={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting undangan v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: popup={}ms, tick={}ms, buffer={}ms, autoplay={:?}",
          config.popup_ms, config.tick_ms, config.buffer_ms, config.autoplay);

    let invitation = Invitation::from_link(&config.link, &config.fallback_guest);
    info!("Invitation for {} at {} ({})",
          invitation.guest.guest_name, invitation.event.venue_name, invitation.event.venue_label);

    let countdown = match config.now {
        Some(now) => CountdownClock::start(invitation.target, config.tick_period(), ShiftedClock::starting_at(now)),
        None => CountdownClock::start(invitation.target, config.tick_period(), SystemClock),
    };

    let media = Arc::new(SimulatedMedia::new(MUSIC_SOURCES, config.autoplay));
    let coordinator = PresentationCoordinator::start(Arc::clone(&media), config.popup_duration());
    media.load(config.buffer_duration());

    let page = Page { invitation: &invitation, json: config.json };
    page.show_state(&coordinator.state(), countdown.current())?;

    let mut remaining_rx = countdown.subscribe();
    let mut state_rx = coordinator.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut ticks_left = config.ticks;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = remaining_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let remaining = *remaining_rx.borrow_and_update();
                page.show_countdown(&coordinator.state(), remaining)?;

                if let Some(left) = ticks_left.as_mut() {
                    *left = left.saturating_sub(1);
                    if *left == 0 {
                        info!("Tick limit reached");
                        break;
                    }
                }
            }

            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                page.show_state(&state, countdown.current())?;
            }

            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match Interaction::parse(&line) {
                    Some(Interaction::Open) => {
                        coordinator.confirm_gate();
                    }
                    Some(Interaction::OpenWithMusic) => {
                        let coordinator = Arc::clone(&coordinator);
                        tokio::spawn(async move { coordinator.open_with_music().await });
                    }
                    Some(Interaction::Toggle) => {
                        let coordinator = Arc::clone(&coordinator);
                        tokio::spawn(async move { coordinator.toggle_playback().await });
                    }
                    Some(Interaction::FailAudio) => media.fail_load("simulated load error"),
                    Some(Interaction::Status) => page.show_state(&coordinator.state(), countdown.current())?,
                    Some(Interaction::Quit) => break,
                    None if line.trim().is_empty() => {}
                    None => warn!("Unknown command {:?} (open, play, toggle, fail, status, quit)", line.trim()),
                },
                Ok(None) => {
                    info!("stdin closed, no more interactions");
                    stdin_open = false;
                }
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    stdin_open = false;
                }
            },

            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    coordinator.shutdown();
    countdown.shutdown();
    media.unload();

    info!("Invitation closed");
    Ok(())
}

/// Writes the invitation to stdout, as text or JSON lines
struct Page<'a> {
    invitation: &'a Invitation,
    json: bool,
}

impl Page<'_> {
    fn show_state(&self, state: &PresentationState, remaining: RemainingDuration) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(state, remaining);
        }
        if state.modal_visible() {
            println!("{}", render_gate(self.invitation));
        } else {
            println!("{}", render_content(self.invitation));
            println!("{}", render_countdown(&remaining));
        }
        println!("{}", render_status(state));
        Ok(())
    }

    fn show_countdown(&self, state: &PresentationState, remaining: RemainingDuration) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(state, remaining);
        }
        // The countdown sits behind the gate until it is opened
        if state.content_visible() {
            println!("{}", render_countdown(&remaining));
        }
        Ok(())
    }

    fn print_json(&self, state: &PresentationState, remaining: RemainingDuration) -> anyhow::Result<()> {
        let snapshot = Snapshot::new(self.invitation, remaining, state.clone());
        println!("{}", serde_json::to_string(&snapshot)?);
        Ok(())
    }
}
