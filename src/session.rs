#![cfg(feature = "std")]

//! Event loop driving one player's arcade session.
//!
//! Input sources push [`SessionEvent`]s into the session's channel; the
//! computer's deferred move arrives through the same channel from the
//! [`MoveScheduler`]. The session handles one event at a time, so the game
//! state is only ever touched by the event being handled.

use std::mem;
use std::time::Duration;

use rand::rngs::SmallRng;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::ai::Strategy;
use crate::common::Side;
use crate::game::{GameEvent, GameState, Step};
use crate::scheduler::MoveScheduler;
use crate::scoreboard::ScoreReporter;
use crate::vessel::{Coord, VesselId};

/// Discrete inputs the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SelectVessel(VesselId),
    /// The rotate key.
    ToggleOrientation,
    /// Click on the player's own board (placement and retraction).
    ClickPlayerCell(Coord),
    /// Click on the opponent's board (attack).
    ClickOpponentCell(Coord),
    AutoDeploy,
    Restart,
    /// The deferred computer move is due.
    OpponentTurn { epoch: u64 },
    Quit,
}

pub struct Session {
    state: GameState,
    rng: SmallRng,
    strategy: Box<dyn Strategy>,
    scheduler: MoveScheduler,
    reporter: ScoreReporter,
    tx: mpsc::UnboundedSender<SessionEvent>,
    rx: mpsc::UnboundedReceiver<SessionEvent>,
    published: watch::Sender<GameState>,
    reports: Vec<JoinHandle<()>>,
}

impl Session {
    pub fn new(
        mut rng: SmallRng,
        opponent_delay: Duration,
        strategy: Box<dyn Strategy>,
        reporter: ScoreReporter,
    ) -> Self {
        let state = GameState::new(&mut rng);
        let (tx, rx) = mpsc::unbounded_channel();
        let (published, _) = watch::channel(state.clone());
        Self {
            state,
            rng,
            strategy,
            scheduler: MoveScheduler::new(opponent_delay, tx.clone()),
            reporter,
            tx,
            rx,
            published,
            reports: Vec::new(),
        }
    }

    /// Handle for input sources.
    pub fn sender(&self) -> mpsc::UnboundedSender<SessionEvent> {
        self.tx.clone()
    }

    /// Receives every state the session settles into.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.published.subscribe()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Whether the computer's move is armed.
    pub fn opponent_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.rx.recv().await
    }

    /// Applies one event and returns what happened.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<GameEvent> {
        let state = mem::take(&mut self.state);
        let step = match event {
            SessionEvent::SelectVessel(id) => state.select_vessel(id),
            SessionEvent::ToggleOrientation => state.toggle_orientation(),
            SessionEvent::ClickPlayerCell(at) => state.click_player_cell(at),
            SessionEvent::ClickOpponentCell(at) => state.attack(Side::Player, at),
            SessionEvent::AutoDeploy => state.auto_deploy(&mut self.rng),
            SessionEvent::Restart => {
                // the old board must never see the pending shot
                self.scheduler.cancel();
                log::info!("Restarting; streak stays at {}", state.streak());
                state.restart(&mut self.rng)
            }
            SessionEvent::OpponentTurn { epoch } => {
                if self.scheduler.accept(epoch) {
                    self.opponent_move(state)
                } else {
                    log::debug!("Dropping stale opponent move (epoch {})", epoch);
                    idle(state)
                }
            }
            SessionEvent::Quit => idle(state),
        };
        self.state = step.state;
        self.settle(&step.events);
        step.events
    }

    fn opponent_move(&mut self, state: GameState) -> Step {
        match state.opponent_target(self.strategy.as_mut(), &mut self.rng) {
            Some(at) => state.attack(Side::Opponent, at),
            None => idle(state),
        }
    }

    /// Post-transition bookkeeping: score reports, the opponent timer, and
    /// publishing the new state.
    fn settle(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::BattleStarted => log::info!("Fleet deployed; battle started"),
                GameEvent::GameOver { winner, outcome } => {
                    log::info!("Game over: {:?} won, streak {}", winner, outcome.streak());
                    if let Some(task) = outcome.report().and_then(|r| self.reporter.report(r)) {
                        self.reports.retain(|t| !t.is_finished());
                        self.reports.push(task);
                    }
                }
                _ => {}
            }
        }

        if self.state.awaiting_opponent() {
            if !self.scheduler.is_pending() {
                self.scheduler.schedule();
            }
        } else if self.scheduler.cancel() {
            log::debug!("Left the opponent's turn (phase {:?})", self.state.phase());
        }

        self.published.send_replace(self.state.clone());
    }

    /// Handles events until `Quit`. `render` sees the initial state once,
    /// then the state after each event.
    pub async fn run<F>(&mut self, mut render: F)
    where
        F: FnMut(&GameState, &[GameEvent]),
    {
        render(&self.state, &[]);
        while let Some(event) = self.next_event().await {
            if event == SessionEvent::Quit {
                break;
            }
            let events = self.handle(event);
            render(&self.state, &events);
        }
        self.scheduler.cancel();
        self.drain_reports().await;
    }

    /// Waits for score submissions still in flight.
    pub async fn drain_reports(&mut self) {
        for task in self.reports.drain(..) {
            let _ = task.await;
        }
    }
}

fn idle(state: GameState) -> Step {
    Step {
        state,
        events: Vec::new(),
    }
}
