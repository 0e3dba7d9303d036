//! Turn state machine.
//!
//! `GameState` is a plain value. Every transition consumes it and returns the
//! next state together with the events observers should see, so a transition
//! that is not allowed simply hands the state back with no events.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::ai::{HitHistory, Strategy};
use crate::board::{coords, Board};
use crate::common::{PlacementError, ShotResult, Side};
use crate::config::NUM_VESSELS;
use crate::outcome::{settle, Outcome};
use crate::placement::{check_placement, generate_fleet, place_remaining};
use crate::vessel::{Coord, Orientation, VesselId};

/// Lifecycle of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// The player is deploying the fleet.
    #[default]
    Setup,
    Playing,
    /// Terminal until restarted.
    GameOver,
}

/// Something observers should react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    VesselSelected(VesselId),
    OrientationChanged(Orientation),
    VesselPlaced(VesselId),
    /// A placed vessel was lifted off the board and selected again.
    VesselRetracted(VesselId),
    PlacementRejected {
        vessel: VesselId,
        at: Coord,
        reason: PlacementError,
    },
    BattleStarted,
    Shot {
        attacker: Side,
        at: Coord,
        result: ShotResult,
    },
    VesselSunk {
        attacker: Side,
        vessel: VesselId,
    },
    /// The turn moved to the given side.
    TurnPassed(Side),
    GameOver {
        winner: Side,
        outcome: Outcome,
    },
    Restarted,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::VesselSelected(id) => {
                write!(f, "{} selected ({} cells).", id, id.kind().length())
            }
            GameEvent::OrientationChanged(Orientation::Horizontal) => {
                write!(f, "Placing horizontally.")
            }
            GameEvent::OrientationChanged(Orientation::Vertical) => {
                write!(f, "Placing vertically.")
            }
            GameEvent::VesselPlaced(id) => write!(f, "{} deployed.", id),
            GameEvent::VesselRetracted(id) => write!(f, "{} back in the dock.", id),
            GameEvent::PlacementRejected { vessel, at, reason } => {
                write!(f, "Cannot place {} at {}: {}.", vessel, at, reason)
            }
            GameEvent::BattleStarted => write!(f, "Ready for battle! Fire at the enemy."),
            GameEvent::Shot {
                attacker: Side::Player,
                result,
                ..
            } => match result {
                ShotResult::Miss => write!(f, "Miss. Computer turn."),
                _ => write!(f, "HIT! Fire again."),
            },
            GameEvent::Shot {
                attacker: Side::Opponent,
                at,
                result,
            } => match result {
                ShotResult::Miss => write!(f, "Computer missed at {}.", at),
                _ => write!(f, "Computer hit {}!", at),
            },
            GameEvent::VesselSunk {
                attacker: Side::Player,
                vessel,
            } => write!(f, "SUNK! You destroyed their {}!", vessel.kind().slug()),
            GameEvent::VesselSunk {
                attacker: Side::Opponent,
                vessel,
            } => {
                let name = vessel.kind().slug();
                f.write_str("Computer SUNK your ")?;
                for ch in name.chars() {
                    write!(f, "{}", ch.to_ascii_uppercase())?;
                }
                f.write_str("!")
            }
            GameEvent::TurnPassed(Side::Player) => write!(f, "Your turn."),
            GameEvent::TurnPassed(Side::Opponent) => write!(f, "Computer's turn."),
            GameEvent::GameOver {
                outcome: Outcome::Victory { streak, .. },
                ..
            } => write!(f, "VICTORY! Streak {}.", streak),
            GameEvent::GameOver {
                outcome: Outcome::Defeat,
                ..
            } => write!(f, "DEFEAT. Streak reset to 0."),
            GameEvent::Restarted => write!(f, "New War started! Place your ships."),
        }
    }
}

/// Result of a transition.
#[derive(Debug, Clone)]
#[must_use]
pub struct Step {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

impl Step {
    fn unchanged(state: GameState) -> Self {
        Step {
            state,
            events: Vec::new(),
        }
    }
}

/// Everything the game knows. Only the transitions below change it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    phase: Phase,
    turn: Side,
    player_board: Board,
    opponent_board: Board,
    placed: BTreeSet<VesselId>,
    selected: Option<VesselId>,
    orientation: Orientation,
    streak: u32,
    hit_history: HitHistory,
}

impl GameState {
    /// A new session: empty player board, random opponent fleet, streak 0.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::fresh(rng, 0)
    }

    fn fresh<R: Rng + ?Sized>(rng: &mut R, streak: u32) -> Self {
        GameState {
            opponent_board: generate_fleet(rng),
            streak,
            ..GameState::default()
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    pub fn opponent_board(&self) -> &Board {
        &self.opponent_board
    }

    /// Board the given side fires at.
    pub fn target_board(&self, attacker: Side) -> &Board {
        match attacker {
            Side::Player => &self.opponent_board,
            Side::Opponent => &self.player_board,
        }
    }

    pub fn placed(&self) -> &BTreeSet<VesselId> {
        &self.placed
    }

    pub fn selected(&self) -> Option<VesselId> {
        self.selected
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Unresolved opponent hits on the player board.
    pub fn hit_history(&self) -> &HitHistory {
        &self.hit_history
    }

    /// Whether the computer should be taking a shot.
    pub fn awaiting_opponent(&self) -> bool {
        self.phase == Phase::Playing && self.turn == Side::Opponent
    }

    /// Back to setup with a fresh opponent fleet. The streak carries over.
    pub fn restart<R: Rng + ?Sized>(self, rng: &mut R) -> Step {
        Step {
            state: Self::fresh(rng, self.streak),
            events: alloc::vec![GameEvent::Restarted],
        }
    }

    /// Picks a vessel from the dock for placement.
    pub fn select_vessel(mut self, id: VesselId) -> Step {
        if self.phase != Phase::Setup || self.placed.contains(&id) {
            return Step::unchanged(self);
        }
        self.selected = Some(id);
        Step {
            state: self,
            events: alloc::vec![GameEvent::VesselSelected(id)],
        }
    }

    /// Flips between horizontal and vertical placement.
    pub fn toggle_orientation(mut self) -> Step {
        if self.phase != Phase::Setup {
            return Step::unchanged(self);
        }
        self.orientation = self.orientation.toggle();
        let orientation = self.orientation;
        Step {
            state: self,
            events: alloc::vec![GameEvent::OrientationChanged(orientation)],
        }
    }

    /// A click on the player's own board during setup. Clicking a placed
    /// vessel lifts it back into the dock; clicking water seats the selected
    /// vessel there if the placement is legal.
    pub fn click_player_cell(mut self, at: Coord) -> Step {
        if self.phase != Phase::Setup {
            return Step::unchanged(self);
        }
        if let Some(id) = self.player_board.vessel_at(at) {
            self.player_board.clear_vessel(id);
            self.placed.remove(&id);
            self.selected = Some(id);
            return Step {
                state: self,
                events: alloc::vec![GameEvent::VesselRetracted(id)],
            };
        }
        let Some(id) = self.selected else {
            return Step::unchanged(self);
        };
        let length = id.kind().length();
        match check_placement(&self.player_board, at.x(), at.y(), length, self.orientation) {
            Ok(mask) => {
                if self.player_board.set_vessel(coords(mask), id).is_err() {
                    return Step::unchanged(self);
                }
                self.placed.insert(id);
                self.selected = None;
                let mut events = alloc::vec![GameEvent::VesselPlaced(id)];
                self.commit_if_deployed(&mut events);
                Step {
                    state: self,
                    events,
                }
            }
            Err(reason) => Step {
                state: self,
                events: alloc::vec![GameEvent::PlacementRejected {
                    vessel: id,
                    at,
                    reason
                }],
            },
        }
    }

    /// Seats every vessel still in the dock at random legal positions.
    pub fn auto_deploy<R: Rng + ?Sized>(mut self, rng: &mut R) -> Step {
        if self.phase != Phase::Setup {
            return Step::unchanged(self);
        }
        let mut board = self.player_board;
        let placed = match place_remaining(&mut board, rng) {
            Ok(placed) => placed,
            Err(_) => return Step::unchanged(self),
        };
        self.player_board = board;
        let mut events: Vec<GameEvent> = placed.iter().map(|id| GameEvent::VesselPlaced(*id)).collect();
        self.placed.extend(placed);
        self.selected = None;
        self.commit_if_deployed(&mut events);
        Step {
            state: self,
            events,
        }
    }

    /// The only way out of setup: every vessel of the fleet is placed.
    fn commit_if_deployed(&mut self, events: &mut Vec<GameEvent>) {
        if self.placed.len() == NUM_VESSELS {
            self.phase = Phase::Playing;
            self.turn = Side::Player;
            events.push(GameEvent::BattleStarted);
        }
    }

    /// Fires at `at` on the other side's board. Ignored outside play, out of
    /// turn, or on a cell already shot. A hit keeps the turn; a miss passes
    /// it.
    pub fn attack(mut self, attacker: Side, at: Coord) -> Step {
        if self.phase != Phase::Playing || self.turn != attacker {
            return Step::unchanged(self);
        }
        let (board, result) = match self.target_board(attacker).fire(at) {
            Ok(shot) => shot,
            Err(_) => return Step::unchanged(self),
        };
        match attacker {
            Side::Player => self.opponent_board = board,
            Side::Opponent => self.player_board = board,
        }

        let mut events = alloc::vec![GameEvent::Shot {
            attacker,
            at,
            result
        }];
        match result {
            ShotResult::Miss => {
                self.turn = attacker.other();
                events.push(GameEvent::TurnPassed(self.turn));
            }
            ShotResult::Hit(_) => {
                if attacker == Side::Opponent {
                    self.hit_history.record(at);
                }
            }
            ShotResult::Sunk(vessel) => {
                if attacker == Side::Opponent {
                    self.hit_history.record(at);
                    self.hit_history.prune(board.vessel_cells(vessel));
                }
                events.push(GameEvent::VesselSunk { attacker, vessel });
            }
        }

        if result.is_hit() && board.all_sunk() {
            let outcome = settle(self.streak, attacker);
            self.streak = outcome.streak();
            self.phase = Phase::GameOver;
            events.push(GameEvent::GameOver {
                winner: attacker,
                outcome,
            });
        }
        Step {
            state: self,
            events,
        }
    }

    /// Cell the computer wants to fire at next, or `None` when it is not the
    /// computer's move.
    pub fn opponent_target(&self, strategy: &mut dyn Strategy, rng: &mut SmallRng) -> Option<Coord> {
        if !self.awaiting_opponent() {
            return None;
        }
        strategy.select_target(rng, &self.player_board.shots(), self.hit_history.as_slice())
    }
}

#[cfg(feature = "std")]
impl GameState {
    /// Serialises the state for saving a session.
    pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Restores a state written by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
