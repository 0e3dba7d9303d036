#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod game;
mod outcome;
mod placement;
mod vessel;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod scheduler;
#[cfg(feature = "std")]
pub mod scoreboard;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod settings;
#[cfg(feature = "std")]
pub mod sim;
#[cfg(feature = "std")]
pub mod terminal;

pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use outcome::*;
pub use placement::*;
pub use vessel::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use scheduler::MoveScheduler;
#[cfg(feature = "std")]
pub use scoreboard::{AuthProvider, HttpScoreboard, ScoreReporter, Scoreboard, StaticToken};
#[cfg(feature = "std")]
pub use session::{Session, SessionEvent};
#[cfg(feature = "std")]
pub use settings::Settings;
