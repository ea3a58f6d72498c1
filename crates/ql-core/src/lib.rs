//! Core domain logic for the game log analyzer.
//!
//! This crate contains the fundamental types and logic for:
//! - Tokenizing: turning raw server log lines into typed events
//! - Event streaming: skipping malformed lines with one event of lookahead
//! - Game reconstruction: folding events into per-match kill statistics

mod cursor;
mod error;
pub mod event;
pub mod game;
pub mod header;
mod scanner;
mod tokenizer;

pub use cursor::{BUFFER_SIZE, EventCursor, LineSource, ReaderLines};
pub use error::{ContextError, GameError, SyntaxError};
pub use event::{ClientId, Event, EventKind};
pub use game::{Game, PlayerInfo, Tally, WorldKillStatus};
pub use header::LogHeader;
pub use scanner::{GameScanner, Scan};
pub use tokenizer::parse_line;
