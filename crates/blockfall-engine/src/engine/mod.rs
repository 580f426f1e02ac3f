//! Game engine logic and state management.
//!
//! - [`GameSession`] - One game: board, falling piece, and the tick cycle
//! - [`SessionConfig`] - Board size, spawn position, input handling, seed
//! - [`TickInput`] - Move and rotate signals sampled for one tick
//! - [`PieceGenerator`] - Uniform random piece selection
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]; the first piece spawns at the top
//! 2. Call [`GameSession::tick`] at a fixed pace with the current input
//! 3. Each tick moves the piece down one row, or locks it and clears full rows
//! 4. Repeat until a new piece no longer fits (game over)
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameSession, SessionConfig, TickInput};
//!
//! let mut session = GameSession::new(&SessionConfig::default()).unwrap();
//!
//! while !session.is_game_over() {
//!     session.tick(TickInput::NONE);
//! }
//! println!("Game Over");
//! ```

pub use self::{config::*, input::*, piece_generator::*, session::*};

mod config;
mod input;
mod piece_generator;
mod session;
