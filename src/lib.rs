//! vanguard-ai: squad tactical decisions for RTS bot players
//!
//! The host engine forms squads of its bot's combat units and ticks them
//! through [`manager::SquadManager`]. Each squad runs a small state machine
//! (assault, guerrilla or protection flavor) that reads the world through
//! the [`engine::TacticalWorld`] oracle and acts by queueing orders into
//! the [`engine::BotOrders`] sink. All decisions are integer-math and
//! seeded-RNG deterministic so lockstep clients stay in sync.

pub mod core;
pub mod engine;
pub mod manager;
pub mod squad;

#[cfg(test)]
mod testkit;

pub use crate::core::config::SquadConfig;
pub use crate::core::error::{Result, TacticsError};
pub use crate::core::types::{CellDist, CellPos, SquadId, Tick, UnitId, WorldPos};
pub use crate::engine::{BotOrders, Order, OrderKind, RetreatOptions, TacticalWorld};
pub use crate::manager::SquadManager;
pub use crate::squad::{Squad, SquadKind};
