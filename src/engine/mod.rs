//! Boundary with the host RTS engine
//!
//! The engine itself (actor model, pathfinding, order execution, fog of
//! war) lives outside this crate. These traits are the entire surface the
//! squad logic consumes.

pub mod orders;
pub mod world;

pub use orders::{BotOrders, Order, OrderKind, OrderTarget, RetreatOptions};
pub use world::{AttackStatus, CombatProfile, HealthState, TacticalWorld};
