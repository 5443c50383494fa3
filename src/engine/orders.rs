//! Orders queued to the host engine
//!
//! Squad states express every decision as an [`Order`] pushed into the
//! host's [`BotOrders`] sink. Issuance is fire-and-forget: the engine
//! applies queued orders at its own deterministic point in the tick, and
//! nothing is awaited here.

use serde::{Deserialize, Serialize};

use crate::core::types::{CellPos, UnitId};

/// Order verbs understood by the host engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    /// Move toward a cell, engaging targets of opportunity
    AttackMove,
    /// Attack a specific unit
    Attack,
    /// Plain move, no engagement
    Move,
    Stop,
    /// Disperse to adjacent free cells
    Scatter,
    /// Fly home to rearm
    ReturnToBase,
}

/// What an order is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderTarget {
    None,
    Cell(CellPos),
    Unit(UnitId),
}

/// A single order for one unit or a group
///
/// `subject` addresses one unit; `grouped` addresses many with one order.
/// The two are never combined. `queued` appends the order to the units'
/// activity queues instead of replacing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub kind: OrderKind,
    pub subject: Option<UnitId>,
    pub grouped: Vec<UnitId>,
    pub target: OrderTarget,
    pub queued: bool,
}

impl Order {
    /// Convenience: one unit attack-moves toward a cell
    pub fn attack_move(unit: UnitId, cell: CellPos) -> Self {
        Self {
            kind: OrderKind::AttackMove,
            subject: Some(unit),
            grouped: Vec::new(),
            target: OrderTarget::Cell(cell),
            queued: false,
        }
    }

    /// Convenience: a group attack-moves toward a cell
    pub fn attack_move_group(units: Vec<UnitId>, cell: CellPos) -> Self {
        Self {
            kind: OrderKind::AttackMove,
            subject: None,
            grouped: units,
            target: OrderTarget::Cell(cell),
            queued: false,
        }
    }

    /// Convenience: a group attacks a specific unit
    pub fn attack_group(units: Vec<UnitId>, target: UnitId) -> Self {
        Self {
            kind: OrderKind::Attack,
            subject: None,
            grouped: units,
            target: OrderTarget::Unit(target),
            queued: false,
        }
    }

    /// Convenience: a group moves (without engaging) toward a cell
    pub fn move_group(units: Vec<UnitId>, cell: CellPos) -> Self {
        Self {
            kind: OrderKind::Move,
            subject: None,
            grouped: units,
            target: OrderTarget::Cell(cell),
            queued: false,
        }
    }

    /// Convenience: stop one unit
    pub fn stop(unit: UnitId) -> Self {
        Self {
            kind: OrderKind::Stop,
            subject: Some(unit),
            grouped: Vec::new(),
            target: OrderTarget::None,
            queued: false,
        }
    }

    /// Convenience: stop a group
    pub fn stop_group(units: Vec<UnitId>) -> Self {
        Self {
            kind: OrderKind::Stop,
            subject: None,
            grouped: units,
            target: OrderTarget::None,
            queued: false,
        }
    }

    /// Convenience: scatter a group
    pub fn scatter_group(units: Vec<UnitId>) -> Self {
        Self {
            kind: OrderKind::Scatter,
            subject: None,
            grouped: units,
            target: OrderTarget::None,
            queued: false,
        }
    }

    /// Convenience: send a group home to rearm
    pub fn return_to_base_group(units: Vec<UnitId>) -> Self {
        Self {
            kind: OrderKind::ReturnToBase,
            subject: None,
            grouped: units,
            target: OrderTarget::None,
            queued: false,
        }
    }

    /// Mark the order as queued behind the units' current activities
    pub fn queued(mut self) -> Self {
        self.queued = true;
        self
    }
}

/// Flags for the host's generic retreat capability
///
/// `flee` forces disengagement even under fire; `rearm` and `repair` route
/// units through resupply/repair structures on the way home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetreatOptions {
    pub flee: bool,
    pub rearm: bool,
    pub repair: bool,
}

/// Sink for orders produced by squad logic
pub trait BotOrders {
    fn queue_order(&mut self, order: Order);

    /// Pull the given units back toward the bot's base
    fn retreat(&mut self, units: &[UnitId], options: RetreatOptions);
}
