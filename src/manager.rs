//! Squad ownership and per-tick driving
//!
//! The host bot module forms squads here and calls [`SquadManager::tick`]
//! every game tick; the manager paces actual evaluation to
//! `attack_force_interval` so squad decision cost stays bounded. All
//! randomness flows through one seeded generator so two bots with the same
//! seed and world make identical decisions.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SquadConfig;
use crate::core::error::{Result, TacticsError};
use crate::core::types::{CellPos, SquadId, Tick, UnitId};
use crate::engine::orders::BotOrders;
use crate::engine::world::TacticalWorld;
use crate::squad::ground::GroundIdle;
use crate::squad::guerrilla::GuerrillaIdle;
use crate::squad::machine::{Control, StateMachine};
use crate::squad::protection::ProtectionIdle;
use crate::squad::{Squad, SquadKind};

struct SquadSlot {
    squad: Squad,
    machine: StateMachine,
}

/// Owner of all squads of one bot player
pub struct SquadManager {
    config: SquadConfig,
    rng: ChaCha8Rng,
    squads: Vec<SquadSlot>,
    last_evaluation: Option<Tick>,
}

impl SquadManager {
    pub fn new(config: SquadConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            squads: Vec::new(),
            last_evaluation: None,
        })
    }

    /// Form a squad from the given units, starting in the idle state of
    /// its kind
    pub fn form_squad(
        &mut self,
        kind: SquadKind,
        units: &[UnitId],
        base_location: CellPos,
        world: &dyn TacticalWorld,
    ) -> Result<SquadId> {
        if units.is_empty() {
            return Err(TacticsError::EmptySquad);
        }

        let mut squad = Squad::new(kind, base_location);
        for &unit in units {
            if world.unit_cannot_be_ordered(unit) {
                return Err(TacticsError::UnorderableUnit(unit));
            }
            squad.add_member(unit, world);
        }

        let machine = match kind {
            SquadKind::Assault => StateMachine::new(GroundIdle::new()),
            SquadKind::Guerrilla => StateMachine::new(GuerrillaIdle::new()),
            SquadKind::Protection => StateMachine::new(ProtectionIdle::new()),
        };

        let id = squad.id;
        tracing::info!(squad = ?id, ?kind, units = units.len(), "squad formed");
        self.squads.push(SquadSlot { squad, machine });
        Ok(id)
    }

    /// Point a squad at a specific enemy (protection squads rely on this)
    pub fn set_squad_target(&mut self, id: SquadId, target: Option<UnitId>) -> Result<()> {
        self.slot_mut(id)?.squad.set_target(target);
        Ok(())
    }

    /// Drop a squad outright; its units keep their current orders
    pub fn dismiss_squad(&mut self, id: SquadId) -> Result<()> {
        let before = self.squads.len();
        self.squads.retain(|s| s.squad.id != id);
        if self.squads.len() == before {
            return Err(TacticsError::UnknownSquad(id));
        }
        tracing::info!(squad = ?id, "squad dismissed");
        Ok(())
    }

    /// Drive all squads for one game tick
    ///
    /// Cheap no-op on most ticks; a full evaluation runs once per
    /// `attack_force_interval`. Rosters are pruned before their machines
    /// run, and squads that emptied or dismissed themselves are dropped
    /// afterwards.
    pub fn tick(&mut self, world: &dyn TacticalWorld, orders: &mut dyn BotOrders, now: Tick) {
        if !self.should_evaluate(now) {
            return;
        }
        self.last_evaluation = Some(now);

        let mut dropped: Vec<SquadId> = Vec::new();
        for slot in &mut self.squads {
            slot.squad.prune(world);
            if !slot.squad.is_valid() {
                dropped.push(slot.squad.id);
                continue;
            }

            let mut ctx = Control::new(world, orders, &mut self.rng, &self.config);
            slot.machine.tick(&mut slot.squad, &mut ctx);
            if ctx.squad_dismissed() || !slot.squad.is_valid() {
                dropped.push(slot.squad.id);
            }
        }

        for id in dropped {
            tracing::debug!(squad = ?id, "squad emptied or dismissed itself");
            self.squads.retain(|s| s.squad.id != id);
        }
    }

    fn should_evaluate(&self, now: Tick) -> bool {
        match self.last_evaluation {
            Some(last) => now.saturating_sub(last) >= self.config.attack_force_interval,
            None => true,
        }
    }

    pub fn squad(&self, id: SquadId) -> Option<&Squad> {
        self.squads.iter().find(|s| s.squad.id == id).map(|s| &s.squad)
    }

    /// Name of a squad's active state, for hosts and tests
    pub fn state_name(&self, id: SquadId) -> Option<&'static str> {
        self.squads
            .iter()
            .find(|s| s.squad.id == id)
            .map(|s| s.machine.current_name())
    }

    pub fn squads(&self) -> impl Iterator<Item = &Squad> {
        self.squads.iter().map(|s| &s.squad)
    }

    pub fn squad_count(&self) -> usize {
        self.squads.len()
    }

    pub fn config(&self) -> &SquadConfig {
        &self.config
    }

    fn slot_mut(&mut self, id: SquadId) -> Result<&mut SquadSlot> {
        self.squads
            .iter_mut()
            .find(|s| s.squad.id == id)
            .ok_or(TacticsError::UnknownSquad(id))
    }
}
