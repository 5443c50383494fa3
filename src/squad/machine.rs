//! Generic squad state machine
//!
//! Holds exactly one active state plus a one-slot remembered previous
//! state. States signal transitions by returning a [`Transition`] from
//! `tick` instead of mutating the machine directly, which keeps the borrow
//! structure simple and makes every transition observable in one place.
//!
//! Lifecycle contract: `activate` runs exactly once before the first
//! `tick` of an activation span, `deactivate` exactly once after the last.
//! A state placed in the previous-slot and later reverted to begins a new
//! span (it is re-activated).

use rand_chacha::ChaCha8Rng;

use crate::core::config::SquadConfig;
use crate::engine::orders::BotOrders;
use crate::engine::world::TacticalWorld;
use crate::squad::Squad;

/// Everything a state may consult or act through during one tick
///
/// The RNG is the bot's shared seeded generator; states must draw all
/// randomness from it to keep lockstep replays deterministic.
pub struct Control<'a> {
    pub world: &'a dyn TacticalWorld,
    pub orders: &'a mut dyn BotOrders,
    pub rng: &'a mut ChaCha8Rng,
    pub config: &'a SquadConfig,
    dismissed: bool,
}

impl<'a> Control<'a> {
    pub fn new(
        world: &'a dyn TacticalWorld,
        orders: &'a mut dyn BotOrders,
        rng: &'a mut ChaCha8Rng,
        config: &'a SquadConfig,
    ) -> Self {
        Self {
            world,
            orders,
            rng,
            config,
            dismissed: false,
        }
    }

    /// Request dismissal of the squad; honored by the owning manager after
    /// the current tick completes
    pub fn dismiss_squad(&mut self) {
        self.dismissed = true;
    }

    pub fn squad_dismissed(&self) -> bool {
        self.dismissed
    }
}

/// A tactical behavior state
pub trait SquadState {
    fn name(&self) -> &'static str;

    fn activate(&mut self, _squad: &mut Squad, _ctx: &mut Control) {}

    /// One decision pass; return a transition to leave this state
    fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) -> Option<Transition>;

    fn deactivate(&mut self, _squad: &mut Squad, _ctx: &mut Control) {}
}

enum NextState {
    To(Box<dyn SquadState>),
    /// Revert to the remembered previous state, or the fallback when
    /// nothing was remembered
    Revert { fallback: Box<dyn SquadState> },
}

/// A requested state change, built by the outgoing state
pub struct Transition {
    next: NextState,
    remember: bool,
    tick_now: bool,
}

impl Transition {
    /// Switch to a new state
    pub fn to(state: impl SquadState + 'static) -> Self {
        Self {
            next: NextState::To(Box::new(state)),
            remember: false,
            tick_now: false,
        }
    }

    /// Return to the remembered previous state, or to `fallback` when no
    /// state was remembered
    pub fn revert_or(fallback: impl SquadState + 'static) -> Self {
        Self {
            next: NextState::Revert {
                fallback: Box::new(fallback),
            },
            remember: false,
            tick_now: false,
        }
    }

    /// Keep the outgoing state in the one-slot previous memory
    pub fn remembering(mut self) -> Self {
        self.remember = true;
        self
    }

    /// Tick the incoming state in the same machine tick, so the
    /// transition does not cost a decision cycle
    pub fn and_tick(mut self) -> Self {
        self.tick_now = true;
        self
    }
}

/// Longest chain of same-tick transitions before the machine yields
///
/// Immediate transitions are legitimate (hit -> run on the damage tick)
/// but an accidental cycle of them must not spin within one game tick.
const MAX_CHAINED_TRANSITIONS: u32 = 4;

/// State holder driving one squad
pub struct StateMachine {
    current: Box<dyn SquadState>,
    previous: Option<Box<dyn SquadState>>,
    started: bool,
}

impl StateMachine {
    pub fn new(initial: impl SquadState + 'static) -> Self {
        Self {
            current: Box::new(initial),
            previous: None,
            started: false,
        }
    }

    /// Name of the active state, for logging and tests
    pub fn current_name(&self) -> &'static str {
        self.current.name()
    }

    /// Dispatch one tick to the active state and apply any transitions
    pub fn tick(&mut self, squad: &mut Squad, ctx: &mut Control) {
        if !squad.is_valid() {
            return;
        }

        if !self.started {
            self.current.activate(squad, ctx);
            self.started = true;
        }

        let mut budget = MAX_CHAINED_TRANSITIONS;
        loop {
            let Some(transition) = self.current.tick(squad, ctx) else {
                return;
            };
            let tick_now = transition.tick_now;
            self.apply(transition, squad, ctx);

            if !tick_now || !squad.is_valid() {
                return;
            }
            budget -= 1;
            if budget == 0 {
                tracing::warn!(squad = ?squad.id, state = self.current.name(),
                    "same-tick transition budget exhausted");
                return;
            }
        }
    }

    fn apply(&mut self, transition: Transition, squad: &mut Squad, ctx: &mut Control) {
        let next = match transition.next {
            NextState::To(state) => state,
            NextState::Revert { fallback } => self.previous.take().unwrap_or(fallback),
        };

        tracing::debug!(squad = ?squad.id, from = self.current.name(), to = next.name(),
            "squad state transition");

        self.current.deactivate(squad, ctx);
        let outgoing = std::mem::replace(&mut self.current, next);
        if transition.remember {
            self.previous = Some(outgoing);
        }
        self.current.activate(squad, ctx);
    }
}
