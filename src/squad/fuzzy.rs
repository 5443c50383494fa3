//! Fuzzy attack-or-flee decision
//!
//! Compares aggregate combat value of the squad against the enemies it can
//! see. Per-unit value is weapon power scaled by fuzzy health bands, and
//! the aggregate comparison runs through a logistic curve instead of a hard
//! ratio threshold, so slightly-outgunned squads still engage while clearly
//! outmatched ones withdraw. Pure and side-effect-free: identical inputs
//! always produce the identical decision.

use crate::engine::world::CombatProfile;

/// Trapezoidal membership: 0 outside [a, d], 1 inside [b, c], linear ramps
fn trapezoid(x: f32, a: f32, b: f32, c: f32, d: f32) -> f32 {
    if x <= a || x >= d {
        0.0
    } else if x < b {
        (x - a) / (b - a)
    } else if x <= c {
        1.0
    } else {
        (d - x) / (d - c)
    }
}

fn logistic(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Aggregate attack-vs-retreat scoring function
#[derive(Debug, Clone, Copy)]
pub struct AttackOrFlee {
    /// Slope of the logistic comparison; higher makes the decision sharper
    /// around the pivot
    pub steepness: f32,
    /// Friendly share of total combat value required to engage; below 0.5
    /// biases toward attacking even fights
    pub pivot: f32,
}

impl Default for AttackOrFlee {
    fn default() -> Self {
        Self {
            steepness: 12.0,
            pivot: 0.45,
        }
    }
}

impl AttackOrFlee {
    /// Effective combat value of one unit
    ///
    /// Weapon power is discounted through fuzzy health bands: a critically
    /// damaged unit fights at well under half value, a lightly damaged one
    /// near full. Unarmed units contribute nothing.
    pub fn unit_value(profile: &CombatProfile) -> f32 {
        if !profile.is_armed || profile.health_fraction <= 0.0 {
            return 0.0;
        }

        let hf = profile.health_fraction.min(1.0);
        let critical = trapezoid(hf, -1.0, 0.0, 0.2, 0.4);
        let wounded = trapezoid(hf, 0.2, 0.4, 0.6, 0.8);
        let healthy = trapezoid(hf, 0.6, 0.8, 1.0, 2.0);

        let total = critical + wounded + healthy;
        // Bands cover [0, 1] completely, so total is never zero here
        let weight = (critical * 0.4 + wounded * 0.75 + healthy) / total;

        profile.attack_power as f32 * weight
    }

    fn aggregate(profiles: &[CombatProfile]) -> f32 {
        profiles.iter().map(Self::unit_value).sum()
    }

    /// Confidence in [0, 1] that engaging is the right call
    pub fn attack_confidence(&self, friendly: &[CombatProfile], enemy: &[CombatProfile]) -> f32 {
        let own = Self::aggregate(friendly);
        let theirs = Self::aggregate(enemy);

        if own <= 0.0 {
            return 0.0;
        }
        if theirs <= 0.0 {
            return 1.0;
        }

        let share = own / (own + theirs);
        logistic(self.steepness * (share - self.pivot))
    }

    /// Should this collection of friendlies engage these enemies?
    pub fn can_attack(&self, friendly: &[CombatProfile], enemy: &[CombatProfile]) -> bool {
        self.attack_confidence(friendly, enemy) >= 0.5
    }
}
