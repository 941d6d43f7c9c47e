//! Behavioral state machine for agents
//!
//! Each tick the policy counts the agent's state timer down, re-rolls the state
//! once the timer has run out, lets wandering agents drift, and hands seeking
//! agents a target inside the zone type their state calls for.

use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use log::debug;
use rand::Rng;

use super::agent::{Affinities, Agent};
use super::types::{
    normalize_heading, AreaType, BehaviorState, Position, STATE_TIMER_MAX, STATE_TIMER_MIN,
    WANDER_HEADING_CHANCE,
};
use super::zone_map::ZoneMap;

/// A state change made during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: BehaviorState,
    pub to: BehaviorState,
    pub timer: u32,
}

/// Tunables for the state machine
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorPolicy {
    /// Inclusive range a fresh state timer is drawn from
    pub timer_range: RangeInclusive<u32>,
    /// Chance per tick that a wandering agent picks a brand new heading
    pub wander_heading_chance: f64,
    /// Chance per tick that a wandering agent nudges its heading slightly
    pub roam_jitter_chance: f64,
    /// Largest nudge, in radians, either way
    pub roam_jitter: f32,
}

impl Default for BehaviorPolicy {
    fn default() -> Self {
        Self {
            timer_range: STATE_TIMER_MIN..=STATE_TIMER_MAX,
            wander_heading_chance: WANDER_HEADING_CHANCE,
            roam_jitter_chance: 0.0,
            roam_jitter: 0.5,
        }
    }
}

impl BehaviorPolicy {
    pub fn sample_timer<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.random_range(self.timer_range.clone())
    }

    pub fn random_state<R: Rng + ?Sized>(&self, rng: &mut R) -> BehaviorState {
        BehaviorState::ALL[rng.random_range(0..BehaviorState::ALL.len())]
    }

    /// Run one tick of decisions for an agent. Movement is left to the
    /// steering integrator.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        agent: &mut Agent,
        zone_map: &ZoneMap,
        rng: &mut R,
    ) -> Option<Transition> {
        let transition = self.advance_timer(agent, rng);

        if agent.state == BehaviorState::Wandering {
            self.drift_heading(agent, rng);
        } else if agent.target.is_none() {
            agent.target = select_target(agent, zone_map, rng);
        }

        transition
    }

    /// Count the timer down; a tick that starts with the timer at zero
    /// re-rolls the state and clears the target.
    ///
    /// The re-roll happens on the tick after the timer reaches zero, not on
    /// the same tick, so a state forced with a timer of 1 is still in effect
    /// on the next tick and the timer reads 0 for one tick.
    pub fn advance_timer<R: Rng + ?Sized>(
        &self,
        agent: &mut Agent,
        rng: &mut R,
    ) -> Option<Transition> {
        if agent.state_timer > 0 {
            agent.state_timer -= 1;
            return None;
        }

        let from = agent.state;
        let to = self.random_state(rng);
        let timer = self.sample_timer(rng);
        agent.force_state(to, timer);
        debug!(
            "agent {} ({}) {} -> {} for {} ticks",
            agent.id,
            agent.name,
            from.label(),
            to.label(),
            timer
        );
        Some(Transition { from, to, timer })
    }

    /// Organic drift for free-roaming agents
    pub fn drift_heading<R: Rng + ?Sized>(&self, agent: &mut Agent, rng: &mut R) {
        let kinematics = &mut agent.kinematics;
        if rng.random_bool(self.wander_heading_chance) {
            kinematics.heading = rng.random_range(0.0..TAU);
        }
        if self.roam_jitter_chance > 0.0 && rng.random_bool(self.roam_jitter_chance) {
            let nudge = rng.random_range(-self.roam_jitter..=self.roam_jitter);
            kinematics.heading = normalize_heading(kinematics.heading + nudge);
        }
    }
}

/// Fresh target for the agent's current state, `None` while wandering
pub fn select_target<R: Rng + ?Sized>(
    agent: &Agent,
    zone_map: &ZoneMap,
    rng: &mut R,
) -> Option<Position> {
    let kind = agent.destination_type()?;
    let zone = zone_map.random_zone_of_type(kind, rng)?;
    Some(ZoneMap::pick_random_point(zone, rng))
}

/// Draw the lifetime zone affinities for a new agent.
/// Work: 30% commercial, 30% industrial, 20% recreational, 20% rural.
/// Home: 70% residential, 30% rural.
pub fn assign_affinities<R: Rng + ?Sized>(rng: &mut R) -> Affinities {
    let roll: f64 = rng.random();
    let work = if roll < 0.3 {
        AreaType::Commercial
    } else if roll < 0.6 {
        AreaType::Industrial
    } else if roll < 0.8 {
        AreaType::Recreational
    } else {
        AreaType::Rural
    };

    let home = if rng.random_bool(0.7) {
        AreaType::Residential
    } else {
        AreaType::Rural
    };

    Affinities { home, work }
}
