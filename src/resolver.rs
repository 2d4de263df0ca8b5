//! Constraint resolver: turns a slot plan into five distinct agents.
//!
//! Slots are filled in plan order. A slot takes its role's lock if that
//! lock is still unused, otherwise it draws from the weighted pool of
//! agents that are eligible, not excluded and not already on the team.
//! The Standard style's flex slot first picks a role from map needs,
//! current coverage, mode and a few coin flips, then fills like any other
//! slot.

use std::collections::HashSet;

use serde::Serialize;

use crate::boosts::{boosts_for, BoostContext, PoolKind};
use crate::catalog::{Agent, Catalog, Coverage, Role};
use crate::config::FlexOdds;
use crate::dice::Dice;
use crate::error::{Result, RollError};
use crate::needs::Needs;
use crate::pool::{base_pool, weighted_pool};
use crate::roller::{Mode, Request};
use crate::slots::{RoleSlot, SlotRequirement};

/// One filled seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pick {
    pub slot: String,
    pub role: Role,
    pub agent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<SlotRequirement>,
}

/// Outcome of a successful walk
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub picks: Vec<Pick>,
    pub agents: Vec<&'a Agent>,
}

pub(crate) struct Resolver<'a> {
    catalog: &'a Catalog,
    request: &'a Request,
    map: &'a str,
    needs: Needs,
    odds: FlexOdds,
    chosen: Vec<&'a Agent>,
    locks_used: HashSet<Role>,
    /// Roles with a fixed slot in the plan; their locks are held back from draws
    planned: HashSet<Role>,
    picks: Vec<Pick>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        catalog: &'a Catalog,
        request: &'a Request,
        map: &'a str,
        needs: Needs,
        odds: FlexOdds,
    ) -> Self {
        Resolver {
            catalog,
            request,
            map,
            needs,
            odds,
            chosen: Vec::with_capacity(5),
            locks_used: HashSet::new(),
            planned: HashSet::new(),
            picks: Vec::with_capacity(5),
        }
    }

    /// Check every lock before any slot is filled.
    pub fn validate_locks(&self, plan: &[RoleSlot]) -> Result<()> {
        for (&role, name) in &self.request.locks {
            if self.request.excluded.contains(name) {
                return Err(RollError::LockedExcluded {
                    role,
                    agent: name.clone(),
                });
            }
            let agent = self.locked_agent(role, name)?;

            match plan.iter().find(|s| s.role == role && !s.is_flex()) {
                Some(slot) if slot.needs_dive() && !agent.is_dive_duelist() => {
                    return Err(self.dive_error(slot.label, name));
                }
                Some(_) => {}
                None => log::warn!("{role} lock on {name} is unused: no {role} slot in this style"),
            }
        }
        Ok(())
    }

    pub fn resolve(mut self, plan: &[RoleSlot], dice: &mut dyn Dice) -> Result<Resolved<'a>> {
        self.planned = plan.iter().filter(|s| !s.is_flex()).map(|s| s.role).collect();
        for slot in plan {
            if slot.is_flex() {
                self.resolve_flex(dice)?;
                continue;
            }
            let kind = match slot.role {
                Role::Controller => PoolKind::Controller,
                Role::Initiator => PoolKind::Initiator,
                Role::Sentinel => PoolKind::Sentinel,
                Role::Duelist if slot.needs_dive() => PoolKind::DiveDuelist,
                Role::Duelist => PoolKind::Duelist,
            };
            self.fill(slot.role, slot.label, slot.requirement, kind, dice)?;
        }

        let mut seen = HashSet::new();
        for pick in &self.picks {
            if !seen.insert(pick.agent.as_str()) {
                return Err(RollError::DuplicatePick {
                    agent: pick.agent.clone(),
                });
            }
        }

        Ok(Resolved {
            picks: self.picks,
            agents: self.chosen,
        })
    }

    fn resolve_flex(&mut self, dice: &mut dyn Dice) -> Result<()> {
        let role = self.flex_role(dice);
        log::debug!("Flex slot resolved to {role}");

        let (label, kind) = match role {
            Role::Controller => ("Flex (Controller)", PoolKind::FlexController),
            Role::Initiator => ("Flex (Initiator)", PoolKind::FlexInitiator),
            Role::Sentinel => ("Flex (Sentinel)", PoolKind::FlexSentinel),
            Role::Duelist => ("Flex (Duelist)", PoolKind::Duelist),
        };
        self.fill(role, label, None, kind, dice)
    }

    fn flex_role(&self, dice: &mut dyn Dice) -> Role {
        let cov = self.coverage();
        let needs = self.needs;
        let odds = self.odds;

        let mut role = Role::Initiator;
        if needs.prefer_double_controller {
            role = Role::Controller;
        }
        if needs.prefer_wall_controller && !cov.wall {
            role = Role::Controller;
        }
        if needs.prefer_flash && !cov.flash {
            role = Role::Initiator;
        }
        if needs.prefer_recon && !cov.recon {
            role = Role::Initiator;
        }

        // Occasional second sentinel
        if needs.prefer_trap_sentinel && dice.chance(odds.flex_sentinel) {
            role = Role::Sentinel;
        }

        match self.request.mode {
            Mode::Pro => {
                role = if !(cov.flash && cov.recon) {
                    Role::Initiator
                } else if needs.prefer_double_controller
                    || dice.chance(odds.pro_split_controller)
                {
                    Role::Controller
                } else {
                    Role::Initiator
                };
                // Aggressive double-duelist comps
                if dice.chance(odds.pro_flex_duelist) {
                    role = Role::Duelist;
                }
            }
            Mode::Ranked => {
                if dice.chance(odds.ranked_flex_controller) {
                    role = Role::Controller;
                }
            }
        }
        role
    }

    fn fill(
        &mut self,
        role: Role,
        label: &str,
        requirement: Option<SlotRequirement>,
        kind: PoolKind,
        dice: &mut dyn Dice,
    ) -> Result<()> {
        let request = self.request;
        if !self.locks_used.contains(&role) {
            if let Some(name) = request.locks.get(&role) {
                self.locks_used.insert(role);
                return self.place_locked(role, label, requirement, name);
            }
        }

        let must_dive = requirement == Some(SlotRequirement::DiveDuelist);
        let available: Vec<&'a Agent> = base_pool(self.catalog, role, &request.excluded)
            .into_iter()
            .filter(|a| !self.is_chosen(&a.name) && !self.is_reserved(&a.name))
            .filter(|a| !must_dive || a.is_dive_duelist())
            .collect();

        let ctx = BoostContext {
            map: self.map,
            needs: self.needs,
            coverage: self.coverage(),
        };
        let boosts = boosts_for(kind, &ctx);
        let pool = weighted_pool(&available, &boosts);
        if pool.is_empty() {
            return Err(RollError::PoolExhausted {
                slot: label.to_string(),
                role,
            });
        }

        let agent = pool[dice.index(pool.len())];
        log::debug!(
            "{label}: drew {} from {} candidates ({} weighted entries)",
            agent.name,
            available.len(),
            pool.len()
        );
        self.place(role, label, requirement, agent);
        Ok(())
    }

    fn place_locked(
        &mut self,
        role: Role,
        label: &str,
        requirement: Option<SlotRequirement>,
        name: &str,
    ) -> Result<()> {
        let agent = self.locked_agent(role, name)?;
        if self.is_chosen(name) {
            return Err(RollError::LockCollision {
                slot: label.to_string(),
                role,
                agent: name.to_string(),
            });
        }
        if requirement == Some(SlotRequirement::DiveDuelist) && !agent.is_dive_duelist() {
            return Err(self.dive_error(label, name));
        }
        log::debug!("{label}: locked to {name}");
        self.place(role, label, requirement, agent);
        Ok(())
    }

    fn place(
        &mut self,
        role: Role,
        label: &str,
        requirement: Option<SlotRequirement>,
        agent: &'a Agent,
    ) {
        self.chosen.push(agent);
        self.picks.push(Pick {
            slot: label.to_string(),
            role,
            agent: agent.name.clone(),
            requirement,
        });
    }

    fn locked_agent(&self, role: Role, name: &str) -> Result<&'a Agent> {
        self.catalog
            .agent(name)
            .filter(|a| a.can_play(role))
            .ok_or_else(|| RollError::LockRoleMismatch {
                role,
                agent: name.to_string(),
            })
    }

    fn dive_error(&self, slot: &str, name: &str) -> RollError {
        RollError::DiveRequired {
            slot: slot.to_string(),
            agent: name.to_string(),
            suggestions: self
                .catalog
                .agents()
                .iter()
                .filter(|a| a.is_dive_duelist())
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Named by a lock whose slot is still ahead.
    fn is_reserved(&self, name: &str) -> bool {
        self.request.locks.iter().any(|(role, locked)| {
            locked == name && self.planned.contains(role) && !self.locks_used.contains(role)
        })
    }

    fn is_chosen(&self, name: &str) -> bool {
        self.chosen.iter().any(|a| a.name == name)
    }

    fn coverage(&self) -> Coverage {
        Coverage::of(self.chosen.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Tag;
    use crate::dice::ScriptedDice;
    use crate::needs::resolve_needs;
    use crate::roller::MapChoice;
    use crate::slots::{plan_slots, Style};
    use pretty_assertions::assert_eq;

    fn request(map: &str, mode: Mode) -> Request {
        Request {
            map: MapChoice::Named(map.to_string()),
            mode,
            style: Style::Standard,
            ..Request::default()
        }
    }

    fn run(
        catalog: &Catalog,
        request: &Request,
        map: &str,
        dice: &mut ScriptedDice,
    ) -> Result<Vec<Pick>> {
        let needs = resolve_needs(catalog.map(map).unwrap());
        let plan = plan_slots(request.style);
        let resolver = Resolver::new(catalog, request, map, needs, FlexOdds::default());
        resolver.validate_locks(&plan)?;
        Ok(resolver.resolve(&plan, dice)?.picks)
    }

    fn flex(picks: &[Pick]) -> (&str, &str) {
        let last = picks.last().unwrap();
        (last.slot.as_str(), last.agent.as_str())
    }

    #[test]
    fn test_first_index_follows_catalog_order() {
        let catalog = Catalog::builtin();
        let req = request("Ascent", Mode::Ranked);
        let mut dice = ScriptedDice::default();
        let picks = run(&catalog, &req, "Ascent", &mut dice).unwrap();
        let agents: Vec<&str> = picks.iter().map(|p| p.agent.as_str()).collect();
        assert_eq!(agents, vec!["Omen", "Sova", "Killjoy", "Jett", "Fade"]);
        assert_eq!(picks[3].requirement, Some(SlotRequirement::DiveDuelist));
    }

    #[test]
    fn test_ranked_flex_default_initiator() {
        let catalog = Catalog::builtin();
        let req = request("Ascent", Mode::Ranked);
        let mut dice = ScriptedDice::with_flips(&[false, false]);
        let picks = run(&catalog, &req, "Ascent", &mut dice).unwrap();
        assert_eq!(flex(&picks), ("Flex (Initiator)", "Fade"));
        // trap-sentinel flip, then the ranked controller flip
        assert_eq!(dice.asked, vec![0.12, 0.15]);
    }

    #[test]
    fn test_ranked_flex_sentinel_override() {
        let catalog = Catalog::builtin();
        let req = request("Ascent", Mode::Ranked);
        let mut dice = ScriptedDice::with_flips(&[true, false]);
        let picks = run(&catalog, &req, "Ascent", &mut dice).unwrap();
        assert_eq!(flex(&picks), ("Flex (Sentinel)", "Cypher"));
    }

    #[test]
    fn test_ranked_flex_controller_override() {
        let catalog = Catalog::builtin();
        let req = request("Ascent", Mode::Ranked);
        let mut dice = ScriptedDice::with_flips(&[true, true]);
        let picks = run(&catalog, &req, "Ascent", &mut dice).unwrap();
        assert_eq!(flex(&picks), ("Flex (Controller)", "Brimstone"));
        assert_eq!(picks[4].role, Role::Controller);
    }

    #[test]
    fn test_no_trap_flip_without_trap_need() {
        let catalog = Catalog::builtin();
        let req = request("Haven", Mode::Ranked);
        let mut dice = ScriptedDice::default();
        run(&catalog, &req, "Haven", &mut dice).unwrap();
        assert_eq!(dice.asked, vec![0.15]);
    }

    #[test]
    fn test_pro_forces_initiator_when_coverage_missing() {
        let catalog = Catalog::builtin();
        let req = request("Haven", Mode::Pro);
        let mut dice = ScriptedDice::with_flips(&[false]);
        let picks = run(&catalog, &req, "Haven", &mut dice).unwrap();
        assert_eq!(flex(&picks), ("Flex (Initiator)", "Fade"));
        assert_eq!(dice.asked, vec![0.25]);
    }

    #[test]
    fn test_pro_double_duelist_override() {
        let catalog = Catalog::builtin();
        let req = request("Haven", Mode::Pro);
        let mut dice = ScriptedDice::with_flips(&[true]);
        let picks = run(&catalog, &req, "Haven", &mut dice).unwrap();
        assert_eq!(flex(&picks), ("Flex (Duelist)", "Raze"));
        assert_eq!(picks[4].requirement, None);
    }

    #[test]
    fn test_pro_split_when_flash_and_recon_covered() {
        let catalog = Catalog::builtin();
        let mut req = request("Haven", Mode::Pro);
        req.locks.insert(Role::Initiator, "Skye".to_string());

        let mut dice = ScriptedDice::with_flips(&[true, false]);
        let picks = run(&catalog, &req, "Haven", &mut dice).unwrap();
        assert_eq!(flex(&picks).0, "Flex (Controller)");
        assert_eq!(dice.asked, vec![0.5, 0.25]);

        let mut dice = ScriptedDice::with_flips(&[false, false]);
        let picks = run(&catalog, &req, "Haven", &mut dice).unwrap();
        assert_eq!(flex(&picks), ("Flex (Initiator)", "Sova"));
    }

    #[test]
    fn test_pro_double_controller_map_skips_split_flip() {
        let catalog = Catalog::builtin();
        let mut req = request("Pearl", Mode::Pro);
        req.locks.insert(Role::Initiator, "Skye".to_string());
        let mut dice = ScriptedDice::default();
        let picks = run(&catalog, &req, "Pearl", &mut dice).unwrap();
        assert_eq!(flex(&picks), ("Flex (Controller)", "Brimstone"));
        assert_eq!(dice.asked, vec![0.25]);
    }

    #[test]
    fn test_wall_need_pulls_flex_to_controller() {
        let catalog = Catalog::builtin();
        // Omen brings no wall, and Breeze wants one
        let req = request("Breeze", Mode::Ranked);
        let mut dice = ScriptedDice::default();
        let picks = run(&catalog, &req, "Breeze", &mut dice).unwrap();
        assert_eq!(picks[0].agent, "Omen");
        assert_eq!(flex(&picks).0, "Flex (Controller)");
    }

    #[test]
    fn test_lock_collision_across_roles() {
        let flexer = Agent::new("Flexer", &[Role::Controller, Role::Initiator], &[]);
        let mut agents = Catalog::builtin().agents().to_vec();
        agents.insert(0, flexer);
        let catalog = Catalog::new(agents, Catalog::builtin().maps().to_vec()).unwrap();

        let mut req = request("Ascent", Mode::Ranked);
        req.locks.insert(Role::Controller, "Flexer".to_string());
        req.locks.insert(Role::Initiator, "Flexer".to_string());

        let err = run(&catalog, &req, "Ascent", &mut ScriptedDice::default()).unwrap_err();
        assert_eq!(
            err,
            RollError::LockCollision {
                slot: "Initiator".to_string(),
                role: Role::Initiator,
                agent: "Flexer".to_string(),
            }
        );
    }

    #[test]
    fn test_lock_held_back_from_earlier_draws() {
        let flexer = Agent::new("Flexer", &[Role::Controller, Role::Initiator], &[Tag::Smokes]);
        let mut agents = Catalog::builtin().agents().to_vec();
        agents.insert(0, flexer);
        let catalog = Catalog::new(agents, Catalog::builtin().maps().to_vec()).unwrap();

        let mut req = request("Ascent", Mode::Ranked);
        req.locks.insert(Role::Initiator, "Flexer".to_string());

        for index in 0..40 {
            let mut dice = ScriptedDice {
                index,
                ..ScriptedDice::default()
            };
            let picks = run(&catalog, &req, "Ascent", &mut dice).unwrap();
            assert_ne!(picks[0].agent, "Flexer", "index {index}");
            assert_eq!(picks[1].slot, "Initiator");
            assert_eq!(picks[1].agent, "Flexer");
        }
    }

    #[test]
    fn test_dive_suggestions_in_catalog_order() {
        let catalog = Catalog::builtin();
        let mut req = request("Split", Mode::Ranked);
        req.locks.insert(Role::Duelist, "Phoenix".to_string());
        let err = run(&catalog, &req, "Split", &mut ScriptedDice::default()).unwrap_err();
        assert_eq!(
            err,
            RollError::DiveRequired {
                slot: "Dive Duelist".to_string(),
                agent: "Phoenix".to_string(),
                suggestions: "Jett, Raze, Neon, Yoru, Waylay".to_string(),
            }
        );
    }

    #[test]
    fn test_flex_pool_exhausted_names_flex_slot() {
        let catalog = Catalog::builtin();
        let mut req = request("Haven", Mode::Ranked);
        // Leave exactly one initiator for the fixed Initiator slot
        req.excluded = ["Fade", "Skye", "KAY/O", "Breach", "Gekko", "Tejo"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let err = run(&catalog, &req, "Haven", &mut ScriptedDice::default()).unwrap_err();
        assert_eq!(
            err,
            RollError::PoolExhausted {
                slot: "Flex (Initiator)".to_string(),
                role: Role::Initiator,
            }
        );
    }
}
