//! The composition facade: one call from request to finished team.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::catalog::{Catalog, MapProfile, Role};
use crate::config::Settings;
use crate::dice::Dice;
use crate::error::{Result, RollError};
use crate::needs::resolve_needs;
use crate::notes::build_notes;
use crate::resolver::{Pick, Resolved, Resolver};
use crate::slots::{plan_slots, Style};
use crate::strategy::build_strats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    #[default]
    Ranked,
    /// Competitive, pro-style flex choices
    Pro,
}

impl Mode {
    pub const fn label(&self) -> &'static str {
        match self {
            Mode::Ranked => "Ranked",
            Mode::Pro => "Pro-Style",
        }
    }

    pub fn from_str_or_shorthand(s: &str) -> Option<Mode> {
        match s.trim().to_lowercase().as_str() {
            "ranked" | "r" => Some(Mode::Ranked),
            "pro" | "pro-style" | "p" => Some(Mode::Pro),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Mode::from_str_or_shorthand(s)
            .ok_or_else(|| format!("Unknown mode '{s}' (expected ranked or pro)"))
    }
}

/// Which map to roll on
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MapChoice {
    /// Uniform pick from the catalog's maps
    #[default]
    Random,
    Named(String),
}

impl FromStr for MapChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Map name is empty".to_string());
        }
        if s.eq_ignore_ascii_case("random") {
            Ok(MapChoice::Random)
        } else {
            Ok(MapChoice::Named(s.to_string()))
        }
    }
}

/// Everything a roll is parameterised by
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub map: MapChoice,
    pub mode: Mode,
    pub style: Style,
    /// At most one agent per role, honoured by the first slot of that role
    pub locks: BTreeMap<Role, String>,
    pub excluded: BTreeSet<String>,
}

impl Request {
    pub fn lock(mut self, role: Role, agent: impl Into<String>) -> Self {
        self.locks.insert(role, agent.into());
        self
    }

    pub fn exclude<I, S>(mut self, agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(agents.into_iter().map(Into::into));
        self
    }
}

/// A finished roll
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub map: String,
    pub mode: Mode,
    pub style: Style,
    pub picks: Vec<Pick>,
    pub notes: Vec<String>,
    pub strats: Vec<String>,
}

impl Composition {
    pub fn agents(&self) -> impl Iterator<Item = &str> {
        self.picks.iter().map(|p| p.agent.as_str())
    }
}

/// Rolls compositions against a fixed catalog and settings.
#[derive(Debug, Clone, Default)]
pub struct Roller {
    catalog: Catalog,
    settings: Settings,
}

impl Roller {
    pub fn new(catalog: Catalog, settings: Settings) -> Self {
        Roller { catalog, settings }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn generate(&self, request: &Request, dice: &mut dyn Dice) -> Result<Composition> {
        let profile = self.resolve_map(&request.map, dice)?;
        let needs = resolve_needs(profile);
        log::debug!("Map {} needs: {:?}", profile.name, needs.active());

        let plan = plan_slots(request.style);
        let resolver = Resolver::new(
            &self.catalog,
            request,
            &profile.name,
            needs,
            self.settings.odds,
        );
        resolver.validate_locks(&plan)?;
        let Resolved { picks, agents } = resolver.resolve(&plan, dice)?;

        let notes = build_notes(&agents, request.style);
        let strats = build_strats(&profile.name, &agents, request.style, self.settings.strats);

        let comp = Composition {
            map: profile.name.clone(),
            mode: request.mode,
            style: request.style,
            picks,
            notes,
            strats,
        };
        log::info!(
            "Rolled {} on {} ({}): {}",
            request.style.key(),
            comp.map,
            comp.mode,
            comp.agents().collect::<Vec<_>>().join(", ")
        );
        Ok(comp)
    }

    fn resolve_map(&self, choice: &MapChoice, dice: &mut dyn Dice) -> Result<&MapProfile> {
        let maps = self.catalog.maps();
        match choice {
            MapChoice::Random if maps.is_empty() => Err(RollError::EmptyCatalog),
            MapChoice::Random => Ok(&maps[dice.index(maps.len())]),
            MapChoice::Named(name) => self
                .catalog
                .map(name)
                .ok_or_else(|| RollError::UnknownMap(name.clone())),
        }
    }
}
