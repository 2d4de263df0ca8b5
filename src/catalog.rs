//! Agents, map profiles and the catalog that holds them.
//!
//! The built-in roster is declared with [`define_agents!`] and
//! [`define_maps!`]; a config file can replace either list wholesale (see
//! [`crate::config`]). Once built, a [`Catalog`] is never mutated.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::needs::SparseNeeds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Controller,
    Initiator,
    Sentinel,
    Duelist,
}

impl Role {
    pub const fn name(&self) -> &'static str {
        match self {
            Role::Controller => "Controller",
            Role::Initiator => "Initiator",
            Role::Sentinel => "Sentinel",
            Role::Duelist => "Duelist",
        }
    }

    pub const fn all() -> &'static [Role] {
        &[
            Role::Controller,
            Role::Initiator,
            Role::Sentinel,
            Role::Duelist,
        ]
    }

    pub fn from_str_or_shorthand(s: &str) -> Option<Role> {
        match s.trim().to_lowercase().as_str() {
            "controller" | "ctrl" | "c" => Some(Role::Controller),
            "initiator" | "init" | "i" => Some(Role::Initiator),
            "sentinel" | "sent" | "s" => Some(Role::Sentinel),
            "duelist" | "duel" | "d" => Some(Role::Duelist),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_str_or_shorthand(s).ok_or_else(|| {
            format!("Unknown role '{s}' (expected controller, initiator, sentinel or duelist)")
        })
    }
}

/// Utility an agent brings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    /// Stuns and blinds
    Flash,
    /// Info reveal
    Recon,
    /// Primary area denial
    Smokes,
    /// Wall-style area denial
    Wall,
    Trap,
    /// Delay and stall tools
    Stall,
    Entry,
    AntiExec,
    #[serde(rename = "postplant")]
    PostPlant,
    /// Marks duelists fit for the mandatory aggressive-entry slot
    Dive,
}

impl Tag {
    pub const fn name(&self) -> &'static str {
        match self {
            Tag::Flash => "flash",
            Tag::Recon => "recon",
            Tag::Smokes => "smokes",
            Tag::Wall => "wall",
            Tag::Trap => "trap",
            Tag::Stall => "stall",
            Tag::Entry => "entry",
            Tag::AntiExec => "antiExec",
            Tag::PostPlant => "postplant",
            Tag::Dive => "dive",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub roles: Vec<Role>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Agent {
    pub fn new(name: &str, roles: &[Role], tags: &[Tag]) -> Self {
        Agent {
            name: name.to_string(),
            roles: roles.to_vec(),
            tags: tags.to_vec(),
        }
    }

    pub fn can_play(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Only duelists carrying the dive tag may fill a dive slot
    pub fn is_dive_duelist(&self) -> bool {
        self.can_play(Role::Duelist) && self.has_tag(Tag::Dive)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapProfile {
    pub name: String,
    #[serde(default)]
    pub needs: SparseNeeds,
}

/// Which kinds of utility a group of agents covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coverage {
    pub flash: bool,
    pub recon: bool,
    pub smokes: bool,
    pub wall: bool,
    pub trap: bool,
    pub stall: bool,
    pub post_plant: bool,
    pub dive: bool,
    pub controller: bool,
    pub initiator: bool,
    pub sentinel: bool,
}

impl Coverage {
    pub fn of<'a>(agents: impl IntoIterator<Item = &'a Agent>) -> Self {
        let mut cov = Coverage::default();
        for agent in agents {
            cov.flash |= agent.has_tag(Tag::Flash);
            cov.recon |= agent.has_tag(Tag::Recon);
            cov.smokes |= agent.has_tag(Tag::Smokes);
            cov.wall |= agent.has_tag(Tag::Wall);
            cov.trap |= agent.has_tag(Tag::Trap);
            cov.stall |= agent.has_tag(Tag::Stall);
            cov.post_plant |= agent.has_tag(Tag::PostPlant);
            cov.dive |= agent.is_dive_duelist();
            cov.controller |= agent.can_play(Role::Controller);
            cov.initiator |= agent.can_play(Role::Initiator);
            cov.sentinel |= agent.can_play(Role::Sentinel);
        }
        cov
    }
}

macro_rules! define_agents {
    (
        $(
            $name:literal => {
                roles: [$($role:ident),+ $(,)?]
                $(, tags: [$($tag:ident),* $(,)?])?
            }
        ),* $(,)?
    ) => {
        fn builtin_agents() -> Vec<Agent> {
            vec![
                $(Agent::new(
                    $name,
                    &[$(Role::$role),+],
                    &[$($(Tag::$tag),*)?],
                ),)*
            ]
        }
    };
}

macro_rules! define_maps {
    (
        $(
            $name:literal => { $($need:ident),* $(,)? }
        ),* $(,)?
    ) => {
        fn builtin_maps() -> Vec<MapProfile> {
            vec![
                $(MapProfile {
                    name: $name.to_string(),
                    needs: SparseNeeds {
                        $($need: Some(true),)*
                        ..SparseNeeds::default()
                    },
                },)*
            ]
        }
    };
}

define_agents! {
    // Controllers
    "Omen" => { roles: [Controller], tags: [Smokes] },
    "Brimstone" => { roles: [Controller], tags: [Smokes, PostPlant] },
    "Astra" => { roles: [Controller], tags: [Smokes, AntiExec] },
    "Viper" => { roles: [Controller], tags: [Smokes, Wall, PostPlant] },
    "Harbor" => { roles: [Controller], tags: [Smokes, Wall] },
    "Clove" => { roles: [Controller], tags: [Smokes] },

    // Initiators
    "Sova" => { roles: [Initiator], tags: [Recon] },
    "Fade" => { roles: [Initiator], tags: [Recon] },
    "Skye" => { roles: [Initiator], tags: [Flash, Recon] },
    "KAY/O" => { roles: [Initiator], tags: [Flash, AntiExec] },
    "Breach" => { roles: [Initiator], tags: [Flash] },
    "Gekko" => { roles: [Initiator], tags: [Flash, PostPlant] },
    "Tejo" => { roles: [Initiator], tags: [Recon] },

    // Sentinels
    "Killjoy" => { roles: [Sentinel], tags: [Trap, PostPlant] },
    "Cypher" => { roles: [Sentinel], tags: [Trap, Recon] },
    "Sage" => { roles: [Sentinel], tags: [Stall] },
    "Deadlock" => { roles: [Sentinel], tags: [Stall, AntiExec] },
    "Chamber" => { roles: [Sentinel], tags: [Trap] },
    "Veto" => { roles: [Sentinel], tags: [Trap] },
    "Vyse" => { roles: [Sentinel], tags: [Stall] },

    // Dive duelists
    "Jett" => { roles: [Duelist], tags: [Entry, Dive] },
    "Raze" => { roles: [Duelist], tags: [Entry, Dive] },
    "Neon" => { roles: [Duelist], tags: [Entry, Dive] },
    "Yoru" => { roles: [Duelist], tags: [Flash, Entry, Dive] },
    "Waylay" => { roles: [Duelist], tags: [Entry, Dive] },

    // Other duelists, only for extra duelist slots
    "Reyna" => { roles: [Duelist], tags: [Entry] },
    "Phoenix" => { roles: [Duelist], tags: [Flash, Entry] },
    "Iso" => { roles: [Duelist], tags: [Entry] },
}

define_maps! {
    "Ascent" => { prefer_recon, prefer_trap_sentinel },
    "Bind" => { prefer_flash, prefer_trap_sentinel },
    "Haven" => { prefer_recon, prefer_flash },
    "Split" => { prefer_flash, prefer_trap_sentinel, prefer_explosive_entry },
    "Lotus" => { prefer_flash, prefer_recon, prefer_trap_sentinel },
    "Sunset" => { prefer_recon, prefer_trap_sentinel },
    "Icebox" => { prefer_wall_controller, prefer_recon },
    "Breeze" => { prefer_wall_controller, prefer_recon, prefer_double_controller },
    "Fracture" => { prefer_flash, prefer_trap_sentinel },
    "Pearl" => { prefer_recon, prefer_double_controller },
    "Corrode" => { prefer_recon, prefer_flash, prefer_trap_sentinel },
}

/// Agents and maps a roller draws from
#[derive(Debug, Clone)]
pub struct Catalog {
    agents: Vec<Agent>,
    maps: Vec<MapProfile>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

impl Catalog {
    /// The shipped roster and map pool
    pub fn builtin() -> Self {
        Catalog {
            agents: builtin_agents(),
            maps: builtin_maps(),
        }
    }

    /// Build a catalog from arbitrary data, rejecting duplicate names,
    /// role-less agents and maps that shadow the random selector.
    pub fn new(agents: Vec<Agent>, maps: Vec<MapProfile>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for agent in &agents {
            if agent.name.trim().is_empty() {
                return Err(ConfigError::invalid("agent with an empty name"));
            }
            if agent.roles.is_empty() {
                return Err(ConfigError::invalid(format!(
                    "agent {} has no roles",
                    agent.name
                )));
            }
            if !seen.insert(agent.name.as_str()) {
                return Err(ConfigError::invalid(format!(
                    "duplicate agent {}",
                    agent.name
                )));
            }
        }

        if maps.is_empty() {
            return Err(ConfigError::invalid("catalog needs at least one map"));
        }
        let mut seen = HashSet::new();
        for map in &maps {
            if map.name.eq_ignore_ascii_case("random") {
                return Err(ConfigError::invalid(
                    "\"Random\" is a selector and cannot be a map name",
                ));
            }
            if !seen.insert(map.name.as_str()) {
                return Err(ConfigError::invalid(format!("duplicate map {}", map.name)));
            }
        }

        Ok(Catalog { agents, maps })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn maps(&self) -> &[MapProfile] {
        &self.maps
    }

    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name == name)
    }

    pub fn map(&self, name: &str) -> Option<&MapProfile> {
        self.maps.iter().find(|m| m.name == name)
    }

    /// Every agent name, sorted
    pub fn agent_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.agents.iter().map(|a| a.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Names of agents that can fill a dive slot, sorted
    pub fn dive_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .agents
            .iter()
            .filter(|a| a.is_dive_duelist())
            .map(|a| a.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Resolve loosely typed input ("kayo", "kay/o", "KAY/O") to an agent.
    pub fn match_agent_name(&self, input: &str) -> Result<&Agent, String> {
        let wanted = normalize(input);
        if let Some(agent) = self.agents.iter().find(|a| normalize(&a.name) == wanted) {
            return Ok(agent);
        }
        Err(unknown_name(
            "agent",
            input,
            &wanted,
            self.agents.iter().map(|a| a.name.as_str()),
        ))
    }

    pub fn match_map_name(&self, input: &str) -> Result<&MapProfile, String> {
        let wanted = normalize(input);
        if let Some(map) = self.maps.iter().find(|m| normalize(&m.name) == wanted) {
            return Ok(map);
        }
        Err(unknown_name(
            "map",
            input,
            &wanted,
            self.maps.iter().map(|m| m.name.as_str()),
        ))
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn unknown_name<'a>(
    kind: &str,
    input: &str,
    normalized_input: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> String {
    // Close suggestions by Jaro-Winkler similarity
    let mut suggestions: Vec<(&str, f64)> = candidates
        .map(|name| (name, strsim::jaro_winkler(normalized_input, &normalize(name))))
        .filter(|(_, sim)| *sim >= 0.7)
        .collect();
    suggestions.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    match suggestions.first() {
        Some((closest, similarity)) if *similarity >= 0.85 => {
            format!("Unknown {kind} name: '{input}'\n  Did you mean: {closest}?")
        }
        Some(_) => {
            let names: Vec<&str> = suggestions.iter().take(3).map(|(n, _)| *n).collect();
            format!(
                "Unknown {kind} name: '{input}'\n  Did you mean one of: {}?",
                names.join(", ")
            )
        }
        None => format!("Unknown {kind} name: '{input}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_roster_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.agents().len(), 28);
        assert_eq!(catalog.maps().len(), 11);
        for agent in catalog.agents() {
            assert!(!agent.roles.is_empty(), "{} has no roles", agent.name);
        }
        assert!(catalog.map("Corrode").is_some());
        assert!(catalog.map("Random").is_none());
    }

    #[test]
    fn test_dive_names_sorted() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.dive_names(),
            vec!["Jett", "Neon", "Raze", "Waylay", "Yoru"]
        );
    }

    #[test]
    fn test_agent_names_sorted_and_complete() {
        let catalog = Catalog::builtin();
        let names = catalog.agent_names();
        assert_eq!(names.len(), catalog.agents().len());
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.first(), Some(&"Astra"));
        assert_eq!(names.last(), Some(&"Yoru"));
    }

    #[test]
    fn test_dive_capability_needs_role_and_tag() {
        let tagged_sentinel = Agent::new("Odd", &[Role::Sentinel], &[Tag::Dive]);
        assert!(!tagged_sentinel.is_dive_duelist());

        let catalog = Catalog::builtin();
        assert!(catalog.agent("Jett").is_some_and(Agent::is_dive_duelist));
        assert!(!catalog.agent("Reyna").is_some_and(Agent::is_dive_duelist));
    }

    #[test]
    fn test_match_agent_name_loose_input() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.match_agent_name("kayo").unwrap().name, "KAY/O");
        assert_eq!(catalog.match_agent_name(" jett ").unwrap().name, "Jett");
        assert_eq!(catalog.match_map_name("icebox").unwrap().name, "Icebox");
    }

    #[test]
    fn test_match_agent_name_suggestions() {
        let catalog = Catalog::builtin();
        let err = catalog.match_agent_name("Jet").unwrap_err();
        assert!(err.contains("Unknown agent name"));
        assert!(err.contains("Jett"));

        let err = catalog.match_agent_name("qqqqqq").unwrap_err();
        assert_eq!(err, "Unknown agent name: 'qqqqqq'");
    }

    #[test]
    fn test_role_shorthands() {
        assert_eq!(Role::from_str_or_shorthand("ctrl"), Some(Role::Controller));
        assert_eq!(Role::from_str_or_shorthand("I"), Some(Role::Initiator));
        assert_eq!("sentinel".parse::<Role>(), Ok(Role::Sentinel));
        assert!("support".parse::<Role>().is_err());
    }

    #[test]
    fn test_coverage_of_agents() {
        let catalog = Catalog::builtin();
        let picks: Vec<&Agent> = ["Viper", "Skye", "Jett"]
            .iter()
            .filter_map(|n| catalog.agent(n))
            .collect();
        let cov = Coverage::of(picks);
        assert!(cov.flash && cov.recon && cov.wall && cov.smokes && cov.dive);
        assert!(cov.post_plant);
        assert!(!cov.trap && !cov.sentinel);
    }

    #[test]
    fn test_catalog_rejects_bad_data() {
        let omen = Agent::new("Omen", &[Role::Controller], &[Tag::Smokes]);
        let ascent = MapProfile {
            name: "Ascent".to_string(),
            needs: SparseNeeds::default(),
        };

        let dup = Catalog::new(vec![omen.clone(), omen.clone()], vec![ascent.clone()]);
        assert!(dup.is_err());

        let roleless = Catalog::new(vec![Agent::new("Ghost", &[], &[])], vec![ascent.clone()]);
        assert!(roleless.is_err());

        let no_maps = Catalog::new(vec![omen.clone()], vec![]);
        assert!(no_maps.is_err());

        let random = MapProfile {
            name: "random".to_string(),
            needs: SparseNeeds::default(),
        };
        assert!(Catalog::new(vec![omen.clone()], vec![random]).is_err());

        assert!(Catalog::new(vec![omen], vec![ascent]).is_ok());
    }
}
