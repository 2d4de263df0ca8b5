//! Boost rules that bias pool draws.
//!
//! A rule is a predicate over an agent; every rule an agent satisfies adds
//! one extra copy of it to the weighted pool. Rules are built per roll from
//! a [`BoostContext`] so they close over the resolved map and needs.

use crate::catalog::{Agent, Coverage, Tag};
use crate::needs::Needs;

pub type Rule<'a> = Box<dyn Fn(&Agent) -> bool + 'a>;

/// Which boost list a pool draw uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Controller,
    Initiator,
    Sentinel,
    /// The mandatory dive slot
    DiveDuelist,
    /// Any duelist slot without the dive requirement
    Duelist,
    FlexController,
    FlexInitiator,
    FlexSentinel,
}

/// What a rule list may look at
#[derive(Debug, Clone, Copy)]
pub struct BoostContext<'a> {
    pub map: &'a str,
    pub needs: Needs,
    /// Utility already on the team when the rules are built
    pub coverage: Coverage,
}

struct Favorite {
    kind: PoolKind,
    maps: &'static [&'static str],
    agent: &'static str,
}

// Per-map favoritism. One row is one rule; order matters only for counting.
const FAVORITES: &[Favorite] = &[
    Favorite {
        kind: PoolKind::Controller,
        maps: &["Ascent"],
        agent: "Omen",
    },
    Favorite {
        kind: PoolKind::Controller,
        maps: &["Bind", "Split"],
        agent: "Brimstone",
    },
    Favorite {
        kind: PoolKind::Controller,
        maps: &["Breeze", "Icebox"],
        agent: "Viper",
    },
    Favorite {
        kind: PoolKind::Initiator,
        maps: &["Ascent"],
        agent: "Sova",
    },
    Favorite {
        kind: PoolKind::Sentinel,
        maps: &["Ascent"],
        agent: "Killjoy",
    },
    Favorite {
        kind: PoolKind::Sentinel,
        maps: &["Breeze"],
        agent: "Cypher",
    },
    Favorite {
        kind: PoolKind::DiveDuelist,
        maps: &["Ascent", "Haven"],
        agent: "Jett",
    },
    Favorite {
        kind: PoolKind::DiveDuelist,
        maps: &["Split"],
        agent: "Raze",
    },
    Favorite {
        kind: PoolKind::DiveDuelist,
        maps: &["Breeze"],
        agent: "Jett",
    },
    Favorite {
        kind: PoolKind::DiveDuelist,
        maps: &["Bind"],
        agent: "Yoru",
    },
];

/// An ordered list of boost rules
#[derive(Default)]
pub struct Boosts<'a> {
    rules: Vec<Rule<'a>>,
}

impl<'a> Boosts<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, rule: impl Fn(&Agent) -> bool + 'a) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn tag(self, tag: Tag) -> Self {
        self.rule(move |a| a.has_tag(tag))
    }

    /// Boost carriers of `tag`, but only while `when` holds
    pub fn tag_if(self, when: bool, tag: Tag) -> Self {
        self.rule(move |a| when && a.has_tag(tag))
    }

    pub fn agent_if(self, when: bool, name: &'a str) -> Self {
        self.rule(move |a| when && a.name == name)
    }

    /// One rule per favoritism row of `kind`, live only on the row's maps
    pub fn favorites(self, kind: PoolKind, map: &str) -> Self {
        FAVORITES
            .iter()
            .filter(|fav| fav.kind == kind)
            .fold(self, |boosts, fav| {
                boosts.agent_if(fav.maps.iter().any(|m| *m == map), fav.agent)
            })
    }

    pub fn chain(mut self, other: Boosts<'a>) -> Self {
        self.rules.extend(other.rules);
        self
    }

    /// Number of rules `agent` satisfies
    pub fn hits(&self, agent: &Agent) -> usize {
        self.rules.iter().filter(|rule| rule(agent)).count()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Build the rule list for one pool draw.
pub fn boosts_for<'a>(kind: PoolKind, ctx: &BoostContext<'_>) -> Boosts<'a> {
    let needs = ctx.needs;
    match kind {
        PoolKind::Controller => Boosts::new()
            .tag(Tag::Smokes)
            .tag_if(needs.prefer_wall_controller, Tag::Wall)
            .favorites(kind, ctx.map),
        PoolKind::Initiator => Boosts::new()
            .tag_if(needs.prefer_recon, Tag::Recon)
            .tag_if(needs.prefer_flash, Tag::Flash)
            .favorites(kind, ctx.map),
        PoolKind::Sentinel => Boosts::new()
            .tag_if(needs.prefer_trap_sentinel, Tag::Trap)
            .favorites(kind, ctx.map),
        PoolKind::DiveDuelist => Boosts::new()
            .agent_if(needs.prefer_explosive_entry, "Raze")
            .favorites(kind, ctx.map),
        PoolKind::Duelist => Boosts::new()
            .agent_if(needs.prefer_explosive_entry, "Raze")
            .tag_if(ctx.map == "Bind", Tag::Flash),
        PoolKind::FlexController => Boosts::new()
            .tag_if(needs.prefer_wall_controller, Tag::Wall)
            .agent_if(needs.prefer_wall_controller, "Viper"),
        PoolKind::FlexSentinel => Boosts::new()
            .tag_if(needs.prefer_trap_sentinel, Tag::Trap)
            .tag(Tag::Stall),
        // Fill whichever of flash/recon the team still lacks
        PoolKind::FlexInitiator => Boosts::new()
            .tag_if(!ctx.coverage.flash, Tag::Flash)
            .tag_if(!ctx.coverage.recon, Tag::Recon)
            .chain(boosts_for(PoolKind::Initiator, ctx)),
    }
}
