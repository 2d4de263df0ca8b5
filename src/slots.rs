use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::catalog::Role;

/// Label of the Standard style's dynamic slot
pub const FLEX_LABEL: &str = "Flex (Utility)";

/// Preset deciding how the five slots split across roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Style {
    #[default]
    Standard,
    DoubleDuelist,
    TripleInitiator,
    DoubleController,
    DoubleSentinel,
    Chaos,
}

impl Style {
    pub const fn all() -> &'static [Style] {
        &[
            Style::Standard,
            Style::DoubleDuelist,
            Style::TripleInitiator,
            Style::DoubleController,
            Style::DoubleSentinel,
            Style::Chaos,
        ]
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Style::Standard => "Standard (Balanced)",
            Style::DoubleDuelist => "Double Duelist",
            Style::TripleInitiator => "Triple Initiator (Chaos Utility)",
            Style::DoubleController => "Double Controller",
            Style::DoubleSentinel => "Double Sentinel",
            Style::Chaos => "Chaos (Anything Goes)",
        }
    }

    /// Selector used on the command line
    pub const fn key(&self) -> &'static str {
        match self {
            Style::Standard => "standard",
            Style::DoubleDuelist => "double-duelist",
            Style::TripleInitiator => "triple-initiator",
            Style::DoubleController => "double-controller",
            Style::DoubleSentinel => "double-sentinel",
            Style::Chaos => "chaos",
        }
    }

    pub fn from_str_or_shorthand(s: &str) -> Option<Style> {
        match s.to_lowercase().replace(&[' ', '-', '_'][..], "").as_str() {
            "standard" | "std" => Some(Style::Standard),
            "doubleduelist" | "dd" => Some(Style::DoubleDuelist),
            "tripleinitiator" | "ti" => Some(Style::TripleInitiator),
            "doublecontroller" | "dc" => Some(Style::DoubleController),
            "doublesentinel" | "ds" => Some(Style::DoubleSentinel),
            "chaos" => Some(Style::Chaos),
            _ => None,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::from_str_or_shorthand(s).ok_or_else(|| {
            let keys: Vec<&str> = Style::all().iter().map(Style::key).collect();
            format!("Unknown style '{s}' (expected one of: {})", keys.join(", "))
        })
    }
}

/// Hard constraint a slot places on its agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotRequirement {
    DiveDuelist,
}

/// One of the five seats in a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSlot {
    pub label: &'static str,
    pub role: Role,
    pub requirement: Option<SlotRequirement>,
}

impl RoleSlot {
    const fn new(role: Role, label: &'static str) -> Self {
        RoleSlot {
            label,
            role,
            requirement: None,
        }
    }

    const fn dive() -> Self {
        RoleSlot {
            label: "Dive Duelist",
            role: Role::Duelist,
            requirement: Some(SlotRequirement::DiveDuelist),
        }
    }

    pub fn needs_dive(&self) -> bool {
        self.requirement == Some(SlotRequirement::DiveDuelist)
    }

    /// The flex slot's role is decided while resolving; `role` is only a
    /// placeholder.
    pub fn is_flex(&self) -> bool {
        self.label == FLEX_LABEL
    }
}

pub fn plan_slots(style: Style) -> [RoleSlot; 5] {
    use Role::*;
    match style {
        Style::Standard => [
            RoleSlot::new(Controller, "Controller"),
            RoleSlot::new(Initiator, "Initiator"),
            RoleSlot::new(Sentinel, "Sentinel"),
            RoleSlot::dive(),
            RoleSlot::new(Initiator, FLEX_LABEL),
        ],
        Style::DoubleDuelist => [
            RoleSlot::new(Controller, "Controller"),
            RoleSlot::new(Initiator, "Initiator"),
            RoleSlot::new(Sentinel, "Sentinel"),
            RoleSlot::dive(),
            RoleSlot::new(Duelist, "Duelist 2"),
        ],
        // No sentinel anchor
        Style::TripleInitiator => [
            RoleSlot::new(Controller, "Controller"),
            RoleSlot::dive(),
            RoleSlot::new(Initiator, "Initiator 1"),
            RoleSlot::new(Initiator, "Initiator 2"),
            RoleSlot::new(Initiator, "Initiator 3"),
        ],
        Style::DoubleController => [
            RoleSlot::new(Controller, "Controller 1"),
            RoleSlot::new(Controller, "Controller 2"),
            RoleSlot::new(Initiator, "Initiator"),
            RoleSlot::new(Sentinel, "Sentinel"),
            RoleSlot::dive(),
        ],
        Style::DoubleSentinel => [
            RoleSlot::new(Controller, "Controller"),
            RoleSlot::new(Initiator, "Initiator"),
            RoleSlot::new(Sentinel, "Sentinel 1"),
            RoleSlot::new(Sentinel, "Sentinel 2"),
            RoleSlot::dive(),
        ],
        Style::Chaos => [
            RoleSlot::new(Controller, "Controller"),
            RoleSlot::dive(),
            RoleSlot::new(Initiator, "Wildcard 1"),
            RoleSlot::new(Sentinel, "Wildcard 2"),
            RoleSlot::new(Duelist, "Wildcard 3"),
        ],
    }
}
