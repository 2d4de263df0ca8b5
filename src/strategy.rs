//! Quick strats: a short, ordered list of directives for a finished team.
//!
//! Order is fixed: style opener, the three universal rules, the map's
//! call-outs, then utility nudges. The list is cut to the configured cap
//! from the end, so lower-priority nudges go first.

use crate::catalog::{Agent, Coverage};
use crate::config::StratDetail;
use crate::slots::Style;

const MAP_CALLS: &[(&str, [&str; 2])] = &[
    (
        "Ascent",
        [
            "Ascent: contest Mid early; once Mid is yours, split A/B with smokes.",
            "Ascent retake: smoke CT + Heaven/Market, clear close first, then pinch.",
        ],
    ),
    (
        "Bind",
        [
            "Bind: sell pressure with short utility, then hit fast—TP fakes are huge value.",
            "Bind post-plant: play off-site positions; don’t all sit on site.",
        ],
    ),
    (
        "Haven",
        [
            "Haven: default for info, then hit the weak site with a fast dive + trade train.",
            "Haven defense: keep a fast rotator; don’t over-stack without info.",
        ],
    ),
    (
        "Split",
        [
            "Split: Mid is everything—win Mid, then split B (Heaven+Main) or A (Ramps+Main).",
            "Split execute: smoke Heaven/CT, flash close, dive in on contact.",
        ],
    ),
    (
        "Lotus",
        [
            "Lotus: take A Main control, then pinch through Door/Tree when smokes are up.",
            "Lotus defense: play for info and fast rotates—expect fakes.",
        ],
    ),
    (
        "Sunset",
        [
            "Sunset: contest Mid early; win Mid → split B/A with smokes and quick trades.",
            "Sunset defense: trap Mid/Market and rotate off first info ping.",
        ],
    ),
    (
        "Icebox",
        [
            "Icebox: use wall/smokes to cross; dive creates chaos while team plants safely.",
            "Icebox defense: play info then retake together—don’t feed 1v1s.",
        ],
    ),
    (
        "Breeze",
        [
            "Breeze: long lanes—use wall/smokes to cross, recon to clear, then dive off tags.",
            "Breeze default: slower is fine; punish pushes and hit late with full util.",
        ],
    ),
    (
        "Fracture",
        [
            "Fracture: pinch attacks—hit from BOTH sides; smokes isolate fights; dive breaks site.",
            "Fracture defense: lean retake setups; collapse with utility when they commit.",
        ],
    ),
    (
        "Pearl",
        [
            "Pearl: take Mid space, then split; smokes isolate Art/Link fights.",
            "Pearl defense: trap flank, recon mid, rotate early off info.",
        ],
    ),
    (
        "Corrode",
        [
            "Corrode: take early info, then pick a lane and collapse fast—avoid slow solo lurks.",
            "Corrode defense: play tight spacing for trades; rotate off confirmed info (don’t guess).",
        ],
    ),
];

// Maps where the wall nudge repeats the map call-outs
const WALL_MAPS: &[&str] = &["Icebox", "Breeze"];

/// Call-outs for `map`; empty for maps without any.
pub fn map_calls(map: &str) -> &'static [&'static str] {
    MAP_CALLS
        .iter()
        .find(|(name, _)| *name == map)
        .map(|(_, calls)| calls.as_slice())
        .unwrap_or(&[])
}

fn style_opener(style: Style) -> &'static [&'static str] {
    match style {
        Style::Standard => &[],
        Style::TripleInitiator => &[
            "Triple Initiator: play for info + disables + layered flashes; win rounds by setting up unfair fights.",
            "Defense: avoid solo anchors—stack/trade more and retake as a unit with utility waves.",
        ],
        Style::DoubleDuelist => &[
            "Double Duelist: take space aggressively—one creates chaos, one trades. Commit fast off first advantage.",
        ],
        Style::DoubleController => &[
            "Double Controller: slow the map down—double smokes/walls isolate fights, then exec clean.",
        ],
        Style::DoubleSentinel => &[
            "Double Sentinel: punish flanks/pushes—play contact into traps, then collapse.",
        ],
        Style::Chaos => &[
            "Chaos: play off your strongest utility combo each round—don’t overthink, just trade and scale.",
        ],
    }
}

pub fn build_strats(map: &str, agents: &[&Agent], style: Style, detail: StratDetail) -> Vec<String> {
    let cov = Coverage::of(agents.iter().copied());
    let dive = agents
        .iter()
        .find(|a| a.is_dive_duelist())
        .map_or("Dive Duelist", |a| a.name.as_str());

    let mut strats: Vec<String> = style_opener(style).iter().map(|s| s.to_string()).collect();

    let pairing = if cov.flash {
        "a flash"
    } else if cov.recon {
        "recon/info"
    } else {
        "a trade swing"
    };
    strats.push(format!(
        "Entry rule: pair {dive}'s dive with {pairing} — no dry dives."
    ));
    strats.push(format!(
        "Attack default: {}, {}, plant, then {}.",
        if cov.recon { "use info early" } else { "take contact carefully" },
        if cov.smokes { "smoke key chokes" } else { "take space slowly" },
        if cov.post_plant {
            "play time + post-plant utility"
        } else {
            "play crossfires + trades"
        },
    ));
    strats.push(format!(
        "Defense: {}, {}, then retake with {} + {}.",
        if cov.trap { "anchor with traps" } else { "play crossfires" },
        if cov.recon { "recon for rotates" } else { "hold sound + timing" },
        if cov.smokes { "smokes" } else { "numbers" },
        if cov.flash { "flashes" } else { "trades" },
    ));

    strats.extend(map_calls(map).iter().map(|s| s.to_string()));

    if !cov.recon {
        strats.push("No recon: clear angles together and default more—avoid solo face-checks.".to_string());
    }
    if !cov.flash {
        strats.push("Low flash: take space with smokes + contact, then trade hard (2-man swing).".to_string());
    }
    if cov.wall && !WALL_MAPS.iter().any(|m| *m == map) {
        strats.push("Wall utility: cut sightlines and force close fights.".to_string());
    }

    strats.truncate(detail.cap());
    strats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use pretty_assertions::assert_eq;

    fn team<'c>(catalog: &'c Catalog, names: &[&str]) -> Vec<&'c Agent> {
        names.iter().map(|n| catalog.agent(n).unwrap()).collect()
    }

    #[test]
    fn test_ascent_standard() {
        let catalog = Catalog::builtin();
        let agents = team(&catalog, &["Omen", "Sova", "Killjoy", "Jett", "Skye"]);
        let strats = build_strats("Ascent", &agents, Style::Standard, StratDetail::Full);
        assert_eq!(
            strats,
            vec![
                "Entry rule: pair Jett's dive with a flash — no dry dives.",
                "Attack default: use info early, smoke key chokes, plant, then play time + post-plant utility.",
                "Defense: anchor with traps, recon for rotates, then retake with smokes + flashes.",
                "Ascent: contest Mid early; once Mid is yours, split A/B with smokes.",
                "Ascent retake: smoke CT + Heaven/Market, clear close first, then pinch.",
            ]
        );
    }

    #[test]
    fn test_fallback_wording() {
        let catalog = Catalog::builtin();
        let agents = team(&catalog, &["Reyna", "Iso", "Sage", "Vyse", "Deadlock"]);
        let strats = build_strats("Pearl", &agents, Style::Chaos, StratDetail::Full);
        assert_eq!(strats[1], "Entry rule: pair Dive Duelist's dive with a trade swing — no dry dives.");
        assert_eq!(
            strats[2],
            "Attack default: take contact carefully, take space slowly, plant, then play crossfires + trades."
        );
        assert_eq!(
            strats[3],
            "Defense: play crossfires, hold sound + timing, then retake with numbers + trades."
        );
    }

    #[test]
    fn test_truncation_keeps_order() {
        let catalog = Catalog::builtin();
        // No recon, no flash, has wall: every nudge fires
        let agents = team(&catalog, &["Viper", "Raze", "Astra", "Sage", "Neon"]);

        let full = build_strats("Split", &agents, Style::TripleInitiator, StratDetail::Full);
        assert_eq!(full.len(), 8);
        assert!(full[0].starts_with("Triple Initiator"));
        assert!(full[5].starts_with("Split:"));
        assert!(full[6].starts_with("Split execute"));
        assert!(full[7].starts_with("No recon"));

        let compact = build_strats("Split", &agents, Style::TripleInitiator, StratDetail::Compact);
        assert_eq!(compact.len(), 7);
        assert_eq!(compact, full[..7].to_vec());
    }

    #[test]
    fn test_wall_nudge_suppressed_on_wall_maps() {
        let catalog = Catalog::builtin();
        let agents = team(&catalog, &["Harbor", "Skye", "Cypher", "Jett", "Sova"]);
        let wall = "Wall utility: cut sightlines and force close fights.";

        let icebox = build_strats("Icebox", &agents, Style::Standard, StratDetail::Full);
        assert!(!icebox.iter().any(|s| s == wall));
        let breeze = build_strats("Breeze", &agents, Style::Standard, StratDetail::Full);
        assert!(!breeze.iter().any(|s| s == wall));
        let lotus = build_strats("Lotus", &agents, Style::Standard, StratDetail::Full);
        assert_eq!(lotus.last().map(String::as_str), Some(wall));
    }

    #[test]
    fn test_unknown_map_has_no_callouts() {
        assert!(map_calls("Range").is_empty());
        assert_eq!(map_calls("Bind").len(), 2);

        let catalog = Catalog::builtin();
        let agents = team(&catalog, &["Omen", "Sova", "Killjoy", "Jett", "Skye"]);
        let strats = build_strats("Range", &agents, Style::Standard, StratDetail::Full);
        assert_eq!(strats.len(), 3);
    }

    #[test]
    fn test_every_builtin_map_has_two_callouts() {
        for map in Catalog::builtin().maps() {
            assert_eq!(map_calls(&map.name).len(), 2, "{}", map.name);
        }
    }
}
