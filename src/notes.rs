use crate::catalog::{Agent, Coverage};
use crate::slots::Style;

/// Short remarks on what the finished team brings.
pub fn build_notes(agents: &[&Agent], style: Style) -> Vec<String> {
    let cov = Coverage::of(agents.iter().copied());
    let mut notes = vec![format!("Style: {}.", style.label())];

    if cov.controller {
        notes.push("Smokes present: you can take space + retake with structure.".to_string());
    }
    if cov.dive {
        notes.push("Dive duelist guaranteed: you have a true entry option every game.".to_string());
    }

    if cov.initiator {
        if cov.recon {
            notes.push("Info present: easier clears + safer retakes.".to_string());
        }
        if cov.flash {
            notes.push("Flash present: better entries and angle-breaking.".to_string());
        }
    }

    if cov.sentinel {
        if cov.trap {
            notes.push("Trap sentinel: strong flank control + anchoring.".to_string());
        }
        if cov.stall {
            notes.push("Stall tools: buy time and disrupt execs.".to_string());
        }
    } else {
        notes.push(
            "Warning: no sentinel anchor—play tighter spacing and trade more (this is a fun style)."
                .to_string(),
        );
    }

    if cov.wall {
        notes.push("Wall utility: helps crosses / cuts sightlines.".to_string());
    }
    if cov.post_plant {
        notes.push("Post-plant tools: play time after plant.".to_string());
    }

    notes
}
