//! # comp-roller
//!
//! Rolls five-agent team compositions under hard constraints and writes
//! quick strats for the result.
//!
//! ```text
//! Request (map, mode, style, locks, exclusions)
//!     │
//!     ├──> resolve map (Random → uniform pick) → Needs
//!     ├──> validate locks (excluded / role / dive)
//!     ├──> plan_slots(style) → 5 RoleSlots
//!     ├──> Resolver: lock or weighted draw per slot, flex role, uniqueness
//!     └──> notes + quick strats → Composition
//! ```
//!
//! ```no_run
//! use comp_roller::{Request, Role, Roller, RngDice};
//! use rand::SeedableRng;
//!
//! let roller = Roller::default();
//! let request = Request::default().lock(Role::Duelist, "Jett");
//! let mut dice = RngDice(rand::rngs::StdRng::seed_from_u64(7));
//! let comp = roller.generate(&request, &mut dice).unwrap();
//! for pick in &comp.picks {
//!     println!("{}: {}", pick.slot, pick.agent);
//! }
//! ```

pub mod boosts;
pub mod catalog;
pub mod config;
pub mod dice;
pub mod error;
pub mod history;
pub mod needs;
pub mod notes;
pub mod pool;
pub mod resolver;
pub mod roller;
pub mod slots;
pub mod strategy;

pub use catalog::{Agent, Catalog, MapProfile, Role, Tag};
pub use config::{RollerConfig, Settings, StratDetail};
pub use dice::{Dice, RngDice};
pub use error::{ConfigError, RollError};
pub use history::History;
pub use needs::{resolve_needs, Needs};
pub use resolver::Pick;
pub use roller::{Composition, MapChoice, Mode, Request, Roller};
pub use slots::{plan_slots, RoleSlot, Style};
