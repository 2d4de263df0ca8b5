use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use comp_roller::{
    resolve_needs, Catalog, Composition, History, MapChoice, Mode, Request, RngDice, Role,
    Roller, RollerConfig, Style,
};

/// Team composition roller
#[derive(Parser, Debug)]
#[command(name = "comp-roller")]
#[command(about = "Rolls constraint-satisfying team compositions with map-aware quick strats", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// TOML config with settings and an optional custom roster
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Roll one or more compositions
    Roll {
        /// Map name, or "random"
        #[arg(short, long, default_value = "random")]
        map: MapChoice,

        /// ranked or pro
        #[arg(long, default_value = "ranked")]
        mode: Mode,

        /// standard, double-duelist, triple-initiator, double-controller,
        /// double-sentinel or chaos
        #[arg(short, long, default_value = "standard")]
        style: Style,

        /// Lock an agent to a role, e.g. duelist=jett (repeatable)
        #[arg(short, long = "lock", value_name = "ROLE=AGENT")]
        locks: Vec<String>,

        /// Agents to leave out, comma-separated
        #[arg(short = 'x', long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,

        /// How many compositions to roll
        #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        times: u64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List agent names, sorted
    Agents {
        /// Only agents that can fill the dive slot
        #[arg(long)]
        dive: bool,
    },

    /// List maps and what they prefer
    Maps,

    /// List composition styles
    Styles,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn run(cli: Cli) -> Result<()> {
    let roller = load_roller(cli.config.as_ref())?;

    match cli.command {
        Some(Command::Roll {
            map,
            mode,
            style,
            locks,
            exclude,
            seed,
            times,
            json,
        }) => {
            let request = build_request(roller.catalog(), map, mode, style, &locks, &exclude)?;
            roll_cmd(&roller, &request, seed, times, json)
        }
        Some(Command::Agents { dive }) => {
            let catalog = roller.catalog();
            let names = if dive {
                catalog.dive_names()
            } else {
                catalog.agent_names()
            };
            for name in names {
                println!("{name}");
            }
            Ok(())
        }
        Some(Command::Maps) => {
            for map in roller.catalog().maps() {
                let needs = resolve_needs(map).active();
                if needs.is_empty() {
                    println!("{}", map.name);
                } else {
                    println!("{:<10} prefers {}", map.name, needs.join(", "));
                }
            }
            Ok(())
        }
        Some(Command::Styles) => {
            for style in Style::all() {
                println!("{:<18} {}", style.key(), style.label());
            }
            Ok(())
        }
        None => {
            println!("=== Comp Roller ===\n");
            println!("Run tests with: cargo test");
            println!("Run CLI with: cargo run -- <command>\n");
            println!("Available commands:");
            println!("  roll [--map <map>] [--mode ranked|pro] [--style <style>] [--lock role=agent]...");
            println!("  agents [--dive]");
            println!("  maps");
            println!("  styles");
            Ok(())
        }
    }
}

fn load_roller(path: Option<&PathBuf>) -> Result<Roller> {
    let Some(path) = path else {
        return Ok(Roller::default());
    };
    let (catalog, settings) = RollerConfig::load(path)
        .and_then(RollerConfig::into_parts)
        .with_context(|| format!("loading config {}", path.display()))?;
    log::info!(
        "Using {} agents and {} maps from {}",
        catalog.agents().len(),
        catalog.maps().len(),
        path.display()
    );
    Ok(Roller::new(catalog, settings))
}

/// Turn loosely typed CLI input into an exact request.
fn build_request(
    catalog: &Catalog,
    map: MapChoice,
    mode: Mode,
    style: Style,
    locks: &[String],
    exclude: &[String],
) -> Result<Request> {
    let map = match map {
        MapChoice::Random => MapChoice::Random,
        MapChoice::Named(name) => {
            let profile = catalog.match_map_name(&name).map_err(|e| anyhow!(e))?;
            MapChoice::Named(profile.name.clone())
        }
    };

    let mut request = Request {
        map,
        mode,
        style,
        ..Request::default()
    };

    for lock in locks {
        let (role, agent) = lock
            .split_once('=')
            .ok_or_else(|| anyhow!("Lock '{lock}' must look like role=agent"))?;
        let role: Role = role.parse().map_err(|e: String| anyhow!(e))?;
        let agent = catalog.match_agent_name(agent).map_err(|e| anyhow!(e))?;
        if let Some(previous) = request.locks.insert(role, agent.name.clone()) {
            log::warn!("{role} lock {previous} replaced by {}", agent.name);
        }
    }

    for name in exclude.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        let agent = catalog.match_agent_name(name).map_err(|e| anyhow!(e))?;
        request.excluded.insert(agent.name.clone());
    }

    Ok(request)
}

fn roll_cmd(
    roller: &Roller,
    request: &Request,
    seed: Option<u64>,
    times: u64,
    json: bool,
) -> Result<()> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut dice = RngDice(rng);
    let mut history = History::new(roller.settings().history_window);
    let mut rolled = Vec::new();

    for _ in 0..times {
        let comp = roller
            .generate(request, &mut dice)
            .context("Couldn't roll a comp")?;
        if json {
            rolled.push(comp.clone());
        } else {
            print_composition(&comp);
        }
        history.push(comp);
    }

    if json {
        let out = if rolled.len() == 1 {
            serde_json::to_string_pretty(&rolled[0])?
        } else {
            serde_json::to_string_pretty(&rolled)?
        };
        println!("{out}");
    } else if history.len() > 1 {
        println!("Recent rolls (newest first):");
        for comp in history.iter() {
            println!(
                "  {:<9} {}",
                comp.map,
                comp.agents().collect::<Vec<_>>().join(", ")
            );
        }
    }
    Ok(())
}

fn print_composition(comp: &Composition) {
    println!("{} · {} · {}", comp.map, comp.mode, comp.style);
    for pick in &comp.picks {
        println!("  {:<18} {:<11} {}", pick.slot, pick.role, pick.agent);
    }

    println!("\n  Notes:");
    for note in &comp.notes {
        println!("    • {note}");
    }

    println!("\n  Quick strats:");
    for (i, strat) in comp.strats.iter().enumerate() {
        println!("    {}. {strat}", i + 1);
    }
    println!();
}
