use std::collections::BTreeSet;

use crate::boosts::Boosts;
use crate::catalog::{Agent, Catalog, Role};

/// Agents able to play `role` that are not excluded, in catalog order.
pub fn base_pool<'c>(catalog: &'c Catalog, role: Role, excluded: &BTreeSet<String>) -> Vec<&'c Agent> {
    catalog
        .agents()
        .iter()
        .filter(|a| a.can_play(role) && !excluded.contains(&a.name))
        .collect()
}

/// Expand candidates so each appears once plus once more per matching
/// boost rule. A uniform draw over the result is the weighted draw.
pub fn weighted_pool<'c>(candidates: &[&'c Agent], boosts: &Boosts<'_>) -> Vec<&'c Agent> {
    let mut pool = candidates.to_vec();
    for agent in candidates {
        for _ in 0..boosts.hits(agent) {
            pool.push(*agent);
        }
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Tag;
    use pretty_assertions::assert_eq;

    fn names<'a>(pool: &[&'a Agent]) -> Vec<&'a str> {
        pool.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_base_pool_keeps_catalog_order() {
        let catalog = Catalog::builtin();
        let pool = base_pool(&catalog, Role::Controller, &BTreeSet::new());
        assert_eq!(
            names(&pool),
            vec!["Omen", "Brimstone", "Astra", "Viper", "Harbor", "Clove"]
        );
    }

    #[test]
    fn test_base_pool_drops_excluded() {
        let catalog = Catalog::builtin();
        let excluded: BTreeSet<String> = ["Sage", "Vyse", "Jett"].iter().map(|s| s.to_string()).collect();
        let pool = base_pool(&catalog, Role::Sentinel, &excluded);
        assert_eq!(
            names(&pool),
            vec!["Killjoy", "Cypher", "Deadlock", "Chamber", "Veto"]
        );
    }

    #[test]
    fn test_weighted_pool_multiplicity() {
        let catalog = Catalog::builtin();
        let skye = catalog.agent("Skye").unwrap();
        let sova = catalog.agent("Sova").unwrap();
        let boosts = Boosts::new()
            .tag(Tag::Flash)
            .tag(Tag::Recon)
            .agent_if(true, "Skye")
            .tag(Tag::Trap)
            .tag(Tag::Smokes);

        let pool = weighted_pool(&[skye, sova], &boosts);
        // Skye matches 3 of 5 rules, Sova 1
        assert_eq!(pool.iter().filter(|a| a.name == "Skye").count(), 4);
        assert_eq!(pool.iter().filter(|a| a.name == "Sova").count(), 2);
        assert_eq!(names(&pool[..2]), vec!["Skye", "Sova"]);
    }

    #[test]
    fn test_weighted_pool_without_rules_is_identity() {
        let catalog = Catalog::builtin();
        let base = base_pool(&catalog, Role::Duelist, &BTreeSet::new());
        assert_eq!(weighted_pool(&base, &Boosts::new()), base);
        assert!(weighted_pool(&[], &Boosts::new().tag(Tag::Dive)).is_empty());
    }
}
