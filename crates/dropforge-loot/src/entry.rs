//! Loot entries: conditions, weight, and the item templates they yield.

use rand::RngCore;

use crate::condition::LootCondition;
use crate::context::LootContext;
use crate::number::NumberProvider;

/// An item template attached to an entry: an opaque item handle plus a
/// quantity spec resolved at generation time. What the handle means is the
/// host's business.
#[derive(Debug, Clone)]
pub struct ItemTemplate {
    pub item: String,
    pub amount: NumberProvider,
}

impl ItemTemplate {
    /// A template yielding exactly one of `item`.
    pub fn new(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            amount: NumberProvider::Constant(1.0),
        }
    }
}

/// A resolved template, ready for the host to materialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootDrop {
    pub item: String,
    pub amount: i64,
}

/// A candidate loot unit inside a pool.
///
/// Built once when a table is loaded, immutable afterwards, shared
/// read-only across resolutions.
#[derive(Debug, Clone)]
pub struct LootEntry {
    /// Conditions combined as a logical AND.
    pub conditions: Vec<LootCondition>,
    /// An absent weight marks the entry as guaranteed: it skips the
    /// weighted lottery and is emitted whenever its conditions pass.
    pub weight: Option<NumberProvider>,
    /// Scales the weight by the context luck level.
    pub quality: Option<NumberProvider>,
    pub items: Vec<ItemTemplate>,
}

impl LootEntry {
    /// Whether every condition passes, short-circuiting on the first
    /// failure. An entry without conditions always passes.
    pub fn check(&self, ctx: &LootContext, rng: &mut dyn RngCore) -> bool {
        self.conditions.iter().all(|condition| condition.check(ctx, rng))
    }

    /// `floor(weight + quality * luck)`. May be negative; callers clamp
    /// before selection.
    pub fn effective_weight(&self, ctx: &LootContext, rng: &mut dyn RngCore) -> i64 {
        let weight = match &self.weight {
            Some(spec) => spec.value(rng),
            None => 0.0,
        };
        let quality = match &self.quality {
            Some(spec) => spec.value(rng),
            None => 0.0,
        };
        (weight + quality * ctx.luck).floor() as i64
    }

    /// Whether this entry competes in the weighted lottery.
    pub fn is_weighted(&self) -> bool {
        self.weight.is_some()
    }

    /// Resolve every item template into a concrete drop.
    pub fn generate(&self, rng: &mut dyn RngCore) -> Vec<LootDrop> {
        self.items
            .iter()
            .map(|template| LootDrop {
                item: template.item.clone(),
                amount: template.amount.integer(rng).max(0),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::ConditionRegistry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0)
    }

    fn entry() -> LootEntry {
        LootEntry {
            conditions: Vec::new(),
            weight: None,
            quality: None,
            items: vec![ItemTemplate::new("bone")],
        }
    }

    #[test]
    fn no_conditions_is_vacuously_true() {
        assert!(entry().check(&LootContext::new(), &mut rng()));
    }

    #[test]
    fn conditions_are_a_conjunction() {
        let registry = ConditionRegistry::with_builtin_tags();
        let mut e = entry();
        e.conditions = vec![
            registry.parse("chance:1.0").unwrap(),
            registry.parse("entity-type:zombie").unwrap(),
        ];
        let mut ctx = LootContext::new();
        assert!(!e.check(&ctx, &mut rng()));
        ctx.entity_type = Some("zombie".into());
        assert!(e.check(&ctx, &mut rng()));
    }

    #[test]
    fn quality_scales_weight_by_luck() {
        let mut e = entry();
        e.weight = Some(NumberProvider::Constant(10.0));
        e.quality = Some(NumberProvider::Constant(2.0));
        let mut ctx = LootContext::new();
        assert_eq!(e.effective_weight(&ctx, &mut rng()), 10);
        ctx.luck = 3.0;
        assert_eq!(e.effective_weight(&ctx, &mut rng()), 16);
        // Negative luck may push the weight below zero; not clamped here.
        ctx.luck = -10.0;
        assert_eq!(e.effective_weight(&ctx, &mut rng()), -10);
    }

    #[test]
    fn missing_weight_means_guaranteed() {
        assert!(!entry().is_weighted());
        let mut e = entry();
        e.weight = Some(NumberProvider::Constant(1.0));
        assert!(e.is_weighted());
    }

    #[test]
    fn generate_resolves_amounts() {
        let mut e = entry();
        e.items = vec![
            ItemTemplate::new("bone"),
            ItemTemplate {
                item: "arrow".into(),
                amount: NumberProvider::range(2.0, 2.0),
            },
        ];
        let drops = e.generate(&mut rng());
        assert_eq!(
            drops,
            vec![
                LootDrop { item: "bone".into(), amount: 1 },
                LootDrop { item: "arrow".into(), amount: 2 },
            ]
        );
    }

    #[test]
    fn generate_floors_negative_amounts_to_zero() {
        let mut e = entry();
        e.items = vec![ItemTemplate {
            item: "dust".into(),
            amount: NumberProvider::Constant(-2.0),
        }];
        assert_eq!(e.generate(&mut rng())[0].amount, 0);
    }
}
