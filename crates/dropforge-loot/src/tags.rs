//! Built-in condition tags.
//!
//! The closed vocabulary every table can use out of the box. Extensions add
//! their own tags through the same [`ConditionRegistry`] API at setup time.

use std::sync::Arc;

use rand::Rng;

use crate::condition::{BuiltFn, ConditionRegistry};
use crate::context::LootContext;
use crate::error::ConditionParseError;

/// Register the built-in tag vocabulary into `registry`.
pub fn register_builtin_tags(registry: &mut ConditionRegistry) {
    // Every tag that matches one context field against the argument list.
    let field_tags: [(&str, fn(&LootContext) -> Option<&str>); 8] = [
        ("biome", |ctx| ctx.biome.as_deref()),
        ("block-type", |ctx| ctx.block_type.as_deref()),
        ("death-cause", |ctx| ctx.death_cause.as_deref()),
        ("entity-type", |ctx| ctx.entity_type.as_deref()),
        ("killed-by", |ctx| ctx.killer_type.as_deref()),
        ("required-tool-type", |ctx| ctx.tool_type.as_deref()),
        ("spawn-reason", |ctx| ctx.spawn_reason.as_deref()),
        ("world", |ctx| ctx.world.as_deref()),
    ];
    // Built-in names are statically valid; the Err arm is unreachable.
    for (name, field) in field_tags {
        let _ = registry.register_arg_predicate(name, move |ctx: &LootContext, args: &[String]| {
            matches_any(field(ctx), args)
        });
    }

    let _ = registry.register_predicate("charged-explosion", |ctx| ctx.charged_explosion);
    let _ = registry.register_predicate("fully-grown", |ctx| ctx.fully_grown.unwrap_or(false));

    let _ = registry.register_constructor("chance", build_chance);
    let _ = registry.register_constructor("enchantment-chance", build_enchantment_chance);
}

/// Whether the field value matches any argument, ignoring case.
fn matches_any(value: Option<&str>, args: &[String]) -> bool {
    match value {
        Some(value) => args.iter().any(|arg| arg.eq_ignore_ascii_case(value)),
        None => false,
    }
}

/// `chance:0.25` — passes 25% of the time.
fn build_chance(raw: &str) -> Result<BuiltFn, ConditionParseError> {
    let chance = parse_number(tag_argument(raw, "chance")?, "chance")?.clamp(0.0, 1.0);
    Ok(Arc::new(move |_ctx: &LootContext, rng: &mut dyn rand::RngCore| rng.gen_bool(chance)))
}

/// `enchantment-chance:0.2:0.1:looting` — base chance plus a per-level
/// bonus from the named enchantment on the tool used.
fn build_enchantment_chance(raw: &str) -> Result<BuiltFn, ConditionParseError> {
    const TAG: &str = "enchantment-chance";
    let rest = tag_argument(raw, TAG)?;
    let parts: Vec<&str> = rest.split(':').collect();
    if parts.len() != 3 {
        return Err(ConditionParseError::Invalid {
            tag: TAG.into(),
            reason: "expected <base>:<per-level>:<enchantment>".into(),
        });
    }
    let base = parse_number(parts[0], TAG)?;
    let per_level = parse_number(parts[1], TAG)?;
    let enchantment = parts[2].to_lowercase();
    Ok(Arc::new(move |ctx: &LootContext, rng: &mut dyn rand::RngCore| {
        let level = ctx.tool_enchantments.get(&enchantment).copied().unwrap_or(0);
        let chance = (base + per_level * f64::from(level)).clamp(0.0, 1.0);
        rng.gen_bool(chance)
    }))
}

/// The text after the tag's first `:`, with any leading `!` ignored.
fn tag_argument<'a>(raw: &'a str, tag: &str) -> Result<&'a str, ConditionParseError> {
    let body = raw.strip_prefix('!').unwrap_or(raw);
    match body.split_once(':') {
        Some((_, rest)) if !rest.is_empty() => Ok(rest),
        _ => Err(ConditionParseError::Invalid {
            tag: tag.to_string(),
            reason: "missing argument".into(),
        }),
    }
}

fn parse_number(text: &str, tag: &str) -> Result<f64, ConditionParseError> {
    text.trim().parse().map_err(|_| ConditionParseError::Invalid {
        tag: tag.to_string(),
        reason: format!("not a number: {text:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0)
    }

    fn registry() -> ConditionRegistry {
        ConditionRegistry::with_builtin_tags()
    }

    #[test]
    fn entity_type_matches_ignoring_case() {
        let condition = registry().parse("entity-type:Zombie:skeleton").unwrap();
        let mut ctx = LootContext::new();
        ctx.entity_type = Some("ZOMBIE".into());
        assert!(condition.check(&ctx, &mut rng()));
        ctx.entity_type = Some("creeper".into());
        assert!(!condition.check(&ctx, &mut rng()));
        ctx.entity_type = None;
        assert!(!condition.check(&ctx, &mut rng()));
    }

    #[test]
    fn world_negation() {
        let condition = registry().parse("!world:creative").unwrap();
        let mut ctx = LootContext::new();
        ctx.world = Some("creative".into());
        assert!(!condition.check(&ctx, &mut rng()));
        ctx.world = Some("survival".into());
        assert!(condition.check(&ctx, &mut rng()));
    }

    #[test]
    fn flag_tags() {
        let ctx = LootContext {
            charged_explosion: true,
            fully_grown: Some(true),
            ..LootContext::new()
        };
        assert!(registry().parse("charged-explosion").unwrap().check(&ctx, &mut rng()));
        assert!(registry().parse("fully-grown").unwrap().check(&ctx, &mut rng()));
        let bare = LootContext::new();
        assert!(!registry().parse("charged-explosion").unwrap().check(&bare, &mut rng()));
        assert!(!registry().parse("fully-grown").unwrap().check(&bare, &mut rng()));
    }

    #[test]
    fn chance_extremes_are_deterministic() {
        let ctx = LootContext::new();
        let always = registry().parse("chance:1.0").unwrap();
        let never = registry().parse("chance:0.0").unwrap();
        let mut rng = rng();
        for _ in 0..100 {
            assert!(always.check(&ctx, &mut rng));
            assert!(!never.check(&ctx, &mut rng));
        }
    }

    #[test]
    fn chance_requires_numeric_argument() {
        assert!(registry().parse("chance").is_err());
        assert!(registry().parse("chance:lots").is_err());
    }

    #[test]
    fn enchantment_chance_scales_with_level() {
        // Base 0, +0.5 per level: level 2 clamps to certainty.
        let condition = registry().parse("enchantment-chance:0:0.5:looting").unwrap();
        let mut ctx = LootContext::new();
        let mut rng = rng();
        for _ in 0..50 {
            assert!(!condition.check(&ctx, &mut rng));
        }
        ctx.tool_enchantments.insert("looting".into(), 2);
        for _ in 0..50 {
            assert!(condition.check(&ctx, &mut rng));
        }
    }

    #[test]
    fn enchantment_chance_argument_shape() {
        assert!(registry().parse("enchantment-chance:0.1:looting").is_err());
        assert!(registry().parse("enchantment-chance:a:b:looting").is_err());
    }
}
