//! Condition tags: the registry of named predicates and the tag parser.
//!
//! A condition arrives as a raw tag string like `"entity-type:zombie"` or
//! `"!world:creative"`. The registry maps the tag name to one of three
//! registrable shapes; parsing turns the raw string into an evaluable
//! [`LootCondition`]. Registration and unregistration must happen during
//! setup or reload, never while a resolution is in flight — the registry
//! does no locking of its own.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rand::RngCore;

use crate::context::LootContext;
use crate::error::{ConditionParseError, RegistrationError};

/// A predicate over the context alone.
pub type PredicateFn = Arc<dyn Fn(&LootContext) -> bool + Send + Sync>;
/// A predicate over the context and the tag's `:`-separated arguments.
pub type ArgPredicateFn = Arc<dyn Fn(&LootContext, &[String]) -> bool + Send + Sync>;
/// A check produced by a constructor shape; may consume randomness.
pub type BuiltFn = Arc<dyn Fn(&LootContext, &mut dyn RngCore) -> bool + Send + Sync>;
/// Builds a check from the original, unstripped tag text.
pub type ConstructorFn = Arc<dyn Fn(&str) -> Result<BuiltFn, ConditionParseError> + Send + Sync>;

/// The three registrable shapes of a condition tag. Mutually exclusive per
/// tag name; registering one evicts any other.
#[derive(Clone)]
pub enum ConditionShape {
    Predicate(PredicateFn),
    ArgPredicate(ArgPredicateFn),
    Constructor(ConstructorFn),
}

impl fmt::Debug for ConditionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(_) => write!(f, "Predicate"),
            Self::ArgPredicate(_) => write!(f, "ArgPredicate"),
            Self::Constructor(_) => write!(f, "Constructor"),
        }
    }
}

/// A parsed, evaluable condition node. Immutable once constructed; owned by
/// the entry that declared it.
#[derive(Clone)]
pub enum LootCondition {
    /// A zero-argument named predicate.
    Named { tag: String, predicate: PredicateFn },
    /// A named predicate with its ordered argument list.
    NamedArg {
        tag: String,
        args: Vec<String>,
        predicate: ArgPredicateFn,
    },
    /// A check built by a constructor shape at parse time.
    Built { tag: String, check: BuiltFn },
    /// Logical inversion of the inner condition. The parser strips a single
    /// leading `!`, so this never nests.
    Negated(Box<LootCondition>),
}

impl LootCondition {
    /// Evaluate against a context. Only `Built` checks may draw randomness.
    pub fn check(&self, ctx: &LootContext, rng: &mut dyn RngCore) -> bool {
        match self {
            Self::Named { predicate, .. } => predicate(ctx),
            Self::NamedArg { args, predicate, .. } => predicate(ctx, args),
            Self::Built { check, .. } => check(ctx, rng),
            Self::Negated(inner) => !inner.check(ctx, rng),
        }
    }
}

impl fmt::Debug for LootCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { tag, .. } => write!(f, "Named({tag})"),
            Self::NamedArg { tag, args, .. } => write!(f, "NamedArg({tag}:{})", args.join(":")),
            Self::Built { tag, .. } => write!(f, "Built({tag})"),
            Self::Negated(inner) => write!(f, "Negated({inner:?})"),
        }
    }
}

/// Registry mapping lowercase tag names to condition shapes.
pub struct ConditionRegistry {
    tags: HashMap<String, ConditionShape>,
}

impl ConditionRegistry {
    /// An empty registry with no tags at all.
    pub fn new() -> Self {
        Self { tags: HashMap::new() }
    }

    /// A registry pre-populated with the built-in tag vocabulary.
    pub fn with_builtin_tags() -> Self {
        let mut registry = Self::new();
        crate::tags::register_builtin_tags(&mut registry);
        registry
    }

    /// Register a zero-argument predicate under `name`. Returns whether an
    /// existing registration of any shape was evicted.
    pub fn register_predicate<F>(&mut self, name: &str, predicate: F) -> Result<bool, RegistrationError>
    where
        F: Fn(&LootContext) -> bool + Send + Sync + 'static,
    {
        self.insert(name, ConditionShape::Predicate(Arc::new(predicate)))
    }

    /// Register a predicate that receives the tag's argument list.
    pub fn register_arg_predicate<F>(&mut self, name: &str, predicate: F) -> Result<bool, RegistrationError>
    where
        F: Fn(&LootContext, &[String]) -> bool + Send + Sync + 'static,
    {
        self.insert(name, ConditionShape::ArgPredicate(Arc::new(predicate)))
    }

    /// Register a constructor that builds a check from the raw tag text.
    /// The constructor receives the original token, leading `!` included.
    pub fn register_constructor<F>(&mut self, name: &str, constructor: F) -> Result<bool, RegistrationError>
    where
        F: Fn(&str) -> Result<BuiltFn, ConditionParseError> + Send + Sync + 'static,
    {
        self.insert(name, ConditionShape::Constructor(Arc::new(constructor)))
    }

    fn insert(&mut self, name: &str, shape: ConditionShape) -> Result<bool, RegistrationError> {
        let name = name.to_lowercase();
        if name.is_empty() || name.contains([':', '!']) {
            return Err(RegistrationError::InvalidName(name));
        }
        Ok(self.tags.insert(name, shape).is_some())
    }

    /// Remove a tag. Returns whether it existed.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.tags.remove(&name.to_lowercase()).is_some()
    }

    pub fn lookup(&self, name: &str) -> Option<&ConditionShape> {
        self.tags.get(&name.to_lowercase())
    }

    /// Registered tag names, sorted, for display tooling.
    pub fn tag_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tags.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Parse a raw tag string into an evaluable condition.
    ///
    /// A leading `!` negates. The text before the first `:` (lowercased) is
    /// the tag name; the remainder, split on `:`, is the argument list.
    /// Constructor shapes are invoked with the original unstripped token so
    /// they may inspect the full text themselves.
    pub fn parse(&self, raw: &str) -> Result<LootCondition, ConditionParseError> {
        let (negated, body) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let body = body.to_lowercase();
        if body.is_empty() {
            return Err(ConditionParseError::Invalid {
                tag: raw.to_string(),
                reason: "empty condition tag".into(),
            });
        }

        let (key, args) = match body.split_once(':') {
            Some((key, rest)) => (key, rest.split(':').map(str::to_string).collect()),
            None => (body.as_str(), Vec::new()),
        };

        let shape = self
            .tags
            .get(key)
            .ok_or_else(|| ConditionParseError::UnknownTag(key.to_string()))?;

        let node = match shape {
            ConditionShape::Predicate(predicate) => LootCondition::Named {
                tag: key.to_string(),
                predicate: Arc::clone(predicate),
            },
            ConditionShape::ArgPredicate(predicate) => LootCondition::NamedArg {
                tag: key.to_string(),
                args,
                predicate: Arc::clone(predicate),
            },
            ConditionShape::Constructor(build) => LootCondition::Built {
                tag: key.to_string(),
                check: build(raw)?,
            },
        };

        Ok(if negated {
            LootCondition::Negated(Box::new(node))
        } else {
            node
        })
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::with_builtin_tags()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0)
    }

    #[test]
    fn register_reports_overwrite_across_shapes() {
        let mut registry = ConditionRegistry::new();
        assert!(!registry.register_predicate("x", |_| true).unwrap());
        // Same tag, different shape: evicts and reports the overwrite.
        assert!(registry.register_arg_predicate("x", |_, _| true).unwrap());
        assert!(matches!(registry.lookup("x"), Some(ConditionShape::ArgPredicate(_))));
    }

    #[test]
    fn register_is_case_insensitive() {
        let mut registry = ConditionRegistry::new();
        registry.register_predicate("MyTag", |_| true).unwrap();
        assert!(registry.lookup("mytag").is_some());
        assert!(registry.parse("MYTAG").is_ok());
    }

    #[test]
    fn register_rejects_unparseable_names() {
        let mut registry = ConditionRegistry::new();
        for name in ["", "a:b", "!a"] {
            assert!(registry.register_predicate(name, |_| true).is_err(), "accepted {name:?}");
        }
    }

    #[test]
    fn unregister_reports_presence() {
        let mut registry = ConditionRegistry::new();
        registry.register_predicate("x", |_| true).unwrap();
        assert!(registry.unregister("x"));
        assert!(!registry.unregister("x"));
        assert!(registry.lookup("x").is_none());
    }

    #[test]
    fn parse_unknown_tag() {
        let registry = ConditionRegistry::new();
        assert!(matches!(
            registry.parse("nope"),
            Err(ConditionParseError::UnknownTag(tag)) if tag == "nope"
        ));
    }

    #[test]
    fn parse_empty_tag() {
        let registry = ConditionRegistry::new();
        assert!(matches!(registry.parse(""), Err(ConditionParseError::Invalid { .. })));
        assert!(matches!(registry.parse("!"), Err(ConditionParseError::Invalid { .. })));
    }

    #[test]
    fn parse_splits_arguments() {
        let mut registry = ConditionRegistry::new();
        registry
            .register_arg_predicate("has", |_, args| args == ["a", "b"])
            .unwrap();
        let condition = registry.parse("has:A:B").unwrap();
        assert!(condition.check(&LootContext::new(), &mut rng()));
    }

    #[test]
    fn negation_inverts() {
        let mut registry = ConditionRegistry::new();
        registry.register_predicate("yes", |_| true).unwrap();
        let ctx = LootContext::new();
        assert!(registry.parse("yes").unwrap().check(&ctx, &mut rng()));
        assert!(!registry.parse("!yes").unwrap().check(&ctx, &mut rng()));
        assert!(matches!(
            registry.parse("!yes").unwrap(),
            LootCondition::Negated(_)
        ));
    }

    #[test]
    fn constructor_receives_original_token() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let record = Arc::clone(&seen);
        let mut registry = ConditionRegistry::new();
        registry
            .register_constructor("probe", move |raw| {
                record.lock().unwrap().push(raw.to_string());
                Ok(Arc::new(|_ctx: &LootContext, _rng: &mut dyn RngCore| true) as BuiltFn)
            })
            .unwrap();

        registry.parse("!Probe:X").unwrap();
        assert_eq!(seen.lock().unwrap().as_slice(), ["!Probe:X"]);
    }

    #[test]
    fn constructor_failure_surfaces() {
        let mut registry = ConditionRegistry::new();
        registry
            .register_constructor("bad", |raw| {
                Err(ConditionParseError::Invalid {
                    tag: raw.to_string(),
                    reason: "unbuildable".into(),
                })
            })
            .unwrap();
        assert!(matches!(
            registry.parse("bad:1"),
            Err(ConditionParseError::Invalid { .. })
        ));
    }
}
