//! The minimal object model shared by every match node.
//!
//! Match nodes stand in for arbitrary user values, so they answer type
//! questions from their own bookkeeping: a closed set of [`TypeTag`]s, the
//! ancestry computed once at construction, the [`Capability`] sets mixed
//! into each type, and three classification tags.

use std::fmt;

use thiserror::Error;

/// Every type in the match node hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    MatchObject,
    AbstractMatchProxy,
    MatchProxy,
    MatchProxyGroup,
    Repetition,
    ZeroOrMore,
    ZeroOrMoreNonGreedy,
    OneOrMore,
    OneOrMoreNonGreedy,
    ZeroOrOne,
    ZeroOrOneNonGreedy,
    CountedRepetition,
    CountedRepetitionNonGreedy,
    Alternation,
    NoOp,
}

impl TypeTag {
    pub const ALL: [TypeTag; 15] = [
        TypeTag::MatchObject,
        TypeTag::AbstractMatchProxy,
        TypeTag::MatchProxy,
        TypeTag::MatchProxyGroup,
        TypeTag::Repetition,
        TypeTag::ZeroOrMore,
        TypeTag::ZeroOrMoreNonGreedy,
        TypeTag::OneOrMore,
        TypeTag::OneOrMoreNonGreedy,
        TypeTag::ZeroOrOne,
        TypeTag::ZeroOrOneNonGreedy,
        TypeTag::CountedRepetition,
        TypeTag::CountedRepetitionNonGreedy,
        TypeTag::Alternation,
        TypeTag::NoOp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TypeTag::MatchObject => "MatchObject",
            TypeTag::AbstractMatchProxy => "AbstractMatchProxy",
            TypeTag::MatchProxy => "MatchProxy",
            TypeTag::MatchProxyGroup => "MatchProxyGroup",
            TypeTag::Repetition => "Repetition",
            TypeTag::ZeroOrMore => "ZeroOrMore",
            TypeTag::ZeroOrMoreNonGreedy => "ZeroOrMoreNonGreedy",
            TypeTag::OneOrMore => "OneOrMore",
            TypeTag::OneOrMoreNonGreedy => "OneOrMoreNonGreedy",
            TypeTag::ZeroOrOne => "ZeroOrOne",
            TypeTag::ZeroOrOneNonGreedy => "ZeroOrOneNonGreedy",
            TypeTag::CountedRepetition => "CountedRepetition",
            TypeTag::CountedRepetitionNonGreedy => "CountedRepetitionNonGreedy",
            TypeTag::Alternation => "Alternation",
            TypeTag::NoOp => "NoOp",
        }
    }

    /// The declared supertype, `None` only for the root.
    pub fn parent(self) -> Option<TypeTag> {
        match self {
            TypeTag::MatchObject => None,
            TypeTag::AbstractMatchProxy
            | TypeTag::Repetition
            | TypeTag::Alternation
            | TypeTag::NoOp => Some(TypeTag::MatchObject),
            TypeTag::MatchProxy | TypeTag::MatchProxyGroup => Some(TypeTag::AbstractMatchProxy),
            TypeTag::ZeroOrMore
            | TypeTag::OneOrMore
            | TypeTag::ZeroOrOne
            | TypeTag::CountedRepetition => Some(TypeTag::Repetition),
            TypeTag::ZeroOrMoreNonGreedy => Some(TypeTag::ZeroOrMore),
            TypeTag::OneOrMoreNonGreedy => Some(TypeTag::OneOrMore),
            TypeTag::ZeroOrOneNonGreedy => Some(TypeTag::ZeroOrOne),
            TypeTag::CountedRepetitionNonGreedy => Some(TypeTag::CountedRepetition),
        }
    }

    /// Operations this type itself declares. Inherited ones live on the parent.
    pub fn operations(self) -> &'static [&'static str] {
        match self {
            TypeTag::MatchObject => &[
                "kind_of",
                "is_a",
                "responds_to",
                "type_name",
                "to_text",
                "inspect",
            ],
            TypeTag::AbstractMatchProxy => &[
                "leaf",
                "coerce",
                "repeat",
                "range",
                "non_greedy",
                "set_non_greedy_mode",
                "set_greedy_mode",
                "one_or_more",
                "zero_or_one",
                "zero_or_more_as_sequence",
                "alternate_with",
            ],
            TypeTag::Repetition => &["comp_obj", "kind", "is_greedy", "non_greedy", "alternate_with"],
            TypeTag::CountedRepetition => &["count_range"],
            TypeTag::Alternation => &["comp_obj", "alt_obj", "alternate_with"],
            _ => &[],
        }
    }

    /// Capability sets mixed in by this type itself.
    pub fn mixins(self) -> &'static [Capability] {
        match self {
            TypeTag::MatchObject => &[Capability::ProxyOperators],
            TypeTag::AbstractMatchProxy => &[Capability::ExpressionOperators, Capability::Alternate],
            TypeTag::Alternation => &[Capability::Alternate],
            _ => &[],
        }
    }

    /// Looks a type up by name.
    pub fn resolve(name: &str) -> Result<TypeTag, UnresolvedSymbol> {
        TypeTag::ALL
            .into_iter()
            .find(|tag| tag.name() == name)
            .ok_or_else(|| UnresolvedSymbol::new(name))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operation sets mixed into node types independently of derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// The `is_proxy` / `is_match_op` / `is_group` accessors.
    ProxyOperators,
    /// Repetition building: `repeat`, `range`, unary operators, mode flags.
    ExpressionOperators,
    /// The `|` operator.
    Alternate,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::ProxyOperators,
        Capability::ExpressionOperators,
        Capability::Alternate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Capability::ProxyOperators => "ProxyOperators",
            Capability::ExpressionOperators => "ExpressionOperators",
            Capability::Alternate => "Alternate",
        }
    }

    pub fn resolve(name: &str) -> Result<Capability, UnresolvedSymbol> {
        Capability::ALL
            .into_iter()
            .find(|cap| cap.name() == name)
            .ok_or_else(|| UnresolvedSymbol::new(name))
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything `kind_of` can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Type(TypeTag),
    Capability(Capability),
}

impl Kind {
    /// Resolves a type name first, then a capability name.
    pub fn resolve(name: &str) -> Result<Kind, UnresolvedSymbol> {
        TypeTag::resolve(name)
            .map(Kind::Type)
            .or_else(|_| Capability::resolve(name).map(Kind::Capability))
    }
}

impl From<TypeTag> for Kind {
    fn from(tag: TypeTag) -> Self {
        Kind::Type(tag)
    }
}

impl From<Capability> for Kind {
    fn from(cap: Capability) -> Self {
        Kind::Capability(cap)
    }
}

/// A name that is not declared anywhere in the model. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{name}` is not declared in the match object hierarchy")]
pub struct UnresolvedSymbol {
    pub name: String,
}

impl UnresolvedSymbol {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// The classification tags set once when a node is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub is_proxy: bool,
    pub is_match_op: bool,
    pub is_group: bool,
}

impl Classification {
    pub const PROXY: Classification = Classification {
        is_proxy: true,
        is_match_op: false,
        is_group: false,
    };
    pub const MATCH_OP: Classification = Classification {
        is_proxy: false,
        is_match_op: true,
        is_group: false,
    };
    pub const GROUP_OP: Classification = Classification {
        is_proxy: false,
        is_match_op: true,
        is_group: true,
    };
    pub const NONE: Classification = Classification {
        is_proxy: false,
        is_match_op: false,
        is_group: false,
    };
}

/// Per-node identity record: exact type, ancestry, mixins and tags.
#[derive(Debug, Clone)]
pub struct ObjectHeader {
    klass: TypeTag,
    ancestry: Vec<TypeTag>,
    capabilities: Vec<Capability>,
    tags: Classification,
}

impl ObjectHeader {
    pub fn new(klass: TypeTag, tags: Classification) -> Self {
        let mut ancestry = Vec::new();
        let mut current = Some(klass);
        while let Some(tag) = current {
            if !ancestry.contains(&tag) {
                ancestry.push(tag);
            }
            current = tag.parent();
        }

        let mut capabilities = Vec::new();
        for cap in ancestry.iter().flat_map(|tag| tag.mixins()) {
            if !capabilities.contains(cap) {
                capabilities.push(*cap);
            }
        }

        Self {
            klass,
            ancestry,
            capabilities,
            tags,
        }
    }

    pub fn klass(&self) -> TypeTag {
        self.klass
    }

    /// Most-derived first, root last.
    pub fn ancestry(&self) -> &[TypeTag] {
        &self.ancestry
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn tags(&self) -> Classification {
        self.tags
    }
}

/// Introspection answered from an [`ObjectHeader`] instead of the host type system.
pub trait MinimalObject {
    fn header(&self) -> &ObjectHeader;

    /// True for any type in the ancestry, then for any mixed-in capability.
    fn kind_of(&self, kind: impl Into<Kind>) -> bool
    where
        Self: Sized,
    {
        let header = self.header();
        match kind.into() {
            Kind::Type(tag) => header.ancestry.contains(&tag),
            Kind::Capability(cap) => header.capabilities.contains(&cap),
        }
    }

    /// Strict: only the exact most-derived type.
    fn is_a(&self, tag: TypeTag) -> bool {
        self.header().klass == tag
    }

    fn responds_to(&self, operation: &str) -> bool {
        self.header()
            .ancestry
            .iter()
            .any(|tag| tag.operations().contains(&operation))
    }

    fn type_name(&self) -> &'static str {
        self.header().klass.name()
    }

    fn kind_of_named(&self, name: &str) -> bool
    where
        Self: Sized,
    {
        match Kind::resolve(name) {
            Ok(kind) => self.kind_of(kind),
            Err(err) => {
                tracing::warn!(klass = %self.header().klass, "{err}");
                false
            }
        }
    }

    fn is_a_named(&self, name: &str) -> bool {
        match TypeTag::resolve(name) {
            Ok(tag) => self.is_a(tag),
            Err(err) => {
                tracing::warn!(klass = %self.header().klass, "{err}");
                false
            }
        }
    }
}

pub fn is_proxy(obj: &impl MinimalObject) -> bool {
    obj.header().tags.is_proxy
}

pub fn is_match_op(obj: &impl MinimalObject) -> bool {
    obj.header().tags.is_match_op
}

pub fn is_group(obj: &impl MinimalObject) -> bool {
    obj.header().tags.is_group
}
