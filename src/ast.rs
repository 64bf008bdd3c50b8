use std::fmt;
use std::ops::{BitOr, Mul, Neg};
use std::rc::Rc;

use crate::alternation::{Alternation, Operand, ProxyCoercion};
use crate::error::MatchError;
use crate::noop::NoOp;
use crate::object::{MinimalObject, ObjectHeader, TypeTag};
use crate::proxy::MatchProxy;
use crate::repetition::Repetition;
use crate::value::{CountArg, CountRange};

/// A handle to any node of a match expression tree.
///
/// Cloning a handle shares the node; use [`Node::ptr_eq`] for identity.
#[derive(Clone)]
pub enum Node {
    Proxy(Rc<MatchProxy>),
    Repetition(Rc<Repetition>),
    Alternation(Rc<Alternation>),
    NoOp(&'static NoOp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatKind {
    ZeroOrMore,
    OneOrMore,
    ZeroOrOne,
    Counted(CountRange),
}

impl RepeatKind {
    /// Prefix symbol of the symbolic kinds. Counted repetition renders as a suffix.
    pub fn symbol(self) -> Option<char> {
        match self {
            RepeatKind::ZeroOrMore => Some('*'),
            RepeatKind::OneOrMore => Some('+'),
            RepeatKind::ZeroOrOne => Some('~'),
            RepeatKind::Counted(_) => None,
        }
    }

    pub(crate) fn operator(self) -> &'static str {
        match self {
            RepeatKind::ZeroOrMore => "*",
            RepeatKind::OneOrMore => "+",
            RepeatKind::ZeroOrOne => "~",
            RepeatKind::Counted(_) => "[]",
        }
    }

    pub(crate) fn type_tag(self, greedy: bool) -> TypeTag {
        match (self, greedy) {
            (RepeatKind::ZeroOrMore, true) => TypeTag::ZeroOrMore,
            (RepeatKind::ZeroOrMore, false) => TypeTag::ZeroOrMoreNonGreedy,
            (RepeatKind::OneOrMore, true) => TypeTag::OneOrMore,
            (RepeatKind::OneOrMore, false) => TypeTag::OneOrMoreNonGreedy,
            (RepeatKind::ZeroOrOne, true) => TypeTag::ZeroOrOne,
            (RepeatKind::ZeroOrOne, false) => TypeTag::ZeroOrOneNonGreedy,
            (RepeatKind::Counted(_), true) => TypeTag::CountedRepetition,
            (RepeatKind::Counted(_), false) => TypeTag::CountedRepetitionNonGreedy,
        }
    }
}

impl Node {
    /// The process-wide "match nothing" placeholder.
    pub fn no_op() -> Node {
        Node::NoOp(NoOp::instance())
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Proxy(a), Node::Proxy(b)) => Rc::ptr_eq(a, b),
            (Node::Repetition(a), Node::Repetition(b)) => Rc::ptr_eq(a, b),
            (Node::Alternation(a), Node::Alternation(b)) => Rc::ptr_eq(a, b),
            (Node::NoOp(a), Node::NoOp(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }

    pub fn as_proxy(&self) -> Option<&MatchProxy> {
        match self {
            Node::Proxy(proxy) => Some(&**proxy),
            _ => None,
        }
    }

    pub fn as_repetition(&self) -> Option<&Repetition> {
        match self {
            Node::Repetition(rep) => Some(&**rep),
            _ => None,
        }
    }

    pub fn as_alternation(&self) -> Option<&Alternation> {
        match self {
            Node::Alternation(alt) => Some(&**alt),
            _ => None,
        }
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn inspect(&self) -> String {
        match self {
            Node::Proxy(proxy) => proxy.inspect(),
            Node::Repetition(rep) => rep.inspect(),
            Node::Alternation(alt) => alt.inspect(),
            Node::NoOp(noop) => noop.type_name().to_string(),
        }
    }

    /// Resolves the proxy an expression operator applies to.
    ///
    /// Repetitions do not define the proxy operators themselves and hand them
    /// to the node they wrap.
    fn operator_target(&self, operator: &str) -> Result<&Rc<MatchProxy>, MatchError> {
        match self {
            Node::Proxy(proxy) => Ok(proxy),
            Node::Repetition(rep) => rep.forward(operator).operator_target(operator),
            other => Err(MatchError::invalid_operand(operator, other.inspect())),
        }
    }

    /// `self * n`: exactly `n` repetitions, sugar for `range(n..=n)`.
    pub fn repeat(&self, n: i64) -> Result<Node, MatchError> {
        self.operator_target("*")?.repeat(n)
    }

    /// `self[range]`: counted repetition in the proxy's current mode.
    pub fn range(&self, range: impl Into<CountArg>) -> Result<Node, MatchError> {
        self.operator_target("[]")?.range(range)
    }

    /// Unary plus.
    pub fn one_or_more(&self) -> Result<Node, MatchError> {
        Ok(self.operator_target("+")?.one_or_more())
    }

    /// Unary tilde.
    pub fn zero_or_one(&self) -> Result<Node, MatchError> {
        Ok(self.operator_target("~")?.zero_or_one())
    }

    /// Zero-or-more, presented as a single-element sequence.
    pub fn zero_or_more_as_sequence(&self) -> Result<Vec<Node>, MatchError> {
        Ok(self.operator_target("to_a")?.zero_or_more_as_sequence())
    }

    pub fn set_non_greedy_mode(&self) -> Result<Node, MatchError> {
        Ok(self.operator_target("set_non_greedy_mode")?.set_non_greedy_mode())
    }

    pub fn set_greedy_mode(&self) -> Result<Node, MatchError> {
        Ok(self.operator_target("set_greedy_mode")?.set_greedy_mode())
    }

    /// Unary minus.
    ///
    /// On a repetition this builds its non-greedy counterpart; on a proxy it
    /// switches the proxy to non-greedy mode and returns it.
    pub fn non_greedy(&self) -> Result<Node, MatchError> {
        match self {
            Node::Repetition(rep) => Ok(rep.non_greedy()),
            Node::Proxy(proxy) => Ok(proxy.set_non_greedy_mode()),
            other => Err(MatchError::invalid_operand("-", other.inspect())),
        }
    }

    /// `self | operand`.
    pub fn alternate_with(&self, operand: impl Into<Operand>) -> Result<Node, MatchError> {
        match self {
            Node::Proxy(proxy) => Ok(Alternation::build(self.clone(), operand, &**proxy)),
            Node::Repetition(_) | Node::Alternation(_) => {
                Ok(Alternation::build(self.clone(), operand, &ProxyCoercion))
            }
            Node::NoOp(noop) => Err(MatchError::invalid_operand("|", noop.type_name())),
        }
    }
}

impl MinimalObject for Node {
    fn header(&self) -> &ObjectHeader {
        match self {
            Node::Proxy(proxy) => proxy.header(),
            Node::Repetition(rep) => rep.header(),
            Node::Alternation(alt) => alt.header(),
            Node::NoOp(noop) => noop.header(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Proxy(proxy) => write!(f, "{proxy}"),
            Node::Repetition(rep) => write!(f, "{rep}"),
            Node::Alternation(alt) => write!(f, "{alt}"),
            Node::NoOp(noop) => f.write_str(noop.type_name()),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inspect())
    }
}

impl Neg for &Node {
    type Output = Result<Node, MatchError>;

    fn neg(self) -> Self::Output {
        self.non_greedy()
    }
}

impl Mul<i64> for &Node {
    type Output = Result<Node, MatchError>;

    fn mul(self, n: i64) -> Self::Output {
        self.repeat(n)
    }
}

impl<O: Into<Operand>> BitOr<O> for &Node {
    type Output = Result<Node, MatchError>;

    fn bitor(self, operand: O) -> Self::Output {
        self.alternate_with(operand)
    }
}
