//! Leaf match nodes and the expression operators mixed into them.
//!
//! A [`MatchProxy`] stands in for a user value (or a group of values, or a
//! nested sub-expression). It carries a greedy/non-greedy mode flag that
//! decides which family later repetition operators build, and memoizes the
//! symbolic repetitions it has already handed out.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::alternation::{Coerce, Operand, ProxyCoercion};
use crate::ast::{Node, RepeatKind};
use crate::error::MatchError;
use crate::object::{Classification, MinimalObject, ObjectHeader, TypeTag};
use crate::repetition::Repetition;
use crate::value::{CountArg, Value};

/// What a proxy stands in for.
#[derive(Debug, Clone)]
pub enum Leaf {
    Value(Value),
    /// Any one of several values.
    Group(Vec<Value>),
    /// A whole sub-expression, so it can take proxy-only operators.
    Pattern(Node),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Greedy,
    NonGreedy,
}

/// Greedy and non-greedy cache slots for one repetition kind.
///
/// Slots hold weak references, so a cached node lives exactly as long as
/// some caller keeps it and the proxy never owns its own wrapper.
#[derive(Default)]
struct MemoSlot {
    greedy: RefCell<Weak<Repetition>>,
    non_greedy: RefCell<Weak<Repetition>>,
}

impl MemoSlot {
    fn get_or_build(&self, mode: Mode, build: impl FnOnce() -> Rc<Repetition>) -> Rc<Repetition> {
        let cell = match mode {
            Mode::Greedy => &self.greedy,
            Mode::NonGreedy => &self.non_greedy,
        };
        let cached = cell.borrow().upgrade();
        if let Some(rep) = cached {
            tracing::trace!(?mode, "repetition memo hit");
            return rep;
        }
        let rep = build();
        *cell.borrow_mut() = Rc::downgrade(&rep);
        rep
    }
}

pub struct MatchProxy {
    header: ObjectHeader,
    leaf: Leaf,
    mode: Cell<Mode>,
    one_or_more: MemoSlot,
    zero_or_one: MemoSlot,
    zero_or_more: MemoSlot,
}

impl MatchProxy {
    pub fn new(value: impl Into<Value>) -> Node {
        Self::build(TypeTag::MatchProxy, Leaf::Value(value.into()))
    }

    /// A proxy matching any of `values`. A single value gives a plain proxy.
    pub fn group(values: Vec<Value>) -> Result<Node, MatchError> {
        match values.len() {
            0 => Err(MatchError::ArgumentCount {
                expected: "1 or more".to_string(),
                got: 0,
            }),
            1 => Ok(Self::build(
                TypeTag::MatchProxy,
                Leaf::Value(values.into_iter().next().unwrap_or(Value::Nil)),
            )),
            _ => Ok(Self::build(TypeTag::MatchProxyGroup, Leaf::Group(values))),
        }
    }

    /// Makes any node proxy-classified.
    pub fn pattern(node: Node) -> Node {
        Self::build(TypeTag::MatchProxy, Leaf::Pattern(node))
    }

    fn build(klass: TypeTag, leaf: Leaf) -> Node {
        Node::Proxy(Rc::new(Self {
            header: ObjectHeader::new(klass, Classification::PROXY),
            leaf,
            mode: Cell::new(Mode::Greedy),
            one_or_more: MemoSlot::default(),
            zero_or_one: MemoSlot::default(),
            zero_or_more: MemoSlot::default(),
        }))
    }

    pub fn leaf(&self) -> &Leaf {
        &self.leaf
    }

    pub fn mode(&self) -> Mode {
        self.mode.get()
    }

    pub fn inspect(&self) -> String {
        format!("{}({})", self.type_name(), self)
    }

    pub(crate) fn set_non_greedy_mode(self: &Rc<Self>) -> Node {
        self.mode.set(Mode::NonGreedy);
        Node::Proxy(Rc::clone(self))
    }

    pub(crate) fn set_greedy_mode(self: &Rc<Self>) -> Node {
        self.mode.set(Mode::Greedy);
        Node::Proxy(Rc::clone(self))
    }

    pub(crate) fn repeat(self: &Rc<Self>, n: i64) -> Result<Node, MatchError> {
        self.range(n..=n)
    }

    /// Not memoized: every call builds a new counted repetition.
    pub(crate) fn range(self: &Rc<Self>, range: impl Into<CountArg>) -> Result<Node, MatchError> {
        let range = range.into().normalize()?;
        Ok(Node::Repetition(Repetition::assemble(
            RepeatKind::Counted(range),
            self.mode() == Mode::Greedy,
            Node::Proxy(Rc::clone(self)),
        )))
    }

    pub(crate) fn one_or_more(self: &Rc<Self>) -> Node {
        self.memoized(&self.one_or_more, RepeatKind::OneOrMore)
    }

    pub(crate) fn zero_or_one(self: &Rc<Self>) -> Node {
        self.memoized(&self.zero_or_one, RepeatKind::ZeroOrOne)
    }

    pub(crate) fn zero_or_more_as_sequence(self: &Rc<Self>) -> Vec<Node> {
        vec![self.memoized(&self.zero_or_more, RepeatKind::ZeroOrMore)]
    }

    fn memoized(self: &Rc<Self>, slot: &MemoSlot, kind: RepeatKind) -> Node {
        let mode = self.mode();
        let rep = slot.get_or_build(mode, || {
            Repetition::assemble(kind, mode == Mode::Greedy, Node::Proxy(Rc::clone(self)))
        });
        Node::Repetition(rep)
    }
}

impl Coerce for MatchProxy {
    fn coerce(&self, receiver: &Node, operand: Operand) -> (Node, Node) {
        ProxyCoercion.coerce(receiver, operand)
    }
}

impl MinimalObject for MatchProxy {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }
}

impl fmt::Display for MatchProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.leaf {
            Leaf::Value(value) => write!(f, "{value}"),
            Leaf::Group(values) => {
                f.write_str("{")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("}")
            }
            Leaf::Pattern(node) => write!(f, "({node})"),
        }
    }
}
