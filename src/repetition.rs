use std::fmt;
use std::rc::Rc;

use crate::ast::{Node, RepeatKind};
use crate::error::MatchError;
use crate::object::{is_proxy, Classification, MinimalObject, ObjectHeader};
use crate::value::{CountArg, CountRange};

const NON_GREEDY_SUFFIX: &str = ".non_greedy";

/// A repetition of a single proxy node.
///
/// The greedy flag is fixed when the node is built; [`Repetition::non_greedy`]
/// builds a new node rather than flipping it.
pub struct Repetition {
    header: ObjectHeader,
    kind: RepeatKind,
    greedy: bool,
    comp_obj: Node,
}

impl Repetition {
    /// Wraps `comp_obj`, which must be proxy-classified.
    pub fn new(kind: RepeatKind, greedy: bool, comp_obj: Node) -> Result<Node, MatchError> {
        if !is_proxy(&comp_obj) {
            return Err(MatchError::invalid_operand(
                kind.operator(),
                comp_obj.inspect(),
            ));
        }
        Ok(Node::Repetition(Self::assemble(kind, greedy, comp_obj)))
    }

    /// Counted repetition over an interval or a single positive count.
    pub fn counted(
        range: impl Into<CountArg>,
        greedy: bool,
        comp_obj: Node,
    ) -> Result<Node, MatchError> {
        let range = range.into().normalize()?;
        Self::new(RepeatKind::Counted(range), greedy, comp_obj)
    }

    /// Callers guarantee `comp_obj` is a proxy.
    pub(crate) fn assemble(kind: RepeatKind, greedy: bool, comp_obj: Node) -> Rc<Self> {
        let klass = kind.type_tag(greedy);
        tracing::trace!(%klass, child = %comp_obj, "building repetition");
        Rc::new(Self {
            header: ObjectHeader::new(klass, Classification::MATCH_OP),
            kind,
            greedy,
            comp_obj,
        })
    }

    pub fn comp_obj(&self) -> &Node {
        &self.comp_obj
    }

    pub fn kind(&self) -> RepeatKind {
        self.kind
    }

    pub fn is_greedy(&self) -> bool {
        self.greedy
    }

    pub fn count_range(&self) -> Option<CountRange> {
        match self.kind {
            RepeatKind::Counted(range) => Some(range),
            _ => None,
        }
    }

    /// The paired non-greedy node over the same child (and range).
    ///
    /// Already non-greedy nodes yield a fresh equivalent node.
    pub fn non_greedy(&self) -> Node {
        Node::Repetition(Self::assemble(self.kind, false, self.comp_obj.clone()))
    }

    /// Hands an operation this node does not define to the wrapped proxy.
    pub(crate) fn forward(&self, operation: &str) -> &Node {
        tracing::debug!(
            operation,
            from = %self.header.klass(),
            to = %self.comp_obj,
            "sent operation to underlying proxy"
        );
        &self.comp_obj
    }

    pub fn inspect(&self) -> String {
        match self.kind {
            RepeatKind::Counted(range) => format!(
                "{} {} of {}",
                self.type_name(),
                range,
                self.comp_obj.inspect()
            ),
            _ => format!("{} of {}", self.type_name(), self.comp_obj.inspect()),
        }
    }
}

impl MinimalObject for Repetition {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RepeatKind::Counted(range) => {
                write!(f, "{}[{}..{}]", self.comp_obj, range.start(), range.end())?
            }
            kind => {
                let symbol = kind.symbol().unwrap_or('*');
                write!(f, "{}({})", symbol, self.comp_obj)?
            }
        }
        if !self.greedy {
            f.write_str(NON_GREEDY_SUFFIX)?;
        }
        Ok(())
    }
}
