use std::fmt;
use std::rc::Rc;

use crate::ast::Node;
use crate::object::{is_proxy, Classification, MinimalObject, ObjectHeader, TypeTag};
use crate::proxy::MatchProxy;
use crate::value::Value;

/// Right-hand side of `|`: a node, or a raw value still to be coerced.
#[derive(Debug, Clone)]
pub enum Operand {
    Node(Node),
    Value(Value),
}

impl From<Node> for Operand {
    fn from(node: Node) -> Self {
        Operand::Node(node)
    }
}

impl From<&Node> for Operand {
    fn from(node: &Node) -> Self {
        Operand::Node(node.clone())
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Value(Value::Int(n))
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Value(Value::from(s))
    }
}

/// Hook a leaf-node system supplies to turn a non-proxy operand into a proxy.
///
/// Returns `(receiver_equivalent, operand_equivalent)`; the second must be
/// proxy-classified.
pub trait Coerce {
    fn coerce(&self, receiver: &Node, operand: Operand) -> (Node, Node);
}

/// Default coercion: values become single-value proxies, other nodes become
/// pattern proxies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProxyCoercion;

impl Coerce for ProxyCoercion {
    fn coerce(&self, receiver: &Node, operand: Operand) -> (Node, Node) {
        let operand = match operand {
            Operand::Node(node) if is_proxy(&node) => node,
            Operand::Node(node) => MatchProxy::pattern(node),
            Operand::Value(value) => MatchProxy::new(value),
        };
        (receiver.clone(), operand)
    }
}

/// Either `comp_obj` or `alt_obj`. The only group-classified node.
pub struct Alternation {
    header: ObjectHeader,
    comp_obj: Node,
    alt_obj: Node,
}

impl Alternation {
    /// Builds `left | right`, passing a non-proxy `right` through `hook` once.
    pub fn build(left: Node, right: impl Into<Operand>, hook: &dyn Coerce) -> Node {
        let (comp_obj, alt_obj) = match right.into() {
            Operand::Node(node) if is_proxy(&node) => (left, node),
            operand => {
                tracing::trace!(?operand, "coercing alternation operand");
                hook.coerce(&left, operand)
            }
        };
        Node::Alternation(Rc::new(Self {
            header: ObjectHeader::new(TypeTag::Alternation, Classification::GROUP_OP),
            comp_obj,
            alt_obj,
        }))
    }

    pub fn comp_obj(&self) -> &Node {
        &self.comp_obj
    }

    pub fn alt_obj(&self) -> &Node {
        &self.alt_obj
    }

    pub fn inspect(&self) -> String {
        format!("<{} or {}>", self.comp_obj.inspect(), self.alt_obj.inspect())
    }
}

impl MinimalObject for Alternation {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }
}

impl fmt::Display for Alternation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.comp_obj, self.alt_obj)
    }
}
