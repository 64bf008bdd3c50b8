//! Builds match expressions by composing operators on leaf proxies.
//!
//! ```
//! use minimal_match::{MatchProxy, MinimalObject, TypeTag};
//!
//! let a = MatchProxy::new("a");
//! let expr = a.one_or_more().unwrap().alternate_with("b").unwrap();
//! assert_eq!(expr.to_text(), "+(\"a\")|\"b\"");
//! assert!(expr.is_a(TypeTag::Alternation));
//! ```
//!
//! Matching the resulting tree against input is left to a separate engine.

pub mod alternation;
pub mod ast;
pub mod error;
pub mod noop;
pub mod object;
pub mod proxy;
pub mod repetition;
pub mod value;

pub use alternation::{Alternation, Coerce, Operand, ProxyCoercion};
pub use ast::{Node, RepeatKind};
pub use error::MatchError;
pub use noop::NoOp;
pub use object::{
    is_group, is_match_op, is_proxy, Capability, Classification, Kind, MinimalObject,
    ObjectHeader, TypeTag, UnresolvedSymbol,
};
pub use proxy::{Leaf, MatchProxy, Mode};
pub use repetition::Repetition;
pub use value::{CountArg, CountRange, Value};
