use std::sync::OnceLock;

use crate::object::{Classification, MinimalObject, ObjectHeader, TypeTag};

/// Matches nothing and consumes nothing. There is one per process.
pub struct NoOp {
    header: ObjectHeader,
}

static INSTANCE: OnceLock<NoOp> = OnceLock::new();

impl NoOp {
    pub fn instance() -> &'static NoOp {
        INSTANCE.get_or_init(|| {
            tracing::trace!("initializing NoOp");
            NoOp {
                header: ObjectHeader::new(TypeTag::NoOp, Classification::NONE),
            }
        })
    }
}

impl MinimalObject for NoOp {
    fn header(&self) -> &ObjectHeader {
        &self.header
    }
}
