use thiserror::Error;

/// Errors raised while building a match expression.
///
/// All of them are caller mistakes reported at the offending operator call;
/// nothing is retried or recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The operator is only defined on proxy-classified nodes.
    #[error("`{operator}` cannot be applied to {operand}: operand is not a match proxy")]
    InvalidOperand { operator: String, operand: String },

    /// A count or range argument could not be normalized.
    #[error("could not convert {value} into a repetition range: {reason}")]
    TypeConversion { value: String, reason: String },

    #[error("wrong number of arguments ({got} for {expected})")]
    ArgumentCount { expected: String, got: usize },
}

impl MatchError {
    pub(crate) fn invalid_operand(operator: &str, operand: impl ToString) -> Self {
        MatchError::InvalidOperand {
            operator: operator.to_string(),
            operand: operand.to_string(),
        }
    }

    pub(crate) fn type_conversion(value: impl ToString, reason: impl ToString) -> Self {
        MatchError::TypeConversion {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
