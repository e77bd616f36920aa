use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::UnknownMember { .. } => "UnknownMember",
            ErrorImpl::ConstructorPatternArity { .. } => "ConstructorPatternArity",
            ErrorImpl::EnumConstructorPatternArity { .. } => "EnumConstructorPatternArity",
            ErrorImpl::EnumPatternTypeMismatch { .. } => "EnumPatternTypeMismatch",
            ErrorImpl::UnreachablePattern => "UnreachablePattern",
            ErrorImpl::DuplicateWildcard => "DuplicateWildcard",
            ErrorImpl::IncompatibleTypes { .. } => "IncompatibleTypes",
            ErrorImpl::UntypedExpression => "UntypedExpression",
            ErrorImpl::NotImplementedError => "NotImplementedError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::UnknownMember { member, type_ } => ErrorTip::Suggestion(format!(
                "Type `{}` has no data member named `{}`",
                type_, member
            )),
            ErrorImpl::ConstructorPatternArity { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "The class primary constructor takes {} arguments, pattern has {}",
                    expected, received
                ))
            }
            ErrorImpl::EnumConstructorPatternArity { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "The enum variant constructor takes {} arguments, pattern has {}",
                    expected, received
                ))
            }
            ErrorImpl::EnumPatternTypeMismatch { .. } => ErrorTip::Suggestion(String::from(
                "The enum type in a pattern must match the match subject type",
            )),
            ErrorImpl::UnreachablePattern => ErrorTip::Suggestion(String::from(
                "A previous case already covers this pattern",
            )),
            ErrorImpl::DuplicateWildcard => ErrorTip::Suggestion(String::from(
                "Remove all but one `..` from the array pattern",
            )),
            ErrorImpl::IncompatibleTypes { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::UntypedExpression => ErrorTip::None,
            ErrorImpl::NotImplementedError => ErrorTip::Suggestion(String::from(
                "This feature is expected to be handled, but has not yet been implemented",
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("unknown member {member:?} on type {type_}")]
    UnknownMember { member: String, type_: String },
    #[error("Wrong number of arguments in constructor pattern.")]
    ConstructorPatternArity { expected: usize, received: usize },
    #[error("Wrong number of arguments in enum constructor pattern.")]
    EnumConstructorPatternArity { expected: usize, received: usize },
    #[error("Enum type in pattern must be the same as the match subject type. Pattern type: {pattern_type}. Match subject type: {subject_type}")]
    EnumPatternTypeMismatch {
        pattern_type: String,
        subject_type: String,
    },
    #[error("Pattern is unreachable.")]
    UnreachablePattern,
    #[error("Wildcard '..' can only be present once in an array pattern.")]
    DuplicateWildcard,
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    IncompatibleTypes { expected: String, received: String },
    #[error("expression has no type before type checking")]
    UntypedExpression,
    #[error("not implemented error")]
    NotImplementedError,
}
