use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for query construction.
///
/// Every kind describes a programming error caught before a filter is handed
/// to an executor. None of them is meant to be retried.
///
/// # Examples
///
/// ```rust,ignore
/// use odm_query::errors::{QueryError, ErrorKind, QueryResult};
///
/// fn example() -> QueryResult<()> {
///     Err(QueryError::new("Field is not registered", ErrorKind::FieldNotRegistered))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// The accessor is not part of its owner's field registry
    FieldNotRegistered,
    /// The accessor is registered under a different declared type
    TypeMismatch,
    /// The operation is not valid for its input (e.g. combining zero expressions)
    InvalidOperation,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::FieldNotRegistered => write!(f, "Field not registered"),
            ErrorKind::TypeMismatch => write!(f, "Type mismatch"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error raised while building a query.
///
/// `QueryError` carries a message, its [ErrorKind], an optional cause and the
/// backtrace captured where it was created. The `Debug` output prints the
/// backtrace (or the cause chain) so a failing test points at the offending
/// `key!` or `resolve` call.
///
/// # Examples
///
/// ```rust,ignore
/// use odm_query::errors::{QueryError, ErrorKind};
///
/// let cause = QueryError::new("Field y is not registered", ErrorKind::FieldNotRegistered);
/// let err = QueryError::new_with_cause("Cannot build filter", ErrorKind::InvalidOperation, cause);
/// ```
#[derive(Clone)]
pub struct QueryError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<QueryError>>,
    backtrace: Atomic<Backtrace>,
}

impl QueryError {
    /// Creates a new `QueryError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        QueryError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `QueryError` wrapping the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: QueryError) -> Self {
        QueryError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&QueryError> {
        self.cause.as_deref()
    }
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// `QueryResult<T>` is shorthand for `Result<T, QueryError>`.
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_error_new_creates_error() {
        let error = QueryError::new("Field x is not registered", ErrorKind::FieldNotRegistered);
        assert_eq!(error.message, "Field x is not registered");
        assert_eq!(error.error_kind, ErrorKind::FieldNotRegistered);
        assert!(error.cause.is_none());
    }

    #[test]
    fn query_error_new_with_cause_creates_error() {
        let cause = QueryError::new("Field x is not registered", ErrorKind::FieldNotRegistered);
        let error = QueryError::new_with_cause("Cannot build filter", ErrorKind::InvalidOperation, cause);
        assert_eq!(error.kind(), &ErrorKind::InvalidOperation);
        assert_eq!(error.cause().map(|c| c.kind().clone()), Some(ErrorKind::FieldNotRegistered));
    }

    #[test]
    fn query_error_display_is_message() {
        let error = QueryError::new("Type mismatch on y", ErrorKind::TypeMismatch);
        assert_eq!(format!("{}", error), "Type mismatch on y");
    }

    #[test]
    fn query_error_debug_contains_message() {
        let error = QueryError::new("Type mismatch on y", ErrorKind::TypeMismatch);
        assert!(format!("{:?}", error).contains("Type mismatch on y"));
    }

    #[test]
    fn query_error_debug_formats_with_cause() {
        let cause = QueryError::new("inner", ErrorKind::InternalError);
        let error = QueryError::new_with_cause("outer", ErrorKind::InvalidOperation, cause);
        let formatted = format!("{:?}", error);
        assert!(formatted.contains("outer"));
        assert!(formatted.contains("Caused by: inner"));
    }

    #[test]
    fn query_error_source_returns_cause() {
        let cause = QueryError::new("inner", ErrorKind::InternalError);
        let error = QueryError::new_with_cause("outer", ErrorKind::InvalidOperation, cause);
        assert_eq!(error.source().map(|e| e.to_string()), Some("inner".to_string()));

        let plain = QueryError::new("plain", ErrorKind::InternalError);
        assert!(plain.source().is_none());
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::FieldNotRegistered.to_string(), "Field not registered");
        assert_eq!(ErrorKind::TypeMismatch.to_string(), "Type mismatch");
        assert_eq!(ErrorKind::InvalidOperation.to_string(), "Invalid operation");
        assert_eq!(ErrorKind::InternalError.to_string(), "Internal error");
    }
}
