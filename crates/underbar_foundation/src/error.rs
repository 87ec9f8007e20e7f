//! Error types for the Underbar system.
//!
//! Every fallible operation returns [`Error`]: a categorized [`ErrorKind`]
//! plus optional [`ErrorContext`] naming the operation and argument.

use std::fmt;

use thiserror::Error;

use crate::types::Type;

/// The main error type for Underbar operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records the operation that raised this error, keeping any context
    /// already attached.
    #[must_use]
    pub fn in_operation(mut self, operation: &'static str) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_operation(operation));
        self
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(message.into()))
    }

    /// Creates an unsupported cache key error.
    #[must_use]
    pub fn unsupported_key(actual: Type) -> Self {
        Self::new(ErrorKind::UnsupportedKey(actual))
    }

    /// Creates a semantic limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: SemanticLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }

    /// Creates an error raised by a caller-supplied function.
    #[must_use]
    pub fn callback(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Callback(message.into()))
    }

    /// Returns the operation recorded in the context, if any.
    #[must_use]
    pub fn operation(&self) -> Option<&'static str> {
        self.context.as_ref().and_then(|ctx| ctx.operation)
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A value had the wrong type for the operation.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// An argument combination has no defined result.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A value cannot be used as a cache key.
    #[error("unsupported cache key of type {0}")]
    UnsupportedKey(Type),

    /// Semantic limit exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(SemanticLimit),

    /// Error raised by a caller-supplied function.
    #[error("callback failed: {0}")]
    Callback(String),
}

/// Configured limits that an operation can exceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticLimit {
    /// Sequence nesting deeper than flatten allows.
    MaxFlattenDepth {
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for SemanticLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxFlattenDepth { limit } => {
                write!(f, "max flatten depth ({limit}) exceeded")
            }
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the combinator or decorator that failed.
    pub operation: Option<&'static str>,
    /// Position of the offending argument, for variadic operations.
    pub argument: Option<usize>,
    /// Nested operations, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name, pushing any previous one onto the stack.
    #[must_use]
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if let Some(previous) = self.operation.replace(operation) {
            self.stack.push(previous.to_string());
        }
        self
    }

    /// Sets the argument position.
    #[must_use]
    pub fn with_argument(mut self, index: usize) -> Self {
        self.argument = Some(index);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = self.operation {
            write!(f, "in {operation}")?;
            if let Some(index) = self.argument {
                write!(f, " (argument {index})")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
