//! Error types for lanevec operations.
//!
//! This module defines custom error types that provide better error handling
//! than panicking, allowing applications to gracefully handle failures.
//!
//! Out-of-memory is the one failure deliberately not represented here: buffer
//! allocation goes through [`std::alloc::handle_alloc_error`], which aborts,
//! because there is no meaningful way to continue once the allocator gives up.

use std::fmt;

/// Errors that can occur during lanevec operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaneVecError {
    /// Input length exceeds the implementation-defined maximum.
    LengthLimitExceeded {
        /// The length that was requested.
        len: usize,
        /// The maximum logical length for this element type.
        max: usize,
    },
    /// An input value could not be converted to the array's element type.
    InvalidElement {
        /// Position of the offending value in the input sequence.
        index: usize,
        /// Human-readable error message.
        message: String,
    },
    /// Integer division by zero at a specific element position.
    DivideByZero {
        /// Position of the zero divisor in the operation's index space.
        index: usize,
    },
}

impl fmt::Display for LaneVecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneVecError::LengthLimitExceeded { len, max } => write!(
                f,
                "Length limit exceeded: requested {} elements, maximum is {}",
                len, max
            ),
            LaneVecError::InvalidElement { index, message } => {
                write!(f, "Invalid element at index {}: {}", index, message)
            }
            LaneVecError::DivideByZero { index } => {
                write!(f, "Integer division by zero at index {}", index)
            }
        }
    }
}

impl std::error::Error for LaneVecError {}

/// Result type alias for lanevec operations.
pub type Result<T> = std::result::Result<T, LaneVecError>;

/// Creates a length limit error.
pub fn length_limit_error(len: usize, max: usize) -> LaneVecError {
    LaneVecError::LengthLimitExceeded { len, max }
}

/// Creates an invalid element error.
pub fn invalid_element_error(index: usize, message: impl Into<String>) -> LaneVecError {
    LaneVecError::InvalidElement {
        index,
        message: message.into(),
    }
}

/// Creates a division-by-zero error.
pub fn divide_by_zero_error(index: usize) -> LaneVecError {
    LaneVecError::DivideByZero { index }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_limit_error_display() {
        let error = length_limit_error(1_000_000, 65_536);
        let display = format!("{}", error);
        assert!(display.contains("Length limit exceeded"));
        assert!(display.contains("1000000"));
        assert!(display.contains("65536"));
    }

    #[test]
    fn test_invalid_element_error_display() {
        let error = invalid_element_error(3, "NaN is not representable as i32");
        let display = format!("{}", error);
        assert!(display.contains("Invalid element at index 3"));
        assert!(display.contains("NaN is not representable as i32"));
    }

    #[test]
    fn test_divide_by_zero_error_display() {
        let error = divide_by_zero_error(17);
        let display = format!("{}", error);
        assert!(display.contains("Integer division by zero"));
        assert!(display.contains("17"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = divide_by_zero_error(4);
        let error2 = divide_by_zero_error(4);
        let error3 = divide_by_zero_error(5);

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = length_limit_error(10, 5);

        // Should implement Error trait
        let _: &dyn std::error::Error = &error;

        // Should have source method (returns None for our simple errors)
        assert!(std::error::Error::source(&error).is_none());
    }
}
