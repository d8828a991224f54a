//! Standard exit codes for the abogus binary

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Generic error (avoid using - be more specific)
pub const EXIT_ERROR: i32 = 1;

/// Panic or unrecoverable error
pub const EXIT_PANIC: i32 = 101;

/// Invalid command-line arguments
pub const EXIT_INVALID_ARGS: i32 = 105;

/// I/O error while writing output
pub const EXIT_IO_ERROR: i32 = 106;

/// Configuration error (malformed ABOGUS_* environment values)
pub const EXIT_CONFIG_ERROR: i32 = 109;

/// Map a signing error to the exit code the binary reports
pub fn exit_code_for(err: &crate::SignError) -> i32 {
    use crate::SignError;

    match err {
        SignError::InvalidArguments(_) | SignError::UnknownAlphabet(_) | SignError::EmptyKey => {
            EXIT_INVALID_ARGS
        }
        SignError::Config(_) => EXIT_CONFIG_ERROR,
        SignError::IoError(_) => EXIT_IO_ERROR,
        SignError::JsonError(_) => EXIT_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SignError;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code_for(&SignError::EmptyKey), EXIT_INVALID_ARGS);
        assert_eq!(exit_code_for(&SignError::config("bad")), EXIT_CONFIG_ERROR);
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert_eq!(exit_code_for(&SignError::IoError(io)), EXIT_IO_ERROR);
    }
}
