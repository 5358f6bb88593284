// Consistent exit codes for the collabwrite CLI.
//
//   0  = success
//   1  = general error
//   2  = usage/argument error
//   3  = local storage error
//   4  = document or branch not found
//   13 = suggestion service error

use std::process;

/// Named exit codes for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Error = 1,
    Usage = 2,
    Storage = 3,
    NotFound = 4,
    Network = 13,
}

pub const DOCUMENT_NOT_FOUND: &str = "DOCUMENT_NOT_FOUND";
pub const BRANCH_NOT_FOUND: &str = "BRANCH_NOT_FOUND";
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const SUGGESTION_FAILED: &str = "SUGGESTION_FAILED";

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Map an anyhow error to an exit code by looking for a [`CommandError`].
    pub fn from_error(err: &anyhow::Error) -> Self {
        if let Some(command_err) = command_error(err) {
            return Self::from_error_code(command_err.code);
        }
        for cause in err.chain() {
            if cause.downcast_ref::<std::io::Error>().is_some() {
                return Self::Storage;
            }
        }
        Self::Error
    }

    /// Map a [`CommandError`] code to an exit code.
    pub fn from_error_code(code: &str) -> Self {
        match code {
            DOCUMENT_NOT_FOUND | BRANCH_NOT_FOUND => Self::NotFound,
            INVALID_ARGUMENT => Self::Usage,
            STORAGE_ERROR => Self::Storage,
            SUGGESTION_FAILED => Self::Network,
            _ => Self::Error,
        }
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code.code() as u8)
    }
}

/// A typed command failure that can sit anywhere in an `anyhow::Error`,
/// either as the error itself or as context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    pub code: &'static str,
    pub message: String,
}

impl CommandError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

/// The outermost [`CommandError`] in `err`, whether raised directly or
/// attached with `.context(..)`.
pub fn command_error(err: &anyhow::Error) -> Option<&CommandError> {
    err.downcast_ref::<CommandError>()
        .or_else(|| err.chain().find_map(|cause| cause.downcast_ref::<CommandError>()))
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::Error.code(), 1);
        assert_eq!(ExitCode::Usage.code(), 2);
        assert_eq!(ExitCode::Storage.code(), 3);
        assert_eq!(ExitCode::NotFound.code(), 4);
        assert_eq!(ExitCode::Network.code(), 13);
    }

    #[test]
    fn from_error_code_mapping() {
        assert_eq!(ExitCode::from_error_code(DOCUMENT_NOT_FOUND), ExitCode::NotFound);
        assert_eq!(ExitCode::from_error_code(BRANCH_NOT_FOUND), ExitCode::NotFound);
        assert_eq!(ExitCode::from_error_code(INVALID_ARGUMENT), ExitCode::Usage);
        assert_eq!(ExitCode::from_error_code(STORAGE_ERROR), ExitCode::Storage);
        assert_eq!(ExitCode::from_error_code(SUGGESTION_FAILED), ExitCode::Network);
        assert_eq!(ExitCode::from_error_code("SOMETHING_ELSE"), ExitCode::Error);
    }

    #[test]
    fn command_error_is_found_directly() {
        let err =
            anyhow::Error::new(CommandError::new(DOCUMENT_NOT_FOUND, "document `9` not found"));
        assert_eq!(ExitCode::from_error(&err), ExitCode::NotFound);
    }

    #[test]
    fn command_error_is_found_as_context() {
        let err = Err::<(), _>(anyhow::anyhow!("disk I/O error"))
            .context(CommandError::new(STORAGE_ERROR, "failed to open local storage"))
            .unwrap_err();
        assert_eq!(ExitCode::from_error(&err), ExitCode::Storage);
        assert_eq!(command_error(&err).unwrap().code, STORAGE_ERROR);
    }

    #[test]
    fn io_error_is_storage() {
        let err = anyhow::Error::new(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        ));
        assert_eq!(ExitCode::from_error(&err), ExitCode::Storage);
    }

    #[test]
    fn from_error_generic_is_error() {
        let err = anyhow::anyhow!("something went wrong");
        assert_eq!(ExitCode::from_error(&err), ExitCode::Error);
    }
}
