use std::path::PathBuf;
use thiserror::Error;

/// Errors with a meaning of their own. Everything else travels as plain
/// `anyhow` context.
#[derive(Debug, Error)]
pub enum RenamerError {
    /// A project path given on the command line does not exist
    #[error("invalid path: {} does not exist or is not a directory", .0.display())]
    InvalidPath(PathBuf),

    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// The rename list is missing `imports_to_move` or has bad entries
    #[error("malformed rename list {}: {reason}", .path.display())]
    MalformedRenameList { path: PathBuf, reason: String },

    /// Per-file read/write failure while rewriting. Recoverable.
    #[error("failed to {action} {}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        action: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },
}

impl RenamerError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedRenameList {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Process exit code for this error kind
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidPath(_) => 2,
            Self::BranchNotFound(_) => 3,
            Self::MalformedRenameList { .. } => 4,
            Self::FileIo { .. } | Self::Git { .. } => 1,
        }
    }
}

/// Map any error coming out of an operation to an exit code.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<RenamerError>())
        .map_or(1, RenamerError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_codes() {
        assert_eq!(RenamerError::InvalidPath("x".into()).exit_code(), 2);
        assert_eq!(RenamerError::BranchNotFound("dev".into()).exit_code(), 3);
        assert_eq!(RenamerError::malformed("list.json", "nope").exit_code(), 4);
    }

    #[test]
    fn test_exit_code_survives_context() {
        let result: anyhow::Result<()> = Err(RenamerError::BranchNotFound("feature".into()))
            .context("Failed to analyze project");
        let err = result.unwrap_err();
        assert_eq!(exit_code_for(&err), 3);
    }

    #[test]
    fn test_untyped_error_is_generic_failure() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn test_display() {
        let err = RenamerError::malformed("list.json", "missing `imports_to_move`");
        assert_eq!(
            err.to_string(),
            "malformed rename list list.json: missing `imports_to_move`"
        );
    }
}
