//! # CinePass Account Service
//!
//! `cinepass` is the account backend for CinePass. It handles user signup,
//! email verification, and sign-in.
//!
//! ## Account Lifecycle
//!
//! Accounts move through a three-state lifecycle: created (unverified), a
//! pending one-time code emailed to the user, and verified. The `verified`
//! flag is monotonic; nothing in this service ever clears it.
//!
//! - **Signup** stores a salted password hash (never the plaintext), issues a
//!   short-lived 6-hex-character code, and emails it to the address on file.
//!   Email uniqueness is enforced by the database, not by a lookup race.
//! - **Verify** consumes the code: an exact `(email, code)` match inside its
//!   time-to-live activates the account and deletes the matched code so it
//!   cannot be replayed. Expired codes are indistinguishable from absent ones.
//! - **Sign-in** checks the password against the stored hash and returns a
//!   stateless acknowledgment. No session or token is issued. Unknown emails
//!   and wrong passwords produce the same response to avoid account probing.
//!
//! Outbound email goes through a mail relay HTTP API; without a configured
//! relay the service logs the message instead, which is the local-dev mode.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
