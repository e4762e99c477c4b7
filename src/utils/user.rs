//! Identity of the invoking user, for diagnostics.

use nix::unistd::{Uid, User};

/// Name of the effective user.
///
/// Looks the effective uid up in the user database, then falls back to `$USER`,
/// then to the bare uid.
pub fn current_username() -> String {
    let uid = Uid::effective();
    match User::from_uid(uid) {
        Ok(Some(user)) => user.name,
        _ => std::env::var("USER")
            .ok()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("uid {uid}")),
    }
}
