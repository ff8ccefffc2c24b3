//! Queue list names
//!
//! The producer side of the bot writes to these same keys, so they are
//! part of the wire contract and must not change.

/// Tracked pull requests waiting for a terminal state
pub const PENDING: &str = "hug:pullrequests";

/// Archive of closed pull requests
pub const CLOSED: &str = "hug:pullrequests:closed";

/// Archive of merged pull requests
pub const MERGED: &str = "hug:pullrequests:merged";

/// Completion records awaiting a status lookup and a notification
pub const FINISHED: &str = "hug:finished";

/// Completion records whose status could not be resolved in time
pub const FINISHED_FAILED: &str = "hug:finished:failed";
