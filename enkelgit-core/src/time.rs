//! the commit timestamp is a free-form human-readable string rather than a structured
//! epoch+offset pair — there is no author/signature concept in this system.

/// the current local time, formatted for a commit's `Date:` line.
pub fn now_human() -> String {
    chrono::offset::Local::now().format("%a %b %-d %Y %H:%M:%S %z").to_string()
}
