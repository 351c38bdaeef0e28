use chrono::{DateTime, Utc};

use super::Session;

/// Sessions split the way the session list shows them.
#[derive(Debug, Default)]
pub struct SessionBoard<'a> {
    /// Not yet over, soonest first.
    pub upcoming: Vec<&'a Session>,
    /// Over, most recent first.
    pub past: Vec<&'a Session>,
}

pub fn partition_sessions(sessions: &[Session], now: DateTime<Utc>) -> SessionBoard<'_> {
    let (mut upcoming, mut past): (Vec<_>, Vec<_>) =
        sessions.iter().partition(|s| now < s.end_time());
    upcoming.sort_by_key(|s| s.start_time());
    past.sort_by_key(|s| std::cmp::Reverse(s.start_time()));
    SessionBoard { upcoming, past }
}
