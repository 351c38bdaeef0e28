use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use mentorslot_core::session::partition_sessions;
use mentorslot_core::{Config, Review, Session, SessionPhase, SessionRecord};
use serde::Serialize;

use super::{print_json, Backend};

#[derive(Subcommand)]
pub enum SessionAction {
    /// List sessions split into upcoming and past
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show phase and countdown for one session
    Status {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the meeting link if the session can be joined now
    Join { id: String },
    /// Review an ended session
    Review {
        id: String,
        /// Rating as criterion=value (1-5), repeatable
        #[arg(long = "rating", value_parser = parse_rating, required = true)]
        ratings: Vec<(String, u8)>,
        #[arg(long, default_value = "")]
        feedback: String,
    },
    /// Record a booked session in the local store
    Import {
        /// Start time (RFC 3339)
        start: DateTime<Utc>,
        /// End time (RFC 3339)
        end: DateTime<Utc>,
        /// Session id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        meeting_url: Option<String>,
    },
}

/// Session as shown to the user at a given instant.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView<'a> {
    id: &'a str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    phase: SessionPhase,
    label: String,
    joinable: bool,
}

impl<'a> SessionView<'a> {
    fn of(session: &'a Session, now: DateTime<Utc>) -> Self {
        Self {
            id: session.id(),
            start_time: session.start_time(),
            end_time: session.end_time(),
            phase: session.phase_at(now),
            label: session.time_label(now),
            joinable: session.is_joinable_at(now),
        }
    }

    fn print(&self) {
        println!(
            "{}  {} - {}  {:<9} {}",
            self.id,
            self.start_time.format("%Y-%m-%d %H:%M"),
            self.end_time.format("%H:%M"),
            self.phase.to_string(),
            self.label
        );
    }
}

#[derive(Serialize)]
struct BoardView<'a> {
    upcoming: Vec<SessionView<'a>>,
    past: Vec<SessionView<'a>>,
}

fn parse_rating(raw: &str) -> Result<(String, u8), String> {
    let (criterion, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected criterion=value, got '{raw}'"))?;
    let criterion = criterion.trim();
    if criterion.is_empty() {
        return Err(format!("missing criterion in '{raw}'"));
    }
    let value = value
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("rating must be a number: '{raw}'"))?;
    Ok((criterion.to_string(), value))
}

fn load_sessions(backend: &Backend) -> Result<Vec<Session>, Box<dyn std::error::Error>> {
    let mut sessions = Vec::new();
    for record in backend.sessions().list_sessions()? {
        match Session::try_from(record) {
            Ok(session) => sessions.push(session),
            Err(e) => tracing::warn!(error = %e, "skipping malformed session record"),
        }
    }
    Ok(sessions)
}

fn find(sessions: Vec<Session>, id: &str) -> Result<Session, Box<dyn std::error::Error>> {
    sessions
        .into_iter()
        .find(|s| s.id() == id)
        .ok_or_else(|| format!("session not found: {id}").into())
}

pub fn run(action: SessionAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let backend = Backend::open(config)?;
    let now = Utc::now();

    match action {
        SessionAction::List { json } => {
            let sessions = load_sessions(&backend)?;
            let board = partition_sessions(&sessions, now);
            let view = BoardView {
                upcoming: board.upcoming.iter().map(|s| SessionView::of(s, now)).collect(),
                past: board.past.iter().map(|s| SessionView::of(s, now)).collect(),
            };
            if json {
                return print_json(&view);
            }
            println!("upcoming:");
            view.upcoming.iter().for_each(|v| v.print());
            println!("past:");
            view.past.iter().for_each(|v| v.print());
        }
        SessionAction::Status { id, json } => {
            let session = find(load_sessions(&backend)?, &id)?;
            let view = SessionView::of(&session, now);
            if json {
                return print_json(&view);
            }
            view.print();
        }
        SessionAction::Join { id } => {
            let session = find(load_sessions(&backend)?, &id)?;
            let ticket = session.join(now)?;
            match ticket.meeting_url {
                Some(url) => println!("{url}"),
                None => println!("session {} is live (no meeting link)", ticket.session_id),
            }
        }
        SessionAction::Review {
            id,
            ratings,
            feedback,
        } => {
            let mut session = find(load_sessions(&backend)?, &id)?;
            let review = Review::new(ratings.into_iter().collect::<BTreeMap<_, _>>(), feedback)?;
            session.submit_review(backend.sessions(), review, now)?;
            println!("review submitted for {id}");
        }
        SessionAction::Import {
            start,
            end,
            id,
            meeting_url,
        } => {
            let store = backend
                .local()
                .ok_or("import is only available with storage.mode = local")?;
            let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let mut session = Session::new(id, start, end)?;
            if let Some(url) = meeting_url {
                session = session.with_meeting_url(url);
            }
            let record: SessionRecord = session.to_record();
            store.upsert_session(&record)?;
            tracing::info!(session = %record.id, "session imported");
            println!("{}", record.id);
        }
    }
    Ok(())
}
