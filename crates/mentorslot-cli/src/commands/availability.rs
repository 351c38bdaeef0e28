use chrono::{NaiveDate, Utc};
use clap::{Subcommand, ValueEnum};
use mentorslot_core::{AvailabilityEditor, Config, DayKey, ScheduleCommand, Scheduler, SchedulerDocument};

use super::{print_json, Backend};

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum AvailabilityAction {
    /// Show the weekly schedule, settings and break dates
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Append a slot starting at 09:00
    AddSlot {
        /// Day key (mon..sun)
        day: DayKey,
    },
    /// Move a slot to a new start time
    UpdateSlot {
        day: DayKey,
        index: usize,
        /// New start as HH:MM
        start: String,
    },
    /// Remove one slot
    RemoveSlot { day: DayKey, index: usize },
    /// Remove every slot on a day
    ClearDay { day: DayKey },
    /// Turn a day on (one default slot) or off (no slots)
    ToggleDay {
        day: DayKey,
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Copy one day's slots to every day of the week
    CopyDay { source: DayKey },
    /// Set session length in minutes (30, 60 or 90)
    SetDuration { minutes: u32 },
    /// Set the per-day slot limit (1..=20)
    SetMax { max: u32 },
    /// Block a date (YYYY-MM-DD)
    AddBreak { date: NaiveDate },
    /// Unblock the break at the given index (see `show`)
    RemoveBreak { index: usize },
    /// List dates with bookable slots
    Openings {
        /// First date (defaults to today, UTC)
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long, default_value_t = 14)]
        days: u32,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: AvailabilityAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let backend = Backend::open(config)?;
    let editor = AvailabilityEditor::open(backend.snapshots())?;

    let command = match action {
        AvailabilityAction::Show { json } => {
            return show(editor.saved(), json);
        }
        AvailabilityAction::Openings { from, days, json } => {
            let from = from.unwrap_or_else(|| Utc::now().date_naive());
            let openings = editor.saved().openings(from, days);
            if json {
                return print_json(&openings);
            }
            if openings.is_empty() {
                println!("no openings");
            }
            for opening in openings {
                println!("{} {}  {}", opening.date, opening.day, join_slots(&opening.slots));
            }
            return Ok(());
        }
        AvailabilityAction::AddSlot { day } => ScheduleCommand::AddSlot { day },
        AvailabilityAction::UpdateSlot { day, index, start } => {
            ScheduleCommand::UpdateSlotStart { day, index, start }
        }
        AvailabilityAction::RemoveSlot { day, index } => ScheduleCommand::RemoveSlot { day, index },
        AvailabilityAction::ClearDay { day } => ScheduleCommand::ClearDay { day },
        AvailabilityAction::ToggleDay { day, state } => ScheduleCommand::SetDayAvailable {
            day,
            available: matches!(state, Toggle::On),
        },
        AvailabilityAction::CopyDay { source } => ScheduleCommand::CopyDaySchedule { source },
        AvailabilityAction::SetDuration { minutes } => ScheduleCommand::SetSessionDuration { minutes },
        AvailabilityAction::SetMax { max } => ScheduleCommand::SetMaxSlotsPerDay { max },
        AvailabilityAction::AddBreak { date } => ScheduleCommand::AddBreakDate { date },
        AvailabilityAction::RemoveBreak { index } => ScheduleCommand::RemoveBreakDate { index },
    };

    mutate(editor, &backend, &command)
}

/// One command per invocation: apply, save, report.
fn mutate(
    mut editor: AvailabilityEditor,
    backend: &Backend,
    command: &ScheduleCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    editor.apply(command)?;
    let saved = editor.save(backend.snapshots())?;
    tracing::info!(command = command.name(), "availability updated");
    show(saved, false)
}

fn show(scheduler: &Scheduler, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        return print_json(&SchedulerDocument::from(scheduler));
    }

    let settings = scheduler.config();
    println!("session duration: {}m", settings.session_duration_minutes());
    println!("max slots/day:    {}", settings.max_slots_per_day());
    for (day, slots) in scheduler.weekly().iter() {
        if slots.is_empty() {
            println!("{:<10} unavailable", day.label());
        } else {
            println!("{:<10} {}", day.label(), join_slots(slots));
        }
    }
    if !scheduler.breaks().is_empty() {
        println!("breaks:");
        for (i, entry) in scheduler.breaks().sorted() {
            if entry.start == entry.end {
                println!("  [{i}] {}", entry.start);
            } else {
                println!("  [{i}] {} .. {}", entry.start, entry.end);
            }
        }
    }
    Ok(())
}

fn join_slots(slots: &[mentorslot_core::Slot]) -> String {
    slots
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
