use std::fmt;

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

use crate::error::InputError;

/// what the alarm entry shows before the user types anything
pub const PLACEHOLDER: &str = "HH:MM:SS";
pub const DEFAULT_SNOOZE_MINUTES: u32 = 5;
const TIME_FORMAT: &str = "%H:%M:%S";

/// where the alarm is in its life cycle.
/// a target only exists while armed or ringing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Armed(NaiveDateTime),
    /// the target matched and playback was requested
    Ringing(NaiveDateTime),
}

/// which day a freshly set alarm landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Day {
    Today,
    Tomorrow,
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => write!(f, "today"),
            Self::Tomorrow => write!(f, "tomorrow"),
        }
    }
}

/// what a single tick did to the alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// armed -> ringing, the caller should start the sound
    Ring,
    /// ringing -> idle, the matching minute passed without snooze or stop
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub target: NaiveDateTime,
    pub day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmState {
    phase: Phase,
    snooze_minutes: u32,
}

impl Default for AlarmState {
    fn default() -> Self {
        Self::new(DEFAULT_SNOOZE_MINUTES)
    }
}

/// Parse a 24 hour `HH:MM:SS` alarm entry.
///
/// # Errors
/// [`InputError::Placeholder`] if the entry is untouched,
/// [`InputError::Malformed`] if it is not a valid time of day.
pub fn parse_alarm_time(input: &str) -> Result<NaiveTime, InputError> {
    let input = input.trim();
    if input == PLACEHOLDER {
        return Err(InputError::Placeholder);
    }
    match NaiveTime::parse_from_str(input, TIME_FORMAT) {
        // chrono accepts :60 as a leap second, a wall clock never shows it
        Ok(time) if time.nanosecond() < 1_000_000_000 => Ok(time),
        _ => Err(InputError::Malformed(input.to_string())),
    }
}

/// Combine `time` with today's date, moving to tomorrow unless it is strictly after `now`.
#[must_use]
pub fn resolve_target(time: NaiveTime, now: NaiveDateTime) -> Scheduled {
    let today = now.date().and_time(time);
    if today > now {
        Scheduled {
            target: today,
            day: Day::Today,
        }
    } else {
        Scheduled {
            target: today + Duration::days(1),
            day: Day::Tomorrow,
        }
    }
}

#[must_use]
pub fn format_time(time: NaiveDateTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn same_minute(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.hour() == b.hour() && a.minute() == b.minute()
}

impl AlarmState {
    #[must_use]
    pub const fn new(snooze_minutes: u32) -> Self {
        Self {
            phase: Phase::Idle,
            snooze_minutes,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn target(&self) -> Option<NaiveDateTime> {
        match self.phase {
            Phase::Idle => None,
            Phase::Armed(target) | Phase::Ringing(target) => Some(target),
        }
    }

    #[must_use]
    pub const fn is_triggered(&self) -> bool {
        matches!(self.phase, Phase::Ringing(_))
    }

    #[must_use]
    pub const fn snooze_minutes(&self) -> u32 {
        self.snooze_minutes
    }

    /// Arm the alarm from a user entry. Replaces any previous alarm, ringing or not.
    ///
    /// # Errors
    /// see [`parse_alarm_time`], the current phase is kept on error
    pub fn set(&mut self, input: &str, now: NaiveDateTime) -> Result<Scheduled, InputError> {
        let time = parse_alarm_time(input)?;
        let scheduled = resolve_target(time, now);
        self.phase = Phase::Armed(scheduled.target);
        Ok(scheduled)
    }

    /// Evaluate the alarm against the wall clock, called once per tick.
    ///
    /// An armed alarm rings on the first tick inside the target's hour and minute
    /// that is at or past the target, so a late tick still rings.
    /// A ringing alarm that is left alone expires as soon as the wall clock leaves that minute.
    pub fn tick(&mut self, now: NaiveDateTime) -> Option<Transition> {
        match self.phase {
            Phase::Idle => None,
            Phase::Armed(target) if same_minute(now, target) && now >= target => {
                self.phase = Phase::Ringing(target);
                Some(Transition::Ring)
            }
            Phase::Armed(_) => None,
            Phase::Ringing(target) if !same_minute(now, target) => {
                self.phase = Phase::Idle;
                Some(Transition::Expired)
            }
            Phase::Ringing(_) => None,
        }
    }

    /// Re-arm a ringing alarm `snooze_minutes` after `now`.
    /// Returns the new target, or `None` if nothing was ringing.
    pub fn snooze(&mut self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        if !self.is_triggered() {
            return None;
        }
        let target = now + Duration::minutes(i64::from(self.snooze_minutes));
        self.phase = Phase::Armed(target);
        Some(target)
    }

    /// Clear the alarm whatever its phase, returns the phase it was in.
    pub fn stop(&mut self) -> Phase {
        std::mem::take(&mut self.phase)
    }
}
