use std::collections::VecDeque;

use chrono::NaiveDateTime;

use crate::{
    alarm::{format_time, AlarmState, Phase, Transition},
    communication::MessageType,
    error::{InputError, SoundError},
    sound::{SoundPlayer, Started},
};

/// a message the user has to acknowledge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Everything the window shows besides the clock, driven by the ui without knowing about it.
pub struct AlarmController {
    state: AlarmState,
    player: SoundPlayer,
    status: String,
    notices: VecDeque<Notice>,
}

impl AlarmController {
    #[must_use]
    pub fn new(snooze_minutes: u32, player: SoundPlayer) -> Self {
        Self {
            state: AlarmState::new(snooze_minutes),
            player,
            status: String::new(),
            notices: VecDeque::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AlarmState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// snooze and stop are only offered while ringing
    #[must_use]
    pub const fn controls_visible(&self) -> bool {
        self.state.is_triggered()
    }

    /// the oldest notice not yet dismissed
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    pub fn set_alarm(&mut self, input: &str, now: NaiveDateTime) {
        match self.state.set(input, now) {
            Ok(scheduled) => {
                log::info!("alarm successfully set for: {}", scheduled.target);
                self.status = format!(
                    "Alarm set for {} at {}",
                    scheduled.day,
                    format_time(scheduled.target)
                );
            }
            Err(e) => {
                log::warn!("rejected alarm time {input:?}: {e:?}");
                if matches!(e, InputError::Malformed(_)) {
                    self.status = "Invalid format! Use HH:MM:SS".to_string();
                }
                self.notify(Notice::new("Input Error", e.to_string()));
            }
        }
    }

    /// one clock tick: collect playback results, then evaluate the alarm
    pub fn tick(&mut self, now: NaiveDateTime) {
        for message in self.player.poll() {
            match message.kind {
                MessageType::Finished => log::debug!("playback {} finished", message.playback_id),
                MessageType::Failed(e) => self.sound_failed(&e),
            }
        }
        match self.state.tick(now) {
            Some(Transition::Ring) => {
                log::info!("alarm triggered!");
                self.status = "ALARM! ALARM! ALARM!".to_string();
                self.ring();
            }
            Some(Transition::Expired) => {
                log::info!("alarm wasn't snoozed or stopped, clearing it");
                self.status.clear();
            }
            None => {}
        }
    }

    fn ring(&mut self) {
        match self.player.start() {
            Ok(Started::Playing(id)) => log::debug!("started playback {id}"),
            Ok(Started::AlreadyPlaying(id)) => {
                log::debug!("playback {id} still running, not starting another");
            }
            Err(e) => self.sound_failed(&e),
        }
    }

    fn sound_failed(&mut self, error: &SoundError) {
        match error {
            SoundError::Missing(_) => self.notify(Notice::new("Error", error.to_string())),
            SoundError::Playback(reason) => {
                self.notify(Notice::new(
                    "Audio Error",
                    format!("{error}\nEnsure the file is a valid audio file."),
                ));
                self.status = format!("Audio Error: {reason}");
            }
        }
    }

    pub fn snooze(&mut self, now: NaiveDateTime) {
        if let Some(target) = self.state.snooze(now) {
            log::info!("alarm snoozed. next alarm at: {target}");
            self.status = format!(
                "Snoozed for {} minutes. Next alarm at {}",
                self.state.snooze_minutes(),
                format_time(target)
            );
        }
    }

    pub fn stop(&mut self) {
        if self.state.stop() == Phase::Idle {
            return;
        }
        // a playing sound can't be cut short
        self.notify(Notice::new(
            "Alarm Stopped",
            "Alarm will finish playing its current sound. Set a new alarm or snooze.",
        ));
        self.status = "Alarm stopped. Set a new alarm.".to_string();
        log::info!("alarm state reset");
    }
}

#[cfg(test)]
mod tests {
    use std::{
        path::{Path, PathBuf},
        sync::Arc,
        thread,
        time::Duration,
    };

    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::sound::{SimulatedBackend, SoundBackend};

    struct BrokenBackend;

    impl SoundBackend for BrokenBackend {
        fn play(&self, _path: &Path) -> Result<(), SoundError> {
            Err(SoundError::Playback("device busy".to_string()))
        }
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn controller(backend: Arc<dyn SoundBackend>, sound: PathBuf) -> AlarmController {
        AlarmController::new(5, SoundPlayer::new(backend, sound))
    }

    fn with_sound() -> (tempfile::NamedTempFile, AlarmController) {
        let file = tempfile::NamedTempFile::new().unwrap();
        let controller = controller(Arc::new(SimulatedBackend), file.path().to_path_buf());
        (file, controller)
    }

    #[test]
    fn set_reports_day() {
        let (_file, mut controller) = with_sound();
        controller.set_alarm("10:00:00", at(9, 0, 0));
        assert_eq!(controller.status(), "Alarm set for today at 10:00:00");
        controller.set_alarm("08:00:00", at(9, 0, 0));
        assert_eq!(controller.status(), "Alarm set for tomorrow at 08:00:00");
        assert_eq!(controller.notice(), None);
    }

    #[test]
    fn bad_input_shows_notice_and_keeps_alarm() {
        let (_file, mut controller) = with_sound();
        controller.set_alarm("10:00:00", at(9, 0, 0));
        let armed = controller.state().clone();

        controller.set_alarm("HH:MM:SS", at(9, 0, 0));
        assert_eq!(controller.notice().unwrap().title, "Input Error");
        assert_eq!(controller.status(), "Alarm set for today at 10:00:00");

        controller.set_alarm("noon", at(9, 0, 0));
        assert_eq!(controller.status(), "Invalid format! Use HH:MM:SS");
        assert_eq!(controller.state(), &armed);

        controller.dismiss_notice();
        controller.dismiss_notice();
        assert_eq!(controller.notice(), None);
    }

    #[test]
    fn ringing_shows_controls_until_minute_passes() {
        let (_file, mut controller) = with_sound();
        controller.set_alarm("10:00:00", at(9, 0, 0));
        controller.tick(at(9, 59, 59));
        assert!(!controller.controls_visible());
        controller.tick(at(10, 0, 0));
        assert!(controller.controls_visible());
        assert_eq!(controller.status(), "ALARM! ALARM! ALARM!");
        controller.tick(at(10, 1, 0));
        assert!(!controller.controls_visible());
        assert_eq!(controller.status(), "");
        assert_eq!(controller.state().phase(), Phase::Idle);
    }

    #[test]
    fn snooze_hides_controls_and_rearms() {
        let (_file, mut controller) = with_sound();
        controller.set_alarm("10:00:00", at(9, 0, 0));
        controller.tick(at(10, 0, 0));
        controller.snooze(at(10, 0, 20));
        assert!(!controller.controls_visible());
        assert_eq!(
            controller.status(),
            "Snoozed for 5 minutes. Next alarm at 10:05:20"
        );
        assert_eq!(controller.state().phase(), Phase::Armed(at(10, 5, 20)));
    }

    #[test]
    fn stop_clears_alarm_and_notifies() {
        let (_file, mut controller) = with_sound();
        controller.set_alarm("10:00:00", at(9, 0, 0));
        controller.tick(at(10, 0, 0));
        controller.stop();
        assert!(!controller.controls_visible());
        assert_eq!(controller.state().target(), None);
        assert_eq!(controller.status(), "Alarm stopped. Set a new alarm.");
        assert_eq!(controller.notice().unwrap().title, "Alarm Stopped");
    }

    #[test]
    fn stop_without_alarm_does_nothing() {
        let (_file, mut controller) = with_sound();
        controller.stop();
        assert_eq!(controller.notice(), None);
        assert_eq!(controller.status(), "");
    }

    #[test]
    fn missing_sound_keeps_alarm_ringing() {
        let mut controller = controller(
            Arc::new(SimulatedBackend),
            PathBuf::from("no-such-alarm-sound.wav"),
        );
        controller.set_alarm("10:00:00", at(9, 0, 0));
        controller.tick(at(10, 0, 0));
        assert_eq!(controller.state().phase(), Phase::Ringing(at(10, 0, 0)));
        assert_eq!(controller.notice().unwrap().title, "Error");
        assert_eq!(controller.status(), "ALARM! ALARM! ALARM!");
    }

    #[test]
    fn playback_failure_reported_on_later_tick() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut controller = controller(Arc::new(BrokenBackend), file.path().to_path_buf());
        let target = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        controller.set_alarm(&format_time(at(10, 0, 0)), at(9, 0, 0));
        controller.tick(at(10, 0, 0));

        let mut second = 1;
        while controller.notice().is_none() && second < 59 {
            thread::sleep(Duration::from_millis(20));
            controller.tick(at(10, 0, second));
            second += 1;
        }
        assert_eq!(controller.notice().unwrap().title, "Audio Error");
        assert_eq!(controller.status(), "Audio Error: device busy");
        assert_eq!(
            controller.state().target().map(|t| t.time()),
            Some(target)
        );
        assert!(controller.controls_visible());
    }
}
