#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

use std::time::{Duration, Instant};

use alarm_edit::{AlarmAction, AlarmEditor};
use config::{Config, Theme};
use controller::AlarmController;
use eframe::egui::{
    self, Align2, Button, CentralPanel, Color32, Context, Frame, Layout, Margin, RichText,
    TopBottomPanel, Window,
};

pub mod alarm;
pub mod communication;
pub mod config;
pub mod controller;
pub mod error;
pub mod sound;
pub mod widgets;

/// implementation of the alarm entry and buttons for egui
pub mod alarm_edit;

const CLOCK_BACKGROUND: Color32 = Color32::from_rgb(0x28, 0x2c, 0x34);
const CLOCK_FOREGROUND: Color32 = Color32::from_rgb(0x61, 0xda, 0xfb);
const TICK: Duration = Duration::from_secs(1);

/// Lets through at most one tick per `period`, however often it is asked.
/// Late ticks are not made up for.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    period: Duration,
    last: Option<Instant>,
}

impl Ticker {
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    pub fn due(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.period => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

pub struct Clock {
    config: Config,
    controller: AlarmController,
    editor: AlarmEditor,
    ticker: Ticker,
    time_text: String,
}

impl Clock {
    #[must_use]
    pub fn new(config: Config, controller: AlarmController) -> Self {
        Self {
            config,
            controller,
            editor: AlarmEditor::default(),
            ticker: Ticker::new(TICK),
            time_text: String::new(),
        }
    }

    /// read the clock, redraw the time and check the alarm
    fn tick(&mut self) {
        let now = chrono::Local::now();
        self.time_text = now.format(&self.config.time_format).to_string();
        self.controller.tick(now.naive_local());
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.with_layout(Layout::right_to_left(egui::Align::Min), |ui| {
                let theme_btn = ui.add(Button::new({
                    if self.config.theme == Theme::Dark {
                        "🌞"
                    } else {
                        "🌙"
                    }
                }));
                if theme_btn.on_hover_text("switch theme").clicked() {
                    self.config.theme = !self.config.theme;
                }
            });
        });
    }

    fn render_notice(&mut self, ctx: &Context) {
        let Some(notice) = self.controller.notice() else {
            return;
        };
        let mut dismissed = false;
        Window::new(notice.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(notice.message.as_str());
                    ui.add_space(5.0);
                    dismissed = ui.button("OK").clicked();
                });
            });
        if dismissed {
            self.controller.dismiss_notice();
        }
    }

    fn handle(&mut self, action: AlarmAction) {
        let now = chrono::Local::now().naive_local();
        match action {
            AlarmAction::Set => self.controller.set_alarm(&self.editor.input, now),
            AlarmAction::Snooze => self.controller.snooze(now),
            AlarmAction::Stop => self.controller.stop(),
        }
    }
}

impl eframe::App for Clock {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ticker.due(Instant::now()) {
            self.tick();
        }
        // keep ticking even when nothing on screen changes
        ctx.request_repaint_after(TICK);

        ctx.set_visuals(egui::Visuals::from(self.config.theme));
        self.render_header(ctx);
        // everything behind a notice is disabled until it is dismissed
        let blocked = self.controller.notice().is_some();
        let mut action = None;
        CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                Frame::new()
                    .fill(CLOCK_BACKGROUND)
                    .inner_margin(Margin::same(20))
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.label(
                                RichText::new(&self.time_text)
                                    .size(40.0)
                                    .strong()
                                    .color(CLOCK_FOREGROUND),
                            );
                        });
                    });
                ui.add_space(10.0);
                action = self
                    .editor
                    .render(ui, self.controller.controls_visible());
                ui.add_space(5.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(self.controller.status()).size(12.0));
                });
            });
        });
        if let Some(action) = action {
            self.handle(action);
        }
        self.render_notice(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_immediate() {
        let mut ticker = Ticker::new(TICK);
        assert!(ticker.due(Instant::now()));
    }

    #[test]
    fn at_most_one_tick_per_period() {
        let mut ticker = Ticker::new(TICK);
        let start = Instant::now();
        assert!(ticker.due(start));
        assert!(!ticker.due(start + Duration::from_millis(16)));
        assert!(!ticker.due(start + Duration::from_millis(999)));
        assert!(ticker.due(start + Duration::from_millis(1000)));
        // late ticks restart the period instead of catching up
        assert!(ticker.due(start + Duration::from_millis(3500)));
        assert!(!ticker.due(start + Duration::from_millis(4000)));
        assert!(ticker.due(start + Duration::from_millis(4500)));
    }
}
