use eframe::egui::{self, Button, Color32, Key, RichText, Widget};

use crate::{alarm::PLACEHOLDER, widgets::TimeEntry};

const SET_FILL: Color32 = Color32::from_rgb(0x4c, 0xaf, 0x50);
const SNOOZE_FILL: Color32 = Color32::from_rgb(0xff, 0xc1, 0x07);
const STOP_FILL: Color32 = Color32::from_rgb(0xf4, 0x43, 0x36);

/// what the user asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmAction {
    Set,
    Snooze,
    Stop,
}

/// the alarm time entry and the buttons beneath it
pub struct AlarmEditor {
    pub input: String,
}

impl Default for AlarmEditor {
    fn default() -> Self {
        Self {
            input: PLACEHOLDER.to_string(),
        }
    }
}

fn colored_button(text: &str, fill: Color32, text_color: Color32) -> Button<'static> {
    Button::new(RichText::new(text).size(14.0).color(text_color)).fill(fill)
}

impl AlarmEditor {
    /// `ringing` decides if snooze and stop are shown
    pub fn render(&mut self, ui: &mut egui::Ui, ringing: bool) -> Option<AlarmAction> {
        let mut action = None;
        ui.vertical_centered(|ui| {
            let entry = TimeEntry::new(&mut self.input, PLACEHOLDER)
                .font_size(18.0)
                .desired_width(120.0)
                .ui(ui);
            // enter in the entry works like the set button
            if entry.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                action = Some(AlarmAction::Set);
            }
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                // center the row by hand, egui can't center a horizontal layout of unknown width
                let buttons = if ringing { 3.0 } else { 1.0 };
                ui.add_space((ui.available_width() - 100.0 * buttons).max(0.0) / 2.0);
                if colored_button("Set Alarm", SET_FILL, Color32::WHITE)
                    .ui(ui)
                    .clicked()
                {
                    action = Some(AlarmAction::Set);
                }
                if ringing {
                    if colored_button("Snooze", SNOOZE_FILL, Color32::BLACK)
                        .ui(ui)
                        .clicked()
                    {
                        action = Some(AlarmAction::Snooze);
                    }
                    if colored_button("Stop Alarm", STOP_FILL, Color32::WHITE)
                        .ui(ui)
                        .clicked()
                    {
                        action = Some(AlarmAction::Stop);
                    }
                }
            });
        });
        action
    }
}
