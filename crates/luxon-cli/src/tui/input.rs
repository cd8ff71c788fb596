//! Keyboard input handling for the TUI.
//!
//! # Key Bindings
//!
//! | Key             | Action                         |
//! |-----------------|--------------------------------|
//! | `q` / `Ctrl+C`  | Quit                           |
//! | `m` / `Space`   | Toggle test mode               |
//! | `←` / `→`       | Test value -10 / +10 lux       |
//! | `Shift+←/→`     | Test value -100 / +100 lux     |
//! | `1` `2` `3`     | Test presets (100, 300, 600)   |
//! | `r`             | Recommendations                |
//! | `i`             | Information                    |
//! | `t`             | Test mode panel                |
//! | `?`             | Help                           |
//! | `Esc` / `Enter` | Close dialog                   |

use crossterm::event::{KeyCode, KeyModifiers};
use luxon_core::{Command, TEST_PRESETS, TEST_VALUE_STEP, clamp_test_value};

use super::app::{App, Overlay};

/// Slider steps moved by a Shift+arrow press.
const LARGE_STEP: i32 = 10;

/// User actions that can be triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleOverlay(Overlay),
    CloseOverlay,
    /// Switch between live and test input.
    ToggleTestMode,
    /// Move the slider by this many steps.
    StepTestValue(i32),
    /// Jump to a preset from [`TEST_PRESETS`].
    ApplyPreset(usize),
    None,
}

/// Map a key press to an action.
pub fn handle_key(key: KeyCode, modifiers: KeyModifiers, overlay: Option<Overlay>) -> Action {
    let steps = if modifiers.contains(KeyModifiers::SHIFT) {
        LARGE_STEP
    } else {
        1
    };

    match key {
        KeyCode::Esc | KeyCode::Enter if overlay.is_some() => Action::CloseOverlay,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('m') | KeyCode::Char(' ') => Action::ToggleTestMode,
        KeyCode::Left | KeyCode::Char('-') => Action::StepTestValue(-steps),
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => Action::StepTestValue(steps),
        KeyCode::Char('1') => Action::ApplyPreset(0),
        KeyCode::Char('2') => Action::ApplyPreset(1),
        KeyCode::Char('3') => Action::ApplyPreset(2),
        KeyCode::Char('r') => Action::ToggleOverlay(Overlay::Recommendations),
        KeyCode::Char('i') => Action::ToggleOverlay(Overlay::Info),
        KeyCode::Char('t') => Action::ToggleOverlay(Overlay::TestMode),
        KeyCode::Char('?') => Action::ToggleOverlay(Overlay::Help),
        _ => Action::None,
    }
}

/// Snap `value` to the slider grid, move it by `steps` and clamp.
pub fn stepped_test_value(value: f32, steps: i32) -> f32 {
    let position = (value / TEST_VALUE_STEP).round() + steps as f32;
    clamp_test_value(position * TEST_VALUE_STEP)
}

/// Apply an action to the application state.
///
/// Returns a command for the background worker when the action changes
/// monitor state.
pub fn apply_action(app: &mut App, action: Action) -> Option<Command> {
    match action {
        Action::Quit => {
            app.should_quit = true;
            None
        }
        Action::ToggleOverlay(overlay) => {
            app.toggle_overlay(overlay);
            None
        }
        Action::CloseOverlay => {
            app.close_overlay();
            None
        }
        Action::ToggleTestMode => Some(if app.mode.is_test() {
            Command::ExitTest
        } else {
            Command::EnterTest {
                test_value: app.test_value,
            }
        }),
        Action::StepTestValue(steps) => {
            if !app.mode.is_test() {
                app.push_status_message("Değeri ayarlamak için önce test modunu açın (m)");
                return None;
            }
            app.test_value = stepped_test_value(app.test_value, steps);
            Some(Command::SetTestValue {
                value: app.test_value,
            })
        }
        Action::ApplyPreset(index) => {
            let preset = TEST_PRESETS.get(index)?;
            if !app.mode.is_test() {
                app.push_status_message("Değeri ayarlamak için önce test modunu açın (m)");
                return None;
            }
            app.test_value = preset.lux;
            Some(Command::SetTestValue { value: preset.lux })
        }
        Action::None => None,
    }
}
