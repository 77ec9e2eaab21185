//! Message types and the state-transition function for the dashboard.
//!
//! Side-effects are commands the runtime executes; the update function
//! itself never performs I/O, keeping the state machine deterministic.

#![allow(missing_docs)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::Dataset;
use crate::tui::model::AppModel;

/// Cells scrolled per arrow-key press.
const SCROLL_STEP: u16 = 4;

/// Events that drive state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Periodic refresh-timer tick.
    Tick,
    /// Terminal key press.
    Key(KeyEvent),
    /// Pointer moved to a terminal cell.
    MouseMoved { col: u16, row: u16 },
    /// Terminal was resized.
    Resize { cols: u16, rows: u16 },
    /// A fresh dataset arrived (startup load or file-change reload).
    DataLoaded(Dataset),
}

/// Side-effects returned from the update function.
#[derive(Debug, PartialEq, Eq)]
pub enum Cmd {
    /// No side-effect.
    None,
    /// Check the results file for changes and deliver `DataLoaded`.
    CheckReload,
    /// Terminate the event loop.
    Quit,
}

/// Apply one message to the model, returning the side-effect to run.
pub fn update(model: &mut AppModel, msg: Msg) -> Cmd {
    match msg {
        Msg::Tick => {
            // Each view's per-tick update is a no-op today; the tick's
            // real work is the reload check plus the repaint that follows.
            model.tick += 1;
            Cmd::CheckReload
        }
        Msg::Key(key) => handle_key(model, key),
        Msg::MouseMoved { col, row } => {
            model.hover = Some((col, row));
            Cmd::None
        }
        Msg::Resize { cols, rows } => {
            model.on_resize(cols, rows);
            Cmd::None
        }
        Msg::DataLoaded(dataset) => {
            model.set_dataset(dataset);
            Cmd::None
        }
    }
}

fn handle_key(model: &mut AppModel, key: KeyEvent) -> Cmd {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            model.quit = true;
            Cmd::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            model.quit = true;
            Cmd::Quit
        }
        KeyCode::Char('?' | 'h') => {
            model.toggle_help();
            Cmd::None
        }
        KeyCode::Char('r') => Cmd::CheckReload,
        KeyCode::Left => {
            model.scroll_left(SCROLL_STEP);
            Cmd::None
        }
        KeyCode::Right => {
            model.scroll_right(SCROLL_STEP);
            Cmd::None
        }
        _ => Cmd::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::model::TestCase;

    fn test_model() -> AppModel {
        AppModel::new(Config::default(), "results.jsonl".to_owned(), (100, 30))
    }

    fn key(code: KeyCode) -> Msg {
        Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn tick_increments_and_schedules_reload_check() {
        let mut model = test_model();
        assert_eq!(update(&mut model, Msg::Tick), Cmd::CheckReload);
        assert_eq!(update(&mut model, Msg::Tick), Cmd::CheckReload);
        assert_eq!(model.tick, 2);
    }

    #[test]
    fn quit_keys_set_quit() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut model = test_model();
            assert_eq!(update(&mut model, key(code)), Cmd::Quit);
            assert!(model.quit);
        }
    }

    #[test]
    fn ctrl_c_quits() {
        let mut model = test_model();
        let msg = Msg::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(update(&mut model, msg), Cmd::Quit);
        assert!(model.quit);
    }

    #[test]
    fn plain_c_does_not_quit() {
        let mut model = test_model();
        assert_eq!(update(&mut model, key(KeyCode::Char('c'))), Cmd::None);
        assert!(!model.quit);
    }

    #[test]
    fn help_keys_toggle_overlay() {
        let mut model = test_model();
        update(&mut model, key(KeyCode::Char('?')));
        assert!(model.show_help);
        update(&mut model, key(KeyCode::Char('h')));
        assert!(!model.show_help);
    }

    #[test]
    fn mouse_move_updates_hover() {
        let mut model = test_model();
        update(&mut model, Msg::MouseMoved { col: 42, row: 7 });
        assert_eq!(model.hover, Some((42, 7)));
    }

    #[test]
    fn resize_message_invalidates_layout() {
        let mut model = test_model();
        model.ensure_layout();
        update(&mut model, Msg::Resize { cols: 80, rows: 24 });
        assert!(!model.layout.is_fresh());
        assert_eq!(model.terminal_size, (80, 24));
    }

    #[test]
    fn data_loaded_replaces_dataset() {
        let mut model = test_model();
        let ds = Dataset::from_cases([TestCase {
            test_name: "t".to_owned(),
            passed: false,
            witness: "w".to_owned(),
        }]);
        assert_eq!(update(&mut model, Msg::DataLoaded(ds)), Cmd::None);
        assert_eq!(model.dataset.case_count(), 1);
        assert_eq!(model.aggregate.tallies.len(), 1);
    }

    #[test]
    fn manual_reload_key_requests_check() {
        let mut model = test_model();
        assert_eq!(update(&mut model, key(KeyCode::Char('r'))), Cmd::CheckReload);
    }

    #[test]
    fn arrow_keys_scroll_without_panic_on_empty_layout() {
        let mut model = test_model();
        update(&mut model, key(KeyCode::Right));
        assert_eq!(model.chart_scroll, 0); // clamped, nothing to scroll
        update(&mut model, key(KeyCode::Left));
        assert_eq!(model.chart_scroll, 0);
    }
}
