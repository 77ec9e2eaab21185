//! Terminal event routing: crossterm events → dashboard messages.

#![allow(missing_docs)]

use crossterm::event::{Event, KeyEventKind, MouseEventKind};

use crate::tui::update::Msg;

/// Map a raw terminal event into a dashboard message.
///
/// Returns `None` for events the dashboard ignores (key releases, mouse
/// clicks and scrolls, focus/paste events).
#[must_use]
pub fn map_event(event: Event) -> Option<Msg> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(Msg::Key(key)),
        Event::Mouse(mouse)
            if matches!(
                mouse.kind,
                MouseEventKind::Moved | MouseEventKind::Drag(_)
            ) =>
        {
            Some(Msg::MouseMoved {
                col: mouse.column,
                row: mouse.row,
            })
        }
        Event::Resize(cols, rows) => Some(Msg::Resize { cols, rows }),
        _ => None,
    }
}
