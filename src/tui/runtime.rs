//! Dashboard event loop: one thread owns the model, the timer, and the
//! terminal.
//!
//! Input events, resizes, the refresh tick, and repaints all execute
//! here cooperatively — no locking anywhere. The loop polls crossterm
//! with a short timeout and fires the tick whenever the configured
//! refresh interval has elapsed.

#![allow(missing_docs)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event;

use crate::core::config::Config;
use crate::core::errors::{Result, VizError};
use crate::logger::jsonl::{EventType, JsonlLogger};
use crate::model::ResultsSource;
use crate::tui::input::map_event;
use crate::tui::model::AppModel;
use crate::tui::render::paint;
use crate::tui::terminal_guard::TerminalGuard;
use crate::tui::theme::Theme;
use crate::tui::update::{Cmd, Msg, update};

/// How long one poll waits for input before checking the tick timer.
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Everything the viewer runtime needs to start.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub results: PathBuf,
    pub config: Config,
    pub theme: Theme,
}

/// Run the dashboard until the user quits.
///
/// The initial dataset load must succeed; after that, reload failures
/// between ticks are logged and the previous dataset stays on screen.
pub fn run(viewer: &ViewerConfig, logger: &JsonlLogger) -> Result<()> {
    let mut source = ResultsSource::new(viewer.results.clone());
    let dataset = source.load()?;
    logger.log(
        EventType::DataLoaded,
        &viewer.results,
        dataset.case_count(),
        dataset.skipped_lines(),
    );

    let guard = TerminalGuard::new().map_err(VizError::terminal)?;
    let label = viewer
        .results
        .file_name()
        .map_or_else(|| viewer.results.display().to_string(), |n| n.to_string_lossy().into_owned());
    let mut model = AppModel::new(viewer.config.clone(), label, TerminalGuard::terminal_size());
    update(&mut model, Msg::DataLoaded(dataset));

    let result = run_loop(&mut model, &mut source, viewer, logger);

    drop(guard);
    logger.log_simple(EventType::SessionStop);
    result
}

fn run_loop(
    model: &mut AppModel,
    source: &mut ResultsSource,
    viewer: &ViewerConfig,
    logger: &JsonlLogger,
) -> Result<()> {
    let refresh = viewer.config.refresh_interval();
    let mut stdout = io::stdout();
    // Force an immediate first paint.
    let mut last_tick = Instant::now()
        .checked_sub(refresh)
        .unwrap_or_else(Instant::now);
    let mut dirty = true;

    while !model.quit {
        let mut pending = Vec::new();

        if event::poll(POLL_TIMEOUT).map_err(VizError::terminal)?
            && let Some(msg) = map_event(event::read().map_err(VizError::terminal)?)
        {
            if let Msg::Resize { cols, rows } = msg {
                logger.log_resize(cols, rows);
            }
            pending.push(msg);
        }

        if last_tick.elapsed() >= refresh {
            last_tick = Instant::now();
            pending.push(Msg::Tick);
        }

        for msg in pending {
            dirty = true;
            match update(model, msg) {
                Cmd::None => {}
                Cmd::Quit => return Ok(()),
                Cmd::CheckReload => {
                    // A missing or half-written file is not fatal here;
                    // keep showing the previous dataset.
                    match source.poll() {
                        Ok(Some(dataset)) => {
                            logger.log(
                                EventType::DataReloaded,
                                &viewer.results,
                                dataset.case_count(),
                                dataset.skipped_lines(),
                            );
                            update(model, Msg::DataLoaded(dataset));
                        }
                        Ok(None) => {}
                        Err(e) => logger.log_error(&e),
                    }
                }
            }
        }

        if dirty {
            paint(&mut stdout, model, viewer.theme).map_err(VizError::terminal)?;
            dirty = false;
        }
    }
    Ok(())
}
