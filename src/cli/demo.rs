//! Interactive demo session.
//!
//! Each input line is one command: an application notification name, a
//! `view <notification>` line, or one of `status`, `reset`, `help`, `quit`.
//! The session subscribes to every derived signal on start and prints a
//! line whenever one of them emits.

use std::sync::Arc;

use crate::app::AppLifecycle;
use crate::error::{AppStateError, CliError};
use crate::events::{AppNotification, ViewNotification};
use crate::observable::{DisposeBag, Event, Observable};
use crate::state::ViewLifecycle;
use crate::traits::KeyValueStore;

use super::args::USAGE;

/// Sink for the lines the session prints.
pub type Output = Arc<dyn Fn(String) + Send + Sync>;

/// Whether the input loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// `1 time`, `2 times`.
pub fn times(count: i64) -> String {
    if count == 1 {
        "1 time".to_string()
    } else {
        format!("{count} times")
    }
}

/// Message printed to stderr when an input line fails.
pub fn error_line(err: &AppStateError) -> String {
    format!("Error: {err}\nHint: {}", err.category().recovery_hint())
}

/// A running demo: one lifecycle, one view named `main`, and the
/// subscriptions printing their signals.
pub struct DemoSession {
    lifecycle: Arc<AppLifecycle>,
    view: ViewLifecycle,
    output: Output,
    bag: DisposeBag,
}

impl DemoSession {
    /// Subscribe to every signal and print the single-shot ones right away.
    pub fn start(lifecycle: Arc<AppLifecycle>, output: Output) -> Self {
        let session = Self {
            view: ViewLifecycle::new("main"),
            lifecycle,
            output,
            bag: DisposeBag::new(),
        };
        session.watch(session.lifecycle.app_state(), |state| {
            Some(format!("state: {state}"))
        });
        session.watch(session.lifecycle.open_count(), |count| {
            Some(format!("opened {}", times(count)))
        });
        session.watch(session.lifecycle.is_first_launch(), |first| {
            first.then(|| "first launch".to_string())
        });
        session.watch(session.lifecycle.is_first_launch_of_new_version(), |new| {
            new.then(|| "first launch of a new version".to_string())
        });
        session.watch(session.view.view_state(), |state| {
            Some(format!("view main: {state}"))
        });
        session.watch(session.lifecycle.first_launch_only(), |()| {
            Some("welcome: this is the first launch ever".to_string())
        });
        session.watch(session.lifecycle.first_launch_of_new_version_only(), |()| {
            Some("welcome: the app was upgraded since the last launch".to_string())
        });
        session
    }

    pub fn lifecycle(&self) -> &Arc<AppLifecycle> {
        &self.lifecycle
    }

    /// Execute one input line.
    pub fn handle_line(&self, line: &str) -> Result<Flow, AppStateError> {
        let line = line.trim();
        match line {
            "" => return Ok(Flow::Continue),
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => self.print(USAGE.to_string()),
            "status" => self.print_status()?,
            "reset" => {
                self.lifecycle.reset()?;
                self.print("store reset".to_string());
            }
            _ => self.dispatch(line)?,
        }
        Ok(Flow::Continue)
    }

    fn dispatch(&self, line: &str) -> Result<(), CliError> {
        if let Some(rest) = line.strip_prefix("view ") {
            self.view.notify(rest.parse::<ViewNotification>()?);
        } else if line.starts_with("view-") {
            self.view.notify(line.parse::<ViewNotification>()?);
        } else {
            self.lifecycle.notify(line.parse::<AppNotification>()?);
        }
        Ok(())
    }

    fn print_status(&self) -> Result<(), AppStateError> {
        let store = self.lifecycle.store();
        let keys = self.lifecycle.keys();
        let opens = store.get_int(&keys.open_count)?;
        let launched = store.get_bool(&keys.is_first_launch)?;
        let version = store.get_string(&keys.last_app_version)?;
        self.print(format!(
            "opens: {opens}, launched before: {launched}, last version: {}",
            version.as_deref().unwrap_or("-")
        ));
        Ok(())
    }

    fn print(&self, line: String) {
        (self.output)(line);
    }

    fn watch<T, F>(&self, stream: Observable<T>, render: F)
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Option<String> + Send + Sync + 'static,
    {
        let output = Arc::clone(&self.output);
        stream
            .subscribe(move |event| match event {
                Event::Next(value) => {
                    if let Some(line) = render(value) {
                        output(line);
                    }
                }
                Event::Error(err) => output(format!("error: {err}")),
                Event::Completed => {}
            })
            .disposed_by(&self.bag);
    }
}
