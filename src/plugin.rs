//! Bevy integration.
//!
//! [`ConsolePlugin`] makes [`Console`] a resource. Any system can submit text
//! with a [`ConsoleSubmit`] message; the plugin executes it during `Update`
//! and answers with one [`ConsoleLine`] per line of output.

use bevy::prelude::*;

use crate::core::{Console, ERROR_PREFIX};

/// Text submitted for execution.
///
/// ```ignore
/// fn apply_cheats(mut submit: MessageWriter<ConsoleSubmit>) {
///     submit.write(ConsoleSubmit::from("set god 1; set noclip 1"));
/// }
/// ```
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSubmit(pub String);

impl From<&str> for ConsoleSubmit {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for ConsoleSubmit {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// One line produced by executing a [`ConsoleSubmit`].
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub kind: LineKind,
    pub text: String,
}

/// What a [`ConsoleLine`] carries. UIs use it to pick a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// The submitted text, prefixed with `> `.
    Echo,
    /// Output written by a command or `get`.
    Value,
    /// A `CONSOLE ERROR:` line.
    Diagnostic,
}

impl ConsoleLine {
    fn echo(submitted: &str) -> Self {
        Self {
            kind: LineKind::Echo,
            text: format!("> {}", submitted),
        }
    }

    fn output(text: &str) -> Self {
        let kind = if text.starts_with(ERROR_PREFIX) {
            LineKind::Diagnostic
        } else {
            LineKind::Value
        };
        Self {
            kind,
            text: text.to_string(),
        }
    }
}

/// Adds the [`Console`] resource and runs submitted text against it.
///
/// ```ignore
/// App::new()
///     .add_plugins((MinimalPlugins, ConsolePlugin))
///     .add_systems(Startup, |mut console: ResMut<Console>| {
///         console.bind_cmd("ping", || "pong".to_string());
///     })
///     .run();
/// ```
#[derive(Default)]
pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Console>()
            .add_message::<ConsoleSubmit>()
            .add_message::<ConsoleLine>()
            .add_systems(Update, run_submitted);
    }
}

fn run_submitted(
    console: Res<Console>,
    mut submitted: MessageReader<ConsoleSubmit>,
    mut lines: MessageWriter<ConsoleLine>,
) {
    for ConsoleSubmit(text) in submitted.read() {
        lines.write(ConsoleLine::echo(text));

        let mut out = String::new();
        console.execute(text, &mut out);
        lines.write_batch(out.lines().map(ConsoleLine::output));
    }
}
