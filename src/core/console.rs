//! The console facade.
//!
//! [`Console`] owns the binding tables and the configuration, and is the
//! entry point for binding host state and executing text against it.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::value::quote;
use super::{
    ArgStream, Bindings, ConsoleError, ConsoleValue, Handler, IntoCommand, IntoMethod, builtins,
    split_statements,
};
use crate::config::ConsoleConfig;

/// Caller-owned storage that can be bound to a console.
///
/// The console keeps only a [`Weak`] handle to it. Dropping the last
/// `Shared` while it is still bound is not undefined behaviour: the next
/// access reports that the value no longer exists. Call
/// [`Console::unbind_cvar`] or [`Console::unbind_cmd`] when the storage goes
/// away.
pub type Shared<T> = Arc<RwLock<T>>;

/// Wrap a value in [`Shared`] storage.
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(RwLock::new(value))
}

/// Command and variable dispatch engine.
///
/// # Examples
///
/// ```
/// use devconsole::{Console, shared};
///
/// let health = shared(100i32);
///
/// let mut console = Console::new();
/// console.bind_cvar("health", &health);
/// console.bind_cmd("double", |x: f32| x * 2.0);
///
/// let mut out = String::new();
/// console.execute("set health (double 21); get health", &mut out);
///
/// assert_eq!(*health.read(), 42);
/// assert_eq!(out, "42\n");
/// ```
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct Console {
    bindings: Bindings,
    config: ConsoleConfig,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    /// Create a console with the default configuration and the built-in commands.
    pub fn new() -> Self {
        Self::with_config(ConsoleConfig::default())
    }

    /// Create a console with the given configuration and the built-in commands.
    pub fn with_config(config: ConsoleConfig) -> Self {
        let mut console = Self {
            bindings: Bindings::new(),
            config,
        };
        builtins::register(&mut console.bindings);
        console
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// The binding tables.
    #[inline]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Bind a variable for `set`/`get`.
    ///
    /// Returns `true` if newly bound, `false` if it replaced an existing binding.
    pub fn bind_cvar<T: ConsoleValue>(&mut self, id: &str, var: &Shared<T>) -> bool {
        self.bind_cvar_field::<T, T, _>(id, var, |value: &mut T| value)
    }

    /// Bind one field of a caller-owned object as a variable.
    ///
    /// ```
    /// use devconsole::{Console, shared};
    ///
    /// #[derive(Default)]
    /// struct Camera { fov: f32 }
    ///
    /// let camera = shared(Camera { fov: 90.0 });
    /// let mut console = Console::new();
    /// console.bind_cvar_field("cl_fov", &camera, |c: &mut Camera| &mut c.fov);
    ///
    /// let mut out = String::new();
    /// console.execute("set cl_fov 110", &mut out);
    /// assert_eq!(camera.read().fov, 110.0);
    /// ```
    pub fn bind_cvar_field<S, V, P>(&mut self, id: &str, owner: &Shared<S>, project: P) -> bool
    where
        S: Send + Sync + 'static,
        V: ConsoleValue,
        P: Fn(&mut S) -> &mut V + Send + Sync + 'static,
    {
        let project = Arc::new(project);
        let setter = cvar_setter(id, Arc::downgrade(owner), project.clone());
        let getter = cvar_getter(id, Arc::downgrade(owner), project);

        let is_new = self.bindings.insert_cvar(id, setter, getter);
        if is_new {
            debug!("Console: bound variable '{}' ({})", id, std::any::type_name::<V>());
        } else {
            warn!("Console: Overwriting existing variable '{}'", id);
        }
        is_new
    }

    /// Bind a native function as a command.
    ///
    /// Each parameter is evaluated from the statement's arguments; a
    /// non-`()` return value is written to the output.
    ///
    /// Returns `true` if newly bound, `false` if it replaced an existing binding.
    pub fn bind_cmd<M>(&mut self, id: &str, command: impl IntoCommand<M>) -> bool {
        self.install_command(id, command.into_handler(id))
    }

    /// Bind a method on a caller-owned receiver as a command.
    ///
    /// ```
    /// use devconsole::{Console, shared};
    ///
    /// struct Player { health: i32 }
    ///
    /// impl Player {
    ///     fn heal(&mut self, amount: i32) { self.health += amount; }
    /// }
    ///
    /// let player = shared(Player { health: 10 });
    /// let mut console = Console::new();
    /// console.bind_method("heal", &player, Player::heal);
    ///
    /// let mut out = String::new();
    /// console.execute("heal 5", &mut out);
    /// assert_eq!(player.read().health, 15);
    /// ```
    pub fn bind_method<T, M>(&mut self, id: &str, receiver: &Shared<T>, method: impl IntoMethod<T, M>) -> bool {
        self.install_command(id, method.into_method_handler(id, Arc::downgrade(receiver)))
    }

    /// Bind a handler that works on the raw argument stream.
    pub fn bind_raw<F>(&mut self, id: &str, handler: F) -> bool
    where
        F: Fn(&Console, &mut ArgStream<'_>, &mut dyn fmt::Write) + Send + Sync + 'static,
    {
        self.install_command(id, Box::new(handler))
    }

    /// Remove a variable binding. Absent identifiers are ignored.
    pub fn unbind_cvar(&mut self, id: &str) {
        if self.bindings.remove_cvar(id) {
            debug!("Console: unbound variable '{}'", id);
        }
    }

    /// Remove a command binding. Absent identifiers are ignored.
    pub fn unbind_cmd(&mut self, id: &str) {
        if self.bindings.remove_command(id) {
            debug!("Console: unbound command '{}'", id);
        }
    }

    /// Check if a variable is bound.
    #[inline]
    pub fn has_cvar(&self, id: &str) -> bool {
        self.bindings.contains_cvar(id)
    }

    /// Check if a command is bound. Built-in commands count.
    #[inline]
    pub fn has_cmd(&self, id: &str) -> bool {
        self.bindings.contains_command(id)
    }

    /// Iterate over bound variable identifiers in sorted order.
    pub fn cvar_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.cvar_names()
    }

    /// Iterate over bound command identifiers in sorted order, built-ins included.
    pub fn cmd_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.command_names()
    }

    fn install_command(&mut self, id: &str, handler: Handler) -> bool {
        let is_new = self.bindings.insert_command(id, handler);
        if is_new {
            debug!("Console: bound command '{}'", id);
        } else {
            warn!("Console: Overwriting existing command '{}'", id);
        }
        is_new
    }
}

fn cvar_setter<S, V, P>(id: &str, owner: Weak<RwLock<S>>, project: Arc<P>) -> Handler
where
    S: Send + Sync + 'static,
    V: ConsoleValue,
    P: Fn(&mut S) -> &mut V + Send + Sync + 'static,
{
    let id: Box<str> = id.into();
    Box::new(move |console: &Console, args: &mut ArgStream<'_>, out: &mut dyn fmt::Write| {
        let value = console.evaluate::<V>(args);

        if args.failed() {
            args.clear();
            ConsoleError::VariableTypeMismatch {
                id: id.clone(),
                expected: std::any::type_name::<V>(),
            }
            .report(out);
            return;
        }

        match owner.upgrade() {
            Some(owner) => *project(&mut *owner.write()) = value,
            None => ConsoleError::DanglingReference { id: id.clone() }.report(out),
        }
    })
}

fn cvar_getter<S, V, P>(id: &str, owner: Weak<RwLock<S>>, project: Arc<P>) -> Handler
where
    S: Send + Sync + 'static,
    V: ConsoleValue,
    P: Fn(&mut S) -> &mut V + Send + Sync + 'static,
{
    let id: Box<str> = id.into();
    Box::new(move |console: &Console, _args: &mut ArgStream<'_>, out: &mut dyn fmt::Write| {
        match owner.upgrade() {
            Some(owner) => {
                let text = project(&mut *owner.write()).format();
                let text = protect_delimiter(text, console.config().delimiter);
                let _ = writeln!(out, "{}", text);
            }
            None => ConsoleError::DanglingReference { id: id.clone() }.report(out),
        }
    })
}

/// Quote rendered text that would not read back as one statement under `delimiter`.
fn protect_delimiter(text: String, delimiter: char) -> String {
    let single = matches!(split_statements(&text, delimiter).as_slice(), [only] if *only == text);
    if single { text } else { quote(&text) }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("bindings", &self.bindings)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(console: &Console, input: &str) -> String {
        let mut out = String::new();
        console.execute(input, &mut out);
        out
    }

    #[test]
    fn test_bind_cvar_set_get() {
        let health = shared(100i32);
        let mut console = Console::new();
        assert!(console.bind_cvar("health", &health));

        assert_eq!(run(&console, "set health 42"), "");
        assert_eq!(*health.read(), 42);
        assert_eq!(run(&console, "get health"), "42\n");
    }

    #[test]
    fn test_rebind_cvar_replaces() {
        let first = shared(1i32);
        let second = shared(2i32);
        let mut console = Console::new();

        assert!(console.bind_cvar("v", &first));
        assert!(!console.bind_cvar("v", &second));

        run(&console, "set v 9");
        assert_eq!(*first.read(), 1);
        assert_eq!(*second.read(), 9);
    }

    #[test]
    fn test_cvar_type_mismatch_keeps_value() {
        let health = shared(100i32);
        let mut console = Console::new();
        console.bind_cvar("health", &health);

        let out = run(&console, "set health lots");
        assert_eq!(
            out,
            "CONSOLE ERROR: Type mismatch. CVar 'health' is of type 'i32'.\n"
        );
        assert_eq!(*health.read(), 100);
    }

    #[test]
    fn test_unbind_cvar() {
        let health = shared(100i32);
        let mut console = Console::new();
        console.bind_cvar("health", &health);
        console.unbind_cvar("health");

        assert!(!console.has_cvar("health"));
        assert_eq!(
            run(&console, "get health"),
            "CONSOLE ERROR: There is no bound variable with id 'health'.\n"
        );

        // Unbinding twice is fine
        console.unbind_cvar("health");
    }

    #[test]
    fn test_dropped_storage_is_reported() {
        let mut console = Console::new();
        {
            let temp = shared(String::from("short lived"));
            console.bind_cvar("temp", &temp);
        }

        assert_eq!(
            run(&console, "get temp"),
            "CONSOLE ERROR: 'temp' refers to a value that no longer exists.\n"
        );
    }

    #[test]
    fn test_bind_cvar_field() {
        #[derive(Default)]
        struct Camera {
            fov: f32,
            zoom: f32,
        }

        let camera = shared(Camera { fov: 90.0, zoom: 1.0 });
        let mut console = Console::new();
        console.bind_cvar_field("fov", &camera, |c: &mut Camera| &mut c.fov);
        console.bind_cvar_field("zoom", &camera, |c: &mut Camera| &mut c.zoom);

        run(&console, "set zoom 2.5");
        assert_eq!(run(&console, "get fov"), "90\n");
        assert_eq!(camera.read().zoom, 2.5);
    }

    #[test]
    fn test_bind_raw() {
        let mut console = Console::new();
        console.bind_raw("echo", |_console, args, out| {
            let _ = writeln!(out, "{}", args.rest().trim());
        });

        assert_eq!(run(&console, "echo  hello there "), "hello there\n");
    }

    #[test]
    fn test_unbind_cmd() {
        let mut console = Console::new();
        console.bind_cmd("noop", || {});
        assert!(console.has_cmd("noop"));

        console.unbind_cmd("noop");
        assert!(!console.has_cmd("noop"));
        console.unbind_cmd("noop");
    }

    #[test]
    fn test_string_round_trip() {
        let name = shared(String::new());
        let mut console = Console::new();
        console.bind_cvar("name", &name);

        let values = [
            "plain",
            "two words",
            "",
            "quote \" inside",
            "semi;colon",
            "(paren)",
            "don't",
            "it's a 'quote'",
        ];
        for value in values {
            *name.write() = value.to_string();
            let rendered = run(&console, "get name");

            *name.write() = String::from("reset");
            let out = run(&console, &format!("set name {}", rendered.trim_end()));
            assert_eq!(out, "");
            assert_eq!(*name.read(), value);
        }
    }

    fn assert_round_trip<T>(config: ConsoleConfig, values: &[T])
    where
        T: ConsoleValue + Clone + PartialEq + fmt::Debug,
    {
        let var = shared(T::default());
        let mut console = Console::with_config(config);
        console.bind_cvar("v", &var);

        for value in values {
            *var.write() = value.clone();
            let rendered = run(&console, "get v");

            *var.write() = T::default();
            let out = run(&console, &format!("set v {}", rendered.trim_end()));
            assert_eq!(out, "", "set v {}", rendered.trim_end());
            assert_eq!(*var.read(), *value, "rendered as {}", rendered.trim_end());
        }
    }

    #[test]
    fn test_float_round_trip() {
        let values = [0.0, -1.5, 1e-7, 123456.789, f64::MAX, f64::MIN_POSITIVE, f64::INFINITY];
        assert_round_trip(ConsoleConfig::default(), &values);
        assert_round_trip(ConsoleConfig::default(), &[0.1f32, -2.0, f32::MAX, f32::MIN]);
    }

    #[test]
    fn test_integer_round_trip() {
        assert_round_trip(ConsoleConfig::default(), &[i8::MIN, -1, 0, i8::MAX]);
        assert_round_trip(ConsoleConfig::default(), &[i32::MIN, i32::MAX]);
        assert_round_trip(ConsoleConfig::default(), &[i64::MIN, i64::MAX]);
        assert_round_trip(ConsoleConfig::default(), &[u8::MAX]);
        assert_round_trip(ConsoleConfig::default(), &[u16::MAX]);
        assert_round_trip(ConsoleConfig::default(), &[0u64, u64::MAX]);
        assert_round_trip(ConsoleConfig::default(), &[isize::MIN, isize::MAX]);
        assert_round_trip(ConsoleConfig::default(), &[usize::MAX]);
    }

    #[test]
    fn test_bool_round_trip() {
        assert_round_trip(ConsoleConfig::default(), &[true, false]);
    }

    #[test]
    fn test_char_round_trip() {
        let values = ['x', ' ', '\t', '(', ')', '"', '\'', '\\', ';', 'é'];
        assert_round_trip(ConsoleConfig::default(), &values);
    }

    #[test]
    fn test_custom_delimiter_round_trip() {
        let config = ConsoleConfig {
            delimiter: '|',
            ..Default::default()
        };

        let strings = ["a|b", "|", "x | y", "plain", "semi;colon", "don't"].map(String::from);
        assert_round_trip(config.clone(), &strings);
        assert_round_trip(config, &['|', ';', 'a']);
    }
}
