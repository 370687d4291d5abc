//! Interactive console on stdin/stdout.
//!
//! Run with: `cargo run --example repl --features terminal`
//!
//! Try:
//! - `set i (fib 12); get i`
//! - `set s "hello there"; get s`
//! - `set ax (* (get ax) 2); af 3`
//! - `cvars`, `procs`, `help`
//! - `quit` to exit

use devconsole::prelude::*;
use devconsole::Terminal;

struct Widget {
    x: f32,
}

impl Widget {
    fn describe(&mut self, times: i32) -> String {
        format!("Widget::describe x={} times={}", self.x, times)
    }
}

fn greet(name: String, count: i32) -> String {
    format!("hello {} ({})", name, count)
}

fn fib(n: i32) -> i32 {
    if n <= 1 { n } else { fib(n - 1) + fib(n - 2) }
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let i = shared(0i32);
    let f = shared(0.0f32);
    let s = shared(String::new());
    let widget = shared(Widget { x: 3.1415 });

    let mut console = Console::new();
    console.bind_cvar("i", &i);
    console.bind_cvar("f", &f);
    console.bind_cvar("s", &s);
    console.bind_cmd("greet", greet);
    console.bind_cmd("fib", fib);
    console.bind_cvar_field("ax", &widget, |w: &mut Widget| &mut w.x);
    console.bind_method("af", &widget, Widget::describe);

    println!("=== devconsole REPL ===");
    println!("Type statements and press Enter. Type 'quit' to exit.");
    println!();

    Terminal::new(&console).run_stdio()
}
