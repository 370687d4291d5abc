//! Type-erased command handlers.
//!
//! Native functions of any arity are turned into a single [`Handler`] shape.
//! The generic code in this module captures each parameter type at bind time;
//! the registry only ever sees the erased closure.

use std::fmt;
use std::sync::Weak;

use parking_lot::RwLock;

use super::{ArgStream, CommandReturn, Console, ConsoleError, ConsoleValue};

/// Uniform handler stored in the registry.
///
/// Handlers receive:
/// - `console`: The console that dispatched the statement
/// - `args`: The statement's remaining argument text
/// - `out`: The output sink for results and diagnostics
pub type Handler = Box<dyn Fn(&Console, &mut ArgStream<'_>, &mut dyn fmt::Write) + Send + Sync>;

/// Conversion of a native function into a [`Handler`].
///
/// Implemented for every `Fn(A1, ..., An) -> R` with up to eight parameters,
/// where each `Ai` is a [`ConsoleValue`] and `R` is a [`CommandReturn`]. The
/// `Marker` parameter only disambiguates the implementations.
pub trait IntoCommand<Marker>: Send + Sync + 'static {
    /// Erase the function into a handler reporting errors under `id`.
    fn into_handler(self, id: &str) -> Handler;
}

/// Conversion of a method on a caller-owned receiver into a [`Handler`].
///
/// Implemented for every `Fn(&mut T, A1, ..., An) -> R` with up to eight
/// parameters. The receiver is held weakly.
pub trait IntoMethod<T, Marker>: Send + Sync + 'static {
    /// Erase the method and its receiver into a handler reporting errors under `id`.
    fn into_method_handler(self, id: &str, receiver: Weak<RwLock<T>>) -> Handler;
}

macro_rules! impl_into_handler {
    ($($param:ident),*) => {
        impl<F, R, $($param,)*> IntoCommand<fn($($param,)*) -> R> for F
        where
            F: Fn($($param),*) -> R + Send + Sync + 'static,
            R: CommandReturn,
            $($param: ConsoleValue,)*
        {
            #[allow(non_snake_case, unused_variables, unused_mut)]
            fn into_handler(self, id: &str) -> Handler {
                let id: Box<str> = id.into();
                Box::new(move |console: &Console, args: &mut ArgStream<'_>, out: &mut dyn fmt::Write| {
                    $(
                        let $param: $param = if args.failed() {
                            <$param as Default>::default()
                        } else {
                            console.evaluate::<$param>(args)
                        };
                    )*

                    if args.failed() {
                        args.clear();
                        ConsoleError::ArgumentTypeMismatch { id: id.clone() }.report(out);
                        return;
                    }

                    (self)($($param),*).emit(out);
                })
            }
        }

        impl<F, T, R, $($param,)*> IntoMethod<T, fn(&mut T, $($param,)*) -> R> for F
        where
            F: Fn(&mut T, $($param),*) -> R + Send + Sync + 'static,
            T: Send + Sync + 'static,
            R: CommandReturn,
            $($param: ConsoleValue,)*
        {
            #[allow(non_snake_case, unused_variables, unused_mut)]
            fn into_method_handler(self, id: &str, receiver: Weak<RwLock<T>>) -> Handler {
                let id: Box<str> = id.into();
                Box::new(move |console: &Console, args: &mut ArgStream<'_>, out: &mut dyn fmt::Write| {
                    $(
                        let $param: $param = if args.failed() {
                            <$param as Default>::default()
                        } else {
                            console.evaluate::<$param>(args)
                        };
                    )*

                    if args.failed() {
                        args.clear();
                        ConsoleError::ArgumentTypeMismatch { id: id.clone() }.report(out);
                        return;
                    }

                    let Some(receiver) = receiver.upgrade() else {
                        ConsoleError::DanglingReference { id: id.clone() }.report(out);
                        return;
                    };

                    let result = {
                        let mut guard = receiver.write();
                        (self)(&mut *guard, $($param),*)
                    };
                    result.emit(out);
                })
            }
        }
    };
}

impl_into_handler!();
impl_into_handler!(A1);
impl_into_handler!(A1, A2);
impl_into_handler!(A1, A2, A3);
impl_into_handler!(A1, A2, A3, A4);
impl_into_handler!(A1, A2, A3, A4, A5);
impl_into_handler!(A1, A2, A3, A4, A5, A6);
impl_into_handler!(A1, A2, A3, A4, A5, A6, A7);
impl_into_handler!(A1, A2, A3, A4, A5, A6, A7, A8);
