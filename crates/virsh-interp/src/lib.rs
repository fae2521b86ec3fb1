// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Tree-walk interpreter for the virsh language.
//!
//! Evaluates the syntax tree directly. Values are computed on demand:
//! call arguments are thunks, bindings may hold pending values, and lists
//! may be single-pass streams.

mod builtins;
mod env;
mod function;
mod interp;
mod lazy;
mod output;
mod reify;
mod stack;
mod stdlib;
mod value;

pub use builtins::{install, root_scope};
pub use env::Scope;
pub use function::{Completion, Function, Signal, Thunk};
pub use interp::{evaluate, EvalError, Interpreter};
pub use lazy::{Lazy, Reference, Slot};
pub use output::Output;
pub use reify::{reify, reify_value, Reified};
pub use stdlib::{install_io, root_scope_with_io};
pub use value::{Addable, List, ListCursor, Subtractable, Value};
