// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Host I/O namespaces.
//!
//! `fs` and `io` are sub-scopes of the root, so they are reached with
//! `fs.read 'file'` and `io.stdin` like any other record member.

#[cfg(not(target_arch = "wasm32"))]
mod fs;
#[cfg(not(target_arch = "wasm32"))]
mod io;

use crate::builtins;
use crate::env::Scope;
use crate::function::Thunk;
use crate::interp::EvalError;
use crate::lazy::Lazy;
use crate::output::Output;
use crate::reify::reify_value;
use crate::value::Value;

/// A root scope with the builtin library plus `fs` and `io`.
pub fn root_scope_with_io(output: &Output) -> Scope {
    let scope = builtins::root_scope(output);
    install_io(&scope);
    scope
}

/// Bind the `fs` and `io` namespaces in `scope`.
pub fn install_io(scope: &Scope) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        scope.define("fs", Lazy::ready(Value::Scope(fs::namespace())));
        scope.define("io", Lazy::ready(Value::Scope(io::namespace())));
        tracing::debug!("installed fs and io");
    }
    #[cfg(target_arch = "wasm32")]
    {
        let _ = scope;
        tracing::debug!("fs and io are not available on this target");
    }
}

/// Text of a forced argument, as `print` would show it.
#[cfg(not(target_arch = "wasm32"))]
fn text_arg(args: &[Thunk], index: usize) -> Result<Option<String>, EvalError> {
    match args.get(index) {
        Some(arg) => {
            let value = arg.force()?.resolve()?;
            Ok(Some(reify_value(&value)?.to_string()))
        }
        None => Ok(None),
    }
}
