// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Filesystem namespace (fs.*).

use std::sync::Arc;

use crate::env::Scope;
use crate::function::{Completion, Function};
use crate::interp::EvalError;
use crate::lazy::Lazy;
use crate::value::{List, Value};

use super::text_arg;

pub(super) fn namespace() -> Scope {
    let fs = Scope::new();
    for func in [read(), lines(), ls()] {
        fs.define(func.name().to_string(), Lazy::ready(Value::Function(func)));
    }
    fs
}

/// `fs.read path`: the file's contents, read when first forced.
fn read() -> Function {
    Function::native("read", 1, |_scope, args| {
        let path = text_arg(args, 0)?.unwrap_or_default();
        Ok(Completion::Value(Lazy::pending(move || {
            read_to_string(&path).map(Value::from)
        })))
    })
}

/// `fs.lines path`: the trimmed contents split into lines, read when first
/// forced.
fn lines() -> Function {
    Function::native("lines", 1, |_scope, args| {
        let path = text_arg(args, 0)?.unwrap_or_default();
        Ok(Completion::Value(Lazy::pending(move || {
            let content = read_to_string(&path)?;
            let lines = content.trim().lines().map(Value::from).collect::<Vec<_>>();
            Ok(Value::List(List::from_values(lines)))
        })))
    })
}

/// `fs.ls dir?`: entry names of `dir` (default `.`), sorted.
fn ls() -> Function {
    Function::native("ls", 1, |_scope, args| {
        let dir = text_arg(args, 0)?.unwrap_or_else(|| ".".to_string());
        let entries = std::fs::read_dir(&dir).map_err(|e| io_error(format!("listing {}", dir), e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error(format!("listing {}", dir), e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(Completion::value(List::from_values(names.into_iter().map(Value::from))))
    })
}

fn read_to_string(path: &str) -> Result<String, EvalError> {
    tracing::debug!(path, "reading file");
    std::fs::read_to_string(path).map_err(|e| io_error(format!("reading {}", path), e))
}

fn io_error(context: String, source: std::io::Error) -> EvalError {
    EvalError::Io {
        context,
        source: Arc::new(source),
    }
}
