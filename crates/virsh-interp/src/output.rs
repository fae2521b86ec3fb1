// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Where `print` and `write` send their text.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::sync::Arc;

use crate::interp::EvalError;

/// Output sink shared by the builtins of one interpreter.
#[derive(Clone, Debug, Default)]
pub enum Output {
    #[default]
    Stdout,
    /// Captured text, for tests and embedding.
    Buffer(Rc<RefCell<String>>),
}

impl Output {
    pub fn write(&self, text: &str) -> Result<(), EvalError> {
        match self {
            Output::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(text.as_bytes())
                    .and_then(|_| out.flush())
                    .map_err(|e| EvalError::Io {
                        context: "writing to stdout".to_string(),
                        source: Arc::new(e),
                    })
            }
            Output::Buffer(buf) => {
                buf.borrow_mut().push_str(text);
                Ok(())
            }
        }
    }
}
