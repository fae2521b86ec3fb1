// SPDX-License-Identifier: (MIT OR Apache-2.0)

use virsh_ast::Span;

#[derive(Debug, Clone)]
pub struct Comment {
    pub span: Span,
    pub text: String,
}

/// Sorted list of comments with a cursor for sequential consumption.
pub struct CommentList {
    comments: Vec<Comment>,
    cursor: usize,
}

impl CommentList {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self { comments, cursor: 0 }
    }

    /// Take all comments whose start position is before `pos`.
    pub fn take_before(&mut self, pos: usize) -> Vec<Comment> {
        let end = self.comments[self.cursor..]
            .iter()
            .position(|c| c.span.start >= pos)
            .map_or(self.comments.len(), |n| self.cursor + n);
        let taken = self.comments[self.cursor..end].to_vec();
        self.cursor = end;
        taken
    }

    /// Drain any remaining comments.
    pub fn take_rest(&mut self) -> Vec<Comment> {
        self.take_before(usize::MAX)
    }
}

/// Extract all `#` comments from source, skipping string literals.
pub fn extract_comments(source: &str) -> Vec<Comment> {
    let mut comments = Vec::new();
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        match bytes[i] {
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < len && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i += 1;
            }
            b'#' => {
                let start = i;
                while i < len && bytes[i] != b'\n' {
                    i += 1;
                }
                comments.push(Comment {
                    span: Span::new(start, i),
                    text: source[start..i].trim_end().to_string(),
                });
            }
            _ => {
                i += 1;
            }
        }
    }

    comments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_inside_strings_is_not_a_comment() {
        let src = "a = '#no' # yes\nb = \"{x} # no\" # also";
        let texts: Vec<_> = extract_comments(src).into_iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["# yes", "# also"]);
    }

    #[test]
    fn take_before_advances_cursor() {
        let mut list = CommentList::new(extract_comments("# one\na\n# two\nb"));
        assert_eq!(list.take_before(6).len(), 1);
        assert_eq!(list.take_before(6).len(), 0);
        assert_eq!(list.take_rest().len(), 1);
    }
}
