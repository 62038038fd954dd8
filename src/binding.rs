//! Named-placeholder binding.
//!
//! Both backends consume positional parameters only, so statements written
//! with `:name` placeholders are rewritten to the backend's positional style
//! before execution. The scanner skips quoted literals, comments, and
//! Postgres `::` casts via a lightweight state machine; ordinals come from
//! the named map's key order, so every occurrence of the same name binds the
//! same value.

use std::borrow::Cow;

use crate::error::SqlComposeError;
use crate::params::SqlParams;
use crate::types::DbValue;

/// Positional placeholder style of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// PostgreSQL-style placeholders like `$1`.
    Postgres,
    /// SQLite-style placeholders like `?1`.
    Sqlite,
}

enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment(u32),
}

/// Resolve a statement and its parameters to positional form.
///
/// Positional parameters pass through untouched (borrowed SQL). Named
/// parameters rewrite each `:name` to `?N`/`$N` and emit values in key
/// order.
///
/// # Errors
/// Returns `SqlComposeError::ParameterError` if the statement references a
/// name missing from the map, or the map carries a name the statement never
/// references.
pub fn bind_parameters<'q>(
    sql: &'q str,
    params: &SqlParams,
    style: PlaceholderStyle,
) -> Result<(Cow<'q, str>, Vec<DbValue>), SqlComposeError> {
    match params {
        SqlParams::Positional(values) => Ok((Cow::Borrowed(sql), values.clone())),
        SqlParams::Named(entries) => {
            let rewritten = rewrite_named(sql, entries, style)?;
            let values = entries.iter().map(|(_, value)| value.clone()).collect();
            Ok((Cow::Owned(rewritten), values))
        }
    }
}

fn is_line_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes[idx] == b'-' && bytes.get(idx + 1) == Some(&b'-')
}

fn is_block_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes[idx] == b'/' && bytes.get(idx + 1) == Some(&b'*')
}

fn is_block_comment_end(bytes: &[u8], idx: usize) -> bool {
    bytes[idx] == b'*' && bytes.get(idx + 1) == Some(&b'/')
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn rewrite_named(
    sql: &str,
    entries: &[(String, DbValue)],
    style: PlaceholderStyle,
) -> Result<String, SqlComposeError> {
    let bytes = sql.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(sql.len() + entries.len() * 2);
    let mut used = vec![false; entries.len()];
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                _ if is_line_comment_start(bytes, idx) => state = State::LineComment,
                _ if is_block_comment_start(bytes, idx) => state = State::BlockComment(1),
                b':' => {
                    // `::` is a cast, not a placeholder.
                    if bytes.get(idx + 1) == Some(&b':') {
                        out.extend_from_slice(b"::");
                        idx += 2;
                        continue;
                    }
                    let name_start = idx + 1;
                    let mut name_end = name_start;
                    while name_end < bytes.len() && is_name_byte(bytes[name_end]) {
                        name_end += 1;
                    }
                    if name_end > name_start {
                        let name = &sql[name_start..name_end];
                        let Some(ordinal) = entries.iter().position(|(key, _)| key == name)
                        else {
                            return Err(SqlComposeError::ParameterError(format!(
                                "statement references unknown parameter :{name}"
                            )));
                        };
                        used[ordinal] = true;
                        out.push(match style {
                            PlaceholderStyle::Sqlite => b'?',
                            PlaceholderStyle::Postgres => b'$',
                        });
                        out.extend_from_slice((ordinal + 1).to_string().as_bytes());
                        idx = name_end;
                        continue;
                    }
                }
                _ => {}
            },
            State::SingleQuoted => {
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        out.push(b'\'');
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        out.push(b'"');
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment(depth) => {
                if is_block_comment_start(bytes, idx) {
                    state = State::BlockComment(depth + 1);
                } else if is_block_comment_end(bytes, idx) {
                    state = if depth == 1 {
                        State::Normal
                    } else {
                        State::BlockComment(depth - 1)
                    };
                }
            }
        }

        out.push(b);
        idx += 1;
    }

    if let Some(pos) = used.iter().position(|u| !u) {
        return Err(SqlComposeError::ParameterError(format!(
            "parameter :{} is never referenced by the statement",
            entries[pos].0
        )));
    }

    String::from_utf8(out)
        .map_err(|e| SqlComposeError::ParameterError(format!("rewritten SQL is not UTF-8: {e}")))
}
