//! Usage: Quote/paren-aware scanner for literal `INSERT INTO ... VALUES (...)`
//! statements. Schema-agnostic: yields column → value records and nothing else.

use std::collections::BTreeMap;

const INSERT_KEYWORD: &str = "INSERT INTO ";
const VALUES_KEYWORD: &str = "VALUES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Text(String),
}

impl SqlValue {
    pub fn as_text(&self) -> &str {
        match self {
            Self::Null => "",
            Self::Bool(true) => "1",
            Self::Bool(false) => "0",
            Self::Text(s) => s,
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }
}

/// Parse one already-isolated SQL scalar literal.
pub fn parse_value(raw: &str) -> SqlValue {
    let value = raw.trim();
    if value == "NULL" {
        return SqlValue::Null;
    }
    if value == "0" {
        return SqlValue::Bool(false);
    }
    if value == "1" {
        return SqlValue::Bool(true);
    }
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        return SqlValue::Text(value[1..value.len() - 1].replace("''", "'"));
    }
    SqlValue::Text(value.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlRow(BTreeMap<String, SqlValue>);

impl SqlRow {
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.0.get(column)
    }

    /// Column as text; missing columns and NULLs read as "".
    pub fn text(&self, column: &str) -> &str {
        self.0.get(column).map(SqlValue::as_text).unwrap_or("")
    }

    pub fn opt_text(&self, column: &str) -> Option<String> {
        let value = self.text(column);
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Boolean column: accepts both the unquoted `1` and a quoted `'1'`.
    pub fn flag(&self, column: &str) -> bool {
        self.text(column) == "1"
    }

    pub fn int(&self, column: &str) -> Option<i64> {
        self.text(column).parse::<i64>().ok()
    }
}

/// Lazily yield one row record per `INSERT INTO "<table>" (...) VALUES (...)`
/// statement, in the order the statements appear in the dump. Single pass, not
/// restartable.
pub fn extract_rows<'a>(dump: &'a str, table: &'a str) -> RowIter<'a> {
    RowIter {
        dump,
        table,
        pos: 0,
    }
}

pub struct RowIter<'a> {
    dump: &'a str,
    table: &'a str,
    pos: usize,
}

/// Match `"table"` or bare `table` at the start of `s`; returns consumed length.
fn match_table_name(s: &str, table: &str) -> Option<usize> {
    if let Some(rest) = s.strip_prefix('"') {
        let rest = rest.strip_prefix(table)?;
        rest.strip_prefix('"')?;
        return Some(table.len() + 2);
    }

    let rest = s.strip_prefix(table)?;
    match rest.chars().next() {
        Some(c) if c.is_whitespace() || c == '(' => Some(table.len()),
        _ => None,
    }
}

fn skip_ws(s: &str) -> usize {
    s.len() - s.trim_start().len()
}

/// Scan the value list starting right after the opening `(` of `VALUES (`.
/// Single quotes toggle quote state (backslash-escape aware); parenthesis depth
/// is ignored inside quotes. The list ends at the first unmatched `)`; a
/// statement that never closes is truncated at end of input.
fn scan_value_list(s: &str) -> (&str, usize) {
    let mut in_quote = false;
    let mut escaped = false;
    let mut depth = 0usize;

    for (idx, ch) in s.char_indices() {
        if in_quote {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '\'' => in_quote = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '\'' => in_quote = true,
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return (&s[..idx], idx + 1);
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    (s, s.len())
}

/// Split on top-level commas, respecting quote state and nested parens.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    if list.is_empty() {
        return parts;
    }

    let mut start = 0usize;
    let mut in_quote = false;
    let mut escaped = false;
    let mut depth = 0usize;

    for (idx, ch) in list.char_indices() {
        if in_quote {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '\'' => in_quote = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '\'' => in_quote = true,
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&list[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }

    parts.push(&list[start..]);
    parts
}

impl<'a> Iterator for RowIter<'a> {
    type Item = SqlRow;

    fn next(&mut self) -> Option<SqlRow> {
        let dump = self.dump;
        loop {
            let rest = dump.get(self.pos..)?;
            let found = rest.find(INSERT_KEYWORD)?;
            let mut cursor = self.pos + found + INSERT_KEYWORD.len();
            // Advance past this keyword up front so a malformed statement is
            // skipped rather than rescanned forever.
            self.pos = cursor;

            let Some(len) = match_table_name(&dump[cursor..], self.table) else {
                continue;
            };
            cursor += len;

            cursor += skip_ws(&dump[cursor..]);
            if !dump[cursor..].starts_with('(') {
                continue;
            }
            cursor += 1;

            // Column lists carry no nested structure; a plain find is enough.
            let close = dump[cursor..].find(')')?;
            let columns_raw = &dump[cursor..cursor + close];
            cursor += close + 1;

            cursor += skip_ws(&dump[cursor..]);
            if !dump[cursor..].starts_with(VALUES_KEYWORD) {
                continue;
            }
            cursor += VALUES_KEYWORD.len();

            cursor += skip_ws(&dump[cursor..]);
            if !dump[cursor..].starts_with('(') {
                continue;
            }
            cursor += 1;

            let (list, consumed) = scan_value_list(&dump[cursor..]);
            self.pos = cursor + consumed;

            let values = split_top_level(list);
            let mut row = BTreeMap::new();
            for (idx, column) in columns_raw.split(',').enumerate() {
                let column = column.trim().trim_matches('"');
                if column.is_empty() {
                    continue;
                }
                // Missing trailing values map to empty string.
                let value = values
                    .get(idx)
                    .map(|raw| parse_value(raw))
                    .unwrap_or_else(|| SqlValue::Text(String::new()));
                row.insert(column.to_string(), value);
            }

            return Some(SqlRow(row));
        }
    }
}
