//! YAML 1.1 boolean compatibility.
//!
//! Build files are written for YAML 1.1 loaders, where plain `yes`, `no`,
//! `on` and `off` are booleans. serde_yaml follows YAML 1.2 and reads them as
//! strings, and its `Value` does not record whether a scalar was quoted. The
//! source text is therefore rewritten before parsing: plain boolean words
//! become `true`/`false`, everything else is copied unchanged. Line numbers
//! in parse errors stay accurate.

/// Boolean meaning of a plain scalar under YAML 1.1 rules.
///
/// Matching is case-insensitive. Single-letter `y`/`n` stay strings, as they
/// do in Ruby's Psych.
pub fn yaml11_bool(word: &str) -> Option<bool> {
    const TRUE_WORDS: [&str; 3] = ["yes", "true", "on"];
    const FALSE_WORDS: [&str; 3] = ["no", "false", "off"];

    if TRUE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word)) {
        Some(true)
    } else if FALSE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word)) {
        Some(false)
    } else {
        None
    }
}

/// Rewrite plain YAML 1.1 boolean scalars in `source` to `true`/`false`.
///
/// Quoted scalars, tagged scalars, comments, mapping keys and block scalar
/// bodies are left alone.
pub fn normalize_booleans(source: &str) -> String {
    let mut scanner = Scanner::default();
    let mut out = String::with_capacity(source.len());
    for line in source.split_inclusive('\n') {
        scanner.line(line, &mut out);
    }
    out
}

#[derive(Default)]
struct Scanner {
    /// Indentation of the line that opened a `|` or `>` block scalar
    block_parent: Option<usize>,
    /// Quote character of a quoted scalar spanning lines
    open_quote: Option<u8>,
}

impl Scanner {
    fn line(&mut self, line: &str, out: &mut String) {
        let indent = line.len() - line.trim_start_matches(' ').len();

        if let Some(parent) = self.block_parent {
            if line.trim().is_empty() || indent > parent {
                out.push_str(line);
                return;
            }
            self.block_parent = None;
        }

        let bytes = line.as_bytes();
        let mut copied = 0;
        let mut i = 0;
        let mut depth = 0usize;
        let mut at_value = true;
        let mut tagged = false;
        let mut key_col = None;

        if let Some(quote) = self.open_quote {
            match close_quote(bytes, 0, quote) {
                Some(end) => {
                    self.open_quote = None;
                    i = end;
                    at_value = false;
                }
                None => {
                    out.push_str(line);
                    return;
                }
            }
        }

        while i < bytes.len() {
            match bytes[i] {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    i += 1;
                    continue;
                }
                b'#' => break,
                quote @ (b'\'' | b'"') => {
                    match close_quote(bytes, i + 1, quote) {
                        Some(end) => i = end,
                        None => {
                            self.open_quote = Some(quote);
                            break;
                        }
                    }
                    at_value = false;
                    tagged = false;
                    continue;
                }
                b'[' | b'{' => {
                    depth += 1;
                    i += 1;
                    at_value = true;
                    continue;
                }
                b']' | b'}' => {
                    depth = depth.saturating_sub(1);
                    i += 1;
                    at_value = false;
                    continue;
                }
                b',' if depth > 0 => {
                    i += 1;
                    at_value = true;
                    tagged = false;
                    continue;
                }
                b'-' | b':' | b'?' if is_indicator(bytes, i, depth > 0) => {
                    i += 1;
                    at_value = true;
                    tagged = false;
                    continue;
                }
                b'|' | b'>' if at_value && depth == 0 => {
                    // The body is indented past the key that owns it
                    self.block_parent = Some(key_col.unwrap_or(indent));
                    break;
                }
                b'!' => {
                    tagged = true;
                    i = token_end(bytes, i);
                    continue;
                }
                b'&' => {
                    i = token_end(bytes, i);
                    continue;
                }
                _ => {}
            }

            let start = i;
            let end = plain_end(bytes, start, depth > 0);
            let token = line[start..end].trim_end();
            let is_key = end < bytes.len() && bytes[end] == b':';
            if is_key {
                key_col = Some(start);
            }

            if at_value && !tagged && !is_key {
                if let Some(value) = yaml11_bool(token) {
                    out.push_str(&line[copied..start]);
                    out.push_str(if value { "true" } else { "false" });
                    copied = start + token.len();
                }
            }

            i = end;
            at_value = false;
            tagged = false;
        }

        out.push_str(&line[copied..]);
    }
}

/// `-`, `:` and `?` are indicators only when followed by whitespace (or a
/// flow delimiter inside flow collections).
fn is_indicator(bytes: &[u8], i: usize, in_flow: bool) -> bool {
    match bytes.get(i + 1) {
        None => true,
        Some(b' ' | b'\t' | b'\r' | b'\n') => true,
        Some(b',' | b']' | b'}') => in_flow,
        Some(_) => false,
    }
}

/// Index just past the closing quote, or `None` if the line ends first.
fn close_quote(bytes: &[u8], mut i: usize, quote: u8) -> Option<usize> {
    while i < bytes.len() {
        let c = bytes[i];
        if quote == b'"' && c == b'\\' {
            i += 2;
            continue;
        }
        if c == quote {
            // '' is an escaped quote inside single-quoted scalars
            if quote == b'\'' && bytes.get(i + 1) == Some(&b'\'') {
                i += 2;
                continue;
            }
            return Some(i + 1);
        }
        i += 1;
    }
    None
}

fn token_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn plain_end(bytes: &[u8], start: usize, in_flow: bool) -> usize {
    let mut j = start;
    while j < bytes.len() {
        match bytes[j] {
            b'\r' | b'\n' => break,
            b':' if is_indicator(bytes, j, in_flow) => break,
            b'#' if j > start && matches!(bytes[j - 1], b' ' | b'\t') => break,
            b',' | b'[' | b']' | b'{' | b'}' if in_flow => break,
            _ => j += 1,
        }
    }
    j
}
