//! ANSI-aware text measurement and padding.
//!
//! Every renderer composes strings that may already carry SGR sequences
//! (from the theme or from a caller's formatter). Layout math must only
//! ever see the *visible* columns, so all width questions go through
//! [`visible_width`].

use std::borrow::Cow;

use serde::Deserialize;
use unicode_width::UnicodeWidthStr;

const ESC: u8 = 0x1B;

/// SGR reset, appended when a cut leaves a style open.
const RESET: &str = "\x1b[0m";

/// Horizontal alignment inside a fixed-width slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Remove escape sequences, leaving only printable content.
///
/// Borrows when there is nothing to strip.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.as_bytes().contains(&ESC) {
        return Cow::Borrowed(s);
    }

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == ESC {
            i = escape_end(bytes, i);
        } else {
            // ESC is ASCII, so slicing at ESC boundaries keeps UTF-8 intact.
            let start = i;
            while i < bytes.len() && bytes[i] != ESC {
                i += 1;
            }
            out.push_str(&s[start..i]);
        }
    }
    Cow::Owned(out)
}

/// Byte index just past the escape sequence starting at `pos`.
fn escape_end(bytes: &[u8], pos: usize) -> usize {
    let Some(&kind) = bytes.get(pos + 1) else {
        return bytes.len();
    };
    match kind {
        b'[' => {
            // CSI: parameters and intermediates, then a final byte in 0x40..=0x7E.
            let mut i = pos + 2;
            while i < bytes.len() {
                let b = bytes[i];
                if (0x40..=0x7E).contains(&b) {
                    return i + 1;
                }
                if !(0x20..=0x3F).contains(&b) {
                    return i;
                }
                i += 1;
            }
            bytes.len()
        }
        b']' | b'P' | b'^' | b'_' => {
            // String sequences end with BEL or ST (ESC \).
            let mut i = pos + 2;
            while i < bytes.len() {
                match bytes[i] {
                    0x07 => return i + 1,
                    ESC if bytes.get(i + 1) == Some(&b'\\') => return i + 2,
                    _ => i += 1,
                }
            }
            bytes.len()
        }
        // Two-byte escape. A lone ESC before a multi-byte char is dropped by itself.
        _ if kind.is_ascii() => pos + 2,
        _ => pos + 1,
    }
}

/// Number of terminal columns `s` occupies once escape sequences are removed.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_ref())
}

/// Pad `s` with plain spaces to `width` visible columns.
///
/// Content that is already wider than `width` comes back untouched;
/// cutting is left to [`truncate`] or to the caller's formatter.
pub fn pad(s: &str, width: usize, align: Align) -> String {
    let current = visible_width(s);
    if current >= width {
        return s.to_string();
    }
    let fill = " ".repeat(width - current);
    match align {
        Align::Left => format!("{s}{fill}"),
        Align::Right => format!("{fill}{s}"),
    }
}

/// Cut `s` down to at most `width` visible columns.
///
/// Escape sequences are carried over as-is. If anything styled was cut,
/// a reset is appended so the style does not leak into what follows.
pub fn truncate(s: &str, width: usize) -> String {
    if visible_width(s) <= width {
        return s.to_string();
    }

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut used = 0;
    let mut styled = false;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == ESC {
            let end = escape_end(bytes, i);
            out.push_str(&s[i..end]);
            styled = true;
            i = end;
            continue;
        }
        let Some(ch) = s[i..].chars().next() else {
            break;
        };
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
        i += ch.len_utf8();
    }

    if styled {
        out.push_str(RESET);
    }
    out
}

/// What to do with content wider than its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    /// Let it run past the slot, shifting whatever follows.
    #[default]
    Spill,
    /// Cut it to the slot width.
    Clip,
}

/// Pad `s` to `width`, cutting it first when `overflow` is [`Overflow::Clip`].
pub fn fit(s: &str, width: usize, align: Align, overflow: Overflow) -> String {
    match overflow {
        Overflow::Spill => pad(s, width, align),
        Overflow::Clip => pad(&truncate(s, width), width, align),
    }
}
