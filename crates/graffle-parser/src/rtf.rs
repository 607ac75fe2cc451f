//! Rich-text runs embedded in shaped graphics.
//!
//! Labels are stored as RTF whose non-ASCII characters are written as
//! `\'xx` byte escapes in a legacy codepage. Resolving a label takes the last
//! text fragment of the outermost group, turns its escapes back into bytes,
//! and decodes those bytes with the run's codepage.
//!
//! # Example
//!
//! ```
//! use graffle_parser::rtf::resolve_text;
//!
//! let raw = r"{\rtf1\ansi\ansicpg936 {\fonttbl\f0\fnil PingFangSC;}\f0\fs24 \'b2\'e2\'ca\'d4}";
//! assert_eq!(resolve_text(raw, "gbk").unwrap(), "测试");
//! ```

use std::borrow::Cow;

use encoding_rs::Encoding;
use log::{debug, warn};
use winnow::{
    Parser as _,
    ascii::{digit1, multispace0},
    combinator::{alt, cut_err, delimited, fail, opt, preceded, repeat},
    error::{ModalResult, StrContext},
    token::{any, one_of, take, take_while},
};

use graffle_core::error::{Error, Result};

/// Deepest brace nesting accepted in a run.
pub const MAX_RTF_DEPTH: usize = 64;

/// A node of a parsed rich-text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RtfItem {
    Group(Vec<RtfItem>),
    ControlWord { name: String, param: Option<i32> },
    /// Literal text. Byte escapes are kept as `\'xx`; escaped backslashes and
    /// braces are normalized to the same form.
    Text(String),
}

fn control_word(input: &mut &str) -> ModalResult<RtfItem> {
    preceded(
        '\\',
        (
            take_while(1.., |c: char| c.is_ascii_alphabetic()),
            opt((opt('-'), digit1).take()),
            opt(' '),
        ),
    )
    .map(|(name, param, _): (&str, Option<&str>, _)| RtfItem::ControlWord {
        name: name.to_string(),
        param: param.and_then(|p| p.parse().ok()),
    })
    .parse_next(input)
}

/// Control symbols such as `\~` or `\*`. A backslash before a line break is a
/// paragraph break.
fn control_symbol(input: &mut &str) -> ModalResult<RtfItem> {
    preceded('\\', any)
        .verify(|c: &char| !c.is_ascii_alphanumeric() && !matches!(c, '\'' | '\\' | '{' | '}'))
        .map(|c: char| {
            let name = if matches!(c, '\n' | '\r') {
                "par".to_string()
            } else {
                c.to_string()
            };
            RtfItem::ControlWord { name, param: None }
        })
        .parse_next(input)
}

fn text_piece<'a>(input: &mut &'a str) -> ModalResult<Cow<'a, str>> {
    alt((
        take_while(1.., |c: char| !matches!(c, '\\' | '{' | '}' | '\r' | '\n')).map(Cow::Borrowed),
        preceded("\\'", cut_err(take(2usize))).map(|hex: &str| Cow::Owned(format!("\\'{hex}"))),
        preceded('\\', one_of(['\\', '{', '}']))
            .map(|c: char| Cow::Owned(format!("\\'{:02x}", u32::from(c)))),
        one_of(['\r', '\n']).value(Cow::Borrowed("")),
    ))
    .parse_next(input)
}

fn text(input: &mut &str) -> ModalResult<RtfItem> {
    repeat(1.., text_piece)
        .fold(String::new, |mut acc, piece| {
            acc.push_str(&piece);
            acc
        })
        .map(RtfItem::Text)
        .parse_next(input)
}

fn item(input: &mut &str, depth: usize) -> ModalResult<RtfItem> {
    if input.starts_with('{') {
        return group(input, depth + 1).map(RtfItem::Group);
    }
    alt((text, control_word, control_symbol)).parse_next(input)
}

fn group(input: &mut &str, depth: usize) -> ModalResult<Vec<RtfItem>> {
    if depth > MAX_RTF_DEPTH {
        return cut_err(fail.context(StrContext::Label("group nested too deeply")))
            .parse_next(input);
    }

    delimited('{', repeat(0.., |i: &mut &str| item(i, depth)), cut_err('}'))
        .map(|items: Vec<RtfItem>| {
            items
                .into_iter()
                .filter(|item| !matches!(item, RtfItem::Text(text) if text.is_empty()))
                .collect()
        })
        .parse_next(input)
}

/// Parse a run into the items of its outermost group.
pub fn parse(raw: &str) -> Result<Vec<RtfItem>> {
    delimited(multispace0, |i: &mut &str| group(i, 1), multispace0)
        .parse(raw)
        .map_err(|err| Error::TextDecode(format!("malformed rich text: {err}")))
}

/// Returns the codepage declared by an `\ansicpgN` control word, if any.
pub fn declared_codepage(items: &[RtfItem]) -> Option<i32> {
    items.iter().find_map(|item| match item {
        RtfItem::ControlWord { name, param } if name == "ansicpg" => *param,
        _ => None,
    })
}

/// Maps a Windows codepage number to an encoding label.
pub fn codepage_label(codepage: i32) -> Option<Cow<'static, str>> {
    let label = match codepage {
        437 => "ibm437",
        866 => "ibm866",
        874 => "windows-874",
        932 => "shift_jis",
        936 => "gbk",
        949 => "euc-kr",
        950 => "big5",
        1250..=1258 => return Some(Cow::Owned(format!("windows-{codepage}"))),
        10000 => "macintosh",
        20936 => "gb2312",
        54936 => "gb18030",
        65001 => "utf-8",
        _ => return None,
    };
    Some(Cow::Borrowed(label))
}

/// Resolves the encoding label of a run: its declared codepage when known,
/// otherwise `default_encoding`.
pub fn resolve_encoding(raw: &str, default_encoding: &str) -> String {
    let Ok(items) = parse(raw) else {
        return default_encoding.to_string();
    };

    match declared_codepage(&items) {
        Some(codepage) => match codepage_label(codepage) {
            Some(label) => label.into_owned(),
            None => {
                warn!(codepage, default_encoding; "Unknown codepage, using default encoding");
                default_encoding.to_string()
            }
        },
        None => default_encoding.to_string(),
    }
}

/// Returns the last text fragment directly inside the outermost group.
pub fn last_text_fragment(items: &[RtfItem]) -> Option<&str> {
    items.iter().rev().find_map(|item| match item {
        RtfItem::Text(text) => Some(text.as_str()),
        _ => None,
    })
}

/// Turns an escaped fragment back into bytes.
///
/// A backslash consumes itself and the next three characters, the last two
/// of which are one hexadecimal byte. Any other character contributes its
/// code point truncated to a byte.
///
/// # Errors
///
/// Fails with [`Error::TextDecode`] on a truncated escape or non-hex digits.
pub fn decode_escapes(source: &str) -> Result<Vec<u8>> {
    let chars: Vec<char> = source.chars().collect();
    let mut bytes = Vec::with_capacity(chars.len());
    let mut idx = 0;

    while idx < chars.len() {
        if chars[idx] != '\\' {
            bytes.push(u32::from(chars[idx]) as u8);
            idx += 1;
            continue;
        }

        let escape = chars.get(idx + 1..idx + 4).ok_or_else(|| {
            Error::TextDecode(format!("truncated escape at offset {idx} in `{source}`"))
        })?;
        let digits = &escape[1..];
        if !digits.iter().all(char::is_ascii_hexdigit) {
            let escape: String = escape.iter().collect();
            return Err(Error::TextDecode(format!("invalid byte escape `\\{escape}`")));
        }
        let hex: String = digits.iter().collect();
        let byte = u8::from_str_radix(&hex, 16)
            .map_err(|err| Error::TextDecode(format!("invalid byte escape `{hex}`: {err}")))?;
        bytes.push(byte);
        idx += 4;
    }

    Ok(bytes)
}

/// Decodes bytes with the encoding named by `label`.
pub fn decode_bytes(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| Error::TextDecode(format!("unknown encoding `{label}`")))?;

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
        .ok_or_else(|| {
            Error::TextDecode(format!("invalid {} byte sequence", encoding.name()))
        })
}

/// Resolves a raw run to Unicode text using the encoding named by `label`.
///
/// A run without any text fragment resolves to an empty string.
pub fn resolve_text(raw: &str, label: &str) -> Result<String> {
    let items = parse(raw)?;
    let Some(fragment) = last_text_fragment(&items) else {
        debug!("Rich text has no text fragment");
        return Ok(String::new());
    };

    let bytes = decode_escapes(fragment)?;
    decode_bytes(&bytes, label)
}
