// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! PO catalogs and a parser for their textual form.
//!
//! The parser keeps every message in file order, including obsolete
//! (`#~`) messages and messages repeated with the same `msgid`. It
//! does not judge whether a message is usable; that is left to
//! [`crate::extract`].

use std::collections::BTreeSet;
use std::str::FromStr;
use thiserror::Error;

/// Flag set by translation tools on translations which need review.
pub const FUZZY: &str = "fuzzy";

/// Upper bound on the `N` in `msgstr[N]`.
const MAX_PLURAL_FORMS: usize = 32;

/// A parsed PO file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Fields from the header entry, in file order.
    pub headers: Vec<(String, String)>,
    pub items: Vec<Item>,
}

impl Catalog {
    /// Returns the value of the header `name`.
    ///
    /// When a header is repeated, the last value wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the declared `Language`, if it is present and non-empty.
    pub fn language(&self) -> Option<&str> {
        self.header("Language").filter(|language| !language.is_empty())
    }
}

impl FromStr for Catalog {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse(text)
    }
}

/// A single message from a catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Item {
    pub msgid: String,
    pub msgid_plural: Option<String>,
    pub msgctxt: Option<String>,
    /// The translations. There is always at least one element, more
    /// than one means one element per plural form.
    pub msgstr: Vec<String>,
    pub flags: BTreeSet<String>,
    /// Source locations from `#:` lines.
    pub references: Vec<String>,
    /// Comments from `#.` lines.
    pub extracted_comments: Vec<String>,
    /// Translator comments from `#` lines.
    pub comments: Vec<String>,
    pub obsolete: bool,
}

impl Item {
    /// A message with a single translation.
    pub fn singular(msgid: impl Into<String>, msgstr: impl Into<String>) -> Self {
        Self {
            msgid: msgid.into(),
            msgstr: vec![msgstr.into()],
            ..Self::default()
        }
    }

    /// A message with one translation per plural form.
    pub fn plural<S: Into<String>>(
        msgid: impl Into<String>,
        msgid_plural: impl Into<String>,
        msgstr: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            msgid: msgid.into(),
            msgid_plural: Some(msgid_plural.into()),
            msgstr: msgstr.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_msgctxt(mut self, msgctxt: impl Into<String>) -> Self {
        self.msgctxt = Some(msgctxt.into());
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }

    pub fn with_obsolete(mut self, obsolete: bool) -> Self {
        self.obsolete = obsolete;
        self
    }

    pub fn is_fuzzy(&self) -> bool {
        self.flags.contains(FUZZY)
    }

    pub fn is_plural(&self) -> bool {
        self.msgid_plural.is_some()
    }
}

/// Error in parsing a PO file.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// One-based line number.
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected a quoted string")]
    ExpectedString,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unexpected characters after closing quote")]
    TrailingCharacters,
    #[error("invalid plural form index {0:?}")]
    InvalidPluralIndex(String),
    #[error("string continuation without a preceding keyword")]
    OrphanContinuation,
    #[error("unknown keyword {0:?}")]
    UnknownKeyword(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Msgctxt,
    Msgid,
    MsgidPlural,
    Msgstr(usize),
}

#[derive(Default)]
struct Parser {
    catalog: Catalog,
    item: Item,
    field: Option<Field>,
    /// Whether `item` has seen a keyword, as opposed to only comments.
    has_keyword: bool,
    entries: usize,
}

impl Parser {
    fn consume_line(&mut self, line: &str, lineno: usize) -> Result<(), ParseError> {
        let line = line.trim();
        if line.is_empty() {
            self.finish_entry();
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix("#~") {
            let rest = rest.trim_start();
            // `#~|` lines hold previous strings, which we do not keep.
            if rest.starts_with('"') || rest.starts_with("msg") {
                return self.consume_content(rest, lineno, true);
            }
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix('#') {
            self.consume_comment(rest);
            return Ok(());
        }

        self.consume_content(line, lineno, false)
    }

    fn consume_comment(&mut self, comment: &str) {
        // Comments always precede the keywords of their message.
        if self.has_translation() {
            self.finish_entry();
        }

        if let Some(flags) = comment.strip_prefix(',') {
            self.item.flags.extend(
                flags
                    .split(',')
                    .map(str::trim)
                    .filter(|flag| !flag.is_empty())
                    .map(String::from),
            );
        } else if let Some(references) = comment.strip_prefix(':') {
            self.item
                .references
                .extend(references.split_whitespace().map(String::from));
        } else if let Some(extracted) = comment.strip_prefix('.') {
            self.item.extracted_comments.push(extracted.trim().into());
        } else if comment.starts_with('|') {
            // Previous msgid, only relevant to translators.
        } else {
            self.item.comments.push(comment.trim().into());
        }
    }

    fn consume_content(
        &mut self,
        line: &str,
        lineno: usize,
        obsolete: bool,
    ) -> Result<(), ParseError> {
        if line.starts_with('"') {
            let value = parse_string(line, lineno)?;
            let field = self
                .field
                .ok_or_else(|| ParseError::new(lineno, ParseErrorKind::OrphanContinuation))?;
            self.field_mut(field).push_str(&value);
            return Ok(());
        }

        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        let field = parse_keyword(keyword, lineno)?;
        if matches!(field, Field::Msgctxt | Field::Msgid) && self.has_translation() {
            self.finish_entry();
        }

        let value = parse_string(rest, lineno)?;
        self.item.obsolete |= obsolete;
        self.has_keyword = true;
        self.field = Some(field);
        *self.field_mut(field) = value;
        Ok(())
    }

    fn has_translation(&self) -> bool {
        self.has_keyword && matches!(self.field, Some(Field::Msgstr(_)))
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Msgctxt => self.item.msgctxt.get_or_insert_with(String::new),
            Field::Msgid => &mut self.item.msgid,
            Field::MsgidPlural => self.item.msgid_plural.get_or_insert_with(String::new),
            Field::Msgstr(index) => {
                if self.item.msgstr.len() <= index {
                    self.item.msgstr.resize(index + 1, String::new());
                }
                &mut self.item.msgstr[index]
            }
        }
    }

    fn finish_entry(&mut self) {
        let mut item = std::mem::take(&mut self.item);
        self.field = None;
        if !std::mem::take(&mut self.has_keyword) {
            // A block of comments without a message.
            return;
        }

        if item.msgstr.is_empty() {
            item.msgstr.push(String::new());
        }

        let is_first = self.entries == 0;
        self.entries += 1;
        if is_first && item.msgid.is_empty() && item.msgctxt.is_none() && !item.obsolete {
            self.catalog.headers = parse_headers(&item.msgstr[0]);
        } else {
            self.catalog.items.push(item);
        }
    }
}

fn parse_keyword(keyword: &str, lineno: usize) -> Result<Field, ParseError> {
    match keyword {
        "msgctxt" => Ok(Field::Msgctxt),
        "msgid" => Ok(Field::Msgid),
        "msgid_plural" => Ok(Field::MsgidPlural),
        "msgstr" => Ok(Field::Msgstr(0)),
        _ => {
            let Some(index) = keyword
                .strip_prefix("msgstr[")
                .and_then(|rest| rest.strip_suffix(']'))
            else {
                return Err(ParseError::new(
                    lineno,
                    ParseErrorKind::UnknownKeyword(keyword.into()),
                ));
            };
            index
                .parse::<usize>()
                .ok()
                .filter(|index| *index < MAX_PLURAL_FORMS)
                .map(Field::Msgstr)
                .ok_or_else(|| {
                    ParseError::new(lineno, ParseErrorKind::InvalidPluralIndex(index.into()))
                })
        }
    }
}

/// Parse a quoted PO string, resolving C-style escapes.
///
/// Unknown escapes are kept as written.
fn parse_string(text: &str, lineno: usize) -> Result<String, ParseError> {
    let Some(body) = text.trim().strip_prefix('"') else {
        return Err(ParseError::new(lineno, ParseErrorKind::ExpectedString));
    };

    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if !chars.as_str().trim().is_empty() {
                    return Err(ParseError::new(lineno, ParseErrorKind::TrailingCharacters));
                }
                return Ok(value);
            }
            '\\' => match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some('a') => value.push('\u{7}'),
                Some('b') => value.push('\u{8}'),
                Some('f') => value.push('\u{c}'),
                Some('v') => value.push('\u{b}'),
                Some('0') => value.push('\0'),
                Some('\\') => value.push('\\'),
                Some('"') => value.push('"'),
                Some(other) => {
                    value.push('\\');
                    value.push(other);
                }
                None => break,
            },
            c => value.push(c),
        }
    }

    Err(ParseError::new(lineno, ParseErrorKind::UnterminatedString))
}

/// Split the header entry into `Name: value` pairs.
fn parse_headers(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .filter(|(name, _)| !name.is_empty())
        .collect()
}

/// Parse the text of a PO file.
///
/// The first entry is taken as the header when it has an empty
/// `msgid` and no context. A missing header is not an error here.
pub fn parse(text: &str) -> Result<Catalog, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut parser = Parser::default();
    for (idx, line) in text.lines().enumerate() {
        parser.consume_line(line, idx + 1)?;
    }
    parser.finish_entry();
    Ok(parser.catalog)
}
