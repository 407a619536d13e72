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

//! Replace named HTML entities in message ids with literal characters.
//!
//! Browsers decode entities such as `&hellip;` before the runtime looks
//! up a string, so a `msgid` extracted from HTML source must be keyed by
//! the decoded text to be found.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Entity names and the characters they stand for.
pub static ENTITIES: [(&str, &str); 39] = [
    ("hellip", "…"),
    ("cent", "¢"),
    ("pound", "£"),
    ("euro", "€"),
    ("laquo", "«"),
    ("raquo", "»"),
    ("rsaquo", "›"),
    ("lsaquo", "‹"),
    ("copy", "©"),
    ("reg", "®"),
    ("trade", "™"),
    ("sect", "§"),
    ("deg", "°"),
    ("plusmn", "±"),
    ("para", "¶"),
    ("middot", "·"),
    ("ndash", "–"),
    ("mdash", "—"),
    ("lsquo", "‘"),
    ("rsquo", "’"),
    ("sbquo", "‚"),
    ("ldquo", "“"),
    ("rdquo", "”"),
    ("bdquo", "„"),
    ("dagger", "†"),
    ("Dagger", "‡"),
    ("bull", "•"),
    ("prime", "′"),
    ("Prime", "″"),
    ("asymp", "≈"),
    ("ne", "≠"),
    ("le", "≤"),
    ("ge", "≥"),
    ("sup2", "²"),
    ("sup3", "³"),
    ("frac12", "½"),
    ("frac14", "¼"),
    ("frac13", "⅓"),
    ("frac34", "¾"),
];

/// Returns the character for the entity `name`, which is case sensitive.
pub fn lookup(name: &str) -> Option<&'static str> {
    ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|(_, character)| *character)
}

/// Replace every `&name;` and `&name` from [`ENTITIES`] in `text`.
///
/// The name is matched as a prefix, so `&paragraph` becomes `¶graph`.
/// Text without entities is returned unchanged and borrowed.
///
/// ```
/// use gettext_compile::entities::normalize;
///
/// assert_eq!(normalize("Loading&hellip;"), "Loading…");
/// assert_eq!(normalize("&copy 2024"), "© 2024");
/// ```
pub fn normalize(text: &str) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        let mut names = ENTITIES.iter().map(|(name, _)| *name).collect::<Vec<_>>();
        names.sort_by_key(|name| std::cmp::Reverse(name.len()));
        Regex::new(&format!("&({});?", names.join("|"))).expect("well-formed regex")
    });

    re.replace_all(text, |captures: &Captures| lookup(&captures[1]).unwrap_or_default())
}
