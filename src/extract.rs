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

//! Turn a catalog into the strings of one locale.

use crate::catalog::{Catalog, Item};
use crate::entities;
use crate::options::CompileOptions;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Context used for messages without a `msgctxt`.
pub const NO_CONTEXT: &str = "$$noContext";

/// Strings of one locale keyed by normalized `msgid`.
///
/// A value is either a translation (a string, or an array of plural
/// forms) or, when the `msgid` is used with several contexts, an object
/// mapping each context to its translation.
pub type LocaleStrings = Map<String, Value>;

/// The strings extracted from one catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Locale {
    pub language: String,
    pub strings: LocaleStrings,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("No Language header found")]
pub struct MissingLanguage;

/// A translation accepted by [`select`].
#[derive(Clone, Debug, PartialEq)]
pub struct Selected {
    pub key: String,
    pub context: String,
    pub value: Value,
}

/// Decide whether `item` contributes to the locale, and with what.
///
/// Untranslated and obsolete items are dropped, and so are fuzzy items
/// unless `ignore_fuzzy_string` is disabled. A single translation is
/// passed through the options' message hook, plural forms are kept as
/// they are.
pub fn select(
    item: &Item,
    options: &CompileOptions,
    source_name: Option<&str>,
) -> Option<Selected> {
    let primary = item.msgstr.first()?;
    if primary.is_empty() || item.obsolete {
        return None;
    }
    if options.ignore_fuzzy_string && item.is_fuzzy() {
        return None;
    }

    let context = match item.msgctxt.as_deref() {
        Some(context) if !context.is_empty() => context,
        _ => NO_CONTEXT,
    };
    let value = match item.msgstr.as_slice() {
        [msgstr] => Value::String(options.process_message(msgstr, &item.msgid, source_name)),
        forms => Value::Array(forms.iter().cloned().map(Value::String).collect()),
    };

    Some(Selected {
        key: entities::normalize(&item.msgid).into_owned(),
        context: context.to_string(),
        value,
    })
}

/// Collect the strings of `catalog`.
///
/// Later items win over earlier items with the same key and context,
/// but keys keep the position of their first occurrence unless
/// `options.sort` is set.
pub fn extract(
    catalog: &Catalog,
    options: &CompileOptions,
    source_name: Option<&str>,
) -> Result<Locale, MissingLanguage> {
    let language = catalog.language().ok_or(MissingLanguage)?;

    let mut by_key = Map::new();
    let mut skipped = 0;
    for item in &catalog.items {
        let Some(Selected {
            key,
            context,
            value,
        }) = select(item, options, source_name)
        else {
            skipped += 1;
            continue;
        };
        if let Value::Object(contexts) = by_key
            .entry(key)
            .or_insert_with(|| Value::Object(Map::new()))
        {
            contexts.insert(context, value);
        }
    }

    let mut strings = by_key
        .into_iter()
        .map(|(key, contexts)| match contexts {
            Value::Object(contexts) => (key, collapse_context(contexts)),
            value => (key, value),
        })
        .collect::<LocaleStrings>();

    if options.sort {
        let mut entries = strings.into_iter().collect::<Vec<_>>();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        strings = entries.into_iter().collect();
    }

    debug!(
        language,
        strings = strings.len(),
        skipped,
        "Extracted strings from {}",
        source_name.unwrap_or("catalog")
    );

    Ok(Locale {
        language: language.to_string(),
        strings,
    })
}

/// Store a translation without context directly under its key.
fn collapse_context(mut contexts: Map<String, Value>) -> Value {
    if contexts.len() == 1 {
        if let Some(value) = contexts.remove(NO_CONTEXT) {
            return value;
        }
    }
    Value::Object(contexts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FUZZY;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn create_catalog(items: Vec<Item>) -> Catalog {
        Catalog {
            headers: vec![(String::from("Language"), String::from("fr"))],
            items,
        }
    }

    #[track_caller]
    fn assert_strings(catalog: &Catalog, options: &CompileOptions, expected: Value) {
        let locale = extract(catalog, options, None).unwrap();
        assert_eq!(Value::Object(locale.strings), expected);
    }

    #[test]
    fn test_missing_language() {
        let mut catalog = create_catalog(vec![Item::singular("Hello", "Bonjour")]);
        catalog.headers.clear();
        assert_eq!(
            extract(&catalog, &CompileOptions::default(), None),
            Err(MissingLanguage)
        );

        catalog.headers = vec![(String::from("Language"), String::new())];
        assert_eq!(
            extract(&catalog, &CompileOptions::default(), None),
            Err(MissingLanguage)
        );
    }

    #[test]
    fn test_singular() {
        let catalog = create_catalog(vec![Item::singular("Hello", "Bonjour")]);
        let locale = extract(&catalog, &CompileOptions::default(), None).unwrap();
        assert_eq!(locale.language, "fr");
        assert_eq!(Value::Object(locale.strings), json!({"Hello": "Bonjour"}));
    }

    #[test]
    fn test_skips_untranslated_and_obsolete() {
        let catalog = create_catalog(vec![
            Item::singular("Empty", ""),
            Item::singular("Old", "Vieux").with_obsolete(true),
            Item::singular("Old fuzzy", "Vieux").with_obsolete(true).with_flag(FUZZY),
            Item::plural("One", "Many", ["", "Beaucoup"]),
            Item::singular("Kept", "Gardé"),
        ]);
        let options = CompileOptions {
            ignore_fuzzy_string: false,
            ..CompileOptions::default()
        };
        assert_strings(&catalog, &options, json!({"Kept": "Gardé"}));
        assert_strings(&catalog, &CompileOptions::default(), json!({"Kept": "Gardé"}));
    }

    #[test]
    fn test_fuzzy() {
        let catalog = create_catalog(vec![
            Item::singular("Stale", "Périmé").with_flag(FUZZY),
            Item::singular("Fresh", "Frais"),
        ]);
        assert_strings(&catalog, &CompileOptions::default(), json!({"Fresh": "Frais"}));

        let options = CompileOptions {
            ignore_fuzzy_string: false,
            ..CompileOptions::default()
        };
        assert_strings(
            &catalog,
            &options,
            json!({"Stale": "Périmé", "Fresh": "Frais"}),
        );
    }

    #[test]
    fn test_contexts() {
        let catalog = create_catalog(vec![
            Item::singular("Hello", "Bonjour").with_msgctxt("greeting"),
            Item::singular("Hello", "Bonjour (menu)").with_msgctxt("menu"),
        ]);
        assert_strings(
            &catalog,
            &CompileOptions::default(),
            json!({"Hello": {"greeting": "Bonjour", "menu": "Bonjour (menu)"}}),
        );
    }

    #[test]
    fn test_single_explicit_context_is_kept() {
        let catalog = create_catalog(vec![Item::singular("File", "Fichier").with_msgctxt("menu")]);
        assert_strings(
            &catalog,
            &CompileOptions::default(),
            json!({"File": {"menu": "Fichier"}}),
        );
    }

    #[test]
    fn test_context_mixed_with_no_context() {
        let catalog = create_catalog(vec![
            Item::singular("Open", "Ouvrir"),
            Item::singular("Open", "Ouvert").with_msgctxt("state"),
            // An empty context is the same as no context.
            Item::singular("Close", "Fermer").with_msgctxt(""),
        ]);
        assert_strings(
            &catalog,
            &CompileOptions::default(),
            json!({
                "Open": {"$$noContext": "Ouvrir", "state": "Ouvert"},
                "Close": "Fermer",
            }),
        );
    }

    #[test]
    fn test_plural_bypasses_hook() {
        let catalog = create_catalog(vec![
            Item::plural("1 item", "%d items", ["1 élément", "%d éléments"]),
            Item::singular("Hello", "Bonjour"),
        ]);
        let options = CompileOptions::default()
            .with_process_msg(|msgstr, _, _| msgstr.to_uppercase());
        assert_strings(
            &catalog,
            &options,
            json!({"1 item": ["1 élément", "%d éléments"], "Hello": "BONJOUR"}),
        );
    }

    #[test]
    fn test_plural_with_single_form_is_singular() {
        let catalog = create_catalog(vec![Item::plural("1 item", "%d items", ["élément"])]);
        assert_strings(
            &catalog,
            &CompileOptions::default(),
            json!({"1 item": "élément"}),
        );
    }

    #[test]
    fn test_hook_arguments() {
        let catalog = create_catalog(vec![Item::singular("Wait&hellip;", "Attendez…")]);
        let options = CompileOptions::default()
            .with_process_msg(|msgstr, msgid, source| {
                format!("{msgstr} [{msgid} @ {}]", source.unwrap_or("?"))
            });
        let locale = extract(&catalog, &options, Some("fr.po")).unwrap();
        // The hook sees the msgid as written, the key is normalized.
        assert_eq!(
            Value::Object(locale.strings),
            json!({"Wait…": "Attendez… [Wait&hellip; @ fr.po]"})
        );
    }

    #[test]
    fn test_normalized_keys_collide() {
        let catalog = create_catalog(vec![
            Item::singular("a&mdash;b", "first"),
            Item::singular("a—b", "second"),
        ]);
        assert_strings(&catalog, &CompileOptions::default(), json!({"a—b": "second"}));
    }

    #[test]
    fn test_last_item_wins_keeping_position() {
        let catalog = create_catalog(vec![
            Item::singular("a", "first"),
            Item::singular("b", "B"),
            Item::singular("a", "second"),
            Item::singular("a", ""),
        ]);
        let locale = extract(&catalog, &CompileOptions::default(), None).unwrap();
        assert_eq!(
            locale.strings.into_iter().collect::<Vec<_>>(),
            vec![
                (String::from("a"), json!("second")),
                (String::from("b"), json!("B")),
            ]
        );
    }

    #[test]
    fn test_sort() {
        let catalog = create_catalog(vec![
            Item::singular("b", "B"),
            Item::singular("a", "A"),
            Item::singular("C", "C"),
        ]);
        let keys = |options: &CompileOptions| {
            extract(&catalog, options, None)
                .unwrap()
                .strings
                .keys()
                .cloned()
                .collect::<Vec<_>>()
        };
        assert_eq!(keys(&CompileOptions::default()), vec!["b", "a", "C"]);

        let options = CompileOptions {
            sort: true,
            ..CompileOptions::default()
        };
        assert_eq!(keys(&options), vec!["C", "a", "b"]);
    }

    #[test]
    fn test_select() {
        let options = CompileOptions::default();
        assert_eq!(
            select(
                &Item::singular("&copy; Acme", "© Acme SA").with_msgctxt("footer"),
                &options,
                None
            ),
            Some(Selected {
                key: String::from("© Acme"),
                context: String::from("footer"),
                value: json!("© Acme SA"),
            })
        );
        assert_eq!(select(&Item::default(), &options, None), None);
    }
}
