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

//! Output formats.
//!
//! A format renders each locale into a unit as soon as it has been
//! extracted, and then combines all units into the final output.

use crate::error::Result;
use crate::extract::Locale;
use crate::options::CompileOptions;
use serde_json::{Map, Value};
use std::fmt::Write as _;

pub trait Format {
    /// What [`Format::add_locale`] renders a single locale into.
    type Unit;

    /// The name used to select the format.
    const NAME: &'static str;

    fn add_locale(&self, locale: Locale, options: &CompileOptions) -> Result<Self::Unit>;

    /// Combine the units of all catalogs, in input order.
    fn format(&self, units: Vec<Self::Unit>, options: &CompileOptions) -> Result<String>;
}

/// The supported formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatKind {
    Javascript,
    Json,
}

impl FormatKind {
    pub const ALL: [FormatKind; 2] = [FormatKind::Javascript, FormatKind::Json];

    pub fn name(self) -> &'static str {
        match self {
            FormatKind::Javascript => Javascript::NAME,
            FormatKind::Json => Json::NAME,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Names of all supported formats.
pub fn names() -> Vec<&'static str> {
    FormatKind::ALL.into_iter().map(FormatKind::name).collect()
}

/// Returns true if `name` selects a supported format.
pub fn supports_format(name: &str) -> bool {
    FormatKind::from_name(name).is_some()
}

/// An Angular run block registering the strings with `gettextCatalog`.
///
/// Catalogs for the same language each get their own `setStrings`
/// call; nothing is merged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Javascript;

impl Format for Javascript {
    type Unit = String;
    const NAME: &'static str = "javascript";

    fn add_locale(&self, locale: Locale, options: &CompileOptions) -> Result<String> {
        let strings = if options.multiline {
            serde_json::to_string_pretty(&locale.strings)?
        } else {
            serde_json::to_string(&locale.strings)?
        };
        Ok(format!(
            "    gettextCatalog.setStrings('{}', {strings});\n",
            locale.language
        ))
    }

    fn format(&self, units: Vec<String>, options: &CompileOptions) -> Result<String> {
        let angular = if options.browserify {
            "require('angular')"
        } else {
            "angular"
        };

        let mut module = format!(
            "{angular}.module('{}').run(['gettextCatalog', function (gettextCatalog) {{\n",
            options.module
        );
        module.push_str("/* jshint -W100 */\n");
        for unit in &units {
            module.push_str(unit);
        }
        module.push_str("/* jshint +W100 */\n");
        if let Some(language) = options.default_language() {
            let _ = writeln!(module, "gettextCatalog.currentLanguage = '{language}';");
        }
        module.push_str("}]);");

        if options.requirejs {
            return Ok(format!(
                "define(['angular', '{}'], function (angular) {{\n{module}\n}});",
                options.module_path
            ));
        }
        Ok(module)
    }
}

/// A JSON object mapping each language to its strings.
///
/// Catalogs for the same language are merged key by key, with later
/// catalogs taking precedence.
#[derive(Clone, Copy, Debug, Default)]
pub struct Json;

impl Format for Json {
    type Unit = Locale;
    const NAME: &'static str = "json";

    fn add_locale(&self, locale: Locale, _options: &CompileOptions) -> Result<Locale> {
        Ok(locale)
    }

    fn format(&self, units: Vec<Locale>, _options: &CompileOptions) -> Result<String> {
        let mut languages = Map::new();
        for Locale { language, strings } in units {
            if let Value::Object(merged) = languages
                .entry(language)
                .or_insert_with(|| Value::Object(Map::new()))
            {
                merged.extend(strings);
            }
        }
        Ok(serde_json::to_string(&languages)?)
    }
}
