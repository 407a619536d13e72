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

//! Options controlling how catalogs are compiled.

use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Hook applied to every singular translation.
///
/// It receives the translated string, the original (not normalized)
/// `msgid` and the name of the catalog's source, if known.
pub type MessageProcessor = Arc<dyn Fn(&str, &str, Option<&str>) -> String + Send + Sync>;

/// Compiler options.
///
/// The options can be deserialized from JSON using the camelCase names
/// `format`, `ignoreFuzzyString`, `module`, `sort`, `multiline`,
/// `browserify`, `requirejs`, `modulePath` and `defaultLanguage`. All
/// keys are optional.
#[derive(Clone, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CompileOptions {
    /// Name of the output format, see [`crate::formats`].
    pub format: String,
    /// Leave out translations flagged as fuzzy.
    pub ignore_fuzzy_string: bool,
    /// Name of the Angular module the strings are registered with.
    pub module: String,
    /// Sort the strings of each locale by `msgid`.
    pub sort: bool,
    /// Pretty-print the strings in JavaScript output.
    pub multiline: bool,
    /// Load Angular with `require('angular')` in JavaScript output.
    pub browserify: bool,
    /// Wrap JavaScript output in an AMD `define` call.
    pub requirejs: bool,
    /// Module path listed as dependency of the `define` call.
    pub module_path: String,
    /// Language to make current once the strings are registered.
    pub default_language: Option<String>,
    #[serde(skip)]
    pub process_msg: Option<MessageProcessor>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            format: String::from("javascript"),
            ignore_fuzzy_string: true,
            module: String::from("gettext"),
            sort: false,
            multiline: false,
            browserify: false,
            requirejs: false,
            module_path: String::new(),
            default_language: None,
            process_msg: None,
        }
    }
}

impl CompileOptions {
    /// Set the hook applied to singular translations.
    pub fn with_process_msg<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &str, Option<&str>) -> String + Send + Sync + 'static,
    {
        self.process_msg = Some(Arc::new(hook));
        self
    }

    /// Run the configured hook, or return `msgstr` unchanged without one.
    pub fn process_message(&self, msgstr: &str, msgid: &str, source_name: Option<&str>) -> String {
        match &self.process_msg {
            Some(hook) => hook(msgstr, msgid, source_name),
            None => msgstr.to_string(),
        }
    }

    /// The default language, if one is set and non-empty.
    pub fn default_language(&self) -> Option<&str> {
        self.default_language
            .as_deref()
            .filter(|language| !language.is_empty())
    }
}

impl fmt::Debug for CompileOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileOptions")
            .field("format", &self.format)
            .field("ignore_fuzzy_string", &self.ignore_fuzzy_string)
            .field("module", &self.module)
            .field("sort", &self.sort)
            .field("multiline", &self.multiline)
            .field("browserify", &self.browserify)
            .field("requirejs", &self.requirejs)
            .field("module_path", &self.module_path)
            .field("default_language", &self.default_language)
            .field("process_msg", &self.process_msg.as_ref().map(|_| "<hook>"))
            .finish()
    }
}
