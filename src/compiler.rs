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

//! Convert a set of PO catalogs into a single output.

use crate::catalog;
use crate::error::{Error, InputId, Result};
use crate::extract::{extract, Locale};
use crate::formats::{self, Format, FormatKind, Javascript, Json};
use crate::options::CompileOptions;
use tracing::debug;

/// Compiles PO catalogs with a fixed set of options.
#[derive(Clone, Debug)]
pub struct Compiler {
    options: CompileOptions,
    kind: FormatKind,
}

impl Compiler {
    /// Create a compiler, rejecting unsupported formats.
    pub fn new(options: CompileOptions) -> Result<Self> {
        let kind = FormatKind::from_name(&options.format)
            .ok_or_else(|| Error::UnsupportedFormat(options.format.clone()))?;
        Ok(Self { options, kind })
    }

    /// Returns true if `format` can be used as `CompileOptions::format`.
    pub fn supports_format(format: &str) -> bool {
        formats::supports_format(format)
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Convert the text of each catalog in `inputs` into one output.
    ///
    /// When given, `source_names[i]` names the source of `inputs[i]`. It
    /// is passed to the message hook and used in error messages.
    ///
    /// Every catalog must parse and declare a `Language`, otherwise the
    /// whole conversion fails.
    pub fn convert<S: AsRef<str>>(
        &self,
        inputs: &[S],
        source_names: Option<&[&str]>,
    ) -> Result<String> {
        match self.kind {
            FormatKind::Javascript => self.render(&Javascript, inputs, source_names),
            FormatKind::Json => self.render(&Json, inputs, source_names),
        }
    }

    fn render<F: Format, S: AsRef<str>>(
        &self,
        format: &F,
        inputs: &[S],
        source_names: Option<&[&str]>,
    ) -> Result<String> {
        let mut units = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            let source_name = source_names.and_then(|names| names.get(index).copied());
            let locale = self.locale(index, input.as_ref(), source_name)?;
            units.push(format.add_locale(locale, &self.options)?);
        }

        debug!(format = F::NAME, locales = units.len(), "Rendering output");
        format.format(units, &self.options)
    }

    fn locale(&self, index: usize, text: &str, source_name: Option<&str>) -> Result<Locale> {
        let input = || InputId {
            index,
            source_name: source_name.map(String::from),
        };
        let catalog = catalog::parse(text).map_err(|source| Error::Parse {
            input: input(),
            source,
        })?;
        extract(&catalog, &self.options, source_name)
            .map_err(|_| Error::MissingLanguage { input: input() })
    }
}
