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

use crate::catalog::ParseError;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Identifies one of the catalogs given to a conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputId {
    /// Zero-based position among the inputs.
    pub index: usize,
    pub source_name: Option<String>,
}

impl Display for InputId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.source_name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "#{}", self.index + 1),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not parse catalog {input}")]
    Parse {
        input: InputId,
        #[source]
        source: ParseError,
    },
    #[error("No Language header found in catalog {input}")]
    MissingLanguage { input: InputId },
    #[error("Unsupported format: {0:?}")]
    UnsupportedFormat(String),
    #[error("Could not serialize strings: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
