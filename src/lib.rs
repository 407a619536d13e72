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

//! Compile gettext PO catalogs for use in the browser.
//!
//! The translated strings of one or more catalogs are collected per
//! language and written either as an Angular module registering them
//! with the `gettextCatalog` service of angular-gettext, or as a JSON
//! document which can be loaded at runtime.
//!
//! # Examples
//!
//! ```
//! use gettext_compile::{CompileOptions, Compiler};
//!
//! let po = "msgid \"\"\n\
//!           msgstr \"Language: fr\\n\"\n\
//!           \n\
//!           msgid \"Hello\"\n\
//!           msgstr \"Bonjour\"\n";
//!
//! let compiler = Compiler::new(CompileOptions {
//!     format: String::from("json"),
//!     ..CompileOptions::default()
//! })?;
//! assert_eq!(compiler.convert(&[po], None)?, r#"{"fr":{"Hello":"Bonjour"}}"#);
//! # Ok::<(), gettext_compile::Error>(())
//! ```

pub mod catalog;
pub mod compiler;
pub mod entities;
pub mod error;
pub mod extract;
pub mod formats;
pub mod options;

pub use compiler::Compiler;
pub use error::{Error, Result};
pub use formats::supports_format;
pub use options::CompileOptions;
