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

//! Compile PO files into an angular-gettext module or a JSON document.
//!
//! The inputs are compiled in the order given. Options can be read from
//! a JSON file with `--config`; flags on the command line take
//! precedence over it.

use anyhow::{bail, Context as _};
use clap::Parser;
use gettext_compile::{formats, supports_format, CompileOptions, Compiler};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The file to write the output to, `-` for standard output.
    #[arg(short, long)]
    output: PathBuf,
    /// JSON file with compiler options, e.g. `{"format": "json"}`.
    #[arg(long)]
    config: Option<PathBuf>,
    /// The output format: `javascript` or `json`.
    #[arg(short, long)]
    format: Option<String>,
    /// Name of the Angular module to register the strings with.
    #[arg(long)]
    module: Option<String>,
    /// Include translations flagged as fuzzy.
    #[arg(long)]
    include_fuzzy: bool,
    /// Sort the strings of each language by message id.
    #[arg(long)]
    sort: bool,
    /// Pretty-print the strings in JavaScript output.
    #[arg(long)]
    multiline: bool,
    /// Load Angular with `require('angular')`.
    #[arg(long)]
    browserify: bool,
    /// Wrap the output in an AMD `define` call.
    #[arg(long)]
    requirejs: bool,
    /// Module path listed as dependency of the AMD `define` call.
    #[arg(long)]
    module_path: Option<String>,
    /// Language to make current after registering the strings.
    #[arg(long)]
    default_language: Option<String>,
    /// The PO files to compile.
    #[arg(value_name = "LANGUAGE.po", required = true)]
    inputs: Vec<PathBuf>,
}

impl Args {
    /// Build the compiler options from `--config` and the flags.
    fn options(&self) -> anyhow::Result<CompileOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let config = fs::read_to_string(path)
                    .with_context(|| format!("Could not read {}", path.display()))?;
                serde_json::from_str(&config).with_context(|| {
                    format!("Could not parse {} as compiler options", path.display())
                })?
            }
            None => CompileOptions::default(),
        };

        if let Some(format) = &self.format {
            options.format = format.clone();
        }
        if let Some(module) = &self.module {
            options.module = module.clone();
        }
        if let Some(module_path) = &self.module_path {
            options.module_path = module_path.clone();
        }
        if let Some(language) = &self.default_language {
            options.default_language = Some(language.clone());
        }
        options.ignore_fuzzy_string &= !self.include_fuzzy;
        options.sort |= self.sort;
        options.multiline |= self.multiline;
        options.browserify |= self.browserify;
        options.requirejs |= self.requirejs;

        if !supports_format(&options.format) {
            bail!(
                "Unsupported format {:?}, expected one of: {}",
                options.format,
                formats::names().join(", ")
            );
        }
        Ok(options)
    }
}

/// Read every input and compile them in order.
fn compile(compiler: &Compiler, inputs: &[PathBuf]) -> anyhow::Result<String> {
    let texts = inputs
        .iter()
        .map(|path| {
            fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let names = inputs
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>();
    let names = names.iter().map(String::as_str).collect::<Vec<_>>();

    info!("Compiling {} catalogs", texts.len());
    Ok(compiler.convert(texts.as_slice(), Some(names.as_slice()))?)
}

fn write_output(path: &Path, output: &str) -> anyhow::Result<()> {
    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.write_all(b"\n")?;
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }
    fs::write(path, output).with_context(|| format!("Could not write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let compiler = Compiler::new(args.options()?)?;
    let output = compile(&compiler, &args.inputs)?;
    write_output(&args.output, &output)
}
