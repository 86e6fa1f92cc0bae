// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

mod args;

use std::fs::File;
use std::io::{self, IsTerminal, Read, Write};

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use jhtml_compiler::{
    Compilation, CompileOptions, NodeTally, Severity, compile_arith, emit_compile_error,
    generate_forest, generate_html, parse_document,
};
use tracing::{debug, error, info, warn};
use tracing_subscriber::fmt::format::FmtSpan;

use crate::args::{Args, Target};

fn read_source(args: &Args) -> Result<String, eyre::Report> {
    let mut source = String::new();
    match &args.input {
        Some(path) => {
            debug!("Reading {}", path.display());
            File::open(path)?.read_to_string(&mut source)?;
        }
        None => {
            debug!("Reading standard input");
            io::stdin().lock().read_to_string(&mut source)?;
        }
    }
    Ok(source)
}

fn open_output(args: &Args) -> Result<Box<dyn Write>, eyre::Report> {
    Ok(match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    })
}

/// Returns whether the document was accepted.
fn compile_document(args: &Args, source: &str, use_color: bool) -> Result<bool, eyre::Report> {
    let options = CompileOptions {
        log_ignored_lexemes: args
            .log_ignored_lexemes
            .unwrap_or(CompileOptions::default().log_ignored_lexemes),
    };
    let compilation = match parse_document(source, options) {
        Ok(compilation) => compilation,
        Err(e) => {
            emit_compile_error(&e, source, Severity::Error, use_color);
            return Ok(false);
        }
    };
    for warning in &compilation.warnings {
        emit_compile_error(warning, source, Severity::Warning, use_color);
    }
    for diagnostic in &compilation.diagnostics {
        emit_compile_error(diagnostic, source, Severity::Error, use_color);
    }

    let (generated, census, released) = render_and_release(compilation, || open_output(args));
    if census != released {
        warn!("Teardown mismatch: built {census}, released {released}");
    } else {
        debug!("Released {} nodes", released.total());
    }
    generated
}

/// Render an accepted compilation, then release its tree whether or not rendering succeeded.
/// The output is only opened for an accepted program.
fn render_and_release<W: Write>(
    compilation: Compilation,
    open: impl FnOnce() -> Result<W, eyre::Report>,
) -> (Result<bool, eyre::Report>, NodeTally, NodeTally) {
    let generated = match &compilation.program {
        Some(program) if compilation.succeeded() => open().and_then(|mut out| {
            generate_html(program, &mut out)?;
            Ok(true)
        }),
        _ => Ok(false),
    };
    let (census, released) = compilation.teardown();
    (generated, census, released)
}

fn compile_expression(args: &Args, source: &str, use_color: bool) -> Result<bool, eyre::Report> {
    let compiled = match compile_arith(source) {
        Ok(compiled) => compiled,
        Err(e) => {
            emit_compile_error(&e, source, Severity::Error, use_color);
            return Ok(false);
        }
    };
    info!("Result: {}", compiled.value);
    let mut out = open_output(args)?;
    generate_forest(&compiled.program, compiled.value, &mut out)?;
    Ok(true)
}

fn main() -> Result<(), eyre::Report> {
    color_eyre::install()?;
    let cli_args = Args::parse();
    let config_file = cli_args.config_file.clone();
    let mut args_figment = Figment::new().merge(Serialized::defaults(cli_args));
    if let Some(config_file) = config_file {
        args_figment = args_figment.merge(Yaml::file(config_file));
    }
    let args: Args = args_figment
        .merge(Env::raw().only(&["LOG_IGNORED_LEXEMES"]))
        .extract()?;

    let main_subscriber = tracing_subscriber::fmt()
        .compact()
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NONE)
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(main_subscriber).unwrap_or_else(|e| {
        eprintln!("Unable to configure logging: {e}");
        std::process::exit(1);
    });

    let source = read_source(&args)?;
    let use_color = io::stderr().is_terminal();
    let accepted = match args.target {
        Target::Html => compile_document(&args, &source, use_color)?,
        Target::Forest => compile_expression(&args, &source, use_color)?,
    };

    if !accepted {
        error!("compilation failed");
        std::process::exit(1);
    }
    info!("compilation successful");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compilation(source: &str) -> Compilation {
        parse_document(source, CompileOptions::default()).unwrap()
    }

    #[test]
    fn test_accepted_document_is_rendered_and_released() {
        let mut buffer = vec![];
        let (generated, census, released) =
            render_and_release(compilation(r#"{type: "p", content: "Hi"}"#), || Ok(&mut buffer));
        assert!(generated.unwrap());
        assert_eq!(census, released);
        assert_eq!(String::from_utf8(buffer).unwrap(), "<p>Hi</p>\n");
    }

    #[test]
    fn test_generation_failure_still_releases_tree() {
        let source =
            r#"{type: "ol", content: for (i = 0; i >= 0; i = i + 1) {type: "li", content: i}}"#;
        let (generated, census, released) =
            render_and_release(compilation(source), || Ok(std::io::sink()));
        assert!(generated.is_err());
        assert!(census.total() > 0);
        assert_eq!(census, released);
    }

    #[test]
    fn test_rejected_document_never_opens_output() {
        let (generated, census, released) =
            render_and_release(compilation(r#"{type: "blink"}"#), || -> Result<Vec<u8>, _> {
                Err(eyre::eyre!("output opened for a rejected document"))
            });
        assert!(!generated.unwrap());
        assert_eq!(census, released);
    }
}
