//! ifjc-drv - Compiler driver.
//!
//! Orchestrates the front-end pipeline: read the source file, parse (the
//! lexer is pulled token by token by the parser), run semantic analysis.
//! The finished AST and the global symbol table are the interface handed
//! to downstream stages, which consume both read-only.
//!
//! The "print the message and exit with the taxonomy code" policy lives
//! in the binary (`main.rs`); everything here returns errors.

use std::path::PathBuf;

use anyhow::Context;

use ifjc_par::{Node, Parser};
use ifjc_sem::{analyze, SymTable};
use ifjc_util::{CompileError, Result};

/// Driver configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path to the single source file.
    pub input: PathBuf,
}

/// Everything the front end produces for downstream stages.
#[derive(Debug)]
pub struct CompileOutput {
    /// The validated program AST.
    pub ast: Node,
    /// The global symbol table, enriched by semantic analysis.
    pub symbols: SymTable,
}

/// Runs the front end over in-memory source text.
///
/// # Examples
///
/// ```
/// use ifjc_drv::compile_source;
///
/// let source = "import \"ifj25\" for Ifj\nclass Program {\nstatic main() {\nreturn 0\n}\n}\n";
/// let output = compile_source(source).unwrap();
/// assert!(output.symbols.find_global("main$0").is_some());
/// ```
pub fn compile_source(source: &str) -> Result<CompileOutput> {
    tracing::debug!("parsing");
    let ast = Parser::new(source)?.parse_program()?;

    tracing::debug!("semantic analysis");
    let symbols = analyze(&ast)?;

    Ok(CompileOutput { ast, symbols })
}

/// One compiler invocation.
pub struct Session {
    config: Config,
}

impl Session {
    /// Creates a session for the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Reads the input file and runs the front end.
    ///
    /// I/O failures surface as `anyhow` errors; compilation failures keep
    /// their [`CompileError`] category so the binary can map them to exit
    /// codes.
    pub fn compile(&self) -> anyhow::Result<CompileOutput> {
        tracing::debug!(input = %self.config.input.display(), "reading source");
        let source = std::fs::read_to_string(&self.config.input)
            .with_context(|| format!("cannot read '{}'", self.config.input.display()))?;

        let output = compile_source(&source)?;

        tracing::debug!("front end finished");
        Ok(output)
    }
}

/// Re-exported for exit-code mapping in the binary.
pub use ifjc_util::CompileError as FrontEndError;
