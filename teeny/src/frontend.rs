use log::debug;

use std::path::{Path, PathBuf};

use crate::error::CompileResult;

/// Translates one source file into one C file.
pub struct Compiler {
    source: PathBuf,
    output: PathBuf,
}

impl Compiler {
    pub fn new(source: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Reads the source, compiles it and writes the C text.
    ///
    /// Nothing is written when the source fails to compile.
    pub fn compile(&self) -> CompileResult<()> {
        debug!("reading {}", self.source.display());
        let input = std::fs::read_to_string(&self.source)?;

        let c_code = crate::compile(&input)?;

        debug!(
            "writing {} bytes to {}",
            c_code.len(),
            self.output.display()
        );
        std::fs::write(&self.output, c_code)?;
        Ok(())
    }
}
