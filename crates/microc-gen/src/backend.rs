//! External backend invocation.
//!
//! The emitter writes textual IR; lowering to machine code is delegated
//! to the external `qbe` assembler and the system C compiler driver,
//! invoked synchronously as child processes. Non-zero exit status from
//! either stage propagates as a [`CodeGenError::Backend`] with the
//! tool's captured stderr.

use crate::error::{CodeGenError, Result};
use std::path::Path;
use std::process::Command;

/// Lowers `.qbe` IR to host assembly: `qbe -o <asm> <qbe>`.
pub(crate) fn assemble(qbe_path: &Path, asm_path: &Path) -> Result<()> {
    let output = Command::new("qbe")
        .arg("-o")
        .arg(asm_path)
        .arg(qbe_path)
        .output()
        .map_err(|source| CodeGenError::Spawn {
            tool: "qbe",
            source,
        })?;

    if !output.status.success() {
        return Err(CodeGenError::Backend {
            tool: "qbe",
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(())
}

/// Assembles and links the executable: `cc <asm> -o <exe>`.
pub(crate) fn link(asm_path: &Path, exe_path: &Path) -> Result<()> {
    let output = Command::new("cc")
        .arg(asm_path)
        .arg("-o")
        .arg(exe_path)
        .output()
        .map_err(|source| CodeGenError::Spawn {
            tool: "cc",
            source,
        })?;

    if !output.status.success() {
        return Err(CodeGenError::Backend {
            tool: "cc",
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(())
}

/// Returns true if both external tools are runnable on this host.
pub fn backend_available() -> bool {
    let qbe = Command::new("qbe")
        .arg("-h")
        .output()
        .map(|_| true)
        .unwrap_or(false);
    let cc = Command::new("cc")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    qbe && cc
}
