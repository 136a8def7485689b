//! End-to-end compilation tests.
//!
//! These run the full pipeline through `qbe` and the system C compiler
//! and execute the produced binaries. They skip (pass vacuously) on
//! hosts without the external toolchain.

use assert_cmd::Command;
use microc_gen::backend_available;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn microc() -> Command {
    Command::new(PathBuf::from(env!("CARGO_BIN_EXE_microc")))
}

fn write_source(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).expect("failed to write source file");
    path
}

/// Compiles `text` and returns the exit code of the produced binary.
fn compile_and_run(text: &str) -> i32 {
    let dir = TempDir::new().unwrap();
    let input = write_source(dir.path(), "prog.micro", text);
    let output = dir.path().join("prog");

    microc()
        .arg(&input)
        .args(["-o"])
        .arg(&output)
        .assert()
        .success();

    assert!(output.exists(), "executable missing");
    // Intermediates are removed on success.
    assert!(!dir.path().join("prog.qbe").exists());
    assert!(!dir.path().join("prog.asm").exists());

    std::process::Command::new(&output)
        .status()
        .expect("failed to run produced binary")
        .code()
        .expect("binary killed by signal")
}

#[test]
fn e2e_empty_main_exits_zero() {
    if !backend_available() {
        eprintln!("skipping: qbe/cc not on PATH");
        return;
    }
    assert_eq!(compile_and_run("int main() { return 0; }\n"), 0);
}

#[test]
fn e2e_arithmetic() {
    if !backend_available() {
        eprintln!("skipping: qbe/cc not on PATH");
        return;
    }
    assert_eq!(
        compile_and_run("int main() { int x = 2 + 3 * 4; return x; }\n"),
        14
    );
}

#[test]
fn e2e_function_call() {
    if !backend_available() {
        eprintln!("skipping: qbe/cc not on PATH");
        return;
    }
    assert_eq!(
        compile_and_run(
            "int add(int a, int b) { return a + b; }\n\
             int main() { return add(40, 2); }\n"
        ),
        42
    );
}

#[test]
fn e2e_if_else_chain() {
    if !backend_available() {
        eprintln!("skipping: qbe/cc not on PATH");
        return;
    }
    assert_eq!(
        compile_and_run(
            "int main() {\n\
               int x = 2;\n\
               if (x == 1) { return 10; } else if (x == 2) { return 20; } else { return 30; }\n\
             }\n"
        ),
        20
    );
}

#[test]
fn e2e_parameter_assignment() {
    if !backend_available() {
        eprintln!("skipping: qbe/cc not on PATH");
        return;
    }
    assert_eq!(
        compile_and_run(
            "int bump(int a) { a = a + 1; return a; }\n\
             int main() { return bump(41); }\n"
        ),
        42
    );
}

#[test]
fn e2e_scopes_and_reassignment() {
    if !backend_available() {
        eprintln!("skipping: qbe/cc not on PATH");
        return;
    }
    assert_eq!(
        compile_and_run(
            "int main() {\n\
               int x = 1;\n\
               { int x = 50; x = 51; }\n\
               x = x + 4;\n\
               return x;\n\
             }\n"
        ),
        5
    );
}

#[test]
fn e2e_keep_temps_retains_intermediates() {
    if !backend_available() {
        eprintln!("skipping: qbe/cc not on PATH");
        return;
    }
    let dir = TempDir::new().unwrap();
    let input = write_source(dir.path(), "prog.micro", "int main() { return 0; }\n");
    let output = dir.path().join("prog");

    microc()
        .arg(&input)
        .args(["-o"])
        .arg(&output)
        .arg("--keep-temps")
        .assert()
        .success();

    assert!(dir.path().join("prog.qbe").exists());
    assert!(dir.path().join("prog.asm").exists());
}

#[test]
fn e2e_variadic_printf() {
    if !backend_available() {
        eprintln!("skipping: qbe/cc not on PATH");
        return;
    }
    let dir = TempDir::new().unwrap();
    let input = write_source(
        dir.path(),
        "hello.micro",
        "int printf(string fmt, ...);\n\
         int main() { printf(\"answer=%d\\n\", 42); return 0; }\n",
    );
    let output = dir.path().join("hello");

    microc().arg(&input).args(["-o"]).arg(&output).assert().success();

    let run = std::process::Command::new(&output)
        .output()
        .expect("failed to run produced binary");
    assert_eq!(String::from_utf8_lossy(&run.stdout), "answer=42\n");
}
