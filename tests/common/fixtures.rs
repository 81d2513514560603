//! Stand-in tools and job files.
//!
//! The compiler copies the source (a shell script) to the executable path,
//! and the typesetter copies the document to the rendered path. That keeps
//! every artifact byte-comparable without OCaml or TeX installed.

use super::env::TestEnv;

/// `sh cc.sh -o OUT SRC`
pub const COMPILER_SH: &str = r#"if grep -q SYNTAX_ERROR "$3"; then
  echo "File \"$3\", line 1: Error: Syntax error" >&2
  exit 2
fi
cp "$3" "$2" && chmod +x "$2"
"#;

/// `sh tex.sh DOCUMENT RENDERED`
pub const TYPESETTER_SH: &str = r#"echo "This is FakeTeX, Version 1.0"
if grep -q BAD_MACRO "$1"; then
  echo "! Undefined control sequence."
  echo "l.1 BEGIN BAD_MACRO"
  cp "$1" "$2"
  exit 1
fi
cp "$1" "$2"
"#;

/// Program that prints `Result: 42` without a trailing newline
pub const PROGRAM_OK: &str = "#!/bin/sh\nprintf 'Result: 42'\n";

/// Program that fails at runtime
pub const PROGRAM_FAILS: &str = "#!/bin/sh\necho 'Fatal error: exception Failure' >&2\nexit 3\n";

pub const HEADER: &str = "BEGIN\n";
pub const FOOTER: &str = "\nEND";

/// Document assembled from the files above
pub const EXPECTED_DOCUMENT: &str = "BEGIN\nResult: 42\nEND";

pub const CONFIG: &str = r#"[compile]
command = ["sh", "cc.sh", "-o", "{executable}", "{source}"]

[render]
command = ["sh", "tex.sh", "{document}", "{rendered}"]

[view]
enabled = false
"#;

/// Write tools, config, templates and a source file into the work dir
pub fn setup_job(env: &TestEnv, program: &str) {
    env.write("cc.sh", COMPILER_SH);
    env.write("tex.sh", TYPESETTER_SH);
    env.write("texrun.toml", CONFIG);
    env.write("latexHeader.tex", HEADER);
    env.write("latexFooter.tex", FOOTER);
    env.write("mp11.ml", program);
}
