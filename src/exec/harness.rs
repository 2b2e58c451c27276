// src/exec/harness.rs

//! Wraps raw user script text into a runnable Python program.

/// Build the program text handed to the interpreter.
///
/// The emitted program:
/// - runs the user script at module level,
/// - requires a `main()` function and exits non-zero with
///   `main() is not defined` on stderr when it is missing,
/// - writes `str(main())` to stdout with no trailing newline (a `None`
///   return becomes the empty string),
/// - prints the full traceback to stderr and exits 1 on any uncaught
///   exception from the user code.
///
/// stdout carries only the returned value; everything else goes to stderr.
pub fn build_harness(user_script: &str) -> String {
    let mut program = String::new();
    program.push_str("# -*- coding: utf-8 -*-\n");
    program.push_str("import sys\n");
    program.push_str("import traceback\n");
    program.push('\n');
    program.push_str("# --- user script begin ---\n");
    program.push_str(user_script);
    if !user_script.ends_with('\n') {
        program.push('\n');
    }
    program.push_str("# --- user script end ---\n");
    program.push('\n');
    program.push_str("def __scriptcast_main():\n");
    program.push_str("    if 'main' not in globals():\n");
    program.push_str("        raise SystemExit('main() is not defined')\n");
    program.push_str("    result = main()\n");
    program.push_str("    if result is None:\n");
    program.push_str("        return ''\n");
    program.push_str("    return str(result)\n");
    program.push('\n');
    program.push_str("if __name__ == '__main__':\n");
    program.push_str("    try:\n");
    program.push_str("        sys.stdout.write(__scriptcast_main())\n");
    program.push_str("    except SystemExit:\n");
    program.push_str("        raise\n");
    program.push_str("    except Exception:\n");
    program.push_str("        traceback.print_exc()\n");
    program.push_str("        sys.exit(1)\n");
    program
}
