//! The `explain` command: describe a diagnostic code.

use humus_diagnostic::ErrorCode;

pub fn explain_error(code_str: &str) {
    let Some(code) = ErrorCode::ALL
        .into_iter()
        .find(|code| code.as_str().eq_ignore_ascii_case(code_str))
    else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Known codes:");
        for code in ErrorCode::ALL {
            eprintln!("  {code}  {}", code.description());
        }
        std::process::exit(1);
    };
    println!("{code}: {}", code.description());
}
