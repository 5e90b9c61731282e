//! Shared helpers: clocks, domain errors, pattern matching and hardware probing

pub mod clock;
pub mod error;

use regex::Regex;

/// Number of threads the machine can run in parallel, at least 1
pub fn hardware_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Compile patterns so that each one must match the whole input
///
/// `"http://example\\.com/.*"` matches `http://example.com/a` but not
/// `xhttp://example.com/a`.
pub fn compile_full_match(patterns: &[String]) -> Result<Vec<Regex>, regex::Error> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("^(?:{p})$")))
        .collect()
}

/// True when any pattern matches `text`
pub fn matches_any(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|re| re.is_match(text))
}
