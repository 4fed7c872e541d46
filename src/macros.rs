/// Compile a grammar pattern once and hand out a `&'static Regex`.
///
/// The argument may be any expression producing something that derefs to
/// `str`, so patterns composed at runtime from the `grammar` fragments work the
/// same way as literals.
#[macro_export]
macro_rules! regex {
    ($pat:expr) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new(&$pat).unwrap());
        &*RE
    }};
}
