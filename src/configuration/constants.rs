pub mod cargo_env {
    pub const CARGO_PKG_NAME: &'static str = env!("CARGO_PKG_NAME");
}

pub mod common {
    /// Conclusions kept when none are given on the command line. Reports in
    /// the wild spell a failing case either "failed" (explicit status
    /// attribute) or "failure" (inferred from a failure child element), so
    /// the default accepts both.
    pub const DEFAULT_ALLOWED_CONCLUSIONS: [&'static str; 5] =
        ["passed", "failed", "failure", "error", "skipped"];
}
