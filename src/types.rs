/// Search depth used when `-d` is not given on the command line.
pub const DEFAULT_DEPTH: u32 = 1;

/// Worker count used when `-w` is not given on the command line and the
/// platform cannot report its own parallelism.
pub const DEFAULT_WORKERS_FALLBACK: usize = 1;

/// Scores at or beyond this magnitude represent a detected mate rather than
/// a material/mobility evaluation. See `search::terminal_score`.
pub const MATE_THRESHOLD: f64 = 1000.0;
