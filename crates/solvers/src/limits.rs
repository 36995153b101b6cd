/// Iterates beyond this magnitude mean an open method is diverging.
pub const DIVERGENCE_LIMIT: f64 = 1e10;

/// Derivatives and secant slopes below this magnitude are treated as zero.
pub const ZERO_THRESHOLD: f64 = 1e-12;

/// Half-width of the plotted range around an open method's initial guess.
pub(crate) const OPEN_PLOT_MARGIN: f64 = 5.0;

/// Margin added on both sides of a bracket when plotting.
pub(crate) const BRACKET_PLOT_MARGIN: f64 = 1.0;
