/// Runtime settings of a [`Universe`](crate::Universe).
///
/// ```
/// use axiomata::{Config, Universe};
///
/// let universe = Universe::with_config(Config {
///     echo_statements: true,
///     ..Config::default()
/// });
/// assert!(universe.config().echo_statements);
/// assert_eq!(universe.config().max_depth, Config::DEFAULT_MAX_DEPTH);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "use-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Config {
    /// Log every appended statement at `info` level instead of `debug`
    pub echo_statements: bool,
    /// Log every declaration at `info` level instead of `debug`
    pub echo_declarations: bool,
    /// Compound formulas deeper than this are rejected
    pub max_depth: usize,
}

impl Config {
    pub const DEFAULT_MAX_DEPTH: usize = 256;
}

impl Default for Config {
    fn default() -> Self {
        Config {
            echo_statements: false,
            echo_declarations: false,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
