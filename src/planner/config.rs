//! Configuration for the transition planner

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::search::Strategy;

/// Errors that can occur when loading planner configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read planner config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse planner config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Search bounds and strategy order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Moves the greedy descent may take before giving up
    pub greedy_max_steps: usize,

    /// Cell distance at which greedy descent hands over to a short BFS
    pub finish_distance: usize,

    /// Depth of that finishing BFS
    pub finish_depth: usize,

    pub astar_max_depth: usize,

    pub bfs_max_depth: usize,

    /// Strategies in the order they are tried
    pub strategies: Vec<Strategy>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            greedy_max_steps: 10,
            finish_distance: 2,
            finish_depth: 4,
            astar_max_depth: 10,
            bfs_max_depth: 10,
            strategies: vec![
                Strategy::Direct,
                Strategy::AStar,
                Strategy::Bfs,
                Strategy::ViaCanonical,
            ],
        }
    }
}

impl PlannerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the greedy step limit
    pub fn with_greedy_max_steps(mut self, steps: usize) -> Self {
        self.greedy_max_steps = steps;
        self
    }

    /// Set when and how deep greedy descent finishes with BFS
    pub fn with_finish(mut self, distance: usize, depth: usize) -> Self {
        self.finish_distance = distance;
        self.finish_depth = depth;
        self
    }

    pub fn with_astar_max_depth(mut self, depth: usize) -> Self {
        self.astar_max_depth = depth;
        self
    }

    pub fn with_bfs_max_depth(mut self, depth: usize) -> Self {
        self.bfs_max_depth = depth;
        self
    }

    /// Replace the strategy order
    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.greedy_max_steps, 10);
        assert_eq!(config.finish_distance, 2);
        assert_eq!(config.finish_depth, 4);
        assert_eq!(config.astar_max_depth, 10);
        assert_eq!(config.bfs_max_depth, 10);
        assert_eq!(config.strategies.len(), 4);
        assert_eq!(config.strategies[0], Strategy::Direct);
    }

    #[test]
    fn test_builder_pattern() {
        let config = PlannerConfig::new()
            .with_astar_max_depth(6)
            .with_finish(4, 2)
            .with_strategies(vec![Strategy::Bfs]);

        assert_eq!(config.astar_max_depth, 6);
        assert_eq!(config.finish_distance, 4);
        assert_eq!(config.finish_depth, 2);
        assert_eq!(config.strategies, vec![Strategy::Bfs]);
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
bfs_max_depth = 6
strategies = ["astar", "via_canonical"]
"#;
        let config = PlannerConfig::from_str(toml_str).expect("Should parse");
        assert_eq!(config.bfs_max_depth, 6);
        assert_eq!(config.greedy_max_steps, 10);
        assert_eq!(
            config.strategies,
            vec![Strategy::AStar, Strategy::ViaCanonical]
        );
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = PlannerConfig::from_str("").expect("Should parse");
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let err = PlannerConfig::from_str(r#"strategies = ["dfs"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PlannerConfig::from_file(Path::new("/nonexistent/planner.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
