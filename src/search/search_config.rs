use crate::errors::{EngineError, EngineResult};

/// Deepest iteration the search accepts.
pub const MAX_SEARCH_DEPTH: u32 = 64;

/// Largest transposition table budget, in megabytes.
pub const MAX_TT_SIZE_MB: usize = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u32,
    pub tt_size_mb: usize,
    /// Half-width of the aspiration window around the previous score.
    pub aspiration_margin: i32,
    pub null_move_reduction: i32,
    pub null_move_min_depth: i32,
    /// Moves searched at full depth before late-move reductions kick in.
    pub lmr_full_depth_moves: usize,
    pub lmr_min_depth: i32,
    /// Half-move clock value at which a node is scored as a draw.
    pub half_move_limit: u16,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            tt_size_mb: 16,
            aspiration_margin: 50,
            null_move_reduction: 2,
            null_move_min_depth: 3,
            lmr_full_depth_moves: 4,
            lmr_min_depth: 3,
            half_move_limit: 100,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> EngineResult<()> {
        validate_depth(self.max_depth)?;
        if self.tt_size_mb == 0 {
            return Err(EngineError::InvalidConfig(
                "transposition table size must be at least 1 MB".to_owned(),
            ));
        }
        if self.tt_size_mb > MAX_TT_SIZE_MB {
            return Err(EngineError::InvalidConfig(format!(
                "transposition table size {} MB exceeds {MAX_TT_SIZE_MB} MB",
                self.tt_size_mb
            )));
        }
        if self.aspiration_margin <= 0 {
            return Err(EngineError::InvalidConfig(format!(
                "aspiration margin {} must be positive",
                self.aspiration_margin
            )));
        }
        if self.null_move_reduction < 0 {
            return Err(EngineError::InvalidConfig(format!(
                "null move reduction {} must not be negative",
                self.null_move_reduction
            )));
        }
        if self.half_move_limit == 0 {
            return Err(EngineError::InvalidConfig(
                "half-move limit must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

pub fn validate_depth(depth: u32) -> EngineResult<()> {
    if depth == 0 || depth > MAX_SEARCH_DEPTH {
        return Err(EngineError::InvalidDepth {
            requested: depth,
            max: MAX_SEARCH_DEPTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SearchConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_depth() {
        for depth in [0, MAX_SEARCH_DEPTH + 1] {
            let config = SearchConfig {
                max_depth: depth,
                ..SearchConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(EngineError::InvalidDepth {
                    requested: depth,
                    max: MAX_SEARCH_DEPTH
                })
            );
        }
        assert!(validate_depth(MAX_SEARCH_DEPTH).is_ok());
    }

    #[test]
    fn rejects_empty_table_budget() {
        let config = SearchConfig {
            tt_size_mb: 0,
            ..SearchConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_oversized_table_budget() {
        for tt_size_mb in [MAX_TT_SIZE_MB + 1, usize::MAX] {
            let config = SearchConfig {
                tt_size_mb,
                ..SearchConfig::default()
            };
            assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
        }
        let largest = SearchConfig {
            tt_size_mb: MAX_TT_SIZE_MB,
            ..SearchConfig::default()
        };
        assert!(largest.validate().is_ok());
    }
}
