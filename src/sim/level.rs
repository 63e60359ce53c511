//! Level layout generation.
//!
//! Pure setup, not a hot path: the session calls this once at construction
//! and registers the resulting placements with the engine. Randomness flows
//! through the injected generator so a layout is reproducible from a seed.

use glam::Vec2;
use rand::Rng;

use super::state::BlockColor;
use crate::config::{GameConfig, Ruleset};
use crate::consts;

/// Placement for one block, before body registration.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSpec {
    pub pos: Vec2,
    pub color: BlockColor,
}

/// Generate the block grid.
///
/// Row count is uniform in the configured range and each row independently
/// draws its block count; rows are centered horizontally and stacked
/// top-down with block-height spacing. Each row shares one uniform-random
/// color variant; the Basic ruleset renders every block identically.
pub fn generate_layout<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Vec<BlockSpec> {
    let rows = rng.random_range(config.min_rows..=config.max_rows);
    let top = config.arena_height * consts::BLOCK_TOP_FRAC;
    let mut blocks = Vec::new();

    for row in 0..rows {
        let count = rng.random_range(config.min_blocks_per_row..=config.max_blocks_per_row);
        let color = match config.ruleset {
            Ruleset::Arcade => BlockColor::from_roll(rng.random_range(1..=100)),
            Ruleset::Basic => BlockColor::Blue,
        };
        let total_width = config.block_width * count as f32;
        let x_offset = (config.arena_width - total_width) / 2.0;
        let y = top - config.block_height * row as f32;

        for i in 0..count {
            blocks.push(BlockSpec {
                pos: Vec2::new(x_offset + (i as f32 + 0.5) * config.block_width, y),
                color,
            });
        }
    }
    blocks
}
