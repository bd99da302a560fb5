//! Render-layer registration for client setup.
//!
//! Pure data: the renderer itself lives in the host engine. The module
//! registers which pass each of its blocks is drawn in; unregistered
//! blocks default to the opaque pass.

use squib_core::BlockId;
use std::collections::HashMap;

/// Rendering pass a block is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderLayer {
    /// Fully opaque geometry.
    #[default]
    Opaque,
    /// Alpha-tested geometry (holes, not translucency).
    Cutout,
    /// Alpha-blended geometry, drawn after opaque passes.
    Translucent,
}

/// Block id -> render layer registry, filled in at client setup.
#[derive(Debug, Default)]
pub struct RenderLayerMap {
    layers: HashMap<BlockId, RenderLayer>,
}

impl RenderLayerMap {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the pass `block` is drawn in. Later registrations win.
    pub fn register(&mut self, block: BlockId, layer: RenderLayer) {
        self.layers.insert(block, layer);
    }

    /// Pass for `block`; opaque unless registered otherwise.
    pub fn layer_for(&self, block: BlockId) -> RenderLayer {
        self.layers.get(&block).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BLOCK_SQUIB;

    #[test]
    fn unregistered_blocks_render_opaque() {
        let map = RenderLayerMap::new();
        assert_eq!(map.layer_for(1), RenderLayer::Opaque);
    }

    #[test]
    fn registration_sticks_and_later_wins() {
        let mut map = RenderLayerMap::new();
        map.register(BLOCK_SQUIB, RenderLayer::Translucent);
        map.register(BLOCK_SQUIB, RenderLayer::Cutout);
        assert_eq!(map.layer_for(BLOCK_SQUIB), RenderLayer::Cutout);
    }
}
