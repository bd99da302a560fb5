//! Item stacks and tool durability bookkeeping.

use serde::{Deserialize, Serialize};

/// Kinds of items this module deals with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Flint-and-steel style igniter tool.
    FireStriker,
    /// The squib block in item form.
    SquibCharge,
    /// Encoded crafting pattern accepted by pattern slots.
    Pattern,
    /// Anything else the host game defines; inert for our purposes.
    Misc,
}

impl ItemKind {
    /// Whether using this item on a block can set it alight.
    pub fn ignites_blocks(&self) -> bool {
        matches!(self, ItemKind::FireStriker)
    }

    /// Maximum durability, or 0 for items without a wear bar.
    pub fn max_durability(&self) -> u32 {
        match self {
            ItemKind::FireStriker => 64,
            ItemKind::SquibCharge | ItemKind::Pattern | ItemKind::Misc => 0,
        }
    }

    /// Maximum stack size for this item kind.
    pub fn max_stack_size(&self) -> u32 {
        match self {
            ItemKind::FireStriker => 1,
            ItemKind::SquibCharge | ItemKind::Pattern | ItemKind::Misc => 64,
        }
    }
}

/// A stack of items, with accumulated wear for tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// What the stack holds.
    pub kind: ItemKind,
    /// Stack size.
    pub count: u32,
    /// Accumulated wear (0 = pristine). Meaningless when
    /// `kind.max_durability()` is 0.
    pub damage: u32,
}

impl ItemStack {
    /// Create a pristine stack.
    pub fn new(kind: ItemKind, count: u32) -> Self {
        Self {
            kind,
            count: count.min(kind.max_stack_size()),
            damage: 0,
        }
    }

    /// Apply `amount` units of wear.
    ///
    /// Returns `true` if the item broke (wear reached max durability).
    /// Items without a wear bar never break.
    pub fn damage(&mut self, amount: u32) -> bool {
        let max = self.kind.max_durability();
        if max == 0 {
            return false;
        }
        self.damage = (self.damage + amount).min(max);
        self.damage >= max
    }

    /// Whether this item has worn out.
    pub fn is_broken(&self) -> bool {
        let max = self.kind.max_durability();
        max > 0 && self.damage >= max
    }
}
