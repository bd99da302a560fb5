//! Inventory slots with container-delegated validation.
//!
//! A slot does not decide on its own what it accepts; it asks the
//! container it belongs to. This keeps per-machine slot rules (e.g. a
//! pattern slot that only takes encoded patterns) in one place.

use squib_core::ItemStack;

/// A container's slot-validity rules.
pub trait SlotPolicy {
    /// Whether `stack` may be placed into slot `slot`.
    fn is_valid_for_slot(&self, slot: usize, stack: &ItemStack) -> bool;
}

/// A slot that delegates validity checks to its container's policy.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedSlot {
    /// Index of this slot within its container.
    pub index: usize,
}

impl ValidatedSlot {
    /// Slot at `index`.
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Whether the container's policy admits `stack` into this slot.
    pub fn accepts<P: SlotPolicy>(&self, policy: &P, stack: &ItemStack) -> bool {
        policy.is_valid_for_slot(self.index, stack)
    }
}

/// A fixed-size item container.
#[derive(Debug, Clone)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
}

impl Inventory {
    /// Empty inventory with `size` slots.
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    /// Stack in `slot`, if any.
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    /// Remove and return the stack in `slot`.
    pub fn take(&mut self, slot: usize) -> Option<ItemStack> {
        self.slots.get_mut(slot).and_then(|s| s.take())
    }

    /// Place `stack` into `slot` if the container's policy admits it and
    /// the slot is free. Returns the stack back on rejection.
    pub fn insert_if_valid<P: SlotPolicy>(
        &mut self,
        slot: usize,
        stack: ItemStack,
        policy: &P,
    ) -> Option<ItemStack> {
        if !ValidatedSlot::new(slot).accepts(policy, &stack) {
            return Some(stack);
        }
        match self.slots.get_mut(slot) {
            Some(cell) if cell.is_none() => {
                *cell = Some(stack);
                None
            }
            _ => Some(stack),
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }
}
