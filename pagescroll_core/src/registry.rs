// Copyright 2026 the Pagescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered registry of section handles.
//!
//! Every child passed to the controller owns one slot, at its ordinal. A child
//! that has no attachable element keeps an empty slot: it still counts toward
//! ordinals, but nothing is intercepted for it.
//!
//! Reordering and removal are handled by [`SectionRegistry::rebuild`], which
//! replaces every slot from the current child order instead of patching slots
//! in place. Sections whose handle stays at the same ordinal survive a
//! rebuild with their scroll state.

use alloc::vec::Vec;

/// One registered section.
#[derive(Clone, Debug, PartialEq)]
pub struct Section<H> {
    index: usize,
    handle: H,
    last_offset: f64,
}

impl<H> Section<H> {
    fn new(index: usize, handle: H) -> Self {
        Self {
            index,
            handle,
            last_offset: 0.0,
        }
    }

    /// Ordinal position among the controller's children.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The host handle of the section's scrollable element.
    #[must_use]
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Last inner-scroll offset observed for this section.
    #[must_use]
    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }

    /// Replaces the last observed inner-scroll offset, returning the old one.
    pub fn replace_last_offset(&mut self, offset: f64) -> f64 {
        core::mem::replace(&mut self.last_offset, offset)
    }
}

/// Slot-per-child registry of [`Section`]s.
#[derive(Clone, Debug)]
pub struct SectionRegistry<H> {
    slots: Vec<Option<Section<H>>>,
}

impl<H> Default for SectionRegistry<H> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<H: PartialEq> SectionRegistry<H> {
    /// Replaces every slot from the current child order.
    ///
    /// `None` children keep an empty slot. A child whose handle already sat at
    /// the same ordinal keeps its last observed offset; every other section
    /// starts from zero.
    pub fn rebuild(&mut self, children: impl IntoIterator<Item = Option<H>>) {
        let mut previous = core::mem::take(&mut self.slots);
        self.slots.extend(children.into_iter().enumerate().map(|(index, handle)| {
            let handle = handle?;
            let kept = previous
                .get_mut(index)
                .and_then(Option::take)
                .filter(|old| old.handle == handle);
            Some(match kept {
                Some(section) => section,
                None => Section::new(index, handle),
            })
        }));
    }

    /// Registers `handle` at `index`, growing the registry with empty slots if
    /// needed. Returns the handle previously registered there.
    ///
    /// Re-registering the handle already at `index` leaves the section as is.
    pub fn attach(&mut self, index: usize, handle: H) -> Option<H> {
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, || None);
        }
        let slot = &mut self.slots[index];
        if slot.as_ref().is_some_and(|section| section.handle == handle) {
            return Some(handle);
        }
        slot.replace(Section::new(index, handle)).map(|old| old.handle)
    }
}

impl<H> SectionRegistry<H> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the slot at `index`, returning its handle.
    ///
    /// The slot itself stays so later ordinals do not shift.
    pub fn detach(&mut self, index: usize) -> Option<H> {
        self.slots.get_mut(index)?.take().map(|old| old.handle)
    }

    /// Removes every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Number of slots, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the section at `index` if one is attached.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Section<H>> {
        self.slots.get(index)?.as_ref()
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Section<H>> {
        self.slots.get_mut(index)?.as_mut()
    }

    /// Returns the handle at `index` if one is attached.
    #[must_use]
    pub fn handle(&self, index: usize) -> Option<&H> {
        self.get(index).map(Section::handle)
    }

    /// Iterates attached sections in ordinal order, skipping empty slots.
    pub fn iter_attached(&self) -> impl Iterator<Item = &Section<H>> {
        self.slots.iter().flatten()
    }
}
