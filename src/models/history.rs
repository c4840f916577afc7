// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Undo/redo history of surface snapshots.

use image::RgbaImage;

/// Bounded undo/redo stacks of raster snapshots.
#[derive(Debug, Clone)]
pub struct History {
    /// Undo stack (past states)
    undo_stack: Vec<RgbaImage>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<RgbaImage>,
    /// Maximum number of undo states kept
    max_size: usize,
}

impl History {
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Save the current state before making a change
    pub fn push(&mut self, state: RgbaImage) {
        if self.max_size == 0 {
            return;
        }
        self.undo_stack.push(state);
        if self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
        // A new change invalidates anything undone before it
        self.redo_stack.clear();
    }

    /// Restore the previous state, stashing `current` for redo
    pub fn undo(&mut self, current: RgbaImage) -> Option<RgbaImage> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Restore the next state, stashing `current` for undo
    pub fn redo(&mut self, current: RgbaImage) -> Option<RgbaImage> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(tag: u8) -> RgbaImage {
        RgbaImage::from_pixel(1, 1, image::Rgba([tag, 0, 0, 255]))
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut history = History::new(10);
        history.push(state(1));

        assert_eq!(history.undo(state(2)), Some(state(1)));
        assert!(history.can_redo());
        assert_eq!(history.redo(state(1)), Some(state(2)));
        assert!(!history.can_redo());
        assert!(history.can_undo());
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::new(10);
        history.push(state(1));
        history.undo(state(2));
        history.push(state(3));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut history = History::new(2);
        history.push(state(1));
        history.push(state(2));
        history.push(state(3));

        assert_eq!(history.undo(state(4)), Some(state(3)));
        assert_eq!(history.undo(state(3)), Some(state(2)));
        assert_eq!(history.undo(state(2)), None);
    }

    #[test]
    fn test_zero_depth_disables_history() {
        let mut history = History::new(0);
        history.push(state(1));
        assert!(!history.can_undo());
    }
}
