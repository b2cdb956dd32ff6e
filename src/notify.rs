// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Change notification.  Whatever sits on top of an engine (a window,
//! a progress printer, a test) registers a listener and hears about
//! every change, synchronously, before the mutating call returns.

use description::FractalDescription;
use grid::PixelGrid;
use std::fmt;

/// Something that wants to know when a description or a canvas
/// changes.  Both callbacks default to doing nothing.
pub trait ChangeListener {
    /// The description's bounds, weights, or transforms changed.
    fn on_description_changed(&mut self, _description: &FractalDescription) {}

    /// The grid's contents or dimensions changed.
    fn on_canvas_changed(&mut self, _grid: &PixelGrid) {}
}

/// Handle returned by `subscribe`, needed to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// The listeners, called in the order they subscribed.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Vec<(ListenerId, Box<dyn ChangeListener>)>,
    next_id: usize,
}

impl ChangeNotifier {
    /// An empty list.
    pub fn new() -> ChangeNotifier {
        ChangeNotifier::default()
    }

    /// Add a listener to the end of the list.
    pub fn subscribe(&mut self, listener: Box<dyn ChangeListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener, handing it back.  None if it was already
    /// gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> Option<Box<dyn ChangeListener>> {
        let position = self.listeners.iter().position(|&(lid, _)| lid == id)?;
        Some(self.listeners.remove(position).1)
    }

    /// Number of listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// True if no one is listening.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Tell everyone the description changed.
    pub fn description_changed(&mut self, description: &FractalDescription) {
        for &mut (_, ref mut listener) in self.listeners.iter_mut() {
            listener.on_description_changed(description);
        }
    }

    /// Tell everyone the canvas changed.
    pub fn canvas_changed(&mut self, grid: &PixelGrid) {
        for &mut (_, ref mut listener) in self.listeners.iter_mut() {
            listener.on_canvas_changed(grid);
        }
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
