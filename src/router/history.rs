use serde::{ Serialize, Deserialize };

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}

impl ScrollPosition {
    pub const TOP: ScrollPosition = ScrollPosition { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub location: String,
    pub scroll: Option<ScrollPosition>,
}

impl HistoryEntry {
    fn new(location: String) -> Self {
        Self {
            location,
            scroll: None,
        }
    }
}

/// Path-based session history with a cursor, like the browser's.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    pub fn entry(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Appends an entry after the cursor, dropping every forward entry.
    pub fn push(&mut self, location: String) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(HistoryEntry::new(location));
        self.cursor = self.entries.len() - 1;
    }

    pub fn replace(&mut self, location: String) {
        match self.entries.get_mut(self.cursor) {
            Some(entry) => *entry = HistoryEntry::new(location),
            None => self.push(location),
        }
    }

    pub fn save_scroll(&mut self, position: ScrollPosition) {
        if let Some(entry) = self.entries.get_mut(self.cursor) {
            entry.scroll = Some(position);
        }
    }

    /// Index `delta` steps away from the cursor, if it exists.
    pub fn offset(&self, delta: isize) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let target = (self.cursor as isize).checked_add(delta)?;
        if target < 0 || target as usize >= self.entries.len() {
            None
        } else {
            Some(target as usize)
        }
    }

    /// Moves the cursor and returns the scroll position saved for that entry.
    pub fn move_to(&mut self, index: usize) -> Option<ScrollPosition> {
        let entry = self.entries.get(index)?;
        let scroll = entry.scroll;
        self.cursor = index;
        scroll
    }
}
