//! Playlist bookkeeping.
//!
//! The catalog only knows about ordering and which entry is active. It never
//! touches a media element; the controller reacts to the [`Removal`] it
//! reports.

use std::fmt;

use super::PlayerError;

/// Which of the two media elements an item plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Classify a declared content type such as `audio/mpeg` or `video/mp4`.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let prefix = content_type.get(..6)?;
        if prefix.eq_ignore_ascii_case("audio/") {
            Some(MediaKind::Audio)
        } else if prefix.eq_ignore_ascii_case("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// The element that must be idle while this one is active.
    pub fn other(self) -> Self {
        match self {
            MediaKind::Audio => MediaKind::Video,
            MediaKind::Video => MediaKind::Audio,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// One entry of a file selection, before it has been accepted.
#[derive(Debug, Clone)]
pub struct Candidate<S> {
    pub source: S,
    pub display_name: String,
    pub content_type: String,
}

impl<S> Candidate<S> {
    pub fn new(source: S, display_name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            source,
            display_name: display_name.into(),
            content_type: content_type.into(),
        }
    }
}

/// An accepted playlist entry. Immutable once added.
#[derive(Debug, Clone)]
pub struct MediaItem<S> {
    id: ItemId,
    source: S,
    display_name: String,
    kind: MediaKind,
}

impl<S> MediaItem<S> {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }
}

/// How a removal affected the active entry.
#[derive(Debug)]
pub enum Removal<S> {
    /// The removed entry sat after the active one, or nothing was active.
    Unaffected(MediaItem<S>),
    /// The removed entry sat before the active one; the active index moved left.
    ActiveShifted(MediaItem<S>),
    /// The active entry itself was removed.
    ActiveInvalidated(MediaItem<S>),
}

impl<S> Removal<S> {
    pub fn item(&self) -> &MediaItem<S> {
        match self {
            Removal::Unaffected(item)
            | Removal::ActiveShifted(item)
            | Removal::ActiveInvalidated(item) => item,
        }
    }

    pub fn invalidates_active(&self) -> bool {
        matches!(self, Removal::ActiveInvalidated(_))
    }
}

/// Ordered playlist plus the index of the active entry.
#[derive(Debug)]
pub struct Catalog<S> {
    items: Vec<MediaItem<S>>,
    active: Option<usize>,
    next_id: u64,
}

impl<S> Default for Catalog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Catalog<S> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            active: None,
            next_id: 0,
        }
    }

    /// Append every supported candidate, preserving order.
    ///
    /// Returns the number of accepted entries. An empty selection is not an
    /// error; a non-empty one with nothing playable is.
    pub fn add<I>(&mut self, batch: I) -> Result<usize, PlayerError>
    where
        I: IntoIterator<Item = Candidate<S>>,
    {
        let mut offered = 0usize;
        let mut accepted = Vec::new();
        for candidate in batch {
            offered += 1;
            match MediaKind::from_content_type(&candidate.content_type) {
                Some(kind) => accepted.push((candidate, kind)),
                None => tracing::debug!(
                    name = %candidate.display_name,
                    content_type = %candidate.content_type,
                    "skipping unsupported file"
                ),
            }
        }

        if offered > 0 && accepted.is_empty() {
            return Err(PlayerError::NoValidFiles);
        }

        let count = accepted.len();
        for (candidate, kind) in accepted {
            let id = ItemId(self.next_id);
            self.next_id += 1;
            self.items.push(MediaItem {
                id,
                source: candidate.source,
                display_name: candidate.display_name,
                kind,
            });
        }
        Ok(count)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Removal<S>, PlayerError> {
        self.check_index(index)?;
        let item = self.items.remove(index);

        let removal = match self.active {
            Some(active) if active > index => {
                self.active = Some(active - 1);
                Removal::ActiveShifted(item)
            }
            Some(active) if active == index => {
                self.active = None;
                Removal::ActiveInvalidated(item)
            }
            _ => Removal::Unaffected(item),
        };
        Ok(removal)
    }

    pub fn set_active(&mut self, index: usize) -> Result<&MediaItem<S>, PlayerError> {
        self.check_index(index)?;
        self.active = Some(index);
        Ok(&self.items[index])
    }

    pub fn deactivate(&mut self) {
        self.active = None;
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&MediaItem<S>> {
        self.active.and_then(|index| self.items.get(index))
    }

    /// Index that auto-advance would move to, if any.
    pub fn next_index(&self) -> Option<usize> {
        let next = self.active? + 1;
        (next < self.items.len()).then_some(next)
    }

    pub fn get(&self, index: usize) -> Option<&MediaItem<S>> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[MediaItem<S>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), PlayerError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(PlayerError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}
