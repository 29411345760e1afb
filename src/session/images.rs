//! Card image reference tracking.
//!
//! Decoding, fetching and drawing images belong to the host. This tracker
//! only records which cards have an image in use, whether a fetch is in
//! flight, and when a cached image may be dropped.

use rustc_hash::FxHashMap;

/// What the caller should do after acquiring a card image.
#[derive(Debug, PartialEq, Eq)]
pub enum ImageRequest<'a, I> {
    /// The image is cached.
    Ready(&'a I),
    /// A fetch is already in flight; show the card back meanwhile.
    Pending,
    /// Nobody is fetching it yet; the caller should start a fetch and
    /// report back through `on_image_resolved`.
    Fetch,
}

#[derive(Debug)]
struct ImageSlot<I> {
    users: u32,
    loading: bool,
    image: Option<I>,
}

impl<I> Default for ImageSlot<I> {
    fn default() -> Self {
        Self {
            users: 0,
            loading: false,
            image: None,
        }
    }
}

/// Per-card image cache with reference counts.
#[derive(Debug)]
pub struct ImageTracker<I> {
    slots: FxHashMap<String, ImageSlot<I>>,
}

impl<I> Default for ImageTracker<I> {
    fn default() -> Self {
        Self {
            slots: FxHashMap::default(),
        }
    }
}

impl<I> ImageTracker<I> {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one more user of a card's image.
    pub fn acquire(&mut self, card_id: &str) -> ImageRequest<'_, I> {
        let slot = self.slots.entry(card_id.to_string()).or_default();
        slot.users += 1;

        if let Some(image) = &slot.image {
            ImageRequest::Ready(image)
        } else if slot.loading {
            ImageRequest::Pending
        } else {
            slot.loading = true;
            ImageRequest::Fetch
        }
    }

    /// Record the outcome of a fetch. `None` means it failed and users
    /// should keep showing the card back.
    pub fn on_image_resolved(&mut self, card_id: &str, image: Option<I>) {
        let slot = self.slots.entry(card_id.to_string()).or_default();
        slot.loading = false;
        if slot.users > 0 {
            slot.image = image;
        } else {
            tracing::debug!(card_id, "image resolved with no users; dropping");
        }
    }

    /// Drop one user. Returns `true` if this released the cached image.
    pub fn release(&mut self, card_id: &str) -> bool {
        let Some(slot) = self.slots.get_mut(card_id) else {
            return false;
        };
        slot.users = slot.users.saturating_sub(1);
        if slot.users > 0 {
            return false;
        }

        let released = slot.image.take().is_some();
        if !slot.loading {
            self.slots.remove(card_id);
        }
        released
    }

    /// Cached image, if any.
    #[must_use]
    pub fn image(&self, card_id: &str) -> Option<&I> {
        self.slots.get(card_id).and_then(|slot| slot.image.as_ref())
    }

    /// Number of users of a card's image.
    #[must_use]
    pub fn users(&self, card_id: &str) -> u32 {
        self.slots.get(card_id).map_or(0, |slot| slot.users)
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self, card_id: &str) -> bool {
        self.slots.get(card_id).is_some_and(|slot| slot.loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_acquire_fetches() {
        let mut images: ImageTracker<&str> = ImageTracker::new();

        assert_eq!(images.acquire("A1"), ImageRequest::Fetch);
        assert!(images.is_loading("A1"));
        assert_eq!(images.acquire("A1"), ImageRequest::Pending);
        assert_eq!(images.users("A1"), 2);
    }

    #[test]
    fn test_resolved_image_is_shared() {
        let mut images = ImageTracker::new();
        images.acquire("A1");
        images.on_image_resolved("A1", Some("bolt.png"));

        assert!(!images.is_loading("A1"));
        assert_eq!(images.acquire("A1"), ImageRequest::Ready(&"bolt.png"));
        assert_eq!(images.image("A1"), Some(&"bolt.png"));
    }

    #[test]
    fn test_release_drops_image_at_zero_users() {
        let mut images = ImageTracker::new();
        images.acquire("A1");
        images.on_image_resolved("A1", Some(1u32));
        images.acquire("A1");

        assert!(!images.release("A1"));
        assert_eq!(images.image("A1"), Some(&1));
        assert!(images.release("A1"));
        assert_eq!(images.image("A1"), None);
        assert_eq!(images.users("A1"), 0);
    }

    #[test]
    fn test_failed_fetch_allows_retry() {
        let mut images: ImageTracker<u32> = ImageTracker::new();
        images.acquire("A1");
        images.on_image_resolved("A1", None);

        assert_eq!(images.image("A1"), None);
        assert_eq!(images.acquire("A1"), ImageRequest::Fetch);
    }

    #[test]
    fn test_late_resolution_after_release() {
        let mut images = ImageTracker::new();
        images.acquire("A1");
        assert!(!images.release("A1"));
        assert!(images.is_loading("A1"));

        images.on_image_resolved("A1", Some(7u32));
        assert_eq!(images.image("A1"), None);
        assert!(!images.is_loading("A1"));
    }

    #[test]
    fn test_release_unknown_card() {
        let mut images: ImageTracker<u32> = ImageTracker::new();
        assert!(!images.release("missing"));
    }
}
