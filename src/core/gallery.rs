//! Gallery randomizer: one-shot shuffle + lazy media reveal

use rand::Rng;
use tracing::debug;

use crate::core::RevealObserver;
use crate::types::{ElementId, GalleryItem, GalleryMarkup, ReasonCode};

/// Fisher–Yates: for i from last down to 1, swap i with uniform j in [0, i]
pub fn shuffle<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
    items
}

/// Shuffled gallery; order is fixed for the lifetime of the page
#[derive(Debug)]
pub struct Gallery {
    container: ElementId,
    items: Vec<GalleryItem>,
    observer: RevealObserver,
    /// Media references whose load the host should start
    load_requests: Vec<String>,
}

impl Gallery {
    /// Shuffle once and observe every item; `None` without a container
    pub fn initialize<R: Rng + ?Sized>(
        markup: &GalleryMarkup,
        rng: &mut R,
        margin: i32,
    ) -> Option<Self> {
        let Some(container) = markup.container else {
            debug!("gallery container absent, skipping");
            return None;
        };
        let items = shuffle(markup.items.clone(), rng);
        let mut observer = RevealObserver::new(margin);
        for item in &items {
            observer.observe(item.element);
        }
        debug!(items = items.len(), "gallery shuffled");
        Some(Self {
            container,
            items,
            observer,
            load_requests: Vec::new(),
        })
    }

    /// Proximity report for an item; the first one within margin queues its
    /// media load
    pub fn on_proximity(&mut self, element: ElementId, distance: i32) -> Option<ReasonCode> {
        let reason = self.observer.on_proximity(element, distance)?;
        if reason == ReasonCode::G302_REVEALED {
            if let Some(item) = self.items.iter().find(|i| i.element == element) {
                self.load_requests.push(item.media.clone());
            }
        }
        Some(reason)
    }

    /// Drain media loads queued since the last call
    pub fn take_load_requests(&mut self) -> Vec<String> {
        std::mem::take(&mut self.load_requests)
    }

    /// Items in render order
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn is_revealed(&self, element: ElementId) -> bool {
        self.observer.state(element).is_some() && !self.observer.is_observing(element)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shuffle_is_bijection() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<u32> = (0..50).collect();
        let mut shuffled = shuffle(items.clone(), &mut rng);
        assert_ne!(shuffled, items, "50 items should not stay in order");
        shuffled.sort();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn test_shuffle_trivial_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffle(Vec::<u8>::new(), &mut rng).is_empty());
        assert_eq!(shuffle(vec![9], &mut rng), vec![9]);
    }

    #[test]
    fn test_shuffle_positions_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 40_000;
        let mut counts = [0u32; 4];
        for _ in 0..trials {
            let out = shuffle(vec![0u8, 1, 2, 3], &mut rng);
            let position = out.iter().position(|&x| x == 0).unwrap();
            counts[position] += 1;
        }
        for count in counts {
            assert!((9_400..=10_600).contains(&count), "skewed: {:?}", counts);
        }
    }

    #[test]
    fn test_gallery_reveals_and_queues_load() {
        let mut rng = StdRng::seed_from_u64(3);
        let markup = GalleryMarkup {
            container: Some(ElementId(1)),
            items: (0..6)
                .map(|i| GalleryItem::new(ElementId(10 + i), format!("obra-{}.webp", i)))
                .collect(),
        };
        let mut gallery = Gallery::initialize(&markup, &mut rng, 50).unwrap();
        assert_eq!(gallery.items().len(), 6);

        assert_eq!(gallery.on_proximity(ElementId(12), 300), Some(ReasonCode::G303_NOT_NEAR));
        assert!(gallery.take_load_requests().is_empty());

        assert_eq!(gallery.on_proximity(ElementId(12), 20), Some(ReasonCode::G302_REVEALED));
        assert_eq!(gallery.take_load_requests(), vec!["obra-2.webp".to_string()]);
        assert!(gallery.is_revealed(ElementId(12)));

        // Second report after reveal is ignored
        assert_eq!(gallery.on_proximity(ElementId(12), 0), None);
        assert!(gallery.take_load_requests().is_empty());
    }

    #[test]
    fn test_gallery_without_container_is_noop() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(Gallery::initialize(&GalleryMarkup::default(), &mut rng, 50).is_none());
    }
}
