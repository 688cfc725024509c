//! Sprite handles for one level

/// Every image the renderer can use. A missing image is `None` and is
/// drawn as a placeholder (or skipped) instead.
#[derive(Debug, Clone)]
pub struct SpriteSet<I> {
    pub map: Option<I>,
    /// Two-frame walk cycle
    pub walk: [Option<I>; 2],
    /// Two-frame coin spin
    pub coin: [Option<I>; 2],
    pub key: Option<I>,
}

impl<I> Default for SpriteSet<I> {
    fn default() -> Self {
        Self {
            map: None,
            walk: [None, None],
            coin: [None, None],
            key: None,
        }
    }
}

impl<I> SpriteSet<I> {
    pub fn walk_frame(&self, frame: usize) -> Option<&I> {
        self.walk.get(frame).and_then(Option::as_ref)
    }

    pub fn coin_frame(&self, frame: usize) -> Option<&I> {
        self.coin.get(frame).and_then(Option::as_ref)
    }

    /// How many of the six images loaded
    pub fn loaded_count(&self) -> usize {
        let frames = self.walk.iter().chain(self.coin.iter());
        [&self.map, &self.key].into_iter().chain(frames).filter(|s| s.is_some()).count()
    }
}
