use crate::models::MovieId;

/// Scroll position of a vertically scrolling list, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub offset: f32,
    pub viewport_height: f32,
    pub content_height: f32,
}

impl ScrollMetrics {
    /// Distance between the bottom of the viewport and the end of the content.
    pub fn remaining(&self) -> f32 {
        (self.content_height - self.offset - self.viewport_height).max(0.0)
    }

    /// Whether the end of the content (the last item) is within `threshold`
    /// pixels of the viewport.
    pub fn end_within(&self, threshold: f32) -> bool {
        self.remaining() <= threshold
    }
}

/// One-shot "last item entered the viewport" sensor.
///
/// Fires at most once per crossing: it must see the target leave the
/// viewport (or be re-attached to a new target) before firing again.
#[derive(Debug, Clone, Default)]
pub struct VisibilitySensor {
    target: Option<MovieId>,
    visible: bool,
}

impl VisibilitySensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the sensor at the current last item. A new target starts out
    /// not visible.
    pub fn attach(&mut self, target: Option<MovieId>) {
        if self.target != target {
            self.target = target;
            self.visible = false;
        }
    }

    /// Feed the target's current visibility. Returns `true` on the
    /// not-visible → visible edge.
    pub fn observe(&mut self, visible: bool) -> bool {
        if self.target.is_none() {
            return false;
        }
        let fired = visible && !self.visible;
        self.visible = visible;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_crossing() {
        let mut sensor = VisibilitySensor::new();
        sensor.attach(Some(MovieId::Catalog(20)));

        assert!(!sensor.observe(false));
        assert!(sensor.observe(true));
        assert!(!sensor.observe(true));
        assert!(!sensor.observe(false));
        assert!(sensor.observe(true));
    }

    #[test]
    fn test_reattach_resets() {
        let mut sensor = VisibilitySensor::new();
        sensor.attach(Some(MovieId::Catalog(20)));
        assert!(sensor.observe(true));

        // Same target: still visible, nothing new.
        sensor.attach(Some(MovieId::Catalog(20)));
        assert!(!sensor.observe(true));

        sensor.attach(Some(MovieId::Catalog(40)));
        assert!(sensor.observe(true));
    }

    #[test]
    fn test_detached_never_fires() {
        let mut sensor = VisibilitySensor::new();
        assert!(!sensor.observe(true));
        sensor.attach(Some(MovieId::Catalog(1)));
        sensor.attach(None);
        assert!(!sensor.observe(true));
    }

    #[test]
    fn test_scroll_metrics() {
        let metrics = ScrollMetrics {
            offset: 1500.0,
            viewport_height: 800.0,
            content_height: 2400.0,
        };
        assert_eq!(metrics.remaining(), 100.0);
        assert!(metrics.end_within(200.0));
        assert!(!metrics.end_within(50.0));

        let short = ScrollMetrics {
            offset: 0.0,
            viewport_height: 800.0,
            content_height: 300.0,
        };
        assert!(short.end_within(0.0));
    }
}
