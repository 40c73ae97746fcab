//! Exclusion zones around protected content.
//!
//! Page elements tagged as "do not obscure" are looked up once when the
//! field is mounted. Their bounding boxes are re-read only on resize and
//! after scrolling settles, never per frame, because layout reads are the
//! expensive part.

use driftfield_ui::Rect;

/// Opaque handle to a protected content element, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u32);

/// Read-only access to page layout.
pub trait LayoutSource {
    /// Returns every element currently marked as an exclusion zone.
    fn exclusion_elements(&self) -> Vec<ElementHandle>;

    /// Returns the element's current bounding box in viewport coordinates,
    /// or `None` if it is no longer laid out.
    fn bounding_rect(&self, element: ElementHandle) -> Option<Rect>;
}

/// Cached exclusion elements and their padded rectangles.
#[derive(Debug, Clone, Default)]
pub struct ExclusionZones {
    /// Elements found by the last `cache_elements` call.
    elements: Vec<ElementHandle>,
    /// Padded rectangles from the last `refresh` call.
    rects: Vec<Rect>,
    /// Margin added on every side.
    padding: f32,
}

impl ExclusionZones {
    /// Creates an empty set with the given padding.
    #[must_use]
    pub fn new(padding: f32) -> Self {
        Self {
            elements: Vec::new(),
            rects: Vec::new(),
            padding,
        }
    }

    /// Looks up the protected elements. Call once per mount.
    pub fn cache_elements(&mut self, source: &impl LayoutSource) {
        self.elements = source.exclusion_elements();
        tracing::debug!(elements = self.elements.len(), "cached exclusion elements");
    }

    /// Re-reads the bounding boxes of the cached elements.
    ///
    /// Elements that no longer report a box are skipped.
    pub fn refresh(&mut self, source: &impl LayoutSource) {
        let padding = self.padding;
        self.rects.clear();
        self.rects.extend(
            self.elements
                .iter()
                .filter_map(|&element| source.bounding_rect(element))
                .map(|rect| rect.expand(padding)),
        );
        tracing::debug!(rects = self.rects.len(), "refreshed exclusion rectangles");
    }

    /// Returns the padded rectangles.
    #[must_use]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Returns the number of cached elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Drops the cached elements and rectangles.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.rects.clear();
    }
}

/// Repulsion impulse on a particle at `(x, y)` from one padded rectangle.
///
/// Inside the rectangle (borders included) the particle is pushed at full
/// strength along the outward normal of the nearest edge; ties go to the
/// first of left, right, top, bottom. Outside, within `radius`, the push
/// points away from the nearest boundary point and fades linearly to zero
/// at `radius`. Returns `None` when the rectangle has no effect.
#[must_use]
pub fn repulsion(rect: &Rect, x: f32, y: f32, radius: f32, strength: f32) -> Option<(f32, f32)> {
    if rect.contains_inclusive(x, y) {
        let (nx, ny) = nearest_edge_normal(rect, x, y);
        return Some((nx * strength, ny * strength));
    }

    let (nearest_x, nearest_y) = rect.nearest_point(x, y);
    let dx = x - nearest_x;
    let dy = y - nearest_y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist >= radius || dist <= f32::EPSILON {
        return None;
    }

    let falloff = 1.0 - dist / radius;
    let scale = falloff * strength / dist;
    Some((dx * scale, dy * scale))
}

fn nearest_edge_normal(rect: &Rect, x: f32, y: f32) -> (f32, f32) {
    let edges = [
        (x - rect.left(), (-1.0, 0.0)),
        (rect.right() - x, (1.0, 0.0)),
        (y - rect.top(), (0.0, -1.0)),
        (rect.bottom() - y, (0.0, 1.0)),
    ];

    let mut best = edges[0];
    for edge in &edges[1..] {
        if edge.0 < best.0 {
            best = *edge;
        }
    }
    best.1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded() -> Rect {
        Rect::from_edges(100.0, 100.0, 300.0, 200.0).expand(30.0)
    }

    #[test]
    fn test_center_pushes_through_top_edge() {
        // (200,150): left/right 130 away, top/bottom 80 away. Top wins the tie.
        let (vx, vy) = repulsion(&padded(), 200.0, 150.0, 40.0, 0.3).unwrap();
        assert_eq!(vx, 0.0);
        assert!((vy + 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_square_center_prefers_left() {
        let rect = Rect::from_edges(0.0, 0.0, 100.0, 100.0);
        let (vx, vy) = repulsion(&rect, 50.0, 50.0, 40.0, 1.0).unwrap();
        assert_eq!((vx, vy), (-1.0, 0.0));
    }

    #[test]
    fn test_inside_near_right_edge() {
        let (vx, vy) = repulsion(&padded(), 320.0, 150.0, 40.0, 0.3).unwrap();
        assert!(vx > 0.0);
        assert_eq!(vy, 0.0);
    }

    #[test]
    fn test_outside_falloff() {
        let rect = Rect::from_edges(0.0, 0.0, 100.0, 100.0);

        let (near, _) = repulsion(&rect, 110.0, 50.0, 40.0, 0.3).unwrap();
        let (far, _) = repulsion(&rect, 130.0, 50.0, 40.0, 0.3).unwrap();
        assert!(near > far && far > 0.0);
        assert!((near - 0.3 * 0.75).abs() < 1e-6);

        assert!(repulsion(&rect, 140.0, 50.0, 40.0, 0.3).is_none());
        assert!(repulsion(&rect, 500.0, 500.0, 40.0, 0.3).is_none());
    }

    #[test]
    fn test_outside_corner_points_diagonally() {
        let rect = Rect::from_edges(0.0, 0.0, 100.0, 100.0);
        let (vx, vy) = repulsion(&rect, 110.0, 110.0, 40.0, 1.0).unwrap();
        assert!((vx - vy).abs() < 1e-6);
        assert!(vx > 0.0);
    }

    struct FixedLayout(Vec<Option<Rect>>);

    impl LayoutSource for FixedLayout {
        fn exclusion_elements(&self) -> Vec<ElementHandle> {
            (0..self.0.len() as u32).map(ElementHandle).collect()
        }

        fn bounding_rect(&self, element: ElementHandle) -> Option<Rect> {
            self.0.get(element.0 as usize).copied().flatten()
        }
    }

    #[test]
    fn test_refresh_pads_and_skips_missing() {
        let layout = FixedLayout(vec![
            Some(Rect::from_edges(100.0, 100.0, 300.0, 200.0)),
            None,
        ]);

        let mut zones = ExclusionZones::new(30.0);
        zones.cache_elements(&layout);
        zones.refresh(&layout);

        assert_eq!(zones.element_count(), 2);
        assert_eq!(zones.rects(), &[Rect::from_edges(70.0, 70.0, 330.0, 230.0)]);
    }

    #[test]
    fn test_refresh_without_cache_is_empty() {
        let layout = FixedLayout(vec![Some(Rect::new(0.0, 0.0, 10.0, 10.0))]);
        let mut zones = ExclusionZones::new(30.0);
        zones.refresh(&layout);
        assert!(zones.rects().is_empty());
    }
}
