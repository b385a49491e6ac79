//! Text ranges and bounding-box repair
//!
//! Hosts report an all-zero bounding rect for ranges that sit on a node
//! boundary with no rendered box. Repair first tries the character before
//! the end boundary, then grows the end boundary forward through the
//! document one step at a time until something measurable is covered.
//!
//! The forward search is bounded by document order: every step moves the end
//! boundary later and stops once it would leave the range's scope element.
//! The recovered rect is best effort; across replaced or void content it
//! may cover more than the caller expects.

use tracing::{debug, trace, warn};

use crate::error::{FocusError, Result};
use crate::geometry::FrameRect;
use crate::provider::FrameProvider;

/// Position between two characters or two children of a node
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Boundary<N> {
    pub node: N,
    /// Character offset in a text node, child index in an element
    pub offset: usize,
}

impl<N> Boundary<N> {
    pub fn new(node: N, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A document range between two boundaries
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRange<N> {
    pub start: Boundary<N>,
    pub end: Boundary<N>,
}

impl<N: Clone + PartialEq> TextRange<N> {
    pub fn new(start: Boundary<N>, end: Boundary<N>) -> Self {
        Self { start, end }
    }

    /// Empty range at a single boundary (a caret)
    pub fn collapsed(at: Boundary<N>) -> Self {
        Self {
            start: at.clone(),
            end: at,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    fn with_end(&self, end: Boundary<N>) -> Self {
        Self {
            start: self.start.clone(),
            end,
        }
    }
}

/// Result of repairing a range's bounds
#[derive(Clone, Debug, PartialEq)]
pub enum RepairOutcome<N> {
    /// A non-degenerate rect, in window coordinates
    Measured(FrameRect),
    /// Nothing measurable inside the scope; use this element's box instead
    Fallback(N),
}

/// Measure `range`, repairing a degenerate result
pub fn repair_range_bounds<P: FrameProvider>(
    provider: &P,
    range: &TextRange<P::Node>,
) -> Result<RepairOutcome<P::Node>> {
    validate_boundary(provider, &range.start)?;
    validate_boundary(provider, &range.end)?;

    let rect = provider.measure_range(range)?;
    if !rect.is_degenerate() {
        return Ok(RepairOutcome::Measured(rect));
    }

    // Character before the end boundary, when the end sits at the end of a text run.
    // Measured as [len - 1, len] rather than pulling the end back: a collapsed
    // range pulled back stays collapsed, and the one-character span is the
    // box a caret at the end of the run belongs to.
    if let Some(len) = provider.text_len(&range.end.node) {
        if len > 0 && range.end.offset == len {
            let stepped = TextRange::new(
                Boundary::new(range.end.node.clone(), len - 1),
                range.end.clone(),
            );
            let rect = provider.measure_range(&stepped)?;
            if !rect.is_degenerate() {
                debug!("range repaired by leftward step");
                return Ok(RepairOutcome::Measured(rect));
            }
        }
    }

    let scope = scope_element(provider, range)
        .ok_or_else(|| FocusError::detached(&range.start.node))?;

    let mut end = range.end.clone();
    let mut steps = 0usize;
    while let Some(next) = advance(provider, &end, &scope) {
        steps += 1;
        end = next;
        let rect = provider.measure_range(&range.with_end(end.clone()))?;
        trace!(step = steps, offset = end.offset, "range repair step");
        if !rect.is_degenerate() {
            debug!(steps, "range repaired by forward growth");
            return Ok(RepairOutcome::Measured(rect));
        }
    }

    warn!(
        steps,
        "range repair exhausted {:?}, falling back to element box", scope
    );
    Ok(RepairOutcome::Fallback(scope))
}

fn validate_boundary<P: FrameProvider>(provider: &P, boundary: &Boundary<P::Node>) -> Result<()> {
    if !provider.is_attached(&boundary.node) {
        return Err(FocusError::detached(&boundary.node));
    }
    let limit = provider
        .text_len(&boundary.node)
        .unwrap_or_else(|| provider.child_count(&boundary.node));
    if boundary.offset > limit {
        return Err(FocusError::InvalidRange(format!(
            "offset {} exceeds {} in {:?}",
            boundary.offset, limit, boundary.node
        )));
    }
    Ok(())
}

/// Nearest element containing both boundaries
fn scope_element<P: FrameProvider>(provider: &P, range: &TextRange<P::Node>) -> Option<P::Node> {
    let mut start_chain = Vec::new();
    let mut node = Some(range.start.node.clone());
    while let Some(n) = node {
        node = provider.parent(&n);
        start_chain.push(n);
    }

    let mut node = Some(range.end.node.clone());
    while let Some(n) = node {
        if start_chain.contains(&n) && provider.is_element_like(&n) {
            return Some(n);
        }
        node = provider.parent(&n);
    }
    None
}

/// Move `end` one step later in document order without leaving `scope`
fn advance<P: FrameProvider>(
    provider: &P,
    end: &Boundary<P::Node>,
    scope: &P::Node,
) -> Option<Boundary<P::Node>> {
    match provider.text_len(&end.node) {
        Some(len) if end.offset < len => {
            return Some(Boundary::new(end.node.clone(), end.offset + 1));
        }
        Some(_) => {}
        None => {
            if end.offset < provider.child_count(&end.node) {
                let child = provider.child(&end.node, end.offset)?;
                return Some(Boundary::new(child, 0));
            }
        }
    }

    // Step past the end container
    if &end.node == scope {
        return None;
    }
    let parent = provider.parent(&end.node)?;
    let index = provider.index_in_parent(&end.node)?;
    Some(Boundary::new(parent, index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Viewport;

    /// Flat paragraph: element 0 holds text nodes 1..=n, each glyph 10x16
    /// laid out left to right. Empty strings model zero-length text nodes.
    struct Paragraph {
        texts: Vec<&'static str>,
    }

    impl Paragraph {
        fn glyph_x(&self, node: usize, offset: usize) -> f32 {
            let before: usize = self.texts[..node - 1].iter().map(|t| t.len()).sum();
            ((before + offset) * 10) as f32
        }
    }

    impl FrameProvider for Paragraph {
        type Node = usize;

        fn measure_box(&self, node: &usize) -> Result<FrameRect> {
            if *node > self.texts.len() {
                return Err(FocusError::detached(node));
            }
            Ok(FrameRect::new(0.0, 0.0, 500.0, 16.0))
        }

        fn measure_range(&self, range: &TextRange<usize>) -> Result<FrameRect> {
            let pos = |b: &Boundary<usize>| {
                if b.node == 0 {
                    if b.offset == 0 {
                        (1, 0)
                    } else {
                        (b.offset, self.texts[b.offset - 1].len())
                    }
                } else {
                    (b.node, b.offset)
                }
            };
            let (sn, so) = pos(&range.start);
            let (en, eo) = pos(&range.end);
            let left = self.glyph_x(sn, so);
            let right = self.glyph_x(en, eo);
            if right > left {
                Ok(FrameRect::new(left, 0.0, right, 16.0))
            } else {
                Ok(FrameRect::default())
            }
        }

        fn measure_viewport(&self, _container: &usize) -> Result<Viewport> {
            Err(FocusError::detached(&0))
        }

        fn scroll_to(&mut self, container: &usize, _left: f32, _top: f32) -> Result<()> {
            Err(FocusError::detached(container))
        }

        fn is_window_like(&self, _node: &usize) -> bool {
            false
        }

        fn is_element_like(&self, node: &usize) -> bool {
            *node == 0
        }

        fn text_len(&self, node: &usize) -> Option<usize> {
            (*node > 0).then(|| self.texts[node - 1].len())
        }

        fn child_count(&self, node: &usize) -> usize {
            if *node == 0 {
                self.texts.len()
            } else {
                0
            }
        }

        fn child(&self, node: &usize, index: usize) -> Option<usize> {
            (*node == 0 && index < self.texts.len()).then_some(index + 1)
        }

        fn parent(&self, node: &usize) -> Option<usize> {
            (*node > 0).then_some(0)
        }
    }

    #[test]
    fn test_measured_range_passes_through() {
        let p = Paragraph { texts: vec!["hello"] };
        let range = TextRange::new(Boundary::new(1, 1), Boundary::new(1, 3));
        assert_eq!(
            repair_range_bounds(&p, &range).unwrap(),
            RepairOutcome::Measured(FrameRect::new(10.0, 0.0, 30.0, 16.0))
        );
    }

    #[test]
    fn test_collapsed_at_text_end_steps_left() {
        let p = Paragraph { texts: vec!["hello"] };
        let range = TextRange::collapsed(Boundary::new(1, 5));
        let one_back = TextRange::new(Boundary::new(1, 4), Boundary::new(1, 5));
        let expected = p.measure_range(&one_back).unwrap();
        assert!(!expected.is_degenerate());
        assert_eq!(
            repair_range_bounds(&p, &range).unwrap(),
            RepairOutcome::Measured(expected)
        );
    }

    #[test]
    fn test_collapsed_at_text_start_grows_forward() {
        let p = Paragraph { texts: vec!["ab"] };
        let range = TextRange::collapsed(Boundary::new(1, 0));
        assert_eq!(
            repair_range_bounds(&p, &range).unwrap(),
            RepairOutcome::Measured(FrameRect::new(0.0, 0.0, 10.0, 16.0))
        );
    }

    #[test]
    fn test_forward_growth_crosses_empty_nodes() {
        let p = Paragraph { texts: vec!["", "", "xy"] };
        // element boundary before the first (empty) text node
        let range = TextRange::collapsed(Boundary::new(0, 0));
        assert_eq!(
            repair_range_bounds(&p, &range).unwrap(),
            RepairOutcome::Measured(FrameRect::new(0.0, 0.0, 10.0, 16.0))
        );
    }

    #[test]
    fn test_exhausted_search_falls_back_to_scope() {
        let p = Paragraph { texts: vec!["", ""] };
        let range = TextRange::collapsed(Boundary::new(1, 0));
        assert_eq!(repair_range_bounds(&p, &range).unwrap(), RepairOutcome::Fallback(0));
    }

    #[test]
    fn test_invalid_offset_rejected() {
        let p = Paragraph { texts: vec!["abc"] };
        let range = TextRange::collapsed(Boundary::new(1, 9));
        assert!(matches!(
            repair_range_bounds(&p, &range),
            Err(FocusError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_unknown_node_is_detached_not_invalid() {
        let p = Paragraph { texts: vec!["abc"] };
        let range = TextRange::collapsed(Boundary::new(7, 3));
        assert!(matches!(
            repair_range_bounds(&p, &range),
            Err(FocusError::DetachedTarget(_))
        ));
    }

    #[test]
    fn test_default_index_in_parent() {
        let p = Paragraph { texts: vec!["a", "b", "c"] };
        assert_eq!(p.index_in_parent(&3), Some(2));
        assert_eq!(p.index_in_parent(&0), None);
    }
}
