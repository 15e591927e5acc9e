//! Splitting an oversized paragraph at the last cluster that still fits

use crate::document::BlockNode;
use crate::layout::surface::MeasureSurface;
use unicode_segmentation::UnicodeSegmentation;

/// The two halves of a split paragraph
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// Prefix that fits on the current page
    pub fit: BlockNode,
    /// Remaining suffix, laid out as an ordinary node on the next page
    pub rest: BlockNode,
}

/// Find the longest proper prefix of `node` that keeps `surface` within
/// `max_height`.
///
/// The whole node is expected to have already overflowed, so the full text is
/// never measured again. Binary search over grapheme-cluster boundaries,
/// probing the surface with a prefix copy of the node on top of whatever is
/// already stacked. Assumes the rendered height never decreases as the prefix
/// grows.
///
/// Returns `None` when no non-empty proper prefix fits. The surface is left as
/// it was found.
pub fn split_to_fit<S: MeasureSurface + ?Sized>(
    node: &BlockNode,
    surface: &mut S,
    max_height: f32,
) -> Option<Split> {
    let text = node.text.as_str();
    let mut boundaries: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
    let clusters = boundaries.len();
    if clusters == 0 {
        return None;
    }
    boundaries.push(text.len());

    let (mut lo, mut hi) = (1usize, clusters - 1);
    let mut best = 0;
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let probe = node.with_text(&text[..boundaries[mid]]);
        surface.push(&probe);
        let height = surface.content_height();
        surface.pop();
        log::trace!("split probe clusters={} height={}", mid, height);

        if height <= max_height {
            best = mid;
            lo = mid + 1;
        } else {
            hi = mid - 1;
        }
    }

    if best == 0 {
        return None;
    }

    let at = boundaries[best];
    let mut fit = node.with_text(&text[..at]);
    fit.anchor = node.anchor.clone();
    let mut rest = node.with_text(&text[at..]);
    rest.continued = true;

    Some(Split { fit, rest })
}
