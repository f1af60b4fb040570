//! Radial mind map: the layout root's children split into a right and a
//! left column, each stacked with the horizontal branch routine.

use crate::branch;
use crate::engine::LayoutContext;
use crate::extent::{Axis, total};
use crate::tree::Side;
use mm_core::{Direction, NodeIndex};

/// Split children into `(right, left)` columns, each ordered top to bottom.
///
/// Clockwise puts the first `ceil(n/2)` on the right and the rest on the
/// left in reverse, so the order reads clockwise around the root.
/// Anti-clockwise is the mirror image. `Down` keeps both halves in
/// document order.
pub fn split<T: Copy>(items: &[T], direction: Direction) -> (Vec<T>, Vec<T>) {
    let mid = items.len().div_ceil(2);
    let (first, rest) = items.split_at(mid);
    match direction {
        Direction::AntiClockwise => (rest.iter().rev().copied().collect(), first.to_vec()),
        Direction::Down => (first.to_vec(), rest.to_vec()),
        _ => (first.to_vec(), rest.iter().rev().copied().collect()),
    }
}

pub(crate) fn place(ctx: &mut LayoutContext<'_>, idx: NodeIndex, direction: Direction) {
    let children = ctx.tree.children(idx);
    let (right, left) = split(&children, direction);

    let right_total = total(ctx, &right, Axis::Vertical);
    let left_total = total(ctx, &left, Axis::Vertical);
    let cy = ctx.center(idx).y;

    let (right_top, left_top) = if direction == Direction::Down {
        let top = cy - right_total.max(left_total) / 2.0;
        (top, top)
    } else {
        (cy - right_total / 2.0, cy - left_total / 2.0)
    };

    branch::stack(ctx, idx, &right, Side::Right, right_top);
    branch::stack(ctx, idx, &left, Side::Left, left_top);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn split_sizes() {
        for n in 0..9usize {
            let items: Vec<usize> = (0..n).collect();
            for dir in [Direction::Clockwise, Direction::Down] {
                let (right, left) = split(&items, dir);
                assert_eq!(right.len(), n.div_ceil(2));
                assert_eq!(left.len(), n / 2);
            }
            let (right, left) = split(&items, Direction::AntiClockwise);
            assert_eq!(left.len(), n.div_ceil(2));
            assert_eq!(right.len(), n / 2);
        }
    }

    #[test]
    fn clockwise_reverses_left() {
        let (right, left) = split(&[0, 1, 2, 3, 4], Direction::Clockwise);
        assert_eq!(right, vec![0, 1, 2]);
        assert_eq!(left, vec![4, 3]);
    }

    #[test]
    fn anticlockwise_mirrors() {
        let (right, left) = split(&[0, 1, 2, 3, 4], Direction::AntiClockwise);
        assert_eq!(left, vec![0, 1, 2]);
        assert_eq!(right, vec![4, 3]);
    }

    #[test]
    fn down_keeps_document_order() {
        let (right, left) = split(&[0, 1, 2, 3, 4], Direction::Down);
        assert_eq!(right, vec![0, 1, 2]);
        assert_eq!(left, vec![3, 4]);
    }

    #[test]
    fn single_child_side() {
        assert_eq!(split(&[7], Direction::Clockwise), (vec![7], vec![]));
        assert_eq!(split(&[7], Direction::Down), (vec![7], vec![]));
        assert_eq!(split(&[7], Direction::AntiClockwise), (vec![], vec![7]));
    }
}
