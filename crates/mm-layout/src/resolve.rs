//! Structure resolution and strategy dispatch.

use crate::engine::LayoutContext;
use crate::tree::Side;
use crate::{branch, fishbone, radial, timeline};
use mm_core::{Direction, Family, NodeIndex, Structure, StructureKind};

/// Structure inputs for one topic: its own override and the value threaded
/// down from the parent's resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub own: Option<Structure>,
    pub inherited: Option<Structure>,
}

impl Resolved {
    pub fn new(own: Option<Structure>, inherited: Option<Structure>) -> Self {
        Self { own, inherited }
    }

    /// Own override, else inherited, else `default`.
    pub fn effective(&self, default: Structure) -> Structure {
        self.own.or(self.inherited).unwrap_or(default)
    }
}

/// The positioning routine a node's children are handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Two-sided mind map around the layout root.
    Radial(Direction),
    /// Children stacked vertically on one side of the parent.
    Horizontal(Side),
    /// Org chart ranks below (or above) the parent.
    Vertical(Direction),
    /// Ribs along a spine; the direction names the head's side.
    Fishbone(Direction),
    /// Items along a horizontal (`Right` or `Left`) or vertical (`Down`)
    /// line.
    Timeline(Direction),
}

impl Strategy {
    /// Map a resolved structure onto a strategy.
    ///
    /// The radial split only applies at the layout root; deeper mind-map
    /// topics keep branching on the side they were placed on. Tree, logic,
    /// fishbone and timeline structures without an explicit orientation
    /// also grow away from the parent on that side.
    pub fn select(structure: Structure, is_root: bool, side: Side) -> Self {
        let side = match side {
            Side::Left => Side::Left,
            _ => Side::Right,
        };
        let follow = !structure.explicit;
        match structure.family() {
            Family::Radial if is_root => Strategy::Radial(structure.direction),
            Family::Radial => Strategy::Horizontal(side),
            Family::Branch => match structure.kind {
                StructureKind::OrgChart => Strategy::Vertical(structure.direction),
                _ if follow => Strategy::Horizontal(side),
                _ => match structure.direction {
                    Direction::Left => Strategy::Horizontal(Side::Left),
                    _ => Strategy::Horizontal(Side::Right),
                },
            },
            // The head sits on the parent's side, so a left-hand fishbone
            // keeps its head on the right.
            Family::Fishbone if follow && side == Side::Left => {
                Strategy::Fishbone(Direction::Right)
            }
            Family::Fishbone => Strategy::Fishbone(structure.direction),
            Family::Timeline if follow && side == Side::Left => {
                Strategy::Timeline(Direction::Left)
            }
            Family::Timeline => Strategy::Timeline(structure.direction),
        }
    }
}

/// Position every child of `idx` (recursively) using the node's resolved
/// structure. `side` is where `idx` sits relative to its own parent.
pub(crate) fn place_children(ctx: &mut LayoutContext<'_>, idx: NodeIndex, side: Side) {
    if ctx.tree.children(idx).is_empty() {
        return;
    }
    let structure = ctx.tree.node(idx).structure;
    let strategy = Strategy::select(structure, idx == ctx.tree.root, side);
    log::trace!("{}: {structure} -> {strategy:?}", ctx.tree.node(idx).id);

    match strategy {
        Strategy::Radial(direction) => radial::place(ctx, idx, direction),
        Strategy::Horizontal(side) => branch::place_horizontal(ctx, idx, side),
        Strategy::Vertical(direction) => branch::place_vertical(ctx, idx, direction),
        Strategy::Fishbone(direction) => fishbone::place(ctx, idx, direction),
        Strategy::Timeline(direction) => timeline::place(ctx, idx, direction),
    }
}
