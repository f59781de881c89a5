//! Legal target sets for movement, shoring up and escapes.
//!
//! Pure functions over the board so the engine and the legality queries
//! share one definition of "legal". Results are sorted row-major.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::board::{Board, Coord, Zone};
use crate::core::Role;

/// Zone a player of `role` may finish an ordinary step on.
fn can_enter(zone: &Zone, role: Role) -> bool {
    zone.is_normal() || (role.enters_flooded() && zone.is_flooded())
}

fn sorted(mut coords: Vec<Coord>) -> Vec<Coord> {
    coords.sort_by_key(|c| (c.y, c.x));
    coords.dedup();
    coords
}

/// Accessible zones reachable by swimming orthogonally through flooded and
/// sunken zones.
fn swim_targets(board: &Board, from: Coord) -> Vec<Coord> {
    let mut seen = FxHashSet::default();
    let mut queue = VecDeque::from([from]);
    let mut out = Vec::new();
    seen.insert(from);

    while let Some(at) = queue.pop_front() {
        for next in board.neighbours(at, false) {
            if !seen.insert(next) {
                continue;
            }
            let Some(zone) = board.zone(next) else { continue };
            if zone.is_accessible() {
                out.push(next);
            }
            if !zone.is_normal() {
                queue.push_back(next);
            }
        }
    }

    sorted(out)
}

/// Ordinary one-action move.
#[must_use]
pub fn move_targets(board: &Board, role: Role, from: Coord) -> Vec<Coord> {
    if role == Role::Diver {
        return swim_targets(board, from);
    }
    let out = board
        .neighbours(from, role.moves_diagonally())
        .into_iter()
        .filter(|&c| board.zone(c).map_or(false, |z| can_enter(z, role)))
        .collect();
    sorted(out)
}

/// Flooded zones the player may shore up: their own and its neighbours.
#[must_use]
pub fn shore_up_targets(board: &Board, role: Role, from: Coord) -> Vec<Coord> {
    let mut candidates = board.neighbours(from, role.moves_diagonally()).to_vec();
    candidates.push(from);
    let out = candidates
        .into_iter()
        .filter(|&c| board.zone(c).map_or(false, Zone::is_flooded))
        .collect();
    sorted(out)
}

/// Any accessible zone other than the current one.
#[must_use]
pub fn fly_targets(board: &Board, from: Coord) -> Vec<Coord> {
    let out = board
        .zones()
        .filter(|z| z.is_accessible() && z.coord() != from)
        .map(Zone::coord)
        .collect();
    sorted(out)
}

/// Up to two orthogonal steps for a player moved by the Navigator.
#[must_use]
pub fn navigate_targets(board: &Board, moved: Role, from: Coord) -> Vec<Coord> {
    let enterable = |c: Coord| board.zone(c).map_or(false, |z| can_enter(z, moved));
    let mut out = Vec::new();

    for first in board.neighbours(from, false) {
        if !enterable(first) {
            continue;
        }
        out.push(first);
        for second in board.neighbours(first, false) {
            if second != from && enterable(second) {
                out.push(second);
            }
        }
    }

    sorted(out)
}

/// Where a player on a sinking zone can swim to.
#[must_use]
pub fn escape_targets(board: &Board, role: Role, from: Coord) -> Vec<Coord> {
    match role {
        Role::Pilot => fly_targets(board, from),
        Role::Diver => swim_targets(board, from),
        _ => {
            let out = board
                .neighbours(from, role.moves_diagonally())
                .into_iter()
                .filter(|&c| board.zone(c).map_or(false, Zone::is_accessible))
                .collect();
            sorted(out)
        }
    }
}

/// Every flooded zone on the board.
#[must_use]
pub fn sandbag_targets(board: &Board) -> Vec<Coord> {
    let out = board.zones().filter(|z| z.is_flooded()).map(Zone::coord).collect();
    sorted(out)
}
