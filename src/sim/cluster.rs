//! Cluster and ceiling-connectivity search
//!
//! Both searches are breadth-first over active bubbles only; popping and
//! removed bubbles are invisible. Results are indices into the bubble slice.

use std::collections::{HashMap, VecDeque};

use super::hex::HexCell;
use super::state::Bubble;

/// Map of cell -> index for every active bubble
fn active_index(bubbles: &[Bubble]) -> HashMap<HexCell, usize> {
    bubbles
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_active())
        .map(|(i, b)| (b.cell, i))
        .collect()
}

/// Collect every active bubble reachable from `bubbles[start]`.
///
/// With `match_color` set, the walk only steps onto bubbles of the start
/// color. The result always contains `start` (first).
pub fn find_cluster(bubbles: &[Bubble], start: usize, match_color: bool) -> Vec<usize> {
    let Some(origin) = bubbles.get(start) else {
        return Vec::new();
    };
    let index = active_index(bubbles);
    let mut visited = vec![false; bubbles.len()];
    let mut cluster = vec![start];
    let mut queue = VecDeque::from([start]);
    visited[start] = true;

    while let Some(current) = queue.pop_front() {
        for n in bubbles[current].cell.neighbors() {
            let Some(&i) = index.get(&n) else { continue };
            if visited[i] {
                continue;
            }
            if match_color && bubbles[i].color != origin.color {
                continue;
            }
            visited[i] = true;
            cluster.push(i);
            queue.push_back(i);
        }
    }

    cluster
}

/// Active bubbles with no path of active neighbors back to row 0
pub fn find_floating(bubbles: &[Bubble]) -> Vec<usize> {
    let index = active_index(bubbles);
    let mut visited = vec![false; bubbles.len()];
    let mut queue = VecDeque::new();

    for (i, b) in bubbles.iter().enumerate() {
        if b.is_active() && b.cell.row == 0 {
            visited[i] = true;
            queue.push_back(i);
        }
    }

    while let Some(current) = queue.pop_front() {
        for n in bubbles[current].cell.neighbors() {
            if let Some(&i) = index.get(&n) {
                if !visited[i] {
                    visited[i] = true;
                    queue.push_back(i);
                }
            }
        }
    }

    bubbles
        .iter()
        .enumerate()
        .filter(|(i, b)| b.is_active() && !visited[*i])
        .map(|(i, _)| i)
        .collect()
}
