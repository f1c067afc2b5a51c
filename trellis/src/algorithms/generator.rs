//! Grid level generation with a guaranteed solution.
//!
//! Lays out a cols x rows lattice of cells, finds a random breadth-first
//! path from the entry cell to the exit cell, colors that path's walls in
//! strict red/blue alternation and every other interior wall at random. The
//! border is black, so the outer face is never part of a solution.

use std::collections::{HashMap, VecDeque};

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::json::{Level, LevelWall};
use crate::model::{Vec2, WallColor};

/// Produce a solvable grid level. The start anchor is the bottom-right cell,
/// the goal anchor the top-left one. Deterministic for a given rng.
pub fn grid_level<R: Rng + ?Sized>(cols: usize, rows: usize, cell: f32, rng: &mut R) -> Level {
    let cols = cols.max(1);
    let rows = rows.max(1);

    let point_id = |i: usize, j: usize| (j * (cols + 1) + i) as u32;
    let cell_id = |x: usize, y: usize| y * cols + x;

    let mut points = Vec::with_capacity((cols + 1) * (rows + 1));
    for j in 0..=rows {
        for i in 0..=cols {
            points.push(Vec2 {
                x: i as f32 * cell,
                y: j as f32 * cell,
            });
        }
    }

    // Walls; interior ones remember the two cells they separate. Border
    // walls are black and stay black.
    let mut walls: Vec<LevelWall> = Vec::new();
    let mut interior: Vec<(usize, usize, usize)> = Vec::new(); // (wall idx, cell a, cell b)
    for j in 0..=rows {
        for i in 0..cols {
            let idx = walls.len();
            walls.push(LevelWall {
                a: point_id(i, j),
                b: point_id(i + 1, j),
                color: WallColor::Black,
            });
            if j > 0 && j < rows {
                interior.push((idx, cell_id(i, j - 1), cell_id(i, j)));
            }
        }
    }
    for j in 0..rows {
        for i in 0..=cols {
            let idx = walls.len();
            walls.push(LevelWall {
                a: point_id(i, j),
                b: point_id(i, j + 1),
                color: WallColor::Black,
            });
            if i > 0 && i < cols {
                interior.push((idx, cell_id(i - 1, j), cell_id(i, j)));
            }
        }
    }

    let start_cell = cols * rows - 1;
    let goal_cell = 0;

    // Randomized BFS over the cell graph; records the wall crossed to reach
    // each cell so the winning path can be read back.
    let mut adj: HashMap<usize, Vec<(usize, usize)>> = HashMap::new();
    for &(widx, a, b) in &interior {
        adj.entry(a).or_default().push((b, widx));
        adj.entry(b).or_default().push((a, widx));
    }
    let mut parent: HashMap<usize, (usize, usize)> = HashMap::new();
    let mut visited = vec![false; cols * rows];
    visited[start_cell] = true;
    let mut queue = VecDeque::new();
    queue.push_back(start_cell);
    while let Some(c) = queue.pop_front() {
        if c == goal_cell {
            break;
        }
        let mut neighbors = adj.get(&c).cloned().unwrap_or_default();
        neighbors.shuffle(rng);
        for (n, widx) in neighbors {
            if !visited[n] {
                visited[n] = true;
                parent.insert(n, (c, widx));
                queue.push_back(n);
            }
        }
    }

    let mut path_walls: Vec<usize> = Vec::new();
    let mut cur = goal_cell;
    while cur != start_cell {
        let Some(&(prev, widx)) = parent.get(&cur) else {
            break; // single-cell grid: no path needed
        };
        path_walls.push(widx);
        cur = prev;
    }
    path_walls.reverse();

    // Color the solution path in strict alternation, everything else at
    // random.
    let mut next = if rng.random_bool(0.5) {
        WallColor::Red
    } else {
        WallColor::Blue
    };
    for &widx in &path_walls {
        walls[widx].color = next;
        next = match next {
            WallColor::Red => WallColor::Blue,
            _ => WallColor::Red,
        };
    }
    for &(widx, _, _) in &interior {
        if walls[widx].color == WallColor::Black {
            walls[widx].color = if rng.random_bool(0.5) {
                WallColor::Red
            } else {
                WallColor::Blue
            };
        }
    }

    debug!(
        "grid_level: {}x{}, {} walls, solution crosses {}",
        cols,
        rows,
        walls.len(),
        path_walls.len()
    );

    let center = |c: usize| Vec2 {
        x: (c % cols) as f32 * cell + cell * 0.5,
        y: (c / cols) as f32 * cell + cell * 0.5,
    };
    Level {
        points,
        walls,
        start: Some(center(start_cell)),
        goal: Some(center(goal_cell)),
    }
}
