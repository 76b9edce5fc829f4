//! Loop-erased random walk between two cells.
//!
//! The walk produces the fairway backbone: an 8-connected, self-avoiding
//! path that meanders across the board instead of hugging its edge. When
//! the walk closes a loop, the looping portion of the path is erased and
//! the walk resumes from the re-entry point.

use std::collections::HashSet;

use glam::IVec2;

use crate::core::error::Error;
use crate::core::rng::GameRng;

/// Eight compass directions, y increasing northwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub fn unit_vector(&self) -> IVec2 {
        match self {
            Direction::N => IVec2::new(0, 1),
            Direction::NE => IVec2::new(1, 1),
            Direction::E => IVec2::new(1, 0),
            Direction::SE => IVec2::new(1, -1),
            Direction::S => IVec2::new(0, -1),
            Direction::SW => IVec2::new(-1, -1),
            Direction::W => IVec2::new(-1, 0),
            Direction::NW => IVec2::new(-1, 1),
        }
    }
}

/// One step of the walk. Each step owns the cells it added to the marked
/// set, so popping the step unmarks exactly those cells.
struct WalkStep {
    position: IVec2,
    marked: Vec<IVec2>,
}

/// Walk from `start` to `end`, erasing loops as they close.
///
/// `mark_delay` is how many steps the walk trails behind its head before
/// marking a 3x3 region around the trail (marking the head immediately
/// would trap the walk against its own most recent cells). `edge_backtrack`
/// is how many steps to unwind after running off the board, a bias that
/// keeps the path from crawling along the boundary.
///
/// The returned path starts at `start`, ends at `end`, moves in unit
/// 8-neighbor steps, and visits no cell twice.
pub fn loop_erased_random_walk(
    width: usize,
    height: usize,
    start: IVec2,
    end: IVec2,
    mark_delay: usize,
    edge_backtrack: usize,
    rng: &mut GameRng,
) -> Result<Vec<IVec2>, Error> {
    let w = width as i32;
    let h = height as i32;
    let mut path = vec![WalkStep {
        position: start,
        marked: vec![start],
    }];
    let mut marked: HashSet<IVec2> = HashSet::from([start]);
    let mut current = start;

    loop {
        let direction = Direction::ALL[rng.integer(0, 7) as usize];
        let next = current + direction.unit_vector();

        if next.x < 0 || next.x >= w || next.y < 0 || next.y >= h {
            // Ran off the board: unwind a little and try again elsewhere.
            let pops = edge_backtrack.min(path.len() - 1);
            for _ in 0..pops {
                pop_step(&mut path, &mut marked)?;
            }
            current = last_position(&path)?;
            continue;
        }

        if next == end {
            path.push(WalkStep {
                position: end,
                marked: Vec::new(),
            });
            return Ok(path.into_iter().map(|step| step.position).collect());
        }

        // Corner cells trap the walk between two edges; never enter them.
        let edge_x = next.x == 0 || next.x == w - 1;
        let edge_y = next.y == 0 || next.y == h - 1;
        if edge_x && edge_y {
            continue;
        }

        if marked.contains(&next) {
            // Loop closed: unwind to the step that claimed this cell.
            loop {
                let (last_pos, owns_mark) = match path.last() {
                    Some(step) => (step.position, step.marked.contains(&next)),
                    None => return Err(Error::PathExhausted),
                };
                if owns_mark {
                    if last_pos == next {
                        current = last_pos;
                    } else {
                        for _ in 0..mark_delay {
                            pop_step(&mut path, &mut marked)?;
                        }
                        current = last_position(&path)?;
                    }
                    break;
                }
                pop_step(&mut path, &mut marked)?;
            }
            continue;
        }

        // Advance. The new step claims its own cell plus a 3x3 region
        // around the trail from `mark_delay` steps back.
        let mut newly_marked = vec![next];
        marked.insert(next);
        if path.len() > mark_delay {
            let delayed = path[path.len() - 1 - mark_delay].position;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let cell = delayed + IVec2::new(dx, dy);
                    if cell == end {
                        // The trail reached the hole; trim the delayed
                        // steps and finish there directly.
                        for _ in 0..mark_delay {
                            pop_step(&mut path, &mut marked)?;
                        }
                        path.push(WalkStep {
                            position: end,
                            marked: Vec::new(),
                        });
                        return Ok(path.into_iter().map(|step| step.position).collect());
                    }
                    if marked.insert(cell) {
                        newly_marked.push(cell);
                    }
                }
            }
        }
        path.push(WalkStep {
            position: next,
            marked: newly_marked,
        });
        current = next;
    }
}

fn pop_step(path: &mut Vec<WalkStep>, marked: &mut HashSet<IVec2>) -> Result<(), Error> {
    let step = path.pop().ok_or(Error::PathExhausted)?;
    for cell in step.marked {
        marked.remove(&cell);
    }
    Ok(())
}

fn last_position(path: &[WalkStep]) -> Result<IVec2, Error> {
    path.last().map(|step| step.position).ok_or(Error::PathExhausted)
}
