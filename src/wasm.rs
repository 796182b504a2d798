//! Bindings for use from JavaScript.

use js_sys::{Array, Uint32Array};
use wasm_bindgen::prelude::*;

use crate::builder::MazeBuilder;
use crate::node::Tokens;

/// Solve a maze described by flat arrays.
///
/// `initial` and `required` hold one count per pillar. `mono_links` and `bi_links` hold pairs of pillar indices, flattened.
/// With `minimal` set, the shortest solution of at most `moves` moves is searched for; otherwise the first one found.
///
/// Returns an array of `[source, target, distance]` triples, or `null` if no solution fits in `moves` moves.
/// Throws if the description is malformed or the token totals don't match.
#[wasm_bindgen(js_name = solveMaze)]
pub fn solve_maze(
    initial: Vec<Tokens>,
    required: Vec<Tokens>,
    mono_links: Vec<u32>,
    bi_links: Vec<u32>,
    moves: usize,
    minimal: bool,
) -> Result<JsValue, JsError> {
    if initial.len() != required.len() {
        return Err(JsError::new("initial and required counts differ in length"));
    }
    if mono_links.len() % 2 != 0 || bi_links.len() % 2 != 0 {
        return Err(JsError::new("links must come in pairs"));
    }

    let mut builder = MazeBuilder::new();
    builder.add_nodes(initial.into_iter().zip(required));
    for pair in mono_links.chunks_exact(2) {
        builder.add_mono_link(pair[0] as usize, pair[1] as usize);
    }
    for pair in bi_links.chunks_exact(2) {
        builder.add_bi_link(pair[0] as usize, pair[1] as usize);
    }

    let maze = builder.build()
        .map_err(|reasons| JsError::new(&format!("invalid maze: {:?}", reasons)))?;
    let solution = if minimal {
        maze.solve_minimal(moves)
    } else {
        maze.solve(moves)
    }?;

    Ok(match solution {
        None => JsValue::NULL,
        Some(solution) => solution.transfers().iter()
            .map(|transfer| Uint32Array::from(&[transfer.source as u32, transfer.target as u32, transfer.distance][..]))
            .collect::<Array>()
            .into(),
    })
}
