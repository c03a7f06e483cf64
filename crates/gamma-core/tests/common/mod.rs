//! Brute-force reference implementations shared by the integration tests.

#![allow(dead_code)]

use gamma_core::{Game, PlayerId};

/// Count the areas of `player` with a fresh breadth-first search.
pub fn exact_areas(game: &Game, player: PlayerId) -> u32 {
    let (width, height) = (game.width(), game.height());
    let mut seen = vec![false; (width * height) as usize];
    let mut areas = 0;

    for y in 0..height {
        for x in 0..width {
            let start = (y * width + x) as usize;
            if seen[start] || game.owner_at(x, y) != Some(player) {
                continue;
            }
            areas += 1;
            seen[start] = true;
            let mut queue = std::collections::VecDeque::from([(x, y)]);
            while let Some((cx, cy)) = queue.pop_front() {
                let around = [
                    (cx.wrapping_add(1), cy),
                    (cx.wrapping_sub(1), cy),
                    (cx, cy.wrapping_add(1)),
                    (cx, cy.wrapping_sub(1)),
                ];
                for (nx, ny) in around {
                    if game.owner_at(nx, ny) == Some(player) {
                        let index = (ny * width + nx) as usize;
                        if !seen[index] {
                            seen[index] = true;
                            queue.push_back((nx, ny));
                        }
                    }
                }
            }
        }
    }
    areas
}

/// Number of empty cells on the board, counted cell by cell.
pub fn count_empty(game: &Game) -> u64 {
    let mut empty = 0;
    for y in 0..game.height() {
        for x in 0..game.width() {
            if game.owner_at(x, y).is_none() {
                empty += 1;
            }
        }
    }
    empty
}

/// Whether any cell on the board accepts a golden move by `player`,
/// trying each one on a throwaway copy.
pub fn any_golden_move(game: &Game, player: PlayerId) -> bool {
    (0..game.height()).any(|y| {
        (0..game.width()).any(|x| {
            let mut trial = game.clone();
            trial.golden(player, x, y)
        })
    })
}

/// Expected answer of `free_cells_reachable` from first principles.
pub fn expected_free_cells(game: &Game, player: PlayerId) -> u64 {
    if game.player(player).is_none() {
        return 0;
    }
    if exact_areas(game, player) < game.max_areas() {
        return count_empty(game);
    }
    let mut reachable = 0;
    for y in 0..game.height() {
        for x in 0..game.width() {
            if game.owner_at(x, y).is_some() {
                continue;
            }
            let touches = [
                (x.wrapping_add(1), y),
                (x.wrapping_sub(1), y),
                (x, y.wrapping_add(1)),
                (x, y.wrapping_sub(1)),
            ]
            .into_iter()
            .any(|(nx, ny)| game.owner_at(nx, ny) == Some(player));
            if touches {
                reachable += 1;
            }
        }
    }
    reachable
}

/// Check the invariants every reachable state must satisfy.
pub fn assert_consistent(game: &Game) {
    let tiles: u64 = game.players().iter().map(|p| p.tiles).sum();
    assert_eq!(
        tiles + count_empty(game),
        u64::from(game.width()) * u64::from(game.height()),
        "tiles and empty cells must cover the board"
    );

    for player in game.players() {
        let owned = (0..game.height())
            .flat_map(|y| (0..game.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| game.owner_at(x, y) == Some(player.id))
            .count() as u64;
        assert_eq!(player.tiles, owned, "player {} tile count", player.id);

        let exact = exact_areas(game, player.id);
        assert!(exact <= game.max_areas(), "player {} over the limit", player.id);
        assert!(player.areas >= exact, "player {} area estimate undercounts", player.id);
        assert!(player.areas <= game.max_areas());
    }
}
