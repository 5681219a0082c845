use super::*;
use crate::view::{pool_tracker, promo_hint, trait_counts, GameView};
use crate::state::{BENCH_SIZE, BOARD_SLOTS};

#[test]
fn test_trait_counts_unique_units_sorted() {
    let mut board = empty_slots(BOARD_SLOTS);
    board[0] = r1("Garen");
    board[1] = r1("Garen");
    board[2] = r1("Jinx");
    board[3] = Some(unit("Syndra", Rank::Three));

    let counts: Vec<(String, u32)> = trait_counts(&board)
        .into_iter()
        .map(|t| (t.name, t.count))
        .collect();

    let expected = [
        ("Star Guardian", 2),
        ("Bastion", 1),
        ("Battle Academia", 1),
        ("Crystal Gambit", 1),
        ("Prodigy", 1),
        ("Sniper", 1),
    ];
    let expected: Vec<(String, u32)> = expected.iter().map(|&(n, c)| (n.to_string(), c)).collect();
    assert_eq!(counts, expected);
    assert_eq!(crate::view::three_star_count(&board), 1);
}

#[test]
fn test_promo_hint() {
    let board = empty_slots(BOARD_SLOTS);
    let mut bench = empty_slots(BENCH_SIZE);
    assert_eq!(promo_hint("Lux", &board, &bench), 0);

    bench[0] = r1("Lux");
    bench[1] = r1("Lux");
    assert_eq!(promo_hint("Lux", &board, &bench), 2);

    bench[2] = Some(unit("Lux", Rank::Two));
    bench[3] = Some(unit("Lux", Rank::Two));
    assert_eq!(promo_hint("Lux", &board, &bench), 3);

    bench[4] = Some(unit("Lux", Rank::Three));
    assert_eq!(promo_hint("Lux", &board, &bench), 0);
}

#[test]
fn test_pool_tracker_puts_wanted_first() {
    let catalog = catalog();
    let mut state = fresh_state(SessionConfig::chasing(["Kayle"]));
    state.pool.consume("Garen", 5).expect("consume");
    state.bench[0] = Some(unit("Garen", Rank::Two));

    let rows = pool_tracker(&catalog, &state, Some(1), false);

    assert_eq!(rows.len(), catalog.tier(1).count());
    assert_eq!(rows[0].key, "Kayle");
    assert!(rows[0].wanted);
    assert_eq!(rows[1].key, "Garen");
    assert_eq!(rows[1].remaining, 25);
    assert_eq!(rows[1].allocation, 30);
    assert_eq!(rows[1].held, 3);
    assert_eq!(rows[1].unheld, 27);

    let wanted = pool_tracker(&catalog, &state, None, true);
    assert_eq!(wanted.len(), 1);
}

#[test]
fn test_game_view_annotates_offers() {
    let mut state = fresh_state(SessionConfig::chasing(["Lux"]));
    state.board[0] = r1("Lux");
    state.bench[0] = r1("Lux");
    offer(&mut state, 0, "Lux");
    offer(&mut state, 1, "Gwen");
    state.gold = 3;

    let view = GameView::from_state(&state);

    assert_eq!(view.xp_required, 6);
    assert_eq!(view.odds, vec![75, 25, 0, 0, 0]);
    assert_eq!(view.board_capacity, 3);
    assert_eq!(view.board_count, 1);
    let lux = view.shop[0].as_ref().expect("offer");
    assert!(lux.owned && lux.on_board && lux.wanted && lux.affordable);
    assert_eq!(lux.promo_hint, 2);
    let gwen = view.shop[1].as_ref().expect("offer");
    assert!(!gwen.owned && !gwen.wanted && !gwen.affordable);
    assert!(view.shop[2].is_none());
}
