use super::*;
use crate::config::{EconomyMode, OverlapMode};
use crate::economy::Intent;
use crate::engine::Session;
use crate::presets::find_preset;
use crate::session::{
    result_to_json, session_from_json, session_to_json, targets_reached, MemoryStore,
    SavedSession, SessionStore,
};
use crate::state::{BENCH_SIZE, BOARD_SLOTS, SHOP_SIZE};

#[test]
fn test_saved_session_json_round_trip() {
    let catalog = catalog();
    let mut state = GameState::new(&catalog, SessionConfig::chasing(["Garen"]), &mut rng(4));
    state.bench[3] = Some(unit("Garen", Rank::Two).with_removed(vec!["Garen".into(); 3]));
    state.pool.consume("Garen", 3).expect("consume");
    state.reroll_count = 7;

    let json = session_to_json(&SavedSession::from_state(&state)).expect("json");
    assert!(json.contains("\"rerollCount\":7"));
    assert!(json.contains("\"removedIdentities\""));

    let loaded = session_from_json(&json)
        .expect("parse")
        .into_state(&catalog, SessionConfig::default(), &mut rng(0));
    assert_eq!(loaded, state);
}

#[test]
fn test_loading_sparse_record_normalizes_once() {
    let catalog = catalog();
    let json = r#"{
        "gold": 50000,
        "level": 42,
        "xp": 17,
        "bench": [{"key": "Garen", "name": "old name", "cost": 1}, null, {"key": "Retired", "name": "x", "cost": 2}],
        "board": [{"key": "Jinx", "name": "Jinx", "cost": 4, "star": 2}]
    }"#;

    let state = session_from_json(json)
        .expect("parse")
        .into_state(&catalog, SessionConfig::chasing(["Jinx"]), &mut rng(6));

    assert_eq!(state.gold, 10_000);
    assert_eq!((state.level, state.xp), (10, 0));
    assert_eq!(state.bench.len(), BENCH_SIZE);
    assert_eq!(state.board.len(), BOARD_SLOTS);
    assert_eq!(state.shop.len(), SHOP_SIZE);
    assert!(state.shop.iter().any(Option::is_some), "missing shop is rolled");
    assert_eq!(keys(&state.bench)[0], Some(("Garen", Rank::One)));
    assert_eq!(state.bench[0].as_ref().map(|u| u.name.as_str()), Some("Garen"));
    assert!(state.bench[2].is_none(), "unknown units are dropped");
    assert_eq!(keys(&state.board)[0], Some(("Jinx", Rank::Two)));
    assert_eq!(state.pool.remaining("Gwen"), 9, "missing pool starts full");
    assert!(state.config.is_wanted("Jinx"));
}

#[test]
fn test_record_without_pool_debits_unit_provenance() {
    let catalog = catalog();
    let json = r#"{
        "bench": [
            {"key": "Garen", "name": "Garen", "cost": 1, "removedUnits": ["Garen"]},
            {"key": "Lux", "name": "Lux", "cost": 2, "star": 2, "removedUnits": ["Lux", "Lux", "Lux"]}
        ]
    }"#;

    let mut state = session_from_json(json)
        .expect("parse")
        .into_state(&catalog, SessionConfig::default(), &mut rng(2));

    assert_eq!(state.pool.remaining("Garen"), 29);
    assert_eq!(state.pool.remaining("Lux"), 22);

    state.sell_unit(&catalog, SlotRef::bench(0)).expect("sell garen");
    state.sell_unit(&catalog, SlotRef::bench(1)).expect("sell lux");
    assert_eq!(state.pool.remaining("Garen"), 30);
    assert_eq!(state.pool.remaining("Lux"), 25);
}

#[test]
fn test_over_capacity_board_moves_to_bench_on_load() {
    let catalog = catalog();
    let json = r#"{
        "level": 1,
        "board": [
            {"key": "Garen", "name": "Garen", "cost": 1},
            {"key": "Lux", "name": "Lux", "cost": 2},
            {"key": "Rell", "name": "Rell", "cost": 1}
        ]
    }"#;

    let state = session_from_json(json)
        .expect("parse")
        .into_state(&catalog, SessionConfig::default(), &mut rng(2));

    assert_eq!(state.board_unit_count(), 1);
    assert_eq!(keys(&state.board)[0], Some(("Garen", Rank::One)));
    assert_eq!(keys(&state.bench)[0], Some(("Lux", Rank::One)));
    assert_eq!(keys(&state.bench)[1], Some(("Rell", Rank::One)));
}

#[test]
fn test_over_capacity_board_with_full_bench_returns_dropped_copies() {
    let catalog = catalog();
    let mut state = GameState::empty(&catalog, SessionConfig::default());
    fill_bench(&mut state);
    state.board[0] = r1("Garen");
    state.board[1] = Some(unit("Lux", Rank::One).with_removed(vec!["Lux".into()]));
    state.pool.consume("Lux", 1).expect("consume");
    let mut saved = SavedSession::from_state(&state);
    saved.level = 1;

    let loaded = saved.into_state(&catalog, SessionConfig::default(), &mut rng(2));

    assert_eq!(loaded.board_unit_count(), 1);
    assert_eq!(keys(&loaded.board)[0], Some(("Garen", Rank::One)));
    assert_eq!(loaded.pool.remaining("Lux"), 25);
}

#[test]
fn test_memory_store_keeps_scale_snapshot() {
    let catalog = catalog();
    let state = GameState::new(&catalog, SessionConfig::default(), &mut rng(4));
    let saved = SavedSession::from_state(&state);
    let mut store = MemoryStore::new();

    assert_eq!(store.load().expect("load"), None);
    store.save(&saved).expect("save");
    assert!(store.stored_len() > 0);
    assert_eq!(store.load().expect("load"), Some(saved));
    store.clear().expect("clear");
    assert_eq!(store.load().expect("load"), None);
}

#[test]
fn test_targets_reached_uses_max_rank() {
    let mut targets = std::collections::BTreeMap::new();
    targets.insert("Garen".to_string(), Rank::Two);
    targets.insert("Lux".to_string(), Rank::Two);
    let mut board = empty_slots(BOARD_SLOTS);
    let mut bench = empty_slots(BENCH_SIZE);
    board[0] = Some(unit("Garen", Rank::Three));
    bench[0] = r1("Lux");

    assert!(!targets_reached(&targets, &board, &bench));
    bench[1] = Some(unit("Lux", Rank::Two));
    assert!(targets_reached(&targets, &board, &bench));
    assert!(!targets_reached(&Default::default(), &board, &bench));
}

#[test]
fn test_session_completes_and_reports_result() {
    let config = SessionConfig {
        mode: EconomyMode::TimeAttack,
        overlap: OverlapMode::With,
        ..SessionConfig::chasing(["Garen"])
    };
    let session = Session::new(catalog(), config, rng(12));
    assert!(!session.is_complete());

    let mut state = session.save();
    state.shop = Some(vec![r1("Garen"), r1("Garen"), r1("Garen"), None, None]);
    let mut session = Session::resume(catalog(), state, SessionConfig::default(), rng(12));

    for slot in 0..3 {
        session.apply(&Intent::Buy { slot }).expect("buy");
    }
    assert!(session.is_complete());
    let progress = session.progress();
    assert_eq!(progress.len(), 1);
    assert!(progress[0].reached());

    session.apply(&Intent::Reroll).expect("reroll");
    let result = session.result(95, "2024-05-01T12:00:00Z".into());
    assert_eq!(result.deck, "(custom)");
    assert_eq!(result.spent, 5);
    assert_eq!(result.reroll_count, 1);
    assert_eq!(result.overlap_mode, OverlapMode::With);
    assert_eq!(result.targets.get("Garen"), Some(&Rank::Two));

    let json = result_to_json(&result).expect("json");
    assert!(json.contains("\"timeSec\":95"));
    assert!(json.contains("\"overlapMode\":\"with\""));
}

#[test]
fn test_preset_session_uses_preset_targets() {
    let preset = find_preset("duelist udyr").expect("preset");
    let session = Session::new(catalog(), preset.to_config(OverlapMode::None), rng(1));

    let state = session.state();
    assert_eq!(state.config.deck_name, "Duelist Udyr");
    assert_eq!(state.config.targets.get("Udyr"), Some(&Rank::Three));
    assert_eq!(state.config.targets.get("Sett"), Some(&Rank::Two));
    assert_eq!(state.level, 3);
    assert_eq!(state.gold, 100);
}
