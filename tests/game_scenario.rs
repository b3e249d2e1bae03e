mod common;

use common::{command, press, sled_router, text};
use empirebot::bot::event::{Keyboard, Outbound};
use empirebot::game::{outcome, Grid, Terrain};
use empirebot::storage::{PlayerId, PlayerStore};

#[test]
fn register_map_and_reveal_first_cell() {
    let (_dir, router) = sled_router();
    let id = PlayerId::from("42");

    router.handle(&command("42", "start"));
    router.handle(&text("42", "Aragorn"));

    let out = router.handle(&command("42", "show_map"));
    let grid: Grid = router
        .store()
        .get_grid(&id)
        .expect("read grid")
        .expect("grid generated on first view");
    assert_eq!(grid.size(), 10);
    assert_eq!(grid.rows().count(), 10);
    for row in grid.rows() {
        assert_eq!(row.len(), 10);
        assert!(row.iter().all(|t| Terrain::ALL.contains(t)));
    }
    match &out[..] {
        [Outbound::Message {
            keyboard: Some(kb), ..
        }] => assert_eq!(kb, &Keyboard::for_grid(&grid)),
        other => panic!("expected map message, got {:?}", other),
    }

    let reveal = router.handle(&press("42", "cell_0-0", 500));
    let expected = outcome::for_terrain(grid.get(0, 0).expect("cell"));
    assert_eq!(
        reveal,
        vec![
            Outbound::AnswerCallback {
                id: "cb-42-cell_0-0".into(),
                text: Some(expected.to_string()),
            },
            Outbound::EditMessage {
                chat: 42,
                message_id: 500,
                text: expected.to_string(),
            },
        ]
    );
}

#[test]
fn every_cell_reveals_its_own_terrain_repeatedly() {
    let (_dir, router) = sled_router();
    let id = PlayerId::from("17");
    router.handle(&command("17", "start"));
    router.handle(&command("17", "show_map"));
    let grid = router.store().get_grid(&id).unwrap().unwrap();

    for r in 0..grid.size() {
        for c in 0..grid.size() {
            let token = format!("cell_{}-{}", r, c);
            let expected = outcome::for_terrain(grid.get(r, c).unwrap());
            for _ in 0..2 {
                let out = router.handle(&press("17", &token, 1));
                assert_eq!(out[0].text(), Some(expected), "{token}");
            }
        }
    }
    // selecting cells never changes the map
    assert_eq!(router.store().get_grid(&id).unwrap(), Some(grid));
}

#[test]
fn map_view_is_idempotent() {
    let (_dir, router) = sled_router();
    let id = PlayerId::from("8");
    router.handle(&command("8", "start"));
    router.handle(&command("8", "show_map"));
    let first = router.store().get_grid(&id).unwrap();
    router.handle(&command("8", "show_map"));
    let second = router.store().get_grid(&id).unwrap();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn maps_are_private_per_player() {
    let (_dir, router) = sled_router();
    for p in ["1", "2"] {
        router.handle(&command(p, "start"));
        router.handle(&command(p, "show_map"));
    }
    // player 2 never sees player 1's stored grid through the router
    let g1 = router.store().get_grid(&PlayerId::from("1")).unwrap().unwrap();
    let g2 = router.store().get_grid(&PlayerId::from("2")).unwrap().unwrap();
    let out = router.handle(&press("2", "cell_4-4", 1));
    assert_eq!(out[0].text(), Some(outcome::for_terrain(g2.get(4, 4).unwrap())));
    // sanity: both grids are complete
    assert_eq!(g1.size(), g2.size());
}

#[test]
fn map_survives_restart() {
    use empirebot::bot::Router;
    use empirebot::storage::SledStore;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("players");
    let id = PlayerId::from("64");

    let first = {
        let router = Router::new(SledStore::open(&path).unwrap(), &common::bot_config());
        router.handle(&command("64", "start"));
        router.handle(&text("64", "Gimli"));
        router.handle(&command("64", "show_map"));
        let grid = router.store().get_grid(&id).unwrap().unwrap();
        grid
    };

    let router = Router::new(SledStore::open(&path).unwrap(), &common::bot_config());
    router.handle(&command("64", "show_map"));
    assert_eq!(router.store().get_grid(&id).unwrap(), Some(first));
    let rec = router.store().get_player(&id).unwrap().unwrap();
    assert_eq!(rec.nickname.as_deref(), Some("Gimli"));
}
