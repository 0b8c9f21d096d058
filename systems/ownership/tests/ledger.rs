use custom_spawners_core::{BlockCoord, PlayerId};
use custom_spawners_system_ownership::{
    LedgerError, MemoryLedger, Owner, OwnerQuery, OwnershipLedger, PlacementSnapshot,
};
use uuid::Uuid;

fn owner(id: u128, name: &str) -> Owner {
    Owner {
        id: PlayerId::new(Uuid::from_u128(id)),
        name: name.to_owned(),
    }
}

fn snapshot() -> PlacementSnapshot {
    PlacementSnapshot {
        entity: Some("ZOMBIE".to_owned()),
        delay: 200,
        required_player_range: 16,
        min_radius: 0,
        max_radius: 4,
        min_amount: 1,
        max_amount: 3,
    }
}

fn coord(x: i32) -> BlockCoord {
    BlockCoord::new("world", x, 64, 0)
}

#[test]
fn owner_of_reflects_added_and_removed_placements() {
    let mut ledger = MemoryLedger::new();
    ledger
        .add_placement(owner(1, "Alex"), "zombie_den", coord(0), snapshot())
        .expect("online");

    assert_eq!(
        ledger.owner_of(&coord(0)),
        Ok(Some(PlayerId::new(Uuid::from_u128(1))))
    );

    let removed = ledger.remove_placement(&coord(0)).expect("online");
    assert_eq!(removed.map(|record| record.spawner_id), Some("zombie_den".to_owned()));
    assert_eq!(ledger.owner_of(&coord(0)), Ok(None));
    assert_eq!(ledger.remove_placement(&coord(0)), Ok(None));
}

#[test]
fn queries_match_by_id_or_case_insensitive_name() {
    let mut ledger = MemoryLedger::new();
    ledger
        .add_placement(owner(1, "Alex"), "zombie_den", coord(2), snapshot())
        .expect("online");
    ledger
        .add_placement(owner(1, "Alex"), "knight_crypt", coord(1), snapshot())
        .expect("online");
    ledger
        .add_placement(owner(2, "Sam"), "zombie_den", coord(3), snapshot())
        .expect("online");

    let by_id = ledger
        .placements_of(&OwnerQuery::Id(PlayerId::new(Uuid::from_u128(1))))
        .expect("online");
    let ids: Vec<&str> = by_id.iter().map(|record| record.spawner_id.as_str()).collect();
    assert_eq!(ids, vec!["knight_crypt", "zombie_den"]);

    let by_name = ledger
        .placements_of(&OwnerQuery::Name("sAM".to_owned()))
        .expect("online");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].coord, coord(3));
}

#[test]
fn re_adding_a_coordinate_replaces_the_record() {
    let mut ledger = MemoryLedger::new();
    ledger
        .add_placement(owner(1, "Alex"), "zombie_den", coord(0), snapshot())
        .expect("online");
    ledger
        .add_placement(owner(2, "Sam"), "pig_pen", coord(0), snapshot())
        .expect("online");

    assert_eq!(ledger.len(), 1);
    assert_eq!(
        ledger.owner_of(&coord(0)),
        Ok(Some(PlayerId::new(Uuid::from_u128(2))))
    );
}

#[test]
fn offline_ledger_reports_unavailability() {
    let mut ledger = MemoryLedger::new();
    ledger.set_offline(true);

    let result = ledger.add_placement(owner(1, "Alex"), "zombie_den", coord(0), snapshot());

    assert!(matches!(result, Err(LedgerError::Unavailable(_))));
    ledger.set_offline(false);
    assert!(ledger.is_empty());
}
