//! Integration tests for the named tournament registry.

use boardgame_tournament::{Tournament, TournamentError, TournamentRegistry, Variant};

#[test]
fn names_are_unique_and_listed_in_insertion_order() {
    let mut registry = TournamentRegistry::new();
    assert!(registry.is_empty());

    registry.add("spring", Tournament::new(Variant::FreeForAll)).unwrap();
    registry.add("autumn", Tournament::new(Variant::Duel)).unwrap();
    assert_eq!(
        registry.add("spring", Tournament::new(Variant::Elimination)),
        Err(TournamentError::DuplicateTournament("spring".to_string()))
    );

    let names: Vec<_> = registry.names().collect();
    assert_eq!(names, vec!["spring", "autumn"]);
    assert_eq!(registry.len(), 2);
}

#[test]
fn lookups_fail_for_unknown_names() {
    let mut registry = TournamentRegistry::new();
    registry.add("spring", Tournament::new(Variant::FreeForAll)).unwrap();

    assert!(registry.get("spring").is_ok());
    assert_eq!(
        registry.get("winter").unwrap_err(),
        TournamentError::TournamentNotFound("winter".to_string())
    );
    assert!(matches!(
        registry.get_mut("winter"),
        Err(TournamentError::TournamentNotFound(_))
    ));
}

#[test]
fn removal_returns_the_tournament() {
    let mut registry = TournamentRegistry::new();
    let mut t = Tournament::new(Variant::Duel);
    t.add_player("Alice").unwrap();
    registry.add("spring", t).unwrap();

    let removed = registry.remove("spring").unwrap();
    assert_eq!(removed.players().len(), 1);
    assert!(registry.is_empty());
    assert_eq!(
        registry.remove("spring").unwrap_err(),
        TournamentError::TournamentNotFound("spring".to_string())
    );
}

#[test]
fn mutation_goes_through_get_mut() {
    let mut registry = TournamentRegistry::new();
    registry.add("spring", Tournament::new(Variant::FreeForAll)).unwrap();

    registry.get_mut("spring").unwrap().add_player("Alice").unwrap();
    assert_eq!(registry.get("spring").unwrap().players().len(), 1);
}
