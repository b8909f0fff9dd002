use mhs_activities::{
    ActivityCatalog, ActivityError, QueryService, SignupService, UnregisterService,
};
use proptest::prelude::*;
use std::thread;

#[test]
fn init_creates_slice() {
    let slice = mhs_activities::init().expect("init should succeed");
    assert_eq!(slice.id, std::any::TypeId::of::<mhs_activities::Activities>());

    let activities = slice.downcast_ref::<mhs_activities::Activities>().expect("activities slice");
    assert_eq!(activities.catalog.len(), 9);
}

#[test]
fn concurrent_signups_are_all_kept() -> Result<(), ActivityError> {
    let catalog = ActivityCatalog::seeded()?;
    let before = catalog.lookup("Chess Club")?.participant_count();
    let emails: Vec<String> = (0..64).map(|i| format!("student{i}@mergington.edu")).collect();

    thread::scope(|scope| {
        for email in &emails {
            let catalog = &catalog;
            scope.spawn(move || SignupService::new(catalog).signup("Chess Club", email));
        }
    });

    let chess = catalog.lookup("Chess Club")?.snapshot();
    assert_eq!(chess.participants.len(), before + emails.len());
    for email in &emails {
        assert!(chess.participants.contains(email), "{email} lost");
    }
    Ok(())
}

#[test]
fn racing_duplicate_signups_admit_one() -> Result<(), ActivityError> {
    let catalog = ActivityCatalog::seeded()?;

    let outcomes: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                scope.spawn(|| SignupService::new(&catalog).signup("Debate Team", "same@mergington.edu"))
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("signup thread panicked")).collect()
    });

    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, ActivityError::AlreadySignedUp { .. }))
    );
    Ok(())
}

#[test]
fn signups_in_several_activities_are_independent() -> Result<(), ActivityError> {
    let catalog = ActivityCatalog::seeded()?;
    let signup = SignupService::new(&catalog);

    for activity in ["Soccer Team", "Chess Club", "Programming Class"] {
        signup.signup(activity, "multi@mergington.edu")?;
    }

    let directory = QueryService::new(&catalog).list_activities();
    for (name, view) in directory.iter() {
        let expected = ["Soccer Team", "Chess Club", "Programming Class"].contains(&name.as_str());
        assert_eq!(view.participants.iter().any(|p| p == "multi@mergington.edu"), expected, "{name}");
    }
    Ok(())
}

proptest! {
    #[test]
    fn signup_then_unregister_restores_the_roster(
        local in "[a-z][a-z0-9.]{0,15}",
        pick in 0usize..9,
    ) {
        let catalog = ActivityCatalog::seeded().expect("seed");
        let name = catalog.names().nth(pick).expect("nine activities").to_owned();
        let email = format!("{local}@test.mergington.edu");
        let before = catalog.lookup(&name).expect("known").snapshot();

        SignupService::new(&catalog).signup(&name, &email).expect("fresh email");
        prop_assert!(catalog.lookup(&name).expect("known").is_enrolled(&email));
        UnregisterService::new(&catalog).unregister(&name, &email).expect("enrolled");

        prop_assert_eq!(catalog.lookup(&name).expect("known").snapshot(), before);
    }
}
