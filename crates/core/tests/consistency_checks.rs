//! Consistency checker classification tests
//!
//! Exercises the four issue classes against synthetic fixtures, including
//! the full (has_samples, in_main, in_archive) truth table.

mod support;

use std::sync::Arc;

use labtrack_core::ConsistencyChecker;
use labtrack_domain::{FolderArea, Opportunity, RemoteFolderItem};
use support::InMemoryOpportunityRepository;

const ARCHIVE_NAME: &str = "_Archive";

fn folder(id: &str, name: &str) -> RemoteFolderItem {
    RemoteFolderItem {
        id: id.to_string(),
        name: name.to_string(),
        parent_path: None,
        is_folder: true,
        web_url: None,
    }
}

fn opportunity(number: &str, description: &str) -> Opportunity {
    let mut opp = Opportunity::new(number);
    opp.description = Some(description.to_string());
    opp
}

fn checker(repo: &Arc<InMemoryOpportunityRepository>) -> ConsistencyChecker {
    ConsistencyChecker::new(repo.clone(), ARCHIVE_NAME)
}

#[tokio::test]
async fn truth_table_fires_at_most_one_placement_issue() {
    // (has_samples, in_main, in_archive) -> expected class
    #[derive(Debug, PartialEq)]
    enum Expected {
        Restore,
        Archive,
        Missing,
        None,
    }
    let cases = [
        (false, false, false, Expected::Missing),
        (false, false, true, Expected::None),
        (false, true, false, Expected::Archive),
        (false, true, true, Expected::None),
        (true, false, false, Expected::Missing),
        (true, false, true, Expected::Restore),
        (true, true, false, Expected::None),
        (true, true, true, Expected::None),
    ];

    for (has_samples, in_main, in_archive, expected) in cases {
        let repo = Arc::new(InMemoryOpportunityRepository::new());
        let mut opp = opportunity("8070", "8070 - Acme");
        if has_samples {
            repo.set_live_samples("8070", &["1234"]);
            opp.sample_ids = vec!["1234".to_string()].into();
        }
        repo.insert(opp.clone());

        let main = if in_main { vec![folder("m1", "8070 - Acme")] } else { vec![] };
        let archive = if in_archive { vec![folder("a1", "8070 - Acme")] } else { vec![] };

        let report = checker(&repo).check(&[opp], &main, &archive).await.unwrap();

        let fired = [
            (!report.archive_should_restore.is_empty(), Expected::Restore),
            (!report.main_should_archive.is_empty(), Expected::Archive),
            (!report.missing_from_remote.is_empty(), Expected::Missing),
        ];
        let fired_count = fired.iter().filter(|(hit, _)| *hit).count();
        assert!(fired_count <= 1, "multiple classes fired for {has_samples}/{in_main}/{in_archive}");

        let actual = fired
            .into_iter()
            .find_map(|(hit, class)| hit.then_some(class))
            .unwrap_or(Expected::None);
        assert_eq!(
            actual, expected,
            "wrong class for has_samples={has_samples} in_main={in_main} in_archive={in_archive}"
        );
    }
}

#[tokio::test]
async fn stale_mirror_reported_even_when_correctly_placed() {
    let repo = Arc::new(InMemoryOpportunityRepository::new());
    let mut opp = opportunity("8006", "8006 - Foo Inc");
    opp.sample_ids = vec!["1111".to_string()].into();
    repo.set_live_samples("8006", &["1111", "2222", "3333"]);
    repo.insert(opp.clone());

    let main = vec![folder("m1", "8006 - Foo Inc")];
    let report = checker(&repo).check(&[opp], &main, &[]).await.unwrap();

    assert!(report.main_should_archive.is_empty());
    assert!(report.archive_should_restore.is_empty());
    assert!(report.missing_from_remote.is_empty());
    assert_eq!(report.sample_count_mismatch.len(), 1);
    let mismatch = &report.sample_count_mismatch[0];
    assert_eq!(mismatch.opportunity_number, "8006");
    assert_eq!((mismatch.recorded, mismatch.actual), (1, 3));
}

#[tokio::test]
async fn unknown_folders_tagged_with_area() {
    let repo = Arc::new(InMemoryOpportunityRepository::new());
    let opp = opportunity("8070", "8070 - Acme");
    repo.insert(opp.clone());

    let main = vec![
        folder("m1", "8070 - Acme"),
        folder("m2", "9999 - Ghost Co"),
        folder("m3", ARCHIVE_NAME),
    ];
    let archive = vec![folder("a1", "Random Stuff")];

    let report = checker(&repo).check(&[opp], &main, &archive).await.unwrap();

    assert_eq!(report.unknown_folders.len(), 2);
    let ghost = report
        .unknown_folders
        .iter()
        .find(|u| u.folder.name == "9999 - Ghost Co")
        .expect("ghost folder reported");
    assert_eq!(ghost.area, FolderArea::Main);
    assert_eq!(ghost.extracted_number.as_deref(), Some("9999"));

    let random = report
        .unknown_folders
        .iter()
        .find(|u| u.folder.name == "Random Stuff")
        .expect("unparseable folder reported");
    assert_eq!(random.area, FolderArea::Archive);
    assert_eq!(random.extracted_number, None);
}

#[tokio::test]
async fn clean_state_produces_empty_report() {
    let repo = Arc::new(InMemoryOpportunityRepository::new());
    let mut active = opportunity("7001", "7001 - Active Co");
    active.sample_ids = vec!["4321".to_string()].into();
    repo.set_live_samples("7001", &["4321"]);
    let archived = opportunity("7002", "7002 - Dormant Co");
    repo.insert(active.clone());
    repo.insert(archived.clone());

    let main = vec![folder("m1", "7001 - Active Co"), folder("m2", ARCHIVE_NAME)];
    let archive = vec![folder("a1", "7002 - Dormant Co")];

    let report = checker(&repo).check(&[active, archived], &main, &archive).await.unwrap();
    assert!(report.is_clean(), "expected clean report, got {report:?}");
}
