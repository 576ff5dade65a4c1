use bannerkb_db::{find_by_image_id, open_memory};
use bannerkb_import::{import_banners, log_import, resync_banners};
use bannerkb_model::types::BannerDraft;
use rusqlite::Connection;

fn draft(image_id: &str) -> BannerDraft {
    BannerDraft {
        image_id: image_id.to_string(),
        company_name: Some("A社".to_string()),
        job_title: Some("介護スタッフ".to_string()),
        impressions: 1000,
        clicks: 25,
        ctr: 2.5,
        main_appeals: vec!["no_experience".to_string(), "high_income".to_string()],
        sub_appeals: vec!["駅チカ".to_string()],
        banner_image_url: Some("https://example.com/a.png".to_string()),
        ..BannerDraft::default()
    }
}

#[test]
fn importing_a_new_key_creates_one_record() {
    let conn = open_memory().unwrap();
    let report = import_banners(&conn, &[draft("IMG001")], None).unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.updated, 0);
    assert!(report.failures.is_empty());

    let record = find_by_image_id(&conn, "IMG001").unwrap().unwrap();
    assert!(record.knowledge_id.starts_with("BK"));
    assert!(!record.knowledge_id.is_empty());
    assert_eq!(record.main_appeals, vec!["no_experience", "high_income"]);
    assert_eq!(record.sub_appeals, vec!["駅チカ"]);
}

#[test]
fn reimporting_updates_in_place_and_keeps_knowledge_id() {
    let conn = open_memory().unwrap();
    import_banners(&conn, &[draft("IMG001")], None).unwrap();
    let before = find_by_image_id(&conn, "IMG001").unwrap().unwrap();

    let mut second = draft("IMG001");
    second.job_title = Some("営業".to_string());
    second.impressions = 2000;
    second.clicks = 100;
    second.ctr = 5.0;
    let report = import_banners(&conn, &[second], None).unwrap();

    assert_eq!(report.created, 0);
    assert_eq!(report.updated, 1);

    let after = find_by_image_id(&conn, "IMG001").unwrap().unwrap();
    assert_eq!(after.knowledge_id, before.knowledge_id);
    assert_eq!(after.job_title.as_deref(), Some("営業"));
    assert_eq!(after.impressions, 2000);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM banner_knowledge", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn update_preserves_image_url_when_batch_omits_it() {
    let conn = open_memory().unwrap();
    import_banners(&conn, &[draft("IMG001")], None).unwrap();

    let mut second = draft("IMG001");
    second.banner_image_url = None;
    second.notes = Some("再入稿".to_string());
    import_banners(&conn, &[second], None).unwrap();

    let record = find_by_image_id(&conn, "IMG001").unwrap().unwrap();
    assert_eq!(
        record.banner_image_url.as_deref(),
        Some("https://example.com/a.png")
    );
    assert_eq!(record.notes.as_deref(), Some("再入稿"));
}

#[test]
fn update_replaces_appeal_sets_whole() {
    let conn = open_memory().unwrap();
    import_banners(&conn, &[draft("IMG001")], None).unwrap();

    let mut second = draft("IMG001");
    second.main_appeals = vec!["weekends_off".to_string()];
    second.sub_appeals = vec![];
    import_banners(&conn, &[second], None).unwrap();

    let record = find_by_image_id(&conn, "IMG001").unwrap().unwrap();
    assert_eq!(record.main_appeals, vec!["weekends_off"]);
    assert!(record.sub_appeals.is_empty());
}

#[test]
fn empty_image_id_is_a_recorded_failure() {
    let conn = open_memory().unwrap();
    let report = import_banners(&conn, &[draft("IMG001"), draft("  ")], None).unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].row, 1);
    assert_eq!(report.total(), 2);
}

/// Fault injection: a trigger makes the insert for one specific key fail,
/// the way a constraint violation would.
fn install_failure_trigger(conn: &Connection, image_id: &str) {
    conn.execute_batch(&format!(
        "CREATE TRIGGER fail_one BEFORE INSERT ON banner_knowledge
         WHEN NEW.image_id = '{image_id}'
         BEGIN SELECT RAISE(ABORT, 'simulated store failure'); END;"
    ))
    .unwrap();
}

#[test]
fn one_failing_row_does_not_abort_the_batch() {
    let conn = open_memory().unwrap();
    install_failure_trigger(&conn, "IMG002");

    let batch = [draft("IMG001"), draft("IMG002"), draft("IMG003")];
    let report = import_banners(&conn, &batch, None).unwrap();

    assert_eq!(report.created, 2);
    assert_eq!(report.updated, 0);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].row, 1);
    assert_eq!(report.failures[0].image_id, "IMG002");
    assert!(report.failures[0].message.contains("simulated store failure"));

    assert!(find_by_image_id(&conn, "IMG001").unwrap().is_some());
    assert!(find_by_image_id(&conn, "IMG002").unwrap().is_none());
    assert!(find_by_image_id(&conn, "IMG003").unwrap().is_some());
}

#[test]
fn failed_row_leaves_no_partial_appeal_rows() {
    let conn = open_memory().unwrap();
    install_failure_trigger(&conn, "IMG002");
    import_banners(&conn, &[draft("IMG002")], None).unwrap();

    let appeal_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM banner_main_appeals", [], |r| r.get(0))
        .unwrap();
    assert_eq!(appeal_rows, 0);
}

#[test]
fn resync_clears_the_store_first() {
    let conn = open_memory().unwrap();
    import_banners(&conn, &[draft("IMG001"), draft("IMG002")], None).unwrap();

    let report = resync_banners(&conn, &[draft("IMG002"), draft("IMG003")], None).unwrap();
    assert_eq!(report.created, 2);
    assert_eq!(report.updated, 0);

    assert!(find_by_image_id(&conn, "IMG001").unwrap().is_none());
    assert!(find_by_image_id(&conn, "IMG002").unwrap().is_some());
    assert!(find_by_image_id(&conn, "IMG003").unwrap().is_some());
}

#[test]
fn resync_does_not_preserve_prior_image_urls() {
    let conn = open_memory().unwrap();
    import_banners(&conn, &[draft("IMG001")], None).unwrap();

    let mut resynced = draft("IMG001");
    resynced.banner_image_url = None;
    resync_banners(&conn, &[resynced], None).unwrap();

    let record = find_by_image_id(&conn, "IMG001").unwrap().unwrap();
    assert_eq!(record.banner_image_url, None);
}

#[test]
fn import_runs_are_logged() {
    let conn = open_memory().unwrap();
    let report = import_banners(&conn, &[draft("IMG001")], None).unwrap();
    log_import(&conn, "csv", "banners.csv", &report).unwrap();

    let logs = bannerkb_db::list_import_logs(&conn, None).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].source_type, "csv");
    assert_eq!(logs[0].records_created, 1);
}
