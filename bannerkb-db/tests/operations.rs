use bannerkb_db::*;
use bannerkb_model::types::{BannerDraft, BannerRecord};

fn sample_draft(image_id: &str) -> BannerDraft {
    BannerDraft {
        image_id: image_id.to_string(),
        company_name: Some("株式会社サンプル".to_string()),
        job_title: Some("介護スタッフ".to_string()),
        employment_type: Some("full_time".to_string()),
        area: Some("tokyo".to_string()),
        impressions: 1000,
        clicks: 25,
        ctr: 2.5,
        banner_image_url: Some("https://example.com/a.png".to_string()),
        main_appeals: vec!["no_experience".to_string()],
        sub_appeals: vec!["駅チカ".to_string()],
        ..BannerDraft::default()
    }
}

fn insert_sample(conn: &rusqlite::Connection, knowledge_id: &str, image_id: &str) -> BannerRecord {
    let draft = sample_draft(image_id);
    insert_banner(conn, knowledge_id, &draft, None).unwrap();
    replace_main_appeals(conn, knowledge_id, &draft.main_appeals).unwrap();
    replace_sub_appeals(conn, knowledge_id, &draft.sub_appeals).unwrap();
    find_by_knowledge_id(conn, knowledge_id).unwrap().unwrap()
}

#[test]
fn insert_and_find_by_both_keys() {
    let conn = open_memory().unwrap();
    insert_sample(&conn, "BK1", "IMG001");

    let by_image = find_by_image_id(&conn, "IMG001").unwrap().unwrap();
    assert_eq!(by_image.knowledge_id, "BK1");
    assert_eq!(by_image.company_name.as_deref(), Some("株式会社サンプル"));
    assert_eq!(by_image.main_appeals, vec!["no_experience"]);

    assert!(find_by_image_id(&conn, "IMG999").unwrap().is_none());
}

#[test]
fn image_id_is_unique() {
    let conn = open_memory().unwrap();
    insert_sample(&conn, "BK1", "IMG001");
    let err = insert_banner(&conn, "BK2", &sample_draft("IMG001"), None);
    assert!(err.is_err());
}

#[test]
fn update_merges_missing_optionals_from_stored_values() {
    let conn = open_memory().unwrap();
    let existing = insert_sample(&conn, "BK1", "IMG001");

    let incoming = BannerDraft {
        image_id: "IMG001".to_string(),
        job_title: Some("営業".to_string()),
        impressions: 2000,
        clicks: 50,
        ctr: 2.5,
        // banner_image_url and company_name deliberately absent
        ..BannerDraft::default()
    };
    update_banner(&conn, &existing, &incoming).unwrap();

    let after = find_by_knowledge_id(&conn, "BK1").unwrap().unwrap();
    assert_eq!(after.job_title.as_deref(), Some("営業"));
    assert_eq!(after.impressions, 2000);
    assert_eq!(after.company_name.as_deref(), Some("株式会社サンプル"));
    assert_eq!(
        after.banner_image_url.as_deref(),
        Some("https://example.com/a.png")
    );
}

#[test]
fn replace_appeals_is_delete_then_reinsert() {
    let conn = open_memory().unwrap();
    insert_sample(&conn, "BK1", "IMG001");

    replace_main_appeals(
        &conn,
        "BK1",
        &["high_income".to_string(), "weekends_off".to_string()],
    )
    .unwrap();

    let record = find_by_knowledge_id(&conn, "BK1").unwrap().unwrap();
    assert_eq!(record.main_appeals, vec!["high_income", "weekends_off"]);

    replace_main_appeals(&conn, "BK1", &[]).unwrap();
    let record = find_by_knowledge_id(&conn, "BK1").unwrap().unwrap();
    assert!(record.main_appeals.is_empty());
}

#[test]
fn update_image_url_touches_only_the_image_fields() {
    let conn = open_memory().unwrap();
    insert_sample(&conn, "BK1", "IMG001");

    update_image_url(&conn, "BK1", Some("banners/x.png"), "/media/banners/x.png").unwrap();

    let record = find_by_knowledge_id(&conn, "BK1").unwrap().unwrap();
    assert_eq!(record.banner_image_key.as_deref(), Some("banners/x.png"));
    assert_eq!(
        record.banner_image_url.as_deref(),
        Some("/media/banners/x.png")
    );
    assert_eq!(record.job_title.as_deref(), Some("介護スタッフ"));

    assert!(update_image_url(&conn, "BK404", None, "/media/x.png").is_err());
}

#[test]
fn delete_removes_record_and_appeal_rows() {
    let conn = open_memory().unwrap();
    insert_sample(&conn, "BK1", "IMG001");

    delete_banner(&conn, "BK1").unwrap();
    assert!(find_by_knowledge_id(&conn, "BK1").unwrap().is_none());

    let appeal_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM banner_main_appeals", [], |r| r.get(0))
        .unwrap();
    assert_eq!(appeal_rows, 0);

    assert!(delete_banner(&conn, "BK1").is_err());
}

#[test]
fn delete_all_clears_everything() {
    let conn = open_memory().unwrap();
    insert_sample(&conn, "BK1", "IMG001");
    insert_sample(&conn, "BK2", "IMG002");

    let removed = delete_all_banners(&conn).unwrap();
    assert_eq!(removed, 2);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM banner_knowledge", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}
