use bannerkb_db::*;
use bannerkb_model::types::{BannerDraft, DictionaryKind, SearchFilter};

fn insert(conn: &rusqlite::Connection, knowledge_id: &str, image_id: &str, ctr: f64) {
    let draft = BannerDraft {
        image_id: image_id.to_string(),
        company_name: Some(format!("{image_id}商事")),
        job_title: Some("介護スタッフ".to_string()),
        employment_type: Some("full_time".to_string()),
        area: Some("tokyo".to_string()),
        impressions: 1000,
        clicks: (ctr * 10.0) as i64,
        ctr,
        main_appeals: vec!["no_experience".to_string()],
        ..BannerDraft::default()
    };
    insert_banner(conn, knowledge_id, &draft, None).unwrap();
    replace_main_appeals(conn, knowledge_id, &draft.main_appeals).unwrap();
}

#[test]
fn search_orders_by_ctr_descending() {
    let conn = open_memory().unwrap();
    insert(&conn, "BK1", "IMG001", 1.2);
    insert(&conn, "BK2", "IMG002", 4.8);
    insert(&conn, "BK3", "IMG003", 2.5);

    let hits = search_banners(&conn, &SearchFilter::default()).unwrap();
    let ids: Vec<_> = hits.iter().map(|h| h.image_id.as_str()).collect();
    assert_eq!(ids, vec!["IMG002", "IMG003", "IMG001"]);
}

#[test]
fn search_applies_limit() {
    let conn = open_memory().unwrap();
    insert(&conn, "BK1", "IMG001", 1.2);
    insert(&conn, "BK2", "IMG002", 4.8);
    insert(&conn, "BK3", "IMG003", 2.5);

    let filter = SearchFilter {
        limit: Some(2),
        ..SearchFilter::default()
    };
    let hits = search_banners(&conn, &filter).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].image_id, "IMG002");
}

#[test]
fn search_filters_combine_with_and() {
    let conn = open_memory().unwrap();
    insert(&conn, "BK1", "IMG001", 1.2);
    insert(&conn, "BK2", "IMG002", 4.8);
    conn.execute(
        "UPDATE banner_knowledge SET employment_type = 'part_time', area = 'osaka'
         WHERE knowledge_id = 'BK2'",
        [],
    )
    .unwrap();

    let filter = SearchFilter {
        employment_types: vec!["part_time".to_string()],
        areas: vec!["osaka".to_string()],
        ..SearchFilter::default()
    };
    let hits = search_banners(&conn, &filter).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].image_id, "IMG002");

    let filter = SearchFilter {
        employment_types: vec!["part_time".to_string()],
        areas: vec!["tokyo".to_string()],
        ..SearchFilter::default()
    };
    assert!(search_banners(&conn, &filter).unwrap().is_empty());
}

#[test]
fn search_matches_job_title_substring() {
    let conn = open_memory().unwrap();
    insert(&conn, "BK1", "IMG001", 1.2);

    let filter = SearchFilter {
        job_title: Some("介護".to_string()),
        ..SearchFilter::default()
    };
    assert_eq!(search_banners(&conn, &filter).unwrap().len(), 1);

    let filter = SearchFilter {
        job_title: Some("営業".to_string()),
        ..SearchFilter::default()
    };
    assert!(search_banners(&conn, &filter).unwrap().is_empty());
}

#[test]
fn search_by_appeal_membership_deduplicates() {
    let conn = open_memory().unwrap();
    insert(&conn, "BK1", "IMG001", 1.2);
    replace_main_appeals(
        &conn,
        "BK1",
        &["no_experience".to_string(), "high_income".to_string()],
    )
    .unwrap();

    // Both requested appeals match the same record; it must come back once.
    let filter = SearchFilter {
        main_appeals: vec!["no_experience".to_string(), "high_income".to_string()],
        ..SearchFilter::default()
    };
    let hits = search_banners(&conn, &filter).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].main_appeals, vec!["no_experience", "high_income"]);
}

#[test]
fn seeded_dictionaries_are_listed_in_display_order() {
    let conn = open_memory().unwrap();
    let stats = seed_dictionaries(&conn).unwrap();
    assert_eq!(stats.areas, 47);
    assert_eq!(stats.main_appeals, 15);
    assert_eq!(stats.main_colors, 8);

    let employment = list_dictionary(&conn, DictionaryKind::EmploymentTypes).unwrap();
    assert_eq!(employment.len(), 5);
    assert_eq!(employment[0].name, "正社員");
    assert_eq!(employment[0].code, "full_time");

    let colors = list_main_colors(&conn).unwrap();
    assert_eq!(colors[0].name, "青系");
    assert_eq!(colors[0].hex_color.as_deref(), Some("#2563eb"));
}

#[test]
fn seeding_twice_does_not_duplicate() {
    let conn = open_memory().unwrap();
    seed_dictionaries(&conn).unwrap();
    seed_dictionaries(&conn).unwrap();

    let areas = list_dictionary(&conn, DictionaryKind::Areas).unwrap();
    assert_eq!(areas.len(), 47);
}

#[test]
fn resolver_maps_resolve_seeded_names() {
    let conn = open_memory().unwrap();
    seed_dictionaries(&conn).unwrap();

    let maps = load_resolver_maps(&conn).unwrap();
    assert_eq!(maps.areas.resolve("東京都"), "tokyo");
    assert_eq!(maps.employment_types.resolve("アルバイト・パート"), "part_time");
    assert_eq!(maps.main_appeals.resolve("未経験歓迎"), "no_experience");
    // Unlisted labels pass through.
    assert_eq!(maps.visual_types.resolve("動画"), "動画");
}

#[test]
fn knowledge_stats_counts() {
    let conn = open_memory().unwrap();
    insert(&conn, "BK1", "IMG001", 2.0);
    insert(&conn, "BK2", "IMG002", 4.0);

    let stats = knowledge_stats(&conn).unwrap();
    assert_eq!(stats.banners, 2);
    assert_eq!(stats.main_appeal_rows, 2);
    assert!((stats.avg_ctr - 3.0).abs() < 1e-9);
}
