use bannerkb_import::csv::parse_csv;
use bannerkb_import::mapper::{map_row, map_rows};
use bannerkb_model::dict::{DictionaryMap, ResolverMaps};

fn resolver_maps() -> ResolverMaps {
    let mut areas = DictionaryMap::new();
    areas.insert("東京都", "tokyo");
    areas.insert("大阪府", "osaka");

    let mut appeals = DictionaryMap::new();
    appeals.insert("未経験歓迎", "no_experience");
    appeals.insert("高収入・高時給", "high_income");

    let mut employment = DictionaryMap::new();
    employment.insert("正社員", "full_time");
    employment.insert("アルバイト・パート", "part_time");

    let mut visual = DictionaryMap::new();
    visual.insert("人物写真（単体）", "person_single");

    ResolverMaps {
        employment_types: employment,
        areas,
        main_appeals: appeals,
        visual_types: visual,
    }
}

#[test]
fn maps_a_full_row() {
    let csv = "参照番号,企業名,求人,都道府県,表示回数,クリック数,クリック率（CTR）,雇用形態,画像のURL,人ありなし,メイン訴求,サブ訴求,色味,雰囲気,備考\n\
               IMG001,株式会社テスト,介護スタッフ,東京都,\"12,000\",300,2.5%,正社員,https://example.com/banner.png,人物写真（単体）,\"未経験歓迎, 高収入・高時給\",駅チカ,青系,明るい・元気,初回入稿分";
    let rows = parse_csv(csv).unwrap();
    let draft = map_row(&rows[0], &resolver_maps()).unwrap();

    assert_eq!(draft.image_id, "IMG001");
    assert_eq!(draft.company_name.as_deref(), Some("株式会社テスト"));
    assert_eq!(draft.job_title.as_deref(), Some("介護スタッフ"));
    assert_eq!(draft.area.as_deref(), Some("tokyo"));
    assert_eq!(draft.impressions, 12000);
    assert_eq!(draft.clicks, 300);
    assert_eq!(draft.ctr, 2.5);
    assert_eq!(draft.employment_type.as_deref(), Some("full_time"));
    assert_eq!(draft.visual_type.as_deref(), Some("person_single"));
    assert_eq!(draft.main_appeals, vec!["no_experience", "high_income"]);
    assert_eq!(draft.sub_appeals, vec!["駅チカ"]);
    assert_eq!(draft.main_color.as_deref(), Some("青系"));
    assert_eq!(draft.atmosphere.as_deref(), Some("明るい・元気"));
    assert_eq!(draft.notes.as_deref(), Some("初回入稿分"));
    assert_eq!(
        draft.banner_image_url.as_deref(),
        Some("https://example.com/banner.png")
    );
}

#[test]
fn rows_without_reference_number_are_filtered() {
    let csv = "参照番号,企業名\nIMG001,A社\n,B社\nIMG003,C社";
    let rows = parse_csv(csv).unwrap();
    let drafts = map_rows(&rows, &resolver_maps());

    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].image_id, "IMG001");
    assert_eq!(drafts[1].image_id, "IMG003");
}

#[test]
fn header_synonyms_resolve_with_first_listed_priority() {
    // Older exports used 職種名 and 画像URL.
    let csv = "参照番号,職種名,画像URL\nIMG001,営業,https://example.com/a.png";
    let rows = parse_csv(csv).unwrap();
    let draft = map_row(&rows[0], &resolver_maps()).unwrap();
    assert_eq!(draft.job_title.as_deref(), Some("営業"));
    assert_eq!(
        draft.banner_image_url.as_deref(),
        Some("https://example.com/a.png")
    );

    // Both present: the first-listed synonym wins.
    let csv = "参照番号,求人,職種名\nIMG002,介護,営業";
    let rows = parse_csv(csv).unwrap();
    let draft = map_row(&rows[0], &resolver_maps()).unwrap();
    assert_eq!(draft.job_title.as_deref(), Some("介護"));
}

#[test]
fn empty_cells_map_to_absent_fields() {
    let csv = "参照番号,企業名,備考,画像のURL\nIMG001,,,";
    let rows = parse_csv(csv).unwrap();
    let draft = map_row(&rows[0], &resolver_maps()).unwrap();

    assert_eq!(draft.company_name, None);
    assert_eq!(draft.notes, None);
    assert_eq!(draft.banner_image_url, None);
    assert_eq!(draft.impressions, 0);
    assert_eq!(draft.ctr, 0.0);
}

#[test]
fn ctr_falls_back_to_computation_when_blank() {
    let csv = "参照番号,表示回数,クリック数,CTR\nIMG001,\"1,000\",25,";
    let rows = parse_csv(csv).unwrap();
    let draft = map_row(&rows[0], &resolver_maps()).unwrap();
    assert_eq!(draft.ctr, 2.5);
}

#[test]
fn unresolved_labels_survive_as_free_text() {
    let csv = "参照番号,エリア,メイン訴求\nIMG001,リモート,\"未経験歓迎,社宅あり\"";
    let rows = parse_csv(csv).unwrap();
    let draft = map_row(&rows[0], &resolver_maps()).unwrap();

    assert_eq!(draft.area.as_deref(), Some("リモート"));
    assert_eq!(draft.main_appeals, vec!["no_experience", "社宅あり"]);
}

#[test]
fn drive_share_links_are_rewritten_during_mapping() {
    let csv = "参照番号,バナー画像URL\nIMG001,https://drive.google.com/file/d/ABC123/view?usp=sharing";
    let rows = parse_csv(csv).unwrap();
    let draft = map_row(&rows[0], &resolver_maps()).unwrap();
    assert_eq!(
        draft.banner_image_url.as_deref(),
        Some("https://drive.google.com/uc?export=view&id=ABC123")
    );
}
