//! Row-to-record mapping.
//!
//! Composes the tabular parser, dictionary resolver, metric normalizer, and
//! image reference normalizer into a single transformation from one parsed
//! row to one candidate record. The data sources have renamed columns over
//! time, so each logical field reads from a list of header synonyms; the
//! first listed synonym with a non-empty cell wins.

use bannerkb_model::dict::{ResolverMaps, split_list};
use bannerkb_model::types::BannerDraft;

use crate::csv::CsvRow;
use crate::image_url::normalize_image_url;
use crate::metrics::{parse_count, parse_ctr};

/// The mandatory business-key column (reference number).
pub const HEADER_IMAGE_ID: &str = "参照番号";

const HEADER_COMPANY: &[&str] = &["企業名"];
const HEADER_JOB_TITLE: &[&str] = &["求人", "職種名"];
const HEADER_AREA: &[&str] = &["都道府県", "エリア"];
const HEADER_IMPRESSIONS: &[&str] = &["表示回数"];
const HEADER_CLICKS: &[&str] = &["クリック数"];
const HEADER_CTR: &[&str] = &["クリック率（CTR）", "CTR"];
const HEADER_EMPLOYMENT: &[&str] = &["雇用形態"];
const HEADER_IMAGE_URL: &[&str] = &["画像のURL", "画像URL", "バナー画像URL"];
const HEADER_VISUAL_TYPE: &[&str] = &["人ありなし", "人あり無し", "ビジュアル種別"];
const HEADER_MAIN_APPEAL: &[&str] = &["メイン訴求", "main_appeal"];
const HEADER_SUB_APPEAL: &[&str] = &["サブ訴求", "sub_appeal"];
const HEADER_MAIN_COLOR: &[&str] = &["色味", "メインカラー"];
const HEADER_ATMOSPHERE: &[&str] = &["雰囲気"];
const HEADER_NOTES: &[&str] = &["備考", "メモ"];

/// Map one parsed row to a candidate record.
///
/// Returns `None` when the reference-number cell is absent or empty; such
/// rows are excluded from the batch entirely and never counted as failures.
/// Optional fields stay `None` for empty cells so the reconciler can
/// preserve previously stored values.
pub fn map_row(row: &CsvRow, maps: &ResolverMaps) -> Option<BannerDraft> {
    let image_id = row.get_non_empty(HEADER_IMAGE_ID)?.to_string();

    let impressions = parse_count(field(row, HEADER_IMPRESSIONS));
    let clicks = parse_count(field(row, HEADER_CLICKS));
    let ctr = parse_ctr(field(row, HEADER_CTR), impressions, clicks);

    let main_appeals = field(row, HEADER_MAIN_APPEAL)
        .map(|v| maps.main_appeals.resolve_list(v))
        .unwrap_or_default();
    let sub_appeals = field(row, HEADER_SUB_APPEAL)
        .map(split_list)
        .unwrap_or_default();

    Some(BannerDraft {
        image_id,
        company_name: field(row, HEADER_COMPANY).map(str::to_string),
        job_title: field(row, HEADER_JOB_TITLE).map(str::to_string),
        employment_type: field(row, HEADER_EMPLOYMENT).map(|v| maps.employment_types.resolve(v)),
        area: field(row, HEADER_AREA).map(|v| maps.areas.resolve(v)),
        impressions,
        clicks,
        ctr,
        visual_type: field(row, HEADER_VISUAL_TYPE).map(|v| maps.visual_types.resolve(v)),
        main_color: field(row, HEADER_MAIN_COLOR).map(str::to_string),
        atmosphere: field(row, HEADER_ATMOSPHERE).map(str::to_string),
        extracted_text: None,
        notes: field(row, HEADER_NOTES).map(str::to_string),
        banner_image_url: field(row, HEADER_IMAGE_URL).map(normalize_image_url),
        main_appeals,
        sub_appeals,
    })
}

/// Map a whole batch, silently filtering rows without a reference number.
pub fn map_rows(rows: &[CsvRow], maps: &ResolverMaps) -> Vec<BannerDraft> {
    rows.iter().filter_map(|row| map_row(row, maps)).collect()
}

/// First non-empty cell among a field's header synonyms.
fn field<'a>(row: &'a CsvRow, synonyms: &[&str]) -> Option<&'a str> {
    synonyms.iter().find_map(|h| row.get_non_empty(h))
}
