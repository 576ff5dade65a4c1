//! Built-in dictionary seed data.
//!
//! The six reference dictionaries are fixed vocabularies owned by the
//! analysis workflow (the same label sets the AI tagging prompt offers).
//! Seeding is idempotent: codes are upserted, so re-running after a
//! vocabulary change updates display names in place.

use rusqlite::{Connection, params};

use crate::operations::OperationError;

/// Statistics from seeding the dictionaries.
#[derive(Debug, Default)]
pub struct SeedStats {
    pub employment_types: usize,
    pub areas: usize,
    pub main_appeals: usize,
    pub visual_types: usize,
    pub main_colors: usize,
    pub atmospheres: usize,
}

/// Load all dictionary seed rows. Safe to call repeatedly.
pub fn seed_dictionaries(conn: &Connection) -> Result<SeedStats, OperationError> {
    let mut stats = SeedStats::default();

    stats.employment_types = seed_table(conn, "employment_types", EMPLOYMENT_TYPES)?;
    stats.areas = seed_table(conn, "areas", AREAS)?;
    stats.main_appeals = seed_table(conn, "main_appeals", MAIN_APPEALS)?;
    stats.visual_types = seed_table(conn, "visual_types", VISUAL_TYPES)?;
    stats.atmospheres = seed_table(conn, "atmospheres", ATMOSPHERES)?;

    for (order, (code, name, hex)) in MAIN_COLORS.iter().enumerate() {
        conn.execute(
            "INSERT INTO main_colors (code, name, hex_color, display_order)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(code) DO UPDATE SET
                 name = excluded.name,
                 hex_color = excluded.hex_color,
                 display_order = excluded.display_order",
            params![code, name, hex, order as i64 + 1],
        )?;
        stats.main_colors += 1;
    }

    Ok(stats)
}

fn seed_table(
    conn: &Connection,
    table: &str,
    entries: &[(&str, &str)],
) -> Result<usize, OperationError> {
    let sql = format!(
        "INSERT INTO {table} (code, name, display_order) VALUES (?1, ?2, ?3)
         ON CONFLICT(code) DO UPDATE SET
             name = excluded.name,
             display_order = excluded.display_order"
    );
    let mut stmt = conn.prepare(&sql)?;
    for (order, (code, name)) in entries.iter().enumerate() {
        stmt.execute(params![code, name, order as i64 + 1])?;
    }
    Ok(entries.len())
}

const EMPLOYMENT_TYPES: &[(&str, &str)] = &[
    ("full_time", "正社員"),
    ("contract", "契約社員"),
    ("temporary", "派遣社員"),
    ("part_time", "アルバイト・パート"),
    ("outsourcing", "業務委託"),
];

const VISUAL_TYPES: &[(&str, &str)] = &[
    ("person_single", "人物写真（単体）"),
    ("person_group", "人物写真（複数）"),
    ("illustration", "イラスト"),
    ("text_only", "テキストのみ"),
    ("product_scenery", "商品・風景写真"),
    ("other", "その他"),
];

const ATMOSPHERES: &[(&str, &str)] = &[
    ("bright", "明るい・元気"),
    ("professional", "真面目・信頼・プロフェッショナル"),
    ("stylish", "スタイリッシュ・先進的"),
    ("warm", "優しい・安心・温かい"),
    ("cool", "クール・かっこいい"),
    ("senior_calm", "シニア向け・落ち着いた"),
    ("impact", "インパクト重視"),
];

const MAIN_APPEALS: &[(&str, &str)] = &[
    ("no_experience", "未経験歓迎"),
    ("high_income", "高収入・高時給"),
    ("flexible_shift", "シフト自由・選べる"),
    ("side_job_ok", "Wワーク・副業OK"),
    ("remote_ok", "リモートワーク・在宅OK"),
    ("near_station", "駅チカ・通勤便利"),
    ("homemaker_welcome", "主婦・主夫歓迎"),
    ("senior_active", "シニア活躍中"),
    ("middle_active", "ミドル活躍中"),
    ("opening_staff", "オープニングスタッフ"),
    ("license_support", "資格取得支援"),
    ("weekends_off", "土日祝休み"),
    ("full_time_promotion", "正社員登用あり"),
    ("free_style", "髪色・服装自由"),
    ("short_time_ok", "短時間・短期OK"),
];

const MAIN_COLORS: &[(&str, &str, &str)] = &[
    ("blue", "青系", "#2563eb"),
    ("red_orange", "赤・オレンジ系", "#ea580c"),
    ("green", "緑系", "#16a34a"),
    ("yellow", "黄系", "#eab308"),
    ("purple", "紫系", "#9333ea"),
    ("pink", "ピンク系", "#ec4899"),
    ("mono_black", "モノクロ・黒", "#1f2937"),
    ("white_colorful", "白ベース・カラフル", "#f9fafb"),
];

const AREAS: &[(&str, &str)] = &[
    ("hokkaido", "北海道"),
    ("aomori", "青森県"),
    ("iwate", "岩手県"),
    ("miyagi", "宮城県"),
    ("akita", "秋田県"),
    ("yamagata", "山形県"),
    ("fukushima", "福島県"),
    ("ibaraki", "茨城県"),
    ("tochigi", "栃木県"),
    ("gunma", "群馬県"),
    ("saitama", "埼玉県"),
    ("chiba", "千葉県"),
    ("tokyo", "東京都"),
    ("kanagawa", "神奈川県"),
    ("niigata", "新潟県"),
    ("toyama", "富山県"),
    ("ishikawa", "石川県"),
    ("fukui", "福井県"),
    ("yamanashi", "山梨県"),
    ("nagano", "長野県"),
    ("gifu", "岐阜県"),
    ("shizuoka", "静岡県"),
    ("aichi", "愛知県"),
    ("mie", "三重県"),
    ("shiga", "滋賀県"),
    ("kyoto", "京都府"),
    ("osaka", "大阪府"),
    ("hyogo", "兵庫県"),
    ("nara", "奈良県"),
    ("wakayama", "和歌山県"),
    ("tottori", "鳥取県"),
    ("shimane", "島根県"),
    ("okayama", "岡山県"),
    ("hiroshima", "広島県"),
    ("yamaguchi", "山口県"),
    ("tokushima", "徳島県"),
    ("kagawa", "香川県"),
    ("ehime", "愛媛県"),
    ("kochi", "高知県"),
    ("fukuoka", "福岡県"),
    ("saga", "佐賀県"),
    ("nagasaki", "長崎県"),
    ("kumamoto", "熊本県"),
    ("oita", "大分県"),
    ("miyazaki", "宮崎県"),
    ("kagoshima", "鹿児島県"),
    ("okinawa", "沖縄県"),
];
