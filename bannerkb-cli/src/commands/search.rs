use std::collections::HashMap;

use clap::Args;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use bannerkb_db::Connection;

use bannerkb_import::{CsvRow, serialize_row};
use bannerkb_model::{BannerRecord, DictionaryKind, SearchFilter};

use crate::config::AppConfig;
use crate::error::CliError;

/// Common filter arguments for commands that query banners.
#[derive(Args, Clone)]
pub(crate) struct FilterArgs {
    /// Company name substring
    #[arg(short, long)]
    pub company: Option<String>,

    /// Job title substring
    #[arg(short, long)]
    pub job_title: Option<String>,

    /// Employment types, as codes or display names (e.g. full_time,正社員)
    #[arg(short, long, value_delimiter = ',')]
    pub employment: Vec<String>,

    /// Areas, as codes or display names (e.g. tokyo,大阪府)
    #[arg(short, long, value_delimiter = ',')]
    pub area: Vec<String>,

    /// Main appeals, as codes or display names
    #[arg(short = 'p', long, value_delimiter = ',')]
    pub appeal: Vec<String>,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Turn CLI filter arguments into a search filter, resolving display names
/// to dictionary codes. Unresolvable values pass through unchanged so a
/// literal code (or free text that was stored as-is) still matches.
pub(crate) fn build_filter(conn: &Connection, args: &FilterArgs) -> Result<SearchFilter, CliError> {
    let maps = bannerkb_db::load_resolver_maps(conn)?;
    let resolve = |map: &bannerkb_model::DictionaryMap, values: &[String]| -> Vec<String> {
        values.iter().map(|v| map.resolve(v)).collect()
    };
    Ok(SearchFilter {
        company_name: args.company.clone(),
        job_title: args.job_title.clone(),
        employment_types: resolve(&maps.employment_types, &args.employment),
        areas: resolve(&maps.areas, &args.area),
        main_appeals: resolve(&maps.main_appeals, &args.appeal),
        limit: args.limit,
    })
}

/// Search banners and print them, best CTR first.
pub(crate) fn run_search(
    config: &AppConfig,
    args: FilterArgs,
    json: bool,
    csv: bool,
) -> Result<(), CliError> {
    let conn = bannerkb_db::open_database(&config.db_path)?;
    let filter = build_filter(&conn, &args)?;
    let hits = bannerkb_db::search_banners(&conn, &filter)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&hits).map_err(|e| CliError::other(e.to_string()))?
        );
        return Ok(());
    }
    if csv {
        print_csv(&hits);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No banners matched.");
        return Ok(());
    }

    let names = NameMaps::load(&conn)?;
    println!("{} banners, best CTR first\n", hits.len());
    for banner in &hits {
        print_summary_line(banner, &names);
    }
    Ok(())
}

const CSV_HEADERS: &[&str] = &[
    "knowledge_id",
    "image_id",
    "company_name",
    "job_title",
    "employment_type",
    "area",
    "impressions",
    "clicks",
    "ctr",
    "visual_type",
    "main_color",
    "atmosphere",
    "main_appeals",
    "sub_appeals",
    "banner_image_url",
];

fn print_csv(hits: &[BannerRecord]) {
    println!("{}", CSV_HEADERS.join(","));
    for banner in hits {
        let mut row = CsvRow::default();
        row.insert("knowledge_id", &banner.knowledge_id);
        row.insert("image_id", &banner.image_id);
        row.insert("company_name", banner.company_name.as_deref().unwrap_or(""));
        row.insert("job_title", banner.job_title.as_deref().unwrap_or(""));
        row.insert(
            "employment_type",
            banner.employment_type.as_deref().unwrap_or(""),
        );
        row.insert("area", banner.area.as_deref().unwrap_or(""));
        row.insert("impressions", &banner.impressions.to_string());
        row.insert("clicks", &banner.clicks.to_string());
        row.insert("ctr", &format!("{:.2}", banner.ctr));
        row.insert("visual_type", banner.visual_type.as_deref().unwrap_or(""));
        row.insert("main_color", banner.main_color.as_deref().unwrap_or(""));
        row.insert("atmosphere", banner.atmosphere.as_deref().unwrap_or(""));
        row.insert("main_appeals", &banner.main_appeals.join(","));
        row.insert("sub_appeals", &banner.sub_appeals.join(","));
        row.insert(
            "banner_image_url",
            banner.banner_image_url.as_deref().unwrap_or(""),
        );
        println!("{}", serialize_row(CSV_HEADERS, &row));
    }
}

fn print_summary_line(banner: &BannerRecord, names: &NameMaps) {
    println!(
        "  {}  {}  CTR {}  {} / {}",
        banner.knowledge_id.if_supports_color(Stdout, |t| t.cyan()),
        banner.image_id,
        format!("{:.2}%", banner.ctr).if_supports_color(Stdout, |t| t.bold()),
        banner.company_name.as_deref().unwrap_or("-"),
        banner.job_title.as_deref().unwrap_or("-"),
    );
    let emp = banner
        .employment_type
        .as_deref()
        .map(|c| names.label(DictionaryKind::EmploymentTypes, c));
    let area = banner
        .area
        .as_deref()
        .map(|c| names.label(DictionaryKind::Areas, c));
    let appeals: Vec<&str> = banner
        .main_appeals
        .iter()
        .map(|c| names.label(DictionaryKind::MainAppeals, c))
        .collect();
    println!(
        "      {} | {} | {}",
        emp.unwrap_or("-"),
        area.unwrap_or("-"),
        if appeals.is_empty() {
            "-".to_string()
        } else {
            appeals.join("、")
        },
    );
}

/// Code-to-display-name lookups for rendering. Codes without a dictionary
/// entry (free text stored as-is) render unchanged.
pub(crate) struct NameMaps {
    by_kind: HashMap<&'static str, HashMap<String, String>>,
}

impl NameMaps {
    pub(crate) fn load(conn: &Connection) -> Result<Self, CliError> {
        let mut by_kind = HashMap::new();
        for kind in [
            DictionaryKind::EmploymentTypes,
            DictionaryKind::Areas,
            DictionaryKind::MainAppeals,
            DictionaryKind::VisualTypes,
            DictionaryKind::Atmospheres,
        ] {
            let items = bannerkb_db::list_dictionary(conn, kind)?;
            by_kind.insert(
                kind.table(),
                items.into_iter().map(|i| (i.code, i.name)).collect(),
            );
        }
        let colors = bannerkb_db::list_main_colors(conn)?;
        by_kind.insert(
            DictionaryKind::MainColors.table(),
            colors.into_iter().map(|c| (c.code, c.name)).collect(),
        );
        Ok(Self { by_kind })
    }

    pub(crate) fn label<'a>(&'a self, kind: DictionaryKind, code: &'a str) -> &'a str {
        self.by_kind
            .get(kind.table())
            .and_then(|m| m.get(code))
            .map_or(code, String::as_str)
    }
}
