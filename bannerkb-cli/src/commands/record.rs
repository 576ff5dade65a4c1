//! Single-record commands: show, register, delete, set-image-url.

use std::path::{Path, PathBuf};

use clap::Args;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bannerkb_db::Connection;
use bannerkb_import::{generate_knowledge_id, parse_ctr};
use bannerkb_model::{BannerDraft, BannerRecord, DictionaryKind};

use crate::commands::search::NameMaps;
use crate::config::AppConfig;
use crate::error::CliError;

/// Look a record up by knowledge ID first, then by reference number.
pub(crate) fn find_record(conn: &Connection, id: &str) -> Result<BannerRecord, CliError> {
    if let Some(record) = bannerkb_db::find_by_knowledge_id(conn, id)? {
        return Ok(record);
    }
    bannerkb_db::find_by_image_id(conn, id)?
        .ok_or_else(|| CliError::other(format!("no banner found for '{id}'")))
}

pub(crate) fn run_show(config: &AppConfig, id: String) -> Result<(), CliError> {
    let conn = bannerkb_db::open_database(&config.db_path)?;
    let banner = find_record(&conn, &id)?;
    let names = NameMaps::load(&conn)?;

    println!(
        "{}  ({})",
        banner.knowledge_id.if_supports_color(Stdout, |t| t.cyan()),
        banner.image_id,
    );
    print_field("company", banner.company_name.as_deref());
    print_field("job title", banner.job_title.as_deref());
    print_field(
        "employment",
        banner
            .employment_type
            .as_deref()
            .map(|c| names.label(DictionaryKind::EmploymentTypes, c)),
    );
    print_field(
        "area",
        banner
            .area
            .as_deref()
            .map(|c| names.label(DictionaryKind::Areas, c)),
    );
    println!(
        "  {:<14} {} impressions, {} clicks, CTR {:.2}%",
        "performance:", banner.impressions, banner.clicks, banner.ctr,
    );
    print_field(
        "visual type",
        banner
            .visual_type
            .as_deref()
            .map(|c| names.label(DictionaryKind::VisualTypes, c)),
    );
    print_field(
        "main color",
        banner
            .main_color
            .as_deref()
            .map(|c| names.label(DictionaryKind::MainColors, c)),
    );
    print_field(
        "atmosphere",
        banner
            .atmosphere
            .as_deref()
            .map(|c| names.label(DictionaryKind::Atmospheres, c)),
    );
    let appeals = banner
        .main_appeals
        .iter()
        .map(|c| names.label(DictionaryKind::MainAppeals, c))
        .collect::<Vec<_>>()
        .join("、");
    print_field(
        "main appeals",
        Some(appeals.as_str()).filter(|s| !s.is_empty()),
    );
    let subs = banner.sub_appeals.join("、");
    print_field("sub appeals", Some(subs.as_str()).filter(|s| !s.is_empty()));
    print_field("extracted text", banner.extracted_text.as_deref());
    print_field("notes", banner.notes.as_deref());
    print_field("image key", banner.banner_image_key.as_deref());
    print_field("image url", banner.banner_image_url.as_deref());
    println!("  {:<14} {}", "created:", banner.created_at);
    println!("  {:<14} {}", "updated:", banner.updated_at);
    Ok(())
}

fn print_field(label: &str, value: Option<&str>) {
    println!("  {:<14} {}", format!("{label}:"), value.unwrap_or("-"));
}

/// Arguments for registering a banner by hand.
#[derive(Args)]
pub(crate) struct RegisterArgs {
    /// Reference number (the business key)
    pub image_id: String,

    /// Banner image file, copied into the media directory
    #[arg(long)]
    pub image: PathBuf,

    #[arg(short, long)]
    pub company: Option<String>,

    #[arg(short, long)]
    pub job_title: Option<String>,

    /// Employment type, as code or display name
    #[arg(short, long)]
    pub employment: Option<String>,

    /// Area, as code or display name
    #[arg(short, long)]
    pub area: Option<String>,

    #[arg(long, default_value_t = 0)]
    pub impressions: i64,

    #[arg(long, default_value_t = 0)]
    pub clicks: i64,

    /// CTR in percent; computed from counts when omitted
    #[arg(long)]
    pub ctr: Option<String>,

    #[arg(long)]
    pub visual_type: Option<String>,

    #[arg(long)]
    pub main_color: Option<String>,

    #[arg(long)]
    pub atmosphere: Option<String>,

    /// Main appeals, comma separated codes or display names
    #[arg(short = 'p', long, value_delimiter = ',')]
    pub appeal: Vec<String>,

    /// Sub appeals (free text), comma separated
    #[arg(long, value_delimiter = ',')]
    pub sub_appeal: Vec<String>,

    /// Text visible in the image
    #[arg(long)]
    pub text: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

/// Register a banner manually. Unlike imports, the image file is mandatory:
/// it is copied into the media directory and linked before the command
/// reports success.
pub(crate) fn run_register(config: &AppConfig, args: RegisterArgs) -> Result<(), CliError> {
    if !args.image.is_file() {
        return Err(CliError::other(format!(
            "image file not found: {}",
            args.image.display()
        )));
    }

    let conn = bannerkb_db::open_database(&config.db_path)?;
    if bannerkb_db::find_by_image_id(&conn, &args.image_id)?.is_some() {
        return Err(CliError::other(format!(
            "a banner with reference number '{}' already exists",
            args.image_id
        )));
    }

    let maps = bannerkb_db::load_resolver_maps(&conn)?;
    let ctr = parse_ctr(args.ctr.as_deref(), args.impressions, args.clicks);
    let draft = BannerDraft {
        image_id: args.image_id.clone(),
        company_name: args.company,
        job_title: args.job_title,
        employment_type: args.employment.map(|v| maps.employment_types.resolve(&v)),
        area: args.area.map(|v| maps.areas.resolve(&v)),
        impressions: args.impressions,
        clicks: args.clicks,
        ctr,
        visual_type: args.visual_type.map(|v| maps.visual_types.resolve(&v)),
        main_color: args.main_color,
        atmosphere: args.atmosphere,
        extracted_text: args.text,
        notes: args.notes,
        banner_image_url: None,
        main_appeals: args
            .appeal
            .iter()
            .map(|v| maps.main_appeals.resolve(v))
            .collect(),
        sub_appeals: args.sub_appeal,
    };

    let knowledge_id = generate_knowledge_id(&draft.image_id);
    let (key, stored_path) = copy_into_media(&config.media_dir, &knowledge_id, &args.image)?;

    bannerkb_db::insert_banner(&conn, &knowledge_id, &draft, Some(&key))?;
    bannerkb_db::replace_main_appeals(&conn, &knowledge_id, &draft.main_appeals)?;
    bannerkb_db::replace_sub_appeals(&conn, &knowledge_id, &draft.sub_appeals)?;
    bannerkb_db::update_image_url(&conn, &knowledge_id, Some(&key), &stored_path)?;

    println!(
        "{} {} ({})",
        "Registered".if_supports_color(Stdout, |t| t.green()),
        knowledge_id,
        draft.image_id,
    );
    println!("  image: {stored_path}");
    Ok(())
}

/// Copy an image into the media directory under the record's knowledge ID,
/// keeping the source extension. Returns the storage key and the stored path.
pub(crate) fn copy_into_media(
    media_dir: &Path,
    knowledge_id: &str,
    source: &Path,
) -> Result<(String, String), CliError> {
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    let key = format!("banners/{knowledge_id}.{ext}");
    let target = media_dir.join("banners").join(format!("{knowledge_id}.{ext}"));
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(source, &target)?;
    Ok((key, target.display().to_string()))
}

pub(crate) fn run_delete(config: &AppConfig, id: String, yes: bool) -> Result<(), CliError> {
    let conn = bannerkb_db::open_database(&config.db_path)?;
    let banner = find_record(&conn, &id)?;

    if !yes {
        use std::io::Write;
        print!(
            "Delete {} ({})? [y/N] ",
            banner.knowledge_id, banner.image_id
        );
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    bannerkb_db::delete_banner(&conn, &banner.knowledge_id)?;
    println!(
        "{} {}",
        "Deleted".if_supports_color(Stdout, |t| t.green()),
        banner.knowledge_id,
    );
    Ok(())
}

pub(crate) fn run_set_image_url(config: &AppConfig, id: String, url: String) -> Result<(), CliError> {
    let conn = bannerkb_db::open_database(&config.db_path)?;
    let banner = find_record(&conn, &id)?;
    let normalized = bannerkb_import::normalize_image_url(&url);
    bannerkb_db::update_image_url(
        &conn,
        &banner.knowledge_id,
        banner.banner_image_key.as_deref(),
        &normalized,
    )?;
    println!("{} -> {}", banner.knowledge_id, normalized);
    Ok(())
}
