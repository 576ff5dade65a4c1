//! AI tag suggestion for a single banner.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bannerkb_model::{BannerDraft, BannerRecord, DictionaryMap};

use crate::commands::record::find_record;
use crate::config::AppConfig;
use crate::error::CliError;

/// Ask the model for classification tags and either print them or, with
/// `--apply`, resolve them to dictionary codes and store them.
pub(crate) fn run_tags(config: &AppConfig, id: String, apply: bool) -> Result<(), CliError> {
    let conn = bannerkb_db::open_database(&config.db_path)?;
    let banner = find_record(&conn, &id)?;
    let image_url = banner.banner_image_url.as_deref().ok_or_else(|| {
        CliError::other(format!(
            "{} has no image URL; set one before tagging",
            banner.knowledge_id
        ))
    })?;

    let client = bannerkb_ai::AiClient::new(config.require_ai()?)?;
    println!("Analyzing image for {}...", banner.knowledge_id);
    let tags = client.suggest_tags(image_url, banner.extracted_text.as_deref())?;

    println!();
    println!("  visual type: {}", tags.visual_type.as_deref().unwrap_or("-"));
    println!("  main color:  {}", tags.main_color.as_deref().unwrap_or("-"));
    println!("  atmosphere:  {}", tags.atmosphere.as_deref().unwrap_or("-"));
    println!(
        "  appeals:     {}",
        if tags.main_appeal.is_empty() {
            "-".to_string()
        } else {
            tags.main_appeal.join("、")
        },
    );

    if !apply {
        println!();
        println!("Re-run with --apply to store these tags.");
        return Ok(());
    }

    // The model answers with display names; store codes where a dictionary
    // entry exists and the literal answer otherwise.
    let maps = bannerkb_db::load_resolver_maps(&conn)?;
    let colors = DictionaryMap::from_colors(&bannerkb_db::list_main_colors(&conn)?);
    let atmospheres = DictionaryMap::from_items(&bannerkb_db::list_dictionary(
        &conn,
        bannerkb_model::DictionaryKind::Atmospheres,
    )?);

    let mut draft = draft_from(&banner);
    if let Some(v) = &tags.visual_type {
        draft.visual_type = Some(maps.visual_types.resolve(v));
    }
    if let Some(v) = &tags.main_color {
        draft.main_color = Some(colors.resolve(v));
    }
    if let Some(v) = &tags.atmosphere {
        draft.atmosphere = Some(atmospheres.resolve(v));
    }
    if !tags.main_appeal.is_empty() {
        draft.main_appeals = tags
            .main_appeal
            .iter()
            .map(|v| maps.main_appeals.resolve(v))
            .collect();
    }

    bannerkb_db::update_banner(&conn, &banner, &draft)?;
    bannerkb_db::replace_main_appeals(&conn, &banner.knowledge_id, &draft.main_appeals)?;

    println!();
    println!(
        "{} tags stored on {}",
        "Applied:".if_supports_color(Stdout, |t| t.green()),
        banner.knowledge_id,
    );
    Ok(())
}

fn draft_from(banner: &BannerRecord) -> BannerDraft {
    BannerDraft {
        image_id: banner.image_id.clone(),
        company_name: banner.company_name.clone(),
        job_title: banner.job_title.clone(),
        employment_type: banner.employment_type.clone(),
        area: banner.area.clone(),
        impressions: banner.impressions,
        clicks: banner.clicks,
        ctr: banner.ctr,
        visual_type: banner.visual_type.clone(),
        main_color: banner.main_color.clone(),
        atmosphere: banner.atmosphere.clone(),
        extracted_text: banner.extracted_text.clone(),
        notes: banner.notes.clone(),
        banner_image_url: banner.banner_image_url.clone(),
        main_appeals: banner.main_appeals.clone(),
        sub_appeals: banner.sub_appeals.clone(),
    }
}
