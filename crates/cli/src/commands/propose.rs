use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use deckhand_core::builder::{HeaderImage, ProposalSlideBuilder};
use deckhand_core::config::{AppConfig, LoadOptions};
use deckhand_core::deck::Deck;
use deckhand_core::domain::history::{NewProposalRecord, PACKAGE_SINGLE};
use deckhand_core::domain::proposal::{PricedOption, PricingOption, ProposalRequest};
use deckhand_core::errors::{AppError, BuildError};
use deckhand_core::{Location, LocationRegistry};
use deckhand_db::{
    connect_with_settings, migrations, ProposalLogRepository, SqlProposalLogRepository,
};
use deckhand_render::{DeckRenderer, PdfConverter, RenderedDoc};
use deckhand_slack::{proposal_failed_message, MessageTemplate, ProposalCard};

use crate::commands::CommandResult;

#[derive(Args, Debug)]
pub struct ProposeArgs {
    /// Location name or alias, e.g. `gateway` or `"The Landmark"`.
    #[arg(long)]
    pub location: String,
    /// Campaign start date, `YYYY-MM-DD`.
    #[arg(long, value_name = "DATE")]
    pub start_date: NaiveDate,
    /// Run length in weeks; repeat once per option.
    #[arg(long = "duration", value_name = "WEEKS", required = true)]
    pub durations: Vec<u32>,
    /// Net rate in AED for the matching `--duration`; repeat once per option.
    #[arg(long = "net-rate", value_name = "AED", required = true)]
    pub net_rates: Vec<Decimal>,
    /// Client the proposal is addressed to.
    #[arg(long)]
    pub client: String,
    /// Who asked for the proposal, recorded in the log.
    #[arg(long)]
    pub submitted_by: Option<String>,
    /// Also convert the rendered deck to PDF via wkhtmltopdf.
    #[arg(long)]
    pub pdf: bool,
    /// Where artifacts land; defaults to `render.output_dir` from config.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

pub fn run(args: ProposeArgs, options: LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "propose",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "propose",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let correlation_id = Uuid::new_v4().to_string();
    let result = runtime.block_on(execute(&args, &config, &correlation_id));

    match result {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err(error) => {
            let (error_class, exit_code) = classify(&error);
            let message = error.to_string();
            let interface = error.into_interface(correlation_id.clone());
            CommandResult::failure_with_slack(
                "propose",
                error_class,
                format!("{message} (correlation_id: {correlation_id})"),
                exit_code,
                proposal_failed_message(&interface.user_message(), &correlation_id),
            )
        }
    }
}

async fn execute(
    args: &ProposeArgs,
    config: &AppConfig,
    correlation_id: &str,
) -> Result<String, AppError> {
    let location = args.location.parse::<Location>()?;
    let pricing = PricingOption::from_parallel_lists(&args.durations, &args.net_rates)?;
    let mut request =
        ProposalRequest::new(location, args.start_date, pricing, args.client.as_str());
    if let Some(who) = &args.submitted_by {
        request = request.submitted_by(who.as_str());
    }

    let registry = LocationRegistry::open(config.library.root.as_str())
        .map_err(|error| AppError::Registry(error.to_string()))?;
    let source = registry
        .resolve(location)
        .ok_or_else(|| AppError::Registry(format!("no library entry for {location}")))?
        .clone();

    let deck_bytes = tokio::fs::read(&source.deck_path).await.map_err(|error| {
        AppError::Registry(format!(
            "could not read deck template {}: {error}",
            source.deck_path.display()
        ))
    })?;
    let mut deck = Deck::from_json_slice(&deck_bytes)?;

    let builder = ProposalSlideBuilder::new(
        HeaderImage::new(config.library.header_image.as_str(), config.library.header_image_aspect),
        Utc::now().date_naive(),
    );
    let built = builder.build(&request, &source.profile, &mut deck)?;

    info!(
        event_name = "proposal.slide_built",
        correlation_id,
        location = location.slug(),
        slide_index = built.slide_index,
        option_count = built.options.len(),
        "proposal slide inserted"
    );

    let out_dir = args.out_dir.clone().unwrap_or_else(|| PathBuf::from(&config.render.output_dir));
    tokio::fs::create_dir_all(&out_dir).await.map_err(|error| {
        AppError::Render(format!(
            "could not create output directory {}: {error}",
            out_dir.display()
        ))
    })?;

    let stem = artifact_stem(location);
    let deck_path = out_dir.join(format!("{stem}.deck.json"));
    let deck_json = deck
        .to_json_vec()
        .map_err(|error| AppError::Render(format!("could not serialize deck: {error}")))?;
    tokio::fs::write(&deck_path, deck_json).await.map_err(|error| {
        AppError::Render(format!("could not write {}: {error}", deck_path.display()))
    })?;

    let renderer = DeckRenderer::new().map_err(|error| AppError::Render(error.to_string()))?;
    let title = format!("Financial Proposal: {}", source.profile.display_name);
    let html =
        renderer.render_html(&deck, &title).map_err(|error| AppError::Render(error.to_string()))?;
    let html_path = out_dir.join(format!("{stem}.html"));
    tokio::fs::write(&html_path, &html).await.map_err(|error| {
        AppError::Render(format!("could not write {}: {error}", html_path.display()))
    })?;

    let pdf_path = if args.pdf {
        let converter = PdfConverter::discover(config.render.convert_timeout_secs);
        let doc = converter
            .convert(&html)
            .await
            .map_err(|error| AppError::Render(error.to_string()))?;
        match doc {
            RenderedDoc::Pdf(bytes) => {
                let path = out_dir.join(format!("{stem}.pdf"));
                tokio::fs::write(&path, bytes).await.map_err(|error| {
                    AppError::Render(format!("could not write {}: {error}", path.display()))
                })?;
                Some(path)
            }
            // Converter fell back; the HTML artifact already covers it.
            RenderedDoc::Html(_) => None,
        }
    } else {
        None
    };

    let pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(|error| AppError::Persistence(format!("failed to connect to database: {error}")))?;
    migrations::run_pending(&pool)
        .await
        .map_err(|error| AppError::Persistence(error.to_string()))?;

    // The headline figure is the first option's total.
    let total_amount = built.options[0].total;
    let repository = SqlProposalLogRepository::new(pool.clone());
    let record = repository
        .record(NewProposalRecord {
            submitted_by: request.submitted_by.clone(),
            client_name: request.client_name.clone(),
            location,
            package_type: PACKAGE_SINGLE.to_string(),
            options: built.options.clone(),
            total_amount,
            correlation_id: Some(correlation_id.to_string()),
        })
        .await
        .map_err(|error| AppError::Persistence(error.to_string()))?;
    pool.close().await;

    info!(
        event_name = "proposal.logged",
        correlation_id,
        log_id = record.id,
        "proposal recorded"
    );

    let mut card = ProposalCard::new(
        request.client_name.as_str(),
        source.profile.display_name.as_str(),
        request.start_date,
        built.valid_until,
        built.options.clone(),
    )
    .deck_path(deck_path.display().to_string())
    .correlation_id(correlation_id);
    if let Some(path) = &pdf_path {
        card = card.pdf_path(path.display().to_string());
    }
    let slack = card.render();

    #[derive(Serialize)]
    struct Artifacts {
        deck: String,
        html: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pdf: Option<String>,
    }

    #[derive(Serialize)]
    struct ProposeOutput<'a> {
        command: &'static str,
        correlation_id: &'a str,
        location: &'static str,
        client: &'a str,
        slide_index: usize,
        valid_until: String,
        options: &'a [PricedOption],
        total_amount: Decimal,
        artifacts: Artifacts,
        log_id: i64,
        slack: MessageTemplate,
    }

    let payload = ProposeOutput {
        command: "propose",
        correlation_id,
        location: location.display_name(),
        client: &request.client_name,
        slide_index: built.slide_index,
        valid_until: built.valid_until.to_string(),
        options: &built.options,
        total_amount,
        artifacts: Artifacts {
            deck: deck_path.display().to_string(),
            html: html_path.display().to_string(),
            pdf: pdf_path.as_ref().map(|path| path.display().to_string()),
        },
        log_id: record.id,
        slack,
    };

    Ok(serde_json::to_string_pretty(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"propose\",\"status\":\"error\",\"error\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    }))
}

fn classify(error: &AppError) -> (&'static str, u8) {
    match error {
        AppError::Build(BuildError::Validation(_)) => ("validation", 2),
        AppError::Build(BuildError::Presentation(_)) => ("presentation", 2),
        AppError::Registry(_) => ("library", 4),
        AppError::Persistence(_) => ("persistence", 4),
        AppError::Render(_) => ("render", 6),
        AppError::Configuration(_) => ("config_validation", 2),
    }
}

/// `Gateway_Proposal`, `Triple_Crown_Proposal`: title-cased slug segments.
fn artifact_stem(location: Location) -> String {
    let titled = location
        .slug()
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("_");
    format!("{titled}_Proposal")
}

#[cfg(test)]
mod tests {
    use deckhand_core::errors::{AppError, PresentationError, ValidationError};
    use deckhand_core::Location;

    use super::{artifact_stem, classify};

    #[test]
    fn artifact_names_follow_the_titled_slug() {
        assert_eq!(artifact_stem(Location::Gateway), "Gateway_Proposal");
        assert_eq!(artifact_stem(Location::TripleCrown), "Triple_Crown_Proposal");
    }

    #[test]
    fn error_classes_follow_the_exit_ladder() {
        assert_eq!(classify(&AppError::from(ValidationError::EmptyOptions)), ("validation", 2));
        assert_eq!(classify(&AppError::from(PresentationError::NoSlides)), ("presentation", 2));
        assert_eq!(classify(&AppError::Registry("gone".into())), ("library", 4));
        assert_eq!(classify(&AppError::Persistence("locked".into())), ("persistence", 4));
        assert_eq!(classify(&AppError::Render("no template".into())), ("render", 6));
    }
}
