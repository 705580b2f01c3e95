// Study guide generator
//
// Builds the document plan from the catalog and writes the PDF (and the
// Markdown export when GUIDE_MARKDOWN_OUTPUT or markdown_output is set).
// Usage: cargo run --bin generate_study_guide
// Exits non-zero when the output cannot be written.

use anyhow::Context;
use neoderm_guide::{
    Catalog, DirImageLoader, DocumentConfig, MarkdownFormatter, PdfRenderer, RenderPlanBuilder,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neoderm_guide=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DocumentConfig::load().context("loading document configuration")?;
    let catalog = Catalog::neonatal()?;
    let loader = DirImageLoader::new(&config.image_dir);

    let start = std::time::Instant::now();
    let plan = RenderPlanBuilder::new(&catalog, &config, &loader).build()?;

    PdfRenderer::write_to_path(&plan, &config, &config.output_path)?;
    tracing::info!("PDF created: {}", config.output_path.display());

    if let Some(path) = &config.markdown_output {
        let image_base = config.image_dir.to_string_lossy().into_owned();
        MarkdownFormatter::new(image_base).write_to_path(&plan, path)?;
        tracing::info!("Markdown created: {}", path.display());
    }

    tracing::info!(
        "Generated guide with {} conditions in {:?}",
        plan.condition_ids().len(),
        start.elapsed()
    );
    Ok(())
}
