use crate::backend::Backend;
use crate::catalog::ProductCatalog;
use crate::config::BridgeConfig;
use crate::job::JobTicket;
use crate::runner::{CommandRunner, CommandSpec, SystemRunner};
use crate::tray::TrayRecommender;
use crate::types::{Capabilities, PaperProduct, Platform, PrintOutcome, PrintSettings, Printer};
use crate::Result;
use print_geometry::{CropSpec, Offset, apply_margins};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Entry point for the UI layer: discovery, tray recommendation and job
/// submission over one platform backend.
///
/// Discovery never fails from the caller's point of view. OS errors are
/// logged and reported as empty results so the UI can degrade gracefully.
pub struct PrintBridge<R: CommandRunner = SystemRunner> {
    backend: Backend,
    runner: R,
    catalog: Arc<ProductCatalog>,
    trays: TrayRecommender,
    temp_dir: Option<PathBuf>,
}

impl PrintBridge<SystemRunner> {
    /// Bridge for the current platform running real OS commands
    pub fn from_config(config: &BridgeConfig, catalog: ProductCatalog) -> Self {
        let runner = SystemRunner::new(config.command_timeout());
        Self::new(Backend::detect(config), runner, catalog, config)
    }
}

impl<R: CommandRunner> PrintBridge<R> {
    pub fn new(
        backend: Backend,
        runner: R,
        catalog: impl Into<Arc<ProductCatalog>>,
        config: &BridgeConfig,
    ) -> Self {
        let catalog = catalog.into();
        let trays = TrayRecommender::new(
            catalog
                .tray_mapping()
                .iter()
                .map(|(size, tray)| (size.as_str(), tray.as_str())),
        );
        Self {
            backend,
            runner,
            catalog,
            trays,
            temp_dir: config.temp_dir.clone(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.backend.platform()
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Available printers; empty when the OS query fails
    pub async fn list_printers(&self) -> Vec<Printer> {
        match self.backend.list_printers(&self.runner).await {
            Ok(printers) => {
                log::debug!("Found {} available printer(s)", printers.len());
                printers
            }
            Err(e) => {
                log::warn!("Printer discovery failed: {}", e);
                Vec::new()
            }
        }
    }

    /// The system default printer, if one is configured and the query works
    pub async fn default_printer(&self) -> Option<String> {
        match self.backend.default_printer(&self.runner).await {
            Ok(printer) => printer,
            Err(e) => {
                log::warn!("Default printer lookup failed: {}", e);
                None
            }
        }
    }

    /// Capabilities of `printer`; the empty descriptor when the query fails
    pub async fn capabilities(&self, printer: &str) -> Capabilities {
        match self.backend.capabilities(&self.runner, printer).await {
            Ok(caps) => caps,
            Err(e) => {
                log::warn!("Capability query for {} failed: {}", printer, e);
                Capabilities::default()
            }
        }
    }

    pub fn recommend_tray(&self, width_mm: f32, height_mm: f32) -> Option<String> {
        self.trays.recommend(width_mm, height_mm)
    }

    /// Merge the referenced product into `settings`. An unknown product key
    /// is logged and treated as no product.
    pub fn resolve(&self, settings: PrintSettings) -> (PrintSettings, Option<PaperProduct>) {
        let Some(key) = settings.product_key() else {
            return (settings, None);
        };
        match self.catalog.product(key) {
            Some(product) => {
                let product = product.clone();
                (settings.with_product_defaults(&product), Some(product))
            }
            None => {
                log::warn!("Unknown paper product '{}', printing without one", key);
                (settings, None)
            }
        }
    }

    /// The command that would print `document` with `settings`, without
    /// touching the document or running anything
    pub fn plan(&self, document: &Path, settings: PrintSettings) -> CommandSpec {
        let (settings, _) = self.resolve(settings);
        self.backend
            .submit_command(document, &JobTicket::from_settings(&settings))
    }

    /// Crop, submit, clean up.
    ///
    /// Geometry errors abort before anything is sent to the printer. The
    /// temporary document is removed whether or not submission succeeds; a
    /// failed removal is only logged.
    pub async fn submit(&self, document: &Path, settings: PrintSettings) -> Result<()> {
        let (settings, product) = self.resolve(settings);
        let crop = crop_spec(&settings, product.as_ref());

        let transformed = apply_margins(document, &crop, self.temp_dir.as_deref()).await?;

        let ticket = JobTicket::from_settings(&settings);
        let command = self.backend.submit_command(transformed.path(), &ticket);
        log::info!(
            "Printing {} on {}",
            document.display(),
            ticket.printer.as_deref().unwrap_or("default printer")
        );

        let result = self
            .runner
            .run(&command)
            .await
            .and_then(|output| output.into_success(&command.program))
            .map(|_| ());

        if let Err(e) = transformed.cleanup() {
            log::warn!("Failed to remove temporary print file: {}", e);
        }

        result
    }

    /// [`submit`](Self::submit) reported as an outcome record
    pub async fn print(&self, document: &Path, settings: PrintSettings) -> PrintOutcome {
        match self.submit(document, settings).await {
            Ok(()) => PrintOutcome::ok(),
            Err(e) => {
                log::error!("Print of {} failed: {}", document.display(), e);
                PrintOutcome::failed(e.to_string())
            }
        }
    }
}

/// Product margins (when a product is referenced) plus the settings offset
fn crop_spec(settings: &PrintSettings, product: Option<&PaperProduct>) -> CropSpec {
    let margins = product.map(PaperProduct::margins).unwrap_or_default();
    let offset = Offset::new(
        settings.offset_x.unwrap_or(0.0),
        settings.offset_y.unwrap_or(0.0),
    );
    CropSpec::new(margins, offset)
}
