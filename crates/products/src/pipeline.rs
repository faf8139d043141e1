//! Batch runner: scan the input directory and render every product file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info};

use netcdf_parser::DatasetReader;
use renderer::ColorTable;

use crate::config::OverlayConfig;
use crate::error::Result;
use crate::metadata::{classify, file_name_of, ProductKind};
use crate::processors::{
    run, AodProcessor, CoProcessor, No2Processor, ProcessContext, ProcessOutcome,
    ProductProcessor,
};
use crate::tools::ToolChain;

/// What a batch run did, by file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Output folders written.
    pub rendered: Vec<String>,
    /// Output folders that already existed.
    pub skipped: Vec<String>,
    /// Input files matching no product.
    pub unrecognized: Vec<String>,
    /// Input files that failed (only with failure isolation on).
    pub failed: Vec<String>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Result of handing one file to the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Processed(ProcessOutcome),
    Unrecognized,
}

/// Processes the files of one input directory, one at a time.
pub struct BatchRunner {
    config: OverlayConfig,
    reader: Box<dyn DatasetReader>,
    no2: No2Processor,
    aod: AodProcessor,
    co: CoProcessor,
    tools: ToolChain,
}

impl BatchRunner {
    /// Validate `config` and build the processors.
    ///
    /// The dashboard color table is built here once and lent to every
    /// processor while its contour levels are resolved.
    pub fn new(config: OverlayConfig, reader: Box<dyn DatasetReader>) -> Result<Self> {
        config.validate()?;

        let color_table = ColorTable::dashboard();
        let no2 = No2Processor::new(&config.no2, &color_table)?;
        let aod = AodProcessor::new(&config.aod, &color_table)?;
        let co = CoProcessor::new(&config.co, &color_table)?;
        let tools = ToolChain::from_config(&config.tools);

        Ok(Self {
            config,
            reader,
            no2,
            aod,
            co,
            tools,
        })
    }

    /// Replace the configured external tools.
    pub fn with_tools(mut self, tools: ToolChain) -> Self {
        self.tools = tools;
        self
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn processor(&self, kind: ProductKind) -> &dyn ProductProcessor {
        match kind {
            ProductKind::No2 => &self.no2,
            ProductKind::Aod => &self.aod,
            ProductKind::Co => &self.co,
        }
    }

    /// Regular files directly inside the input directory, sorted by name.
    pub fn input_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.config.input_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Classify and process a single file.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let name = file_name_of(path);
        let Some(kind) = classify(&name) else {
            info!("{}: file not recognized as NO2, AOD, or CO", name);
            return Ok(FileOutcome::Unrecognized);
        };

        let ctx = ProcessContext {
            output_root: &self.config.output_dir,
            reader: self.reader.as_ref(),
            render: &self.config.render,
            tools: &self.tools,
        };
        run(self.processor(kind), path, &ctx).map(FileOutcome::Processed)
    }

    /// Process every input file.
    ///
    /// With `isolate_failures` a failing file is logged and counted and the
    /// batch continues; otherwise the first failure is returned.
    pub fn run(&self) -> Result<BatchSummary> {
        let files = self.input_files()?;
        info!(
            input_dir = %self.config.input_dir.display(),
            output_dir = %self.config.output_dir.display(),
            files = files.len(),
            "Starting batch"
        );

        let mut summary = BatchSummary::default();
        for path in &files {
            match self.process_file(path) {
                Ok(FileOutcome::Processed(ProcessOutcome::Rendered { key, .. })) => {
                    summary.rendered.push(key.folder_name());
                }
                Ok(FileOutcome::Processed(ProcessOutcome::Skipped { key })) => {
                    summary.skipped.push(key.folder_name());
                }
                Ok(FileOutcome::Unrecognized) => {
                    summary.unrecognized.push(file_name_of(path));
                }
                Err(e) if self.config.isolate_failures => {
                    error!(file = %path.display(), error = %e, "Failed to process file");
                    summary.failed.push(file_name_of(path));
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            rendered = summary.rendered.len(),
            skipped = summary.skipped.len(),
            unrecognized = summary.unrecognized.len(),
            failed = summary.failed.len(),
            "Batch complete"
        );
        Ok(summary)
    }
}
