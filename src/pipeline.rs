use std::path::PathBuf;

use anyhow::Result;
use serde_json::Value;
use tracing::info;

use crate::core::fields::FieldRecord;
use crate::core::model::{MergedRecord, Token};
use crate::export::StageWriter;
use crate::extract::{ExtractConfig, FieldExtractor};
use crate::grouping::{self, GroupingConfig, GroupingOutcome};
use crate::merge::{self, ExternalRecord};
use crate::ocr;
use crate::refine::{self, RefineRequest, Refiner};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Source file the staged artifact names derive from.
    pub source: PathBuf,
    /// Directory the staged artifacts are written to.
    pub output: PathBuf,
    pub grouping: GroupingConfig,
    pub extract: ExtractConfig,
}

impl PipelineConfig {
    pub fn new(source: PathBuf, output: PathBuf) -> Self {
        Self {
            source,
            output,
            grouping: GroupingConfig::default(),
            extract: ExtractConfig::default(),
        }
    }
}

/// Everything one pipeline run produced, staged artifacts included.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub grouping: GroupingOutcome,
    pub extracted: FieldRecord,
    pub merged: MergedRecord,
    pub refined: Option<Value>,
}

/// Runs the extraction core over one label: spatial grouping and lexical
/// extraction run independently, then the merger resolves them with the
/// optional external record, then the optional refiner gets the result.
/// Each stage persists its JSON artifact before the next one runs.
pub fn run_label(
    config: &PipelineConfig,
    tokens: &[Token],
    external: Option<&ExternalRecord>,
    refiner: Option<&dyn Refiner>,
) -> Result<PipelineOutput> {
    let writer = StageWriter::new(config.output.clone(), &config.source);
    let raw_text = ocr::joined_text(tokens);

    let grouping = grouping::group_sections(tokens, &config.grouping);
    writer.write_stage("bounding_boxes", &grouping)?;
    info!(
        validated = grouping.validated_nutrition.len(),
        "spatial grouping complete"
    );

    let extractor = FieldExtractor::new(config.extract.clone());
    let corrected = extractor.normalize(&raw_text);
    // Pre-extraction snapshot: the cleaned template before any rule runs.
    writer.write_stage("primary_cleaned", &FieldRecord::default())?;
    let extracted = extractor.extract_normalized(&raw_text, &corrected);

    let primary = merge::apply_section_overrides(&extracted, &grouping.sections);
    writer.write_stage("primary_staging", &primary)?;

    let merged = match external {
        Some(record) => {
            let secondary = merge::apply_external_overrides(&primary, record);
            writer.write_stage("secondary_staging", &secondary)?;
            secondary
        }
        None => primary.clone(),
    };

    let refined = match refiner {
        Some(refiner) => {
            let request = RefineRequest {
                raw_text: &raw_text,
                primary: &primary,
                secondary: &merged,
            };
            let response = refiner.refine(&request)?;
            let value = refine::parse_response(&response);
            writer.write_stage("tertiary_staging", &value)?;
            Some(value)
        }
        None => None,
    };

    Ok(PipelineOutput {
        grouping,
        extracted,
        merged,
        refined,
    })
}
