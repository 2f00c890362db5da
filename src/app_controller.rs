use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::file_utils::{FileManager, FileType};
use crate::language_utils;
use crate::sentence_split::{resplit_track, RuleSentenceSplitter};
use crate::subtitle_track::SubtitleTrack;
use crate::timeline::TimelineAssembler;
use crate::transcript::Transcript;

// @module: Application controller for subtitle synthesis

/// Main application controller for subtitle timeline synthesis
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.language.is_empty()
    }

    /// Run the main workflow with an input file and output directory.
    ///
    /// A JSON transcript goes through the full synthesis pipeline; an SRT
    /// input skips synthesis and only gets the sentence re-split stage.
    pub fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        FileManager::ensure_dir(&output_dir)?;

        let output_path = output_dir.join(self.subtitle_output_filename(&input_file));
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, output already exists (use -f to force overwrite): {:?}", output_path);
            return Ok(());
        }

        let file_type = FileManager::detect_file_type(&input_file)?;

        match file_type {
            FileType::Transcript => {
                self.synthesize_to(&input_file, &output_path)?;
            }
            FileType::Subtitle => {
                info!("Detected subtitle file, skipping synthesis and re-splitting sentences only");
                self.resplit_file(&input_file, &output_path)?;
            }
            FileType::Unknown => {
                return Err(anyhow::anyhow!(
                    "Unsupported input file (expected a JSON transcript or an SRT subtitle): {:?}",
                    input_file
                ));
            }
        }

        info!("Finished {:?} in {:.2}s", input_file.file_name().unwrap_or_default(), start_time.elapsed().as_secs_f64());
        Ok(())
    }

    /// Process every transcript file found under a directory
    pub fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        info!("Processing transcript folder: {:?}", input_dir);

        let transcripts = FileManager::find_files(&input_dir, "json")?;
        if transcripts.is_empty() {
            warn!("No transcript files found in {:?}", input_dir);
            return Ok(());
        }

        let mut processed_count = 0;
        for transcript_path in transcripts {
            let output_dir = transcript_path
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf();

            // A single bad transcript must not abort the folder run
            if let Err(e) = self.run(transcript_path.clone(), output_dir, force_overwrite) {
                log::error!("Error processing {:?}: {}", transcript_path, e);
            } else {
                processed_count += 1;
            }
        }

        info!("Finished processing {} transcript(s)", processed_count);
        Ok(())
    }

    /// Full pipeline: transcript -> assembled track -> SRT on disk -> reload
    /// -> sentence re-split -> final SRT.
    ///
    /// The intermediate write/reload keeps the final artifact derived from
    /// exactly what was serialized, so the re-split stage sees the same track
    /// a later consumer of the file would.
    pub fn synthesize_to(&self, input_file: &Path, output_path: &Path) -> Result<()> {
        let transcript = Transcript::load(input_file)?;

        if let Some(transcript_language) = &transcript.language {
            if !transcript_language.eq_ignore_ascii_case(&self.config.language) {
                warn!(
                    "Transcript language '{}' differs from configured '{}'",
                    transcript_language, self.config.language
                );
            }
        }

        let intervals = transcript.intervals();
        if intervals.is_empty() {
            warn!("Transcript contains no usable segments: {:?}", input_file);
            return Ok(());
        }

        debug!("Assembling timeline from {} interval(s)", intervals.len());

        let progress = ProgressBar::new(intervals.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} intervals")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let assembler = TimelineAssembler::new(
            self.config.subtitle.max_line_width,
            self.config.subtitle.max_lines_per_entry,
        );
        let mut transcriber = transcript.transcriber().with_progress(progress.clone());

        let track = assembler.assemble(&intervals, &mut transcriber)?;
        progress.finish_and_clear();

        if track.is_empty() {
            warn!("No speech recognized in any segment, writing empty subtitle file");
        }

        track.write_to_srt(output_path)
            .with_context(|| format!("Failed to write subtitle file: {:?}", output_path))?;
        info!("Synthesized {} subtitle entries", track.len());

        // Reload the artifact we just wrote and re-split multi-sentence entries
        let reloaded = SubtitleTrack::parse_srt_file(output_path)?;
        let final_track = resplit_track(&reloaded, &RuleSentenceSplitter);

        if final_track.len() != reloaded.len() {
            debug!(
                "Sentence re-split: {} entries -> {}",
                reloaded.len(),
                final_track.len()
            );
        }

        final_track.write_to_srt(output_path)
            .with_context(|| format!("Failed to write subtitle file: {:?}", output_path))?;
        info!("Wrote {} entries to {:?}", final_track.len(), output_path);

        Ok(())
    }

    /// Sentence re-split stage applied to an existing SRT file
    pub fn resplit_file(&self, input_file: &Path, output_path: &Path) -> Result<()> {
        let track = SubtitleTrack::parse_srt_file(input_file)?;
        let final_track = resplit_track(&track, &RuleSentenceSplitter);

        final_track.write_to_srt(output_path)
            .with_context(|| format!("Failed to write subtitle file: {:?}", output_path))?;

        info!(
            "Re-split {} entries into {}, wrote {:?}",
            track.len(),
            final_track.len(),
            output_path
        );
        Ok(())
    }

    /// Output filename: `<stem>.<language>.srt` next to the input
    fn subtitle_output_filename(&self, input_file: &Path) -> String {
        let language = language_utils::normalize_to_part1(&self.config.language)
            .unwrap_or_else(|_| self.config.language.to_lowercase());

        let stem = input_file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());

        format!("{}.{}.srt", stem, language)
    }
}
