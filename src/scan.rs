use crate::detector::{self, DetectorConfig};
use crate::report::{self, ImageRecord, ScanReport};
use anyhow::{Context, Result};
use image::DynamicImage;
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions scanned, in reporting order. Matching is case-sensitive.
pub const IMAGE_TYPES: &[&str] = &["gif", "jpg", "jpeg"];

#[derive(Debug)]
pub struct ScanOptions {
    pub directory: PathBuf,
    pub config: DetectorConfig,
    pub keep_going: bool,
    pub json: Option<PathBuf>,
}

/// Scan every matching file in the directory and print one result line per
/// image. A decode failure aborts the run unless `keep_going` is set, in
/// which case it is reported to stderr and recorded in the report.
pub fn run(options: &ScanOptions) -> Result<()> {
    let files = collect_images(&options.directory, IMAGE_TYPES)?;
    let mut records = Vec::with_capacity(files.len());

    for (index, path) in files.iter().enumerate() {
        let index = index + 1;
        let basename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        match scan_file(path, &options.config) {
            Ok(bordered) => {
                let verdict = if bordered { "True" } else { "False" };
                println!("Image {index}: {basename} {verdict}");
                records.push(ImageRecord::detected(index, basename, bordered));
            }
            Err(err) if options.keep_going => {
                eprintln!("Image {index}: {basename} failed: {err:#}");
                records.push(ImageRecord::failed(index, basename, format!("{err:#}")));
            }
            Err(err) => return Err(err),
        }
    }

    if let Some(path) = &options.json {
        let report = ScanReport::new(&options.directory, records);
        report::write_report(path, &report)?;
    }

    Ok(())
}

/// Decode a single file and run border detection on it.
///
/// GIF pixels reference a 256-color palette; reduce them to RGB so the
/// comparison happens in the same terms as the other formats.
fn scan_file(path: &Path, config: &DetectorConfig) -> Result<bool> {
    let image =
        image::open(path).with_context(|| format!("failed to decode {}", path.display()))?;

    let image = if path.extension().map_or(false, |ext| ext == "gif") {
        DynamicImage::ImageRgb8(image.to_rgb8())
    } else {
        image
    };

    Ok(detector::detect_border(&image, config)?)
}

/// List matching files directly inside `directory`, grouped by extension in
/// the order given and sorted by name within each group. Subdirectories are
/// not descended into.
fn collect_images(directory: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut groups: Vec<Vec<PathBuf>> = vec![Vec::new(); extensions.len()];

    let entries = fs::read_dir(directory)
        .with_context(|| format!("can't read directory {}", directory.display()))?;
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let slot = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| extensions.iter().position(|candidate| *candidate == ext));
        if let Some(slot) = slot {
            groups[slot].push(path);
        }
    }

    for group in &mut groups {
        group.sort();
    }

    Ok(groups.into_iter().flatten().collect())
}
