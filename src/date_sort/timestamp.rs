use anyhow::Context;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use std::fs::{File, Metadata};
use std::io::BufReader;
use std::path::Path;

use exif::{In, Reader, Tag, Value};

/// Extensions of still-image containers that can carry EXIF data.
const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "heic", "tif", "tiff", "png", "webp"];

/// The date a file is bucketed under: the embedded capture time for
/// recognized image files, otherwise the modification time. Extraction is
/// best effort; any open, decode or parse failure falls back to the
/// modification time.
pub fn effective_date(path: &Path, metadata: &Metadata) -> anyhow::Result<NaiveDate> {
    if has_image_extension(path) {
        if let Some(date) = capture_date(path) {
            return Ok(date);
        }
    }

    modification_date(path, metadata)
}

fn modification_date(path: &Path, metadata: &Metadata) -> anyhow::Result<NaiveDate> {
    let mtime = metadata
        .modified()
        .with_context(|| format!("No modification time for {:?}", path))?;
    Ok(DateTime::<Local>::from(mtime).date_naive())
}

fn has_image_extension(path: &Path) -> bool {
    let Some(ext) = path.extension() else {
        return false;
    };

    let ext_lower_case = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|val| ext_lower_case.eq(val))
}

/// Earliest valid EXIF date time found in the file, if any.
fn capture_date(path: &Path) -> Option<NaiveDate> {
    let file = File::open(path).ok()?;
    let mut buf_reader = BufReader::new(&file);
    let exif = Reader::new().read_from_container(&mut buf_reader).ok()?;

    let orig = datetime_field(&exif, Tag::DateTimeOriginal);
    let digi = datetime_field(&exif, Tag::DateTimeDigitized);
    let create = datetime_field(&exif, Tag::DateTime);

    [orig, digi, create]
        .into_iter()
        .flatten()
        .min()
        .map(|date_time| date_time.date())
}

fn datetime_field(exif: &exif::Exif, tag: Tag) -> Option<NaiveDateTime> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let Value::Ascii(ref ascii) = field.value else {
        return None;
    };

    let raw = exif::DateTime::from_ascii(ascii.first()?).ok()?;
    to_naive(&raw)
}

// chrono rejects the out-of-range dates the EXIF parser lets through
fn to_naive(dt: &exif::DateTime) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(i32::from(dt.year), u32::from(dt.month), u32::from(dt.day))?
        .and_hms_opt(u32::from(dt.hour), u32::from(dt.minute), u32::from(dt.second))
}
